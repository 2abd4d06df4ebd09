pub mod api;
pub mod auth;
pub mod config;
pub mod service;
pub mod telemetry;

pub use config::Config;
pub use service::{Service, ServiceResult};
