pub mod datetime;

mod end_date;
pub use end_date::*;

mod expiry;
pub use expiry::*;

mod aggregate;
pub use aggregate::*;
