// Operations
mod operations;
pub use operations::*;

// Errors
mod errors;
pub use errors::*;

// Models
mod plans;
pub use plans::*;

mod members;
pub use members::*;

mod admins;
pub use admins::*;

mod stats;
pub use stats::*;
