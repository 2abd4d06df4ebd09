use thiserror::Error as ThisError;

/// Errors surfaced to callers of the front desk operations.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    #[error("Invalid plan: {0:?}")]
    InvalidPlan(String),
    #[error("Not found")]
    NotFound,
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Ambiguous results ({0:?}) for query")]
    Ambiguous(usize),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Stable code for the presentation layer.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPlan(_) => "invalid_plan",
            Self::NotFound => "not_found",
            Self::Validation(_) => "validation_error",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::Ambiguous(_) => "ambiguous",
        }
    }

    /// Recover the domain error from a store result. Anything that
    /// is not already one of ours is a failing store.
    pub fn classify(err: anyhow::Error) -> Self {
        match err.downcast::<Error>() {
            Ok(err) => err,
            Err(err) => Self::StoreUnavailable(format!("{:#}", err)),
        }
    }
}
