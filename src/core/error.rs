/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for the payment engine
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Caller passed a value outside the documented domain (not retryable)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Date could not be parsed or a calendar computation left the supported range
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal invariant violations
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        AppError::InvalidArgument(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        AppError::InvalidDate(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
