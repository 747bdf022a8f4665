//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `TdError` as one variant
//! via `#[from]`, so parameter errors surface unchanged at every layer.

use thiserror::Error;

/// The top-level error type for `td-core`.
#[derive(Debug, Error)]
pub enum TdError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl TdError {
    /// Shorthand for [`TdError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TdError::InvalidParameter { name, reason: reason.into() }
    }
}

/// Shorthand result type for `td-core`.
pub type TdResult<T> = Result<T, TdError>;
