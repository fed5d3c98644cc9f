//! # CLI Error Types
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in shoecart                               │
//! │                                                                         │
//! │  Startup (config, database, stock client)                               │
//! │       │                                                                 │
//! │       └── failure ──► CliError ──► stderr, exit code 1                  │
//! │                                                                         │
//! │  Cart command (add, remove, update)                                     │
//! │       │                                                                 │
//! │       └── failure ──► CartError ──► ApiError in output                  │
//! │                         │                                               │
//! │                         └──► user notification (stderr), exit code 0    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shoecart_core::{CartError, CartErrorKind};
use thiserror::Error;

/// Result type alias for CLI startup.
pub type CliResult<T> = Result<T, CliError>;

/// Failures that stop the CLI before or after a cart command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] shoecart_store::StoreError),

    #[error(transparent)]
    Database(#[from] shoecart_db::DbError),

    #[error(transparent)]
    Stock(#[from] shoecart_store::StockError),

    #[error("Failed to render output: {0}")]
    Output(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Output(err.to_string())
    }
}

/// A failed cart command as it appears in JSON output.
///
/// ```json
/// {
///   "code": "OUT_OF_STOCK",
///   "message": "Insufficient stock for product 1: available 1, requested 2"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Technical description; the user-facing text travels as a notification
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    OutOfStock,
    NotInCart,
    InvalidAmount,
    UpstreamFailure,
    StorageError,
}

impl From<CartErrorKind> for ErrorCode {
    fn from(kind: CartErrorKind) -> Self {
        match kind {
            CartErrorKind::OutOfStock => ErrorCode::OutOfStock,
            CartErrorKind::ProductNotInCart => ErrorCode::NotInCart,
            CartErrorKind::InvalidAmount => ErrorCode::InvalidAmount,
            CartErrorKind::UpstreamFailure => ErrorCode::UpstreamFailure,
            CartErrorKind::Storage => ErrorCode::StorageError,
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        ApiError {
            code: err.kind().into(),
            message: err.to_string(),
        }
    }
}
