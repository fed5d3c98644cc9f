//! # Store Error Types
//!
//! Errors raised by the cart's collaborators. None of these reach the UI
//! directly: the `CartStore` folds them into a [`shoecart_core::CartError`]
//! at its boundary and shows a localized message instead.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   StockError    │  │  StorageError   │  │      StoreError         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotFound       │  │  Database       │  │  InvalidConfig          │ │
//! │  │  Http / Api     │  │  Unavailable    │  │  ConfigLoadFailed       │ │
//! │  │  Parse          │  │                 │  │  Stock / Storage        │ │
//! │  │  InvalidUrl     │  │                 │  │                         │ │
//! │  │  Unavailable    │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shoecart_core::ProductId;
use thiserror::Error;

/// Result type alias for stock service calls.
pub type StockResult<T> = Result<T, StockError>;

/// Result type alias for persistent store calls.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for store setup and configuration.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Stock Service Errors
// =============================================================================

/// Failure talking to the stock/product API.
#[derive(Debug, Error)]
pub enum StockError {
    /// The API has no record for this product.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Invalid response body: {0}")]
    Parse(String),

    /// The configured base URL is unusable.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The service is deliberately offline (static catalog).
    #[error("Stock service unavailable: {0}")]
    Unavailable(String),
}

impl From<url::ParseError> for StockError {
    fn from(err: url::ParseError) -> Self {
        StockError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for StockError {
    fn from(err: serde_json::Error) -> Self {
        StockError::Parse(err.to_string())
    }
}

// =============================================================================
// Persistent Store Errors
// =============================================================================

/// Failure reading or writing the durable snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The SQLite backend failed.
    #[error("Database error: {0}")]
    Database(#[from] shoecart_db::DbError),

    /// The backend refused the operation (quota, read-only, closed).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Setup Errors
// =============================================================================

/// Errors raised while configuring and opening a cart store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// The stock service could not be constructed.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// The persisted snapshot could not be read at startup.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<shoecart_db::DbError> for StoreError {
    fn from(err: shoecart_db::DbError) -> Self {
        StoreError::Storage(StorageError::Database(err))
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_error_display() {
        assert_eq!(StockError::NotFound(7).to_string(), "Product 7 not found");

        let err = StockError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API returned 500: boom");
    }

    #[test]
    fn test_url_error_conversion() {
        let err: StockError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, StockError::InvalidUrl(_)));
    }

    #[test]
    fn test_db_error_conversion() {
        let err: StoreError = shoecart_db::DbError::Internal("closed".into()).into();
        assert!(matches!(err, StoreError::Storage(StorageError::Database(_))));
    }
}
