//! # Error Types
//!
//! Domain-specific error types for shoecart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shoecart-core errors (this file)                                      │
//! │  ├── CartError        - Why a cart operation was rejected              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shoecart-db errors                                                    │
//! │  └── DbError          - SQLite failures                                │
//! │                                                                         │
//! │  shoecart-store errors                                                 │
//! │  ├── StockError       - HTTP / lookup failures                         │
//! │  └── StorageError     - Snapshot read/write failures                   │
//! │                                                                         │
//! │  Flow: StockError/StorageError → CartError → user message (notify.rs)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros
//! 2. Include context in error messages (product id, amounts)
//! 3. The user-facing message is picked from the error *kind*, never parsed
//!    out of `to_string()`

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Cart Error
// =============================================================================

/// Why a cart operation did not go through.
///
/// Every variant leaves the cart unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Desired amount is above the units in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart holds 3 of product 7, stock says 3
    ///      │
    ///      ▼
    /// add_product(7) → desired 4
    ///      │
    ///      ▼
    /// OutOfStock { product_id: 7, requested: 4, available: 3 }
    ///      │
    ///      ▼
    /// Toast: "Quantidade solicitada fora de estoque"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Remove or update referenced a product with no cart entry.
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(ProductId),

    /// Update asked for a quantity below 1.
    #[error("Invalid amount {amount} for product {product_id}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    /// The stock or product lookup failed.
    #[error("Lookup for product {product_id} failed: {reason}")]
    Upstream {
        product_id: ProductId,
        reason: String,
    },

    /// Writing the snapshot failed.
    #[error("Cart storage failed: {0}")]
    Storage(String),

    /// A snapshot could not be encoded or decoded.
    #[error("Invalid cart snapshot: {0}")]
    Snapshot(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Coarse classification used to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartErrorKind {
    OutOfStock,
    ProductNotInCart,
    InvalidAmount,
    UpstreamFailure,
    Storage,
}

impl CartError {
    /// Returns the kind of failure.
    pub fn kind(&self) -> CartErrorKind {
        match self {
            CartError::OutOfStock { .. } => CartErrorKind::OutOfStock,
            CartError::ProductNotInCart(_) => CartErrorKind::ProductNotInCart,
            CartError::InvalidAmount { .. } => CartErrorKind::InvalidAmount,
            CartError::Upstream { .. } | CartError::Validation(_) => {
                CartErrorKind::UpstreamFailure
            }
            CartError::Storage(_) | CartError::Snapshot(_) => CartErrorKind::Storage,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Payload refers to a different product than requested.
    #[error("{field} mismatch: expected {expected}, got {actual}")]
    Mismatch {
        field: String,
        expected: String,
        actual: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CoreResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
