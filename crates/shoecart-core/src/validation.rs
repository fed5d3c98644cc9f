//! # Validation Module
//!
//! The rules every cart mutation is checked against before it commits.
//!
//! ## Where Each Rule Applies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mutation Checks                                    │
//! │                                                                         │
//! │  add_product           update_product_amount       remove_product      │
//! │  ───────────           ─────────────────────       ──────────────      │
//! │  validate_stock        validate_stock              (entry must exist)  │
//! │  check_stock(cur + 1)  entry must exist                                │
//! │  validate_product      validate_amount (≥ 1)                           │
//! │   (new entries only)   check_stock(amount)                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CartError, CoreResult, ValidationError};
use crate::types::{Product, ProductId, Stock};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejects an absolute amount below 1.
///
/// Removal never goes through an amount of 0; it has its own operation.
///
/// ```rust
/// use shoecart_core::validation::validate_amount;
///
/// assert!(validate_amount(1, 1).is_ok());
/// assert!(validate_amount(1, 0).is_err());
/// ```
pub fn validate_amount(product_id: ProductId, amount: i64) -> CoreResult<()> {
    if amount < 1 {
        return Err(CartError::InvalidAmount { product_id, amount });
    }

    Ok(())
}

/// Rejects a requested amount above the units in stock.
///
/// ```rust
/// use shoecart_core::validation::check_stock;
/// use shoecart_core::Stock;
///
/// let stock = Stock { id: 1, amount: 3 };
/// assert!(check_stock(&stock, 3).is_ok());
/// assert!(check_stock(&stock, 4).is_err());
/// ```
pub fn check_stock(stock: &Stock, requested: i64) -> CoreResult<()> {
    if requested > stock.amount {
        return Err(CartError::OutOfStock {
            product_id: stock.id,
            requested,
            available: stock.amount,
        });
    }

    Ok(())
}

/// Checks that a stock payload belongs to the requested product.
pub fn validate_stock(product_id: ProductId, stock: &Stock) -> ValidationResult<()> {
    if stock.id != product_id {
        return Err(ValidationError::Mismatch {
            field: "stock.id".to_string(),
            expected: product_id.to_string(),
            actual: stock.id.to_string(),
        });
    }

    Ok(())
}

/// Checks a product payload before it becomes a cart entry.
///
/// ## Rules
/// - `id` matches the requested product
/// - `title` is not blank
/// - `price` is not negative
pub fn validate_product(product_id: ProductId, product: &Product) -> ValidationResult<()> {
    if product.id != product_id {
        return Err(ValidationError::Mismatch {
            field: "product.id".to_string(),
            expected: product_id.to_string(),
            actual: product.id.to_string(),
        });
    }

    if product.title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if product.price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a storage key.
pub fn validate_storage_key(key: &str) -> ValidationResult<()> {
    if key.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "storage key".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: ProductId, title: &str, cents: i64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price: Money::from_cents(cents),
            image: String::new(),
        }
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(1, 1).is_ok());
        assert!(validate_amount(1, 50).is_ok());
        assert_eq!(
            validate_amount(4, 0),
            Err(CartError::InvalidAmount {
                product_id: 4,
                amount: 0
            })
        );
        assert!(validate_amount(4, -3).is_err());
    }

    #[test]
    fn test_check_stock_boundary() {
        let stock = Stock { id: 2, amount: 5 };
        assert!(check_stock(&stock, 5).is_ok());
        assert_eq!(
            check_stock(&stock, 6),
            Err(CartError::OutOfStock {
                product_id: 2,
                requested: 6,
                available: 5
            })
        );
    }

    #[test]
    fn test_check_stock_zero_available() {
        let stock = Stock { id: 2, amount: 0 };
        assert!(check_stock(&stock, 1).is_err());
    }

    #[test]
    fn test_validate_stock_id() {
        assert!(validate_stock(3, &Stock { id: 3, amount: 1 }).is_ok());
        assert!(validate_stock(3, &Stock { id: 4, amount: 1 }).is_err());
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(1, &product(1, "Tênis", 100)).is_ok());
        assert!(validate_product(1, &product(1, "Tênis", 0)).is_ok());
        assert!(validate_product(1, &product(2, "Tênis", 100)).is_err());
        assert!(validate_product(1, &product(1, "   ", 100)).is_err());
        assert!(validate_product(1, &product(1, "Tênis", -1)).is_err());
    }

    #[test]
    fn test_validate_storage_key() {
        assert!(validate_storage_key(crate::STORAGE_KEY).is_ok());
        assert!(validate_storage_key(" ").is_err());
    }
}
