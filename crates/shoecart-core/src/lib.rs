//! # shoecart-core: Pure Cart Rules for the RocketShoes Storefront
//!
//! This crate holds the cart data model and every rule the cart enforces,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        shoecart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI / CLI                          │   │
//! │  │    Product list ──► Cart page ──► Quantity stepper             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              shoecart-store (CartStore)                         │   │
//! │  │    add_product, remove_product, update_product_amount          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shoecart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CartError │  │  amount   │  │   │
//! │  │   │  Cart     │  │  Locale   │  │           │  │  stock    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Stock, CartItem, Cart)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Quantity and stock rules
//!
//! ## Example Usage
//!
//! ```rust
//! use shoecart_core::{Cart, Money, Product};
//!
//! let sneaker = Product {
//!     id: 1,
//!     title: "Tênis de Caminhada Leve Confortável".to_string(),
//!     price: Money::from_cents(17990),
//!     image: "https://example.com/tenis1.jpg".to_string(),
//! };
//!
//! let cart = Cart::new().with_new_item(&sneaker);
//! assert_eq!(cart.amount_of(1), 1);
//! assert_eq!(cart.subtotal().cents(), 17990);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CartError, CartErrorKind, CoreResult, ValidationError};
pub use money::{Locale, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key under which the cart snapshot is persisted.
///
/// Shared with the web storefront, which reads the same key from
/// `localStorage`, so the value must not change.
pub const STORAGE_KEY: &str = "@RocketShoes:cart";
