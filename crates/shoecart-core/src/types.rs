//! # Domain Types
//!
//! Core domain types for the storefront cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │     Stock       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id, title      │   │  id             │       │
//! │  │  title, image   │   │  price, image   │   │  amount         │       │
//! │  │  price          │   │  amount (qty)   │   │  (available)    │       │
//! │  └─────────────────┘   └────────┬────────┘   └─────────────────┘       │
//! │                                 │                                       │
//! │                        ┌────────▼────────┐   ┌─────────────────┐       │
//! │                        │      Cart       │──►│   CartTotals    │       │
//! │                        │  Vec<CartItem>  │   │  derived view   │       │
//! │                        │  unique by id   │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Value Semantics
//! `Cart` is never mutated in place by the store. Every change produces a
//! new `Cart` through the `with_*` / `without` methods, and the value that
//! gets persisted is the value that gets committed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CoreResult};
use crate::money::Money;

/// Product identifier as issued by the storefront API.
pub type ProductId = u64;

// =============================================================================
// Product
// =============================================================================

/// A catalog product as returned by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    #[ts(type = "number")]
    pub id: ProductId,

    pub title: String,

    /// Unit price, a decimal number on the wire.
    #[ts(type = "number")]
    pub price: Money,

    /// Image URL.
    pub image: String,
}

// =============================================================================
// Stock
// =============================================================================

/// Units available for a product, as returned by `GET /stock/{id}`.
///
/// Remote-authoritative. The cart only consults it at mutation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stock {
    #[ts(type = "number")]
    pub id: ProductId,
    #[ts(type = "number")]
    pub amount: i64,
}

// =============================================================================
// Cart Item
// =============================================================================

/// An entry in the cart: the product fields plus the quantity held.
///
/// ## Snapshot Shape
/// ```json
/// { "id": 1, "title": "Tênis", "price": 179.9, "image": "…", "amount": 2 }
/// ```
/// This is the exact shape the web storefront keeps under
/// [`STORAGE_KEY`](crate::STORAGE_KEY), so snapshots written by either side
/// load in the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    #[ts(type = "number")]
    pub id: ProductId,

    pub title: String,

    #[ts(type = "number")]
    pub price: Money,

    pub image: String,

    /// Quantity held in the cart (not the global stock).
    #[ts(type = "number")]
    pub amount: i64,
}

impl CartItem {
    /// Creates a cart entry from a catalog product.
    pub fn from_product(product: &Product, amount: i64) -> Self {
        CartItem {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            amount,
        }
    }

    /// Unit price × amount, saturating.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.amount)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id`
/// - Every `amount` is ≥ 1 (checked by the store before committing)
///
/// Serializes as a bare JSON array of [`CartItem`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from raw entries, keeping the first entry for each id.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut unique: Vec<CartItem> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.iter().any(|existing| existing.id == item.id) {
                unique.push(item);
            }
        }
        Cart { items: unique }
    }

    /// Parses a persisted snapshot.
    pub fn from_snapshot(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CartError::Snapshot(e.to_string()))
    }

    /// Serializes the cart into its persisted snapshot form.
    pub fn to_snapshot(&self) -> CoreResult<String> {
        serde_json::to_string(&self.items).map_err(|e| CartError::Snapshot(e.to_string()))
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up the entry for a product.
    pub fn find(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == product_id)
    }

    /// Quantity held for a product, 0 when absent.
    pub fn amount_of(&self, product_id: ProductId) -> i64 {
        self.find(product_id).map_or(0, |i| i.amount)
    }

    /// Returns true if the product has an entry.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    /// Returns a copy with a new entry (amount 1) appended for `product`.
    ///
    /// If the product is already present the existing entry wins and the
    /// copy is unchanged; callers go through [`Cart::with_amount`] for
    /// existing entries.
    pub fn with_new_item(&self, product: &Product) -> Self {
        let mut items = self.items.clone();
        if !self.contains(product.id) {
            items.push(CartItem::from_product(product, 1));
        }
        Cart { items }
    }

    /// Returns a copy with the entry for `product_id` set to `amount`.
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> CoreResult<Self> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == product_id)
            .ok_or(CartError::ProductNotInCart(product_id))?;

        let mut items = self.items.clone();
        items[index] = CartItem {
            amount,
            ..items[index].clone()
        };
        Ok(Cart { items })
    }

    /// Returns a copy without the entry for `product_id`.
    pub fn without(&self, product_id: ProductId) -> CoreResult<Self> {
        if !self.contains(product_id) {
            return Err(CartError::ProductNotInCart(product_id));
        }

        let items = self
            .items
            .iter()
            .filter(|i| i.id != product_id)
            .cloned()
            .collect();
        Ok(Cart { items })
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all amounts, saturating.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.amount))
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart summary shown beside the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    #[ts(type = "number")]
    pub total_quantity: i64,
    #[ts(type = "number")]
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
