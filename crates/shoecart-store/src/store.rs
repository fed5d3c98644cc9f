//! # Cart Store
//!
//! The single owner of the shopping cart. Every mutation goes through one of
//! three operations, is validated against live stock, written to durable
//! storage and only then made visible to readers.
//!
//! ## Mutation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartStore Mutation                              │
//! │                                                                         │
//! │  add_product / remove_product / update_product_amount                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mutation lock ◄── one mutation at a time                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate (StockService) ──── Err ──► notify + return CartError         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build new Cart value                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  persist snapshot ─────────── Err ──► notify + return CartError         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  swap into `cart` ◄── readers see it from here on                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quantity Semantics
//! `add_product` is a delta (current + 1); `update_product_amount` sets an
//! absolute amount. Both are bounded by the product's stock.

use serde::{Deserialize, Serialize};
use shoecart_core::validation::{check_stock, validate_amount, validate_product, validate_stock};
use shoecart_core::{
    Cart, CartError, CartTotals, CoreResult, Locale, ProductId, Stock, STORAGE_KEY,
};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::config::StoreConfig;
use crate::error::{StockError, StoreResult};
use crate::notify::{message_for, NotificationSink};
use crate::stock::StockService;
use crate::storage::PersistentStore;

// =============================================================================
// Operation
// =============================================================================

/// The three cart mutations, used to pick a failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartOperation::Add => write!(f, "add"),
            CartOperation::Remove => write!(f, "remove"),
            CartOperation::UpdateAmount => write!(f, "update_amount"),
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Per-store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSettings {
    /// Key the snapshot lives under.
    pub storage_key: String,

    /// Language of user notifications.
    pub locale: Locale,
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            storage_key: STORAGE_KEY.to_string(),
            locale: Locale::default(),
        }
    }
}

impl From<&StoreConfig> for CartSettings {
    fn from(config: &StoreConfig) -> Self {
        CartSettings {
            storage_key: config.storage_key().to_string(),
            locale: config.locale(),
        }
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Cart state manager.
///
/// Share it between tasks with `Arc<CartStore>`; every method takes `&self`.
pub struct CartStore {
    stock: Arc<dyn StockService>,
    storage: Arc<dyn PersistentStore>,
    notifier: Arc<dyn NotificationSink>,
    settings: CartSettings,

    /// Last committed cart.
    cart: RwLock<Cart>,

    /// Held for the whole of a mutation, from first read to commit.
    mutation: Mutex<()>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Creates the store and loads the persisted cart.
    ///
    /// A missing snapshot starts an empty cart. So does an unreadable one:
    /// it is logged and left in place until the next successful mutation
    /// overwrites it.
    ///
    /// # Errors
    ///
    /// Returns error if the persistent store cannot be read at all.
    pub async fn new(
        stock: Arc<dyn StockService>,
        storage: Arc<dyn PersistentStore>,
        notifier: Arc<dyn NotificationSink>,
        settings: CartSettings,
    ) -> StoreResult<Self> {
        let cart = match storage.load(&settings.storage_key).await? {
            Some(snapshot) => match Cart::from_snapshot(&snapshot) {
                Ok(cart) => cart,
                Err(e) => {
                    warn!(
                        key = %settings.storage_key,
                        error = %e,
                        "Discarding unreadable cart snapshot"
                    );
                    Cart::new()
                }
            },
            None => Cart::new(),
        };

        info!(
            key = %settings.storage_key,
            items = cart.len(),
            "Cart loaded"
        );

        Ok(CartStore {
            stock,
            storage,
            notifier,
            settings,
            cart: RwLock::new(cart),
            mutation: Mutex::new(()),
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// A copy of the current cart.
    pub async fn cart(&self) -> Cart {
        self.cart.read().await.clone()
    }

    /// Item count, unit count and subtotal of the current cart.
    pub async fn totals(&self) -> CartTotals {
        CartTotals::from(&*self.cart.read().await)
    }

    pub fn settings(&self) -> &CartSettings {
        &self.settings
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `product_id`.
    ///
    /// A product not yet in the cart is fetched from the catalog and added
    /// with amount 1; otherwise its amount grows by one. Fails with
    /// `OutOfStock` when the new amount would exceed the stock.
    pub async fn add_product(&self, product_id: ProductId) -> CoreResult<Cart> {
        debug!(product_id, "Adding product to cart");
        let result = self.try_add_product(product_id).await;
        self.finish(CartOperation::Add, product_id, result)
    }

    /// Removes the entry for `product_id`.
    pub async fn remove_product(&self, product_id: ProductId) -> CoreResult<Cart> {
        debug!(product_id, "Removing product from cart");
        let result = self.try_remove_product(product_id).await;
        self.finish(CartOperation::Remove, product_id, result)
    }

    /// Sets the amount of an entry already in the cart.
    ///
    /// ## Check Order
    /// 1. Fetch stock (any failure is an upstream failure)
    /// 2. Entry must exist
    /// 3. `amount >= 1`
    /// 4. `amount <= stock`
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> CoreResult<Cart> {
        debug!(product_id, amount, "Updating product amount");
        let result = self.try_update_product_amount(product_id, amount).await;
        self.finish(CartOperation::UpdateAmount, product_id, result)
    }

    async fn try_add_product(&self, product_id: ProductId) -> CoreResult<Cart> {
        let _guard = self.mutation.lock().await;
        let current = self.cart().await;

        let stock = self.fetch_stock(product_id).await?;
        let held = current.amount_of(product_id);
        let desired = held.checked_add(1).ok_or(CartError::OutOfStock {
            product_id,
            requested: held,
            available: stock.amount,
        })?;
        check_stock(&stock, desired)?;

        let updated = if current.contains(product_id) {
            current.with_amount(product_id, desired)?
        } else {
            let product = self
                .stock
                .product(product_id)
                .await
                .map_err(|e| upstream(product_id, e))?;
            validate_product(product_id, &product)?;
            current.with_new_item(&product)
        };

        self.commit(updated).await
    }

    async fn try_remove_product(&self, product_id: ProductId) -> CoreResult<Cart> {
        let _guard = self.mutation.lock().await;
        let updated = self.cart().await.without(product_id)?;
        self.commit(updated).await
    }

    async fn try_update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> CoreResult<Cart> {
        let _guard = self.mutation.lock().await;
        let current = self.cart().await;

        let stock = self.fetch_stock(product_id).await?;

        if !current.contains(product_id) {
            return Err(CartError::ProductNotInCart(product_id));
        }
        validate_amount(product_id, amount)?;
        check_stock(&stock, amount)?;

        let updated = current.with_amount(product_id, amount)?;
        self.commit(updated).await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn fetch_stock(&self, product_id: ProductId) -> CoreResult<Stock> {
        let stock = self
            .stock
            .stock(product_id)
            .await
            .map_err(|e| upstream(product_id, e))?;
        validate_stock(product_id, &stock)?;
        Ok(stock)
    }

    /// Persists `updated`, then makes it the current cart.
    ///
    /// Must be called with the mutation lock held.
    async fn commit(&self, updated: Cart) -> CoreResult<Cart> {
        let snapshot = updated.to_snapshot()?;

        self.storage
            .save(&self.settings.storage_key, &snapshot)
            .await
            .map_err(|e| CartError::Storage(e.to_string()))?;

        *self.cart.write().await = updated.clone();

        info!(
            items = updated.len(),
            units = updated.total_quantity(),
            "Cart committed"
        );

        Ok(updated)
    }

    /// Reports a failed operation to the user and hands the result back.
    fn finish(
        &self,
        operation: CartOperation,
        product_id: ProductId,
        result: CoreResult<Cart>,
    ) -> CoreResult<Cart> {
        if let Err(ref err) = result {
            match err {
                CartError::Upstream { .. }
                | CartError::Storage(_)
                | CartError::Snapshot(_)
                | CartError::Validation(_) => {
                    error!(%operation, product_id, error = %err, "Cart operation failed");
                }
                _ => {
                    warn!(%operation, product_id, error = %err, "Cart operation rejected");
                }
            }

            self.notifier
                .report_error(message_for(self.settings.locale, operation, err.kind()));
        }

        result
    }
}

fn upstream(product_id: ProductId, err: StockError) -> CartError {
    CartError::Upstream {
        product_id,
        reason: err.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
