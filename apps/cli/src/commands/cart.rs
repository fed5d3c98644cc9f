//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add  ┌──────────┐  update/add  ┌──────────┐             │
//! │  │  Empty   │──────►│ 1 entry  │─────────────►│ n units  │             │
//! │  │  Cart    │       │ amount 1 │              │ ≤ stock  │             │
//! │  └──────────┘       └──────────┘              └──────────┘             │
//! │       ▲                  │                         │                    │
//! │       └──── remove ──────┴─────────── remove ──────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shoecart_core::{Cart, CartItem, CartTotals, CoreResult, ProductId};
use shoecart_store::CartStore;
use tracing::debug;

use crate::error::ApiError;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
pub async fn get_cart(store: &CartStore) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(&store.cart().await)
}

/// Adds one unit of a product.
pub async fn add_to_cart(
    store: &CartStore,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, "add_to_cart command");
    respond(store.add_product(product_id).await)
}

/// Sets the quantity of a product already in the cart.
pub async fn update_cart_item(
    store: &CartStore,
    product_id: ProductId,
    amount: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, amount, "update_cart_item command");
    respond(store.update_product_amount(product_id, amount).await)
}

/// Removes a product from the cart.
pub async fn remove_from_cart(
    store: &CartStore,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, "remove_from_cart command");
    respond(store.remove_product(product_id).await)
}

fn respond(result: CoreResult<Cart>) -> Result<CartResponse, ApiError> {
    result
        .map(|cart| CartResponse::from(&cart))
        .map_err(ApiError::from)
}
