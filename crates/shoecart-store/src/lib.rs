//! # shoecart-store: Cart State Manager
//!
//! The storefront's cart: an in-memory list of entries, validated against
//! the stock API on every mutation and mirrored to durable storage.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartStore Collaborators                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    CartStore (store.rs)                          │  │
//! │  │                                                                  │  │
//! │  │  add_product(id)            ── delta: current + 1               │  │
//! │  │  update_product_amount(id,n)── absolute: set to n               │  │
//! │  │  remove_product(id)                                             │  │
//! │  │  cart() / totals()          ── read accessors                   │  │
//! │  └───────┬─────────────────────────┬───────────────────────┬────────┘  │
//! │          ▼                         ▼                       ▼           │
//! │  ┌────────────────┐  ┌─────────────────────┐  ┌──────────────────────┐ │
//! │  │ StockService   │  │  PersistentStore    │  │  NotificationSink    │ │
//! │  │                │  │                     │  │                      │ │
//! │  │ GET stock/{id} │  │ "@RocketShoes:cart" │  │ report_error(msg)    │ │
//! │  │ GET products/  │  │ JSON snapshot       │  │ toast / log / chan   │ │
//! │  └────────────────┘  └─────────────────────┘  └──────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `CartStore`, the only component that mutates the cart
//! - [`stock`] - `StockService` trait, HTTP client and static catalog
//! - [`storage`] - `PersistentStore` trait, SQLite and in-memory stores
//! - [`notify`] - `NotificationSink` trait and the user message catalog
//! - [`config`] - Store configuration (TOML + environment)
//! - [`error`] - Error types for the collaborators
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shoecart_store::{CartSettings, CartStore, HttpStockService, SqliteStore, TracingNotifier};
//!
//! let stock = Arc::new(HttpStockService::new("http://localhost:3333", timeout)?);
//! let storage = Arc::new(SqliteStore::new(db));
//! let store = CartStore::new(stock, storage, Arc::new(TracingNotifier), CartSettings::default()).await?;
//!
//! store.add_product(1).await.ok();
//! println!("{} items", store.cart().await.len());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod notify;
pub mod stock;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ApiSettings, StorageSettings, StoreConfig, UiSettings};
pub use error::{StockError, StockResult, StorageError, StorageResult, StoreError, StoreResult};
pub use notify::{
    message_for, ChannelNotifier, Notice, NoOpNotifier, NotificationSink, TracingNotifier,
};
pub use stock::{Catalog, HttpStockService, StaticCatalog, StockService};
pub use storage::{MemoryStore, PersistentStore, SqliteStore};
pub use store::{CartOperation, CartSettings, CartStore};
