//! # shoecart-db: Snapshot Persistence for shoecart
//!
//! Durable key-value storage on SQLite with sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        shoecart Data Flow                               │
//! │                                                                         │
//! │  CartStore commits a mutation                                          │
//! │       │                                                                 │
//! │       ▼  PersistentStore::save("@RocketShoes:cart", json)              │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shoecart-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│   (kv.rs)     │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/shoecart/shoecart.db  (kv_store table)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shoecart_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("shoecart.db")).await?;
//! db.kv().put("@RocketShoes:cart", "[]").await?;
//! let snapshot = db.kv().get("@RocketShoes:cart").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::kv::KeyValueRepository;
