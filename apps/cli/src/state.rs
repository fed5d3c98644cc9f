//! # Application State
//!
//! Everything a command needs, built once per invocation.
//!
//! ```text
//! StoreConfig ──► Database (SQLite, WAL) ──► SqliteStore ─┐
//!             ──► HttpStockService | StaticCatalog ───────┼──► CartStore
//!             ──► ChannelNotifier ──► notices receiver ───┘
//! ```

use shoecart_core::Locale;
use shoecart_db::{Database, DbConfig};
use shoecart_store::{
    CartSettings, CartStore, ChannelNotifier, HttpStockService, Notice, SqliteStore,
    StaticCatalog, StockService, StoreConfig,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::error::CliResult;

pub struct AppContext {
    pub store: Arc<CartStore>,
    db: Database,
    notices: mpsc::UnboundedReceiver<Notice>,
}

impl AppContext {
    /// Opens the database and wires the cart store.
    ///
    /// With `catalog` set, stock and products come from that JSON file and
    /// the API is never contacted.
    pub async fn open(config: &StoreConfig, catalog: Option<&Path>) -> CliResult<Self> {
        let db_path = config.database_path();
        info!(?db_path, "Database path determined");
        let db = Database::new(DbConfig::new(db_path)).await?;

        let stock: Arc<dyn StockService> = match catalog {
            Some(path) => Arc::new(StaticCatalog::from_file(path)?),
            None => Arc::new(HttpStockService::new(
                &config.api.base_url,
                config.timeout(),
            )?),
        };

        let (notifier, notices) = ChannelNotifier::channel();
        let store = CartStore::new(
            stock,
            Arc::new(SqliteStore::new(db.clone())),
            Arc::new(notifier),
            CartSettings::from(config),
        )
        .await?;

        Ok(AppContext {
            store: Arc::new(store),
            db,
            notices,
        })
    }

    pub fn locale(&self) -> Locale {
        self.store.settings().locale
    }

    /// Notifications raised since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        let mut drained = Vec::new();
        while let Ok(notice) = self.notices.try_recv() {
            drained.push(notice);
        }
        drained
    }

    pub async fn close(self) {
        self.db.close().await;
    }
}
