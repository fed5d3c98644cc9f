//! # Stock Service
//!
//! Read-only lookups against the storefront API: how many units of a product
//! exist, and the product's display details.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront API                                  │
//! │                                                                         │
//! │  GET {base}/stock/{id}     ──►  { "id": 1, "amount": 3 }               │
//! │  GET {base}/products/{id}  ──►  { "id": 1, "title": "…",               │
//! │                                   "price": 179.9, "image": "…" }       │
//! │                                                                         │
//! │  404 ──► StockError::NotFound                                           │
//! │  other non-2xx ──► StockError::Api { status, message }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Implementations
//! - [`HttpStockService`] talks to a live API with `reqwest`
//! - [`StaticCatalog`] serves a fixed catalog from memory or a JSON file,
//!   with an offline switch for failure scenarios

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shoecart_core::{Product, ProductId, Stock};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use crate::error::{StockError, StockResult};

// =============================================================================
// Trait
// =============================================================================

/// Source of truth for stock levels and product details.
///
/// Implementations must be shareable across tasks; the cart store holds
/// one behind an `Arc<dyn StockService>`.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Units currently available for `product_id`.
    async fn stock(&self, product_id: ProductId) -> StockResult<Stock>;

    /// Display details for `product_id`.
    async fn product(&self, product_id: ProductId) -> StockResult<Product>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// `StockService` backed by the storefront's REST API.
#[derive(Debug, Clone)]
pub struct HttpStockService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpStockService {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the URL does not parse or the HTTP client fails to build.
    pub fn new(base_url: &str, timeout: Duration) -> StockResult<Self> {
        // Url::join drops the last path segment unless it ends with a slash
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized)?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(HttpStockService { client, base_url })
    }

    /// The API root all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Execute a GET request and decode the JSON body.
    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        product_id: ProductId,
    ) -> StockResult<T> {
        let url = self.base_url.join(path)?;
        debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| StockError::Parse(format!("Failed to parse response: {e}")));
        }

        if status.as_u16() == 404 {
            return Err(StockError::NotFound(product_id));
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(StockError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl StockService for HttpStockService {
    async fn stock(&self, product_id: ProductId) -> StockResult<Stock> {
        self.get(&format!("stock/{product_id}"), product_id).await
    }

    async fn product(&self, product_id: ProductId) -> StockResult<Product> {
        self.get(&format!("products/{product_id}"), product_id).await
    }
}

// =============================================================================
// Static Catalog
// =============================================================================

/// On-disk catalog layout, the same shape the storefront's mock API serves.
///
/// ```json
/// {
///   "products": [{ "id": 1, "title": "Tênis", "price": 179.9, "image": "…" }],
///   "stock":    [{ "id": 1, "amount": 3 }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub stock: Vec<Stock>,
}

/// In-memory `StockService`.
///
/// Used by the CLI when pointed at a catalog file, and by tests that need
/// to script stock levels, take the service offline or count calls.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, i64>>,
    offline: AtomicBool,
    stock_calls: AtomicUsize,
    product_calls: AtomicUsize,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from its serialized form.
    pub fn from_catalog(catalog: Catalog) -> Self {
        let products = catalog
            .products
            .into_iter()
            .map(|product| (product.id, product))
            .collect();
        let stock = catalog
            .stock
            .into_iter()
            .map(|stock| (stock.id, stock.amount))
            .collect();

        StaticCatalog {
            products: RwLock::new(products),
            stock: RwLock::new(stock),
            ..Self::default()
        }
    }

    /// Loads a catalog from a JSON file.
    pub fn from_file(path: &Path) -> StockResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StockError::Unavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        let catalog: Catalog = serde_json::from_str(&contents)?;

        debug!(
            path = %path.display(),
            products = catalog.products.len(),
            "Loaded static catalog"
        );

        Ok(Self::from_catalog(catalog))
    }

    /// Adds or replaces a product together with its stock level.
    pub async fn insert(&self, product: Product, amount: i64) {
        self.stock.write().await.insert(product.id, amount);
        self.products.write().await.insert(product.id, product);
    }

    /// Changes the stock level of a product.
    pub async fn set_stock(&self, product_id: ProductId, amount: i64) {
        self.stock.write().await.insert(product_id, amount);
    }

    /// While offline every lookup fails with [`StockError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stock lookups served so far.
    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    /// Number of product lookups served so far.
    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> StockResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            warn!("Static catalog is offline");
            return Err(StockError::Unavailable("catalog offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StockService for StaticCatalog {
    async fn stock(&self, product_id: ProductId) -> StockResult<Stock> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        self.stock
            .read()
            .await
            .get(&product_id)
            .map(|&amount| Stock {
                id: product_id,
                amount,
            })
            .ok_or(StockError::NotFound(product_id))
    }

    async fn product(&self, product_id: ProductId) -> StockResult<Product> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        self.products
            .read()
            .await
            .get(&product_id)
            .cloned()
            .ok_or(StockError::NotFound(product_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shoecart_core::Money;

    fn sneaker(id: ProductId) -> Product {
        Product {
            id,
            title: format!("Tênis {id}"),
            price: Money::from_cents(17990),
            image: format!("https://cdn.example.com/{id}.jpg"),
        }
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let service =
            HttpStockService::new("http://localhost:3333/api", Duration::from_secs(1)).unwrap();
        assert_eq!(service.base_url().as_str(), "http://localhost:3333/api/");
        assert_eq!(
            service.base_url().join("stock/3").unwrap().as_str(),
            "http://localhost:3333/api/stock/3"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpStockService::new("localhost", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, StockError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_static_catalog_lookups() {
        let catalog = StaticCatalog::new();
        catalog.insert(sneaker(1), 3).await;

        assert_eq!(catalog.stock(1).await.unwrap(), Stock { id: 1, amount: 3 });
        assert_eq!(catalog.product(1).await.unwrap().title, "Tênis 1");
        assert!(matches!(
            catalog.stock(2).await,
            Err(StockError::NotFound(2))
        ));
        assert_eq!(catalog.stock_calls(), 2);
        assert_eq!(catalog.product_calls(), 1);
    }

    #[tokio::test]
    async fn test_static_catalog_offline() {
        let catalog = StaticCatalog::new();
        catalog.insert(sneaker(1), 3).await;
        catalog.set_offline(true);

        assert!(matches!(
            catalog.stock(1).await,
            Err(StockError::Unavailable(_))
        ));

        catalog.set_offline(false);
        assert!(catalog.stock(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.json");
        std::fs::write(
            &path,
            r#"{
                "products": [{"id": 1, "title": "Tênis", "price": 179.9, "image": "a.jpg"}],
                "stock": [{"id": 1, "amount": 5}]
            }"#,
        )
        .unwrap();

        let catalog = StaticCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.stock(1).await.unwrap().amount, 5);
        assert_eq!(
            catalog.product(1).await.unwrap().price,
            Money::from_cents(17990)
        );
    }
}
