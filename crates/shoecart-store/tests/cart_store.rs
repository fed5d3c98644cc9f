//! End-to-end behaviour of the cart store against in-memory collaborators
//! and a real SQLite key-value store.

use std::sync::{Arc, Mutex};

use shoecart_core::{Cart, CartError, Locale, Money, Product, ProductId, STORAGE_KEY};
use shoecart_db::{Database, DbConfig};
use shoecart_store::{
    CartSettings, CartStore, MemoryStore, NotificationSink, PersistentStore, SqliteStore,
    StaticCatalog,
};

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn report_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

struct Harness {
    store: Arc<CartStore>,
    catalog: Arc<StaticCatalog>,
    storage: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
}

fn sneaker(id: ProductId) -> Product {
    Product {
        id,
        title: format!("Tênis {id}"),
        price: Money::from_cents(17990),
        image: format!("https://cdn.example.com/tenis{id}.jpg"),
    }
}

async fn harness_with(stock: &[(ProductId, i64)], locale: Locale) -> Harness {
    let catalog = Arc::new(StaticCatalog::new());
    for &(id, amount) in stock {
        catalog.insert(sneaker(id), amount).await;
    }
    let storage = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());

    let store = CartStore::new(
        catalog.clone(),
        storage.clone(),
        notifier.clone(),
        CartSettings {
            storage_key: STORAGE_KEY.to_string(),
            locale,
        },
    )
    .await
    .unwrap();

    Harness {
        store: Arc::new(store),
        catalog,
        storage,
        notifier,
    }
}

async fn harness(stock: &[(ProductId, i64)]) -> Harness {
    harness_with(stock, Locale::PtBr).await
}

async fn persisted(storage: &MemoryStore) -> Cart {
    Cart::from_snapshot(&storage.raw(STORAGE_KEY).await.unwrap()).unwrap()
}

// =============================================================================
// add_product
// =============================================================================

#[tokio::test]
async fn test_add_to_empty_cart() {
    let h = harness(&[(1, 3)]).await;

    let cart = h.store.add_product(1).await.unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.amount_of(1), 1);
    assert_eq!(cart.find(1).unwrap().title, "Tênis 1");
    assert_eq!(persisted(&h.storage).await, cart);
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_add_twice_increments_single_entry() {
    let h = harness(&[(1, 2)]).await;

    h.store.add_product(1).await.unwrap();
    let cart = h.store.add_product(1).await.unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.amount_of(1), 2);
    assert_eq!(persisted(&h.storage).await, cart);
}

#[tokio::test]
async fn test_add_beyond_stock_is_rejected() {
    let h = harness(&[(1, 1)]).await;
    let before = h.store.add_product(1).await.unwrap();

    let err = h.store.add_product(1).await.unwrap_err();

    assert!(matches!(
        err,
        CartError::OutOfStock {
            product_id: 1,
            requested: 2,
            available: 1
        }
    ));
    assert_eq!(h.store.cart().await, before);
    assert_eq!(persisted(&h.storage).await, before);
    assert_eq!(
        h.notifier.messages(),
        vec!["Quantidade solicitada fora de estoque"]
    );
}

#[tokio::test]
async fn test_add_checks_live_stock_each_time() {
    let h = harness(&[(1, 5)]).await;
    h.store.add_product(1).await.unwrap();
    h.store.add_product(1).await.unwrap();

    h.catalog.set_stock(1, 2).await;

    let err = h.store.add_product(1).await.unwrap_err();
    assert!(matches!(
        err,
        CartError::OutOfStock {
            product_id: 1,
            requested: 3,
            available: 2
        }
    ));
    assert_eq!(h.store.cart().await.amount_of(1), 2);
    assert_eq!(
        h.notifier.messages(),
        vec!["Quantidade solicitada fora de estoque"]
    );
}

#[tokio::test]
async fn test_add_with_zero_stock_never_fetches_product() {
    let h = harness(&[(1, 0)]).await;

    assert!(h.store.add_product(1).await.is_err());
    assert_eq!(h.catalog.product_calls(), 0);
    assert!(h.store.cart().await.is_empty());
    assert_eq!(h.storage.raw(STORAGE_KEY).await, None);
}

#[tokio::test]
async fn test_add_unknown_product_reports_adding_error() {
    let h = harness(&[]).await;

    let err = h.store.add_product(42).await.unwrap_err();

    assert!(matches!(err, CartError::Upstream { product_id: 42, .. }));
    assert!(h.store.cart().await.is_empty());
    assert_eq!(h.notifier.messages(), vec!["Erro na adição do produto"]);
}

#[tokio::test]
async fn test_add_while_stock_service_offline() {
    let h = harness(&[(1, 5)]).await;
    h.store.add_product(1).await.unwrap();
    h.catalog.set_offline(true);

    assert!(h.store.add_product(1).await.is_err());
    assert_eq!(h.store.cart().await.amount_of(1), 1);
    assert_eq!(h.notifier.messages(), vec!["Erro na adição do produto"]);
}

// =============================================================================
// remove_product
// =============================================================================

#[tokio::test]
async fn test_remove_present_entry() {
    let h = harness(&[(1, 5), (2, 5)]).await;
    h.store.add_product(1).await.unwrap();
    h.store.add_product(2).await.unwrap();

    let cart = h.store.remove_product(1).await.unwrap();

    assert!(!cart.contains(1));
    assert!(cart.contains(2));
    assert_eq!(persisted(&h.storage).await, cart);
}

#[tokio::test]
async fn test_remove_absent_entry() {
    let h = harness(&[(1, 5)]).await;
    let before = h.store.add_product(1).await.unwrap();

    let err = h.store.remove_product(9).await.unwrap_err();

    assert_eq!(err, CartError::ProductNotInCart(9));
    assert_eq!(h.store.cart().await, before);
    assert_eq!(h.notifier.messages(), vec!["Erro na remoção do produto"]);
}

// =============================================================================
// update_product_amount
// =============================================================================

#[tokio::test]
async fn test_update_sets_absolute_amount() {
    let h = harness(&[(1, 5)]).await;
    h.store.add_product(1).await.unwrap();

    let cart = h.store.update_product_amount(1, 4).await.unwrap();

    assert_eq!(cart.amount_of(1), 4);
    assert_eq!(h.store.cart().await, cart);
    assert_eq!(persisted(&h.storage).await, cart);

    let cart = h.store.update_product_amount(1, 2).await.unwrap();
    assert_eq!(cart.amount_of(1), 2);
}

#[tokio::test]
async fn test_update_to_zero_is_invalid() {
    let h = harness(&[(1, 5)]).await;
    h.store.add_product(1).await.unwrap();

    let err = h.store.update_product_amount(1, 0).await.unwrap_err();

    assert!(matches!(err, CartError::InvalidAmount { amount: 0, .. }));
    assert_eq!(h.store.cart().await.amount_of(1), 1);
    assert_eq!(
        h.notifier.messages(),
        vec!["Erro na alteração de quantidade do produto"]
    );
}

#[tokio::test]
async fn test_update_beyond_stock() {
    let h = harness(&[(1, 3)]).await;
    h.store.add_product(1).await.unwrap();

    let err = h.store.update_product_amount(1, 4).await.unwrap_err();

    assert!(matches!(err, CartError::OutOfStock { available: 3, .. }));
    assert_eq!(h.store.cart().await.amount_of(1), 1);
    assert_eq!(
        h.notifier.messages(),
        vec!["Quantidade solicitada fora de estoque"]
    );
}

#[tokio::test]
async fn test_update_absent_entry() {
    let h = harness(&[(1, 3)]).await;

    let err = h.store.update_product_amount(1, 2).await.unwrap_err();

    assert_eq!(err, CartError::ProductNotInCart(1));
    assert!(h.store.cart().await.is_empty());
    assert_eq!(
        h.notifier.messages(),
        vec!["Erro na alteração de quantidade do produto"]
    );
}

#[tokio::test]
async fn test_update_checks_stock_before_membership() {
    let h = harness(&[]).await;

    let err = h.store.update_product_amount(7, 0).await.unwrap_err();

    assert!(matches!(err, CartError::Upstream { product_id: 7, .. }));
    assert_eq!(h.catalog.stock_calls(), 1);
    assert_eq!(
        h.notifier.messages(),
        vec!["Erro na alteração de quantidade do produto"]
    );
}

// =============================================================================
// Storage, Locale, Concurrency
// =============================================================================

#[tokio::test]
async fn test_storage_failure_leaves_cart_unchanged() {
    let h = harness(&[(1, 5)]).await;
    let before = h.store.add_product(1).await.unwrap();
    h.storage.set_read_only(true);

    let err = h.store.add_product(1).await.unwrap_err();

    assert!(matches!(err, CartError::Storage(_)));
    assert_eq!(h.store.cart().await, before);
    assert_eq!(persisted(&h.storage).await, before);
    assert_eq!(h.notifier.messages(), vec!["Erro na adição do produto"]);
}

#[tokio::test]
async fn test_english_messages() {
    let h = harness_with(&[(1, 1)], Locale::En).await;
    h.store.add_product(1).await.unwrap();

    let _ = h.store.add_product(1).await;
    let _ = h.store.remove_product(2).await;

    assert_eq!(
        h.notifier.messages(),
        vec!["Requested quantity out of stock", "Error removing product"]
    );
}

#[tokio::test]
async fn test_concurrent_adds_respect_stock() {
    let h = harness(&[(1, 3)]).await;

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let store = h.store.clone();
            tokio::spawn(async move { store.add_product(1).await })
        })
        .collect();

    let mut succeeded = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            succeeded += 1;
        }
    }

    let cart = h.store.cart().await;
    assert_eq!(succeeded, 3);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.amount_of(1), 3);
    assert_eq!(persisted(&h.storage).await, cart);
    assert_eq!(h.notifier.messages().len(), 5);
}

#[tokio::test]
async fn test_never_duplicates_entries() {
    let h = harness(&[(1, 10), (2, 10)]).await;

    for id in [1, 2, 1, 1, 2] {
        h.store.add_product(id).await.unwrap();
    }
    h.store.update_product_amount(2, 5).await.unwrap();

    let cart = h.store.cart().await;
    let mut ids: Vec<_> = cart.items().iter().map(|item| item.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), cart.len());
    assert_eq!(cart.amount_of(1), 3);
    assert_eq!(cart.amount_of(2), 5);
}

// =============================================================================
// Reload
// =============================================================================

#[tokio::test]
async fn test_reload_from_memory_snapshot() {
    let h = harness(&[(1, 5), (2, 5)]).await;
    h.store.add_product(1).await.unwrap();
    h.store.add_product(2).await.unwrap();
    let saved = h.store.update_product_amount(2, 3).await.unwrap();

    let reloaded = CartStore::new(
        h.catalog.clone(),
        h.storage.clone(),
        h.notifier.clone(),
        CartSettings::default(),
    )
    .await
    .unwrap();

    assert_eq!(reloaded.cart().await, saved);
}

#[tokio::test]
async fn test_reload_collapses_duplicate_snapshot_entries() {
    let storage = Arc::new(MemoryStore::with_value(
        STORAGE_KEY,
        r#"[
            {"id":1,"title":"Tênis 1","price":179.9,"image":"a.jpg","amount":2},
            {"id":1,"title":"Tênis 1","price":179.9,"image":"a.jpg","amount":5}
        ]"#,
    ));

    let store = CartStore::new(
        Arc::new(StaticCatalog::new()),
        storage,
        Arc::new(RecordingNotifier::default()),
        CartSettings::default(),
    )
    .await
    .unwrap();

    let cart = store.cart().await;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.amount_of(1), 2);
}

#[tokio::test]
async fn test_reload_from_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoecart.db");

    let catalog = Arc::new(StaticCatalog::new());
    catalog.insert(sneaker(1), 4).await;

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    let store = CartStore::new(
        catalog.clone(),
        Arc::new(SqliteStore::new(db.clone())),
        Arc::new(RecordingNotifier::default()),
        CartSettings::default(),
    )
    .await
    .unwrap();

    store.add_product(1).await.unwrap();
    let saved = store.update_product_amount(1, 4).await.unwrap();
    db.close().await;

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    let sqlite = Arc::new(SqliteStore::new(db));
    let raw = sqlite.load(STORAGE_KEY).await.unwrap().unwrap();
    assert!(raw.contains(r#""price":179.9"#));

    let reloaded = CartStore::new(
        catalog,
        sqlite,
        Arc::new(RecordingNotifier::default()),
        CartSettings::default(),
    )
    .await
    .unwrap();

    assert_eq!(reloaded.cart().await, saved);
    assert_eq!(reloaded.cart().await.amount_of(1), 4);
}

#[tokio::test]
async fn test_custom_storage_key() {
    let catalog = Arc::new(StaticCatalog::new());
    catalog.insert(sneaker(1), 1).await;
    let storage = Arc::new(MemoryStore::new());

    let store = CartStore::new(
        catalog,
        storage.clone(),
        Arc::new(RecordingNotifier::default()),
        CartSettings {
            storage_key: "@Tenant:cart".to_string(),
            locale: Locale::PtBr,
        },
    )
    .await
    .unwrap();
    store.add_product(1).await.unwrap();

    assert!(storage.raw("@Tenant:cart").await.is_some());
    assert_eq!(storage.raw(STORAGE_KEY).await, None);
}
