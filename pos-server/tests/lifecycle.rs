//! Product lifecycle and order intake integration tests
//!
//! Runs against an in-memory SQLite pool with the real migrations applied
//! and a counting mock asset store.

mod common;

use common::{MockImageStore, test_pool};

use sqlx::SqlitePool;

use pos_server::db::models::{Category, OrderCreate, OrderLine, ProductCreate, User};
use pos_server::db::repository::{
    DeleteOutcome, OrderRepository, ProductRepository, RepoError, UserRepository,
};
use pos_server::orders::enrich_orders;
use pos_server::services::CatalogService;

async fn insert_product(pool: &SqlitePool, name: &str, price: f64) -> i64 {
    ProductRepository::new(pool.clone())
        .create(ProductCreate {
            name: name.to_string(),
            category: Category::Boissons,
            price,
            image: Some(format!("/uploads/{}.jpg", name)),
        })
        .await
        .expect("insert product")
}

fn line(id: i64, quantity: i64) -> OrderLine {
    OrderLine { id, quantity }
}

#[tokio::test]
async fn referenced_product_is_soft_deleted_and_still_enriches() {
    let pool = test_pool().await;
    let images = MockImageStore::new();
    let catalog = CatalogService::new(pool.clone(), images.clone());

    let cola = insert_product(&pool, "Cola", 500.0).await;
    let orders = OrderRepository::new(pool.clone());
    orders
        .create(OrderCreate {
            product_data: vec![line(cola, 2)],
            note: None,
        })
        .await
        .unwrap();

    let deleted = catalog.delete_product(cola).await.unwrap();
    assert!(deleted.soft_deleted);
    assert!(deleted.asset_warning.is_none());
    assert!(images.delete_calls().is_empty(), "no asset delete on soft delete");

    let products = ProductRepository::new(pool.clone());
    assert!(
        products.find_all_active().await.unwrap().is_empty(),
        "tombstoned product leaves the active listing"
    );
    let tombstone = products.find_by_id(cola).await.unwrap().unwrap();
    assert!(tombstone.is_deleted);

    // Historic order still resolves name and price through the tombstone
    let all_orders = orders.find_all().await.unwrap();
    let all_products = products.find_all().await.unwrap();
    let enriched = enrich_orders(&all_orders, &all_products);
    let item = &enriched[0].product_data[0];
    assert_eq!(item.name.as_deref(), Some("Cola"));
    assert_eq!(item.price, Some(500.0));
}

#[tokio::test]
async fn unreferenced_product_is_hard_deleted_with_one_asset_delete() {
    let pool = test_pool().await;
    let images = MockImageStore::new();
    let catalog = CatalogService::new(pool.clone(), images.clone());

    let cola = insert_product(&pool, "Cola", 500.0).await;

    let deleted = catalog.delete_product(cola).await.unwrap();
    assert!(!deleted.soft_deleted);
    assert!(deleted.asset_warning.is_none());
    assert_eq!(images.delete_calls(), vec!["/uploads/Cola.jpg".to_string()]);

    let products = ProductRepository::new(pool.clone());
    assert!(products.find_by_id(cola).await.unwrap().is_none(), "row removed");
}

#[tokio::test]
async fn asset_delete_failure_surfaces_as_warning_not_rollback() {
    let pool = test_pool().await;
    let images = MockImageStore::failing_delete();
    let catalog = CatalogService::new(pool.clone(), images.clone());

    let cola = insert_product(&pool, "Cola", 500.0).await;

    let deleted = catalog.delete_product(cola).await.unwrap();
    assert!(!deleted.soft_deleted);
    assert!(deleted.asset_warning.is_some(), "partial failure is reported");
    assert_eq!(images.delete_calls().len(), 1);

    let products = ProductRepository::new(pool.clone());
    assert!(
        products.find_by_id(cola).await.unwrap().is_none(),
        "row deletion is not rolled back"
    );
}

#[tokio::test]
async fn delete_of_unknown_product_is_not_found() {
    let pool = test_pool().await;
    let err = ProductRepository::new(pool.clone()).delete(999).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn reference_check_is_structural_not_textual() {
    let pool = test_pool().await;

    // Force ids 1 and 12: "1" is a substring of "12" in the serialized
    // blob, which is exactly the false positive a textual probe hits.
    for (id, name) in [(1_i64, "Thé"), (12_i64, "Café")] {
        sqlx::query(
            "INSERT INTO products (id, name, category, price, image, is_deleted, created_at)
             VALUES (?, ?, 'Boissons', 300, NULL, 0, 0)",
        )
        .bind(id)
        .bind(name)
        .execute(&pool)
        .await
        .unwrap();
    }

    OrderRepository::new(pool.clone())
        .create(OrderCreate {
            product_data: vec![line(12, 1)],
            note: None,
        })
        .await
        .unwrap();

    let products = ProductRepository::new(pool.clone());
    assert!(
        matches!(
            products.delete(1).await.unwrap(),
            DeleteOutcome::HardDeleted { .. }
        ),
        "product 1 is unreferenced even though '1' appears inside '12'"
    );
    assert!(
        matches!(products.delete(12).await.unwrap(), DeleteOutcome::SoftDeleted),
        "product 12 is referenced"
    );
}

#[tokio::test]
async fn order_intake_validates_lines() {
    let pool = test_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let cola = insert_product(&pool, "Cola", 500.0).await;

    let err = orders
        .create(OrderCreate {
            product_data: vec![],
            note: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = orders
        .create(OrderCreate {
            product_data: vec![line(cola, 0)],
            note: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = orders
        .create(OrderCreate {
            product_data: vec![line(999, 1)],
            note: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // nothing was persisted by the rejected submissions
    assert!(orders.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn soft_deleted_product_cannot_be_ordered_again() {
    let pool = test_pool().await;
    let images = MockImageStore::new();
    let catalog = CatalogService::new(pool.clone(), images.clone());
    let orders = OrderRepository::new(pool.clone());

    let cola = insert_product(&pool, "Cola", 500.0).await;
    orders
        .create(OrderCreate {
            product_data: vec![line(cola, 1)],
            note: None,
        })
        .await
        .unwrap();
    catalog.delete_product(cola).await.unwrap();

    let err = orders
        .create(OrderCreate {
            product_data: vec![line(cola, 1)],
            note: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn order_roundtrips_through_store_losslessly() {
    let pool = test_pool().await;
    let orders = OrderRepository::new(pool.clone());
    let cola = insert_product(&pool, "Cola", 500.0).await;
    let the = insert_product(&pool, "Thé", 300.0).await;

    let lines = vec![line(the, 2), line(cola, 1), line(the, 4)];
    let id = orders
        .create(OrderCreate {
            product_data: lines.clone(),
            note: Some("sans sucre".to_string()),
        })
        .await
        .unwrap();

    let stored = orders.find_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].lines(), lines, "order and values preserved");
    assert_eq!(stored[0].note.as_deref(), Some("sans sucre"));
}

#[tokio::test]
async fn user_credentials_roundtrip() {
    let pool = test_pool().await;
    let users = UserRepository::new(pool.clone());

    let hash = User::hash_password("sola7921").unwrap();
    let id = users.create("Sola", &hash).await.unwrap();

    let user = users.find_by_username("Sola").await.unwrap().unwrap();
    assert_eq!(user.id, id);
    assert!(user.verify_password("sola7921").unwrap());
    assert!(!user.verify_password("sola7922").unwrap());

    assert!(users.find_by_username("nobody").await.unwrap().is_none());
}
