//! Repository tests against a real MySQL database.
//!
//! Run with `DATABASE_URL=mysql://... cargo test -p wh_infra -- --ignored`.
//! Each test works on uniquely named rows so they can share one schema.

use chrono::Utc;
use wh_core::domain::entities::batch::NewBatch;
use wh_core::domain::entities::category::NewCategory;
use wh_core::domain::entities::product::ProductStatus;
use wh_core::domain::entities::sale::{NewSale, NewSaleLine};
use wh_core::errors::DomainError;
use wh_core::repositories::{BatchRepository, CategoryRepository, ProductRepository, SalesRepository};
use wh_shared::config::DatabaseConfig;

use super::*;
use crate::database::Database;

async fn database() -> Database {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = Database::new(DatabaseConfig::new(url));
    db.run_migrations().await.expect("migrations");
    db
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_category_duplicate_name() {
    let db = database().await;
    let repo = MySqlCategoryRepository::new(db);
    let name = unique("CAT");

    let created = repo
        .create(NewCategory { name: name.clone(), description: None, is_active: true })
        .await
        .unwrap();
    assert_eq!(repo.find_by_name(&name.to_lowercase()).await.unwrap().map(|c| c.id), Some(created.id));

    let err = repo
        .create(NewCategory { name, description: None, is_active: true })
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::business_rule("Category name already exists"));
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_sale_is_atomic() {
    let db = database().await;
    let categories = MySqlCategoryRepository::new(db.clone());
    let batches = MySqlBatchRepository::new(db.clone());
    let products = MySqlProductRepository::new(db.clone());
    let sales = MySqlSalesRepository::new(db);

    let category = categories
        .create(NewCategory { name: unique("CAT"), description: None, is_active: true })
        .await
        .unwrap();
    let code = unique("LO");
    let batch = batches
        .create(NewBatch {
            batch_code: code.clone(),
            category_id: category.id,
            import_price: 100,
            selling_price: Some(150),
            import_date: Utc::now(),
            supplier: None,
            notes: None,
            product_name: "Cable".into(),
            identifiers: vec![format!("{}-001", code), format!("{}-002", code)],
        })
        .await
        .unwrap();
    let units = products.list_by_batch(batch.id).await.unwrap();
    assert_eq!(units.len(), 2);

    let sale = |number: String, ids: Vec<i64>| NewSale {
        invoice_number: number,
        customer_name: None,
        customer_phone: None,
        payment_method: "CASH".into(),
        notes: None,
        sold_at: Utc::now(),
        lines: ids.into_iter().map(|product_id| NewSaleLine { product_id, unit_price: None }).collect(),
    };

    let record = sales.record_sale(sale(unique("HD"), vec![units[0].id])).await.unwrap();
    assert_eq!(record.invoice.total_amount, 150);
    let sold = products.find_by_id(units[0].id).await.unwrap().unwrap();
    assert_eq!(sold.status, ProductStatus::Sold);

    // Second unit is sellable but the first is not: nothing may change
    let err = sales
        .record_sale(sale(unique("HD"), vec![units[1].id, units[0].id]))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::BusinessRule { .. }));
    let untouched = products.find_by_id(units[1].id).await.unwrap().unwrap();
    assert_eq!(untouched.status, ProductStatus::InStock);

    let stock = batches.stock_summary().await.unwrap();
    let row = stock.iter().find(|s| s.batch_id == batch.id).unwrap();
    assert_eq!(row.sold_quantity, 1);
    assert_eq!(row.total_sales_value, 150);
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL
async fn test_overlapping_sales_in_opposite_order() {
    let db = database().await;
    let categories = MySqlCategoryRepository::new(db.clone());
    let batches = MySqlBatchRepository::new(db.clone());
    let products = MySqlProductRepository::new(db.clone());
    let left = MySqlSalesRepository::new(db.clone());
    let right = MySqlSalesRepository::new(db);

    let category = categories
        .create(NewCategory { name: unique("CAT"), description: None, is_active: true })
        .await
        .unwrap();
    let code = unique("LO");
    let batch = batches
        .create(NewBatch {
            batch_code: code.clone(),
            category_id: category.id,
            import_price: 100,
            selling_price: Some(150),
            import_date: Utc::now(),
            supplier: None,
            notes: None,
            product_name: "Cable".into(),
            identifiers: vec![format!("{}-001", code), format!("{}-002", code)],
        })
        .await
        .unwrap();
    let units = products.list_by_batch(batch.id).await.unwrap();
    let (a, b) = (units[0].id, units[1].id);

    let sale = |ids: [i64; 2]| NewSale {
        invoice_number: unique("HD"),
        customer_name: None,
        customer_phone: None,
        payment_method: "CASH".into(),
        notes: None,
        sold_at: Utc::now(),
        lines: ids.into_iter().map(|product_id| NewSaleLine { product_id, unit_price: None }).collect(),
    };

    let (first, second) =
        tokio::join!(left.record_sale(sale([a, b])), right.record_sale(sale([b, a])));

    // One sale wins; the other sees sold units rather than a lock failure
    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    let err = outcomes.into_iter().find_map(Result::err).unwrap();
    assert!(matches!(err, DomainError::BusinessRule { .. }), "{:?}", err);
}
