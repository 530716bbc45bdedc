use chrono::Utc;

use crate::domain::entities::batch::NewBatch;
use crate::domain::entities::product::{Product, ProductStatus};
use crate::domain::entities::sale::{invoice_totals, NewSaleLine, PricedLine};
use crate::errors::DomainError;

fn product(status: ProductStatus, selling_price: Option<i64>) -> Product {
    Product {
        id: 7,
        imei: "356938035643809".to_string(),
        name: "iPhone 13".to_string(),
        batch_id: 1,
        category_id: 1,
        import_price: 12_000_000,
        selling_price,
        status,
        sold_date: None,
        invoice_number: None,
        created_at: Utc::now(),
    }
}

#[test]
fn test_line_uses_explicit_price_over_default() {
    let line = NewSaleLine { product_id: 7, unit_price: Some(14_500_000) };
    let priced = line.price_against(&product(ProductStatus::InStock, Some(15_000_000))).unwrap();
    assert_eq!(priced.unit_price, 14_500_000);
    assert_eq!(priced.cost_price, 12_000_000);
}

#[test]
fn test_line_falls_back_to_product_price() {
    let line = NewSaleLine { product_id: 7, unit_price: None };
    let priced = line.price_against(&product(ProductStatus::InStock, Some(15_000_000))).unwrap();
    assert_eq!(priced.unit_price, 15_000_000);
}

#[test]
fn test_line_without_any_price_is_rejected() {
    let line = NewSaleLine { product_id: 7, unit_price: None };
    let err = line.price_against(&product(ProductStatus::InStock, None)).unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[test]
fn test_sold_product_cannot_be_priced() {
    let line = NewSaleLine { product_id: 7, unit_price: Some(1) };
    let err = line.price_against(&product(ProductStatus::Sold, None)).unwrap_err();
    assert_eq!(err.client_message(), "Product 356938035643809 is already sold");
}

#[test]
fn test_invoice_totals_sum_lines() {
    let lines = vec![
        PricedLine { product_id: 1, imei: "A".into(), unit_price: 100, cost_price: 60 },
        PricedLine { product_id: 2, imei: "B".into(), unit_price: 250, cost_price: 200 },
    ];
    assert_eq!(invoice_totals(&lines).unwrap(), (350, 260));
    assert_eq!(invoice_totals(&[]).unwrap(), (0, 0));
}

#[test]
fn test_invoice_totals_overflow_is_an_error() {
    let lines = vec![
        PricedLine { product_id: 1, imei: "A".into(), unit_price: i64::MAX, cost_price: 1 },
        PricedLine { product_id: 2, imei: "B".into(), unit_price: i64::MAX, cost_price: 1 },
    ];
    let err = invoice_totals(&lines).unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[test]
fn test_batch_total_value_overflow_is_an_error() {
    let batch = NewBatch {
        batch_code: "LO1".into(),
        category_id: 1,
        import_price: i64::MAX,
        selling_price: None,
        import_date: Utc::now(),
        supplier: None,
        notes: None,
        product_name: "Cáp".into(),
        identifiers: vec!["S-001".into(), "S-002".into()],
    };
    assert!(matches!(batch.total_value(), Err(DomainError::Validation { .. })));
    assert_eq!(NewBatch { import_price: 5_000, ..batch }.total_value().unwrap(), 10_000);
}

#[test]
fn test_product_mark_sold() {
    let mut p = product(ProductStatus::InStock, None);
    let at = Utc::now();
    p.mark_sold("HD240301", at);
    assert_eq!(p.status, ProductStatus::Sold);
    assert_eq!(p.sold_date, Some(at));
    assert_eq!(p.invoice_number.as_deref(), Some("HD240301"));
    assert_eq!(serde_json::to_value(p.status).unwrap(), "SOLD");
}
