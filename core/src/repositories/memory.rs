//! Process-local implementation of every repository trait.
//!
//! All state sits behind one mutex, so each trait method is atomic in the
//! same way the MySQL implementation's transactions are: a sale either
//! marks every product SOLD and stores its invoice, or changes nothing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::batch::{ImportBatch, NewBatch};
use crate::domain::entities::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::entities::money::checked_sum;
use crate::domain::entities::product::{Product, ProductStatus};
use crate::domain::entities::sale::{
    invoice_totals, NewSale, SaleRecord, SalesInvoice, SalesInvoiceDetail,
};
use crate::domain::value_objects::dashboard::{
    BatchStock, InventoryTotals, SaleLedgerEntry, SalesTotals,
};
use crate::errors::DomainError;
use crate::repositories::{BatchRepository, CategoryRepository, ProductRepository, SalesRepository};

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    categories: BTreeMap<i64, Category>,
    batches: BTreeMap<i64, ImportBatch>,
    products: BTreeMap<i64, Product>,
    invoices: BTreeMap<i64, SalesInvoice>,
    details: Vec<SalesInvoiceDetail>,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.categories
            .values()
            .any(|c| Some(c.id) != except && c.name.eq_ignore_ascii_case(name))
    }

    fn record(&self, invoice: &SalesInvoice) -> SaleRecord {
        SaleRecord {
            invoice: invoice.clone(),
            details: self
                .details
                .iter()
                .filter(|d| d.invoice_id == invoice.id)
                .cloned()
                .collect(),
        }
    }
}

/// In-memory store implementing all repository traits
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        // Arithmetic under the lock is checked and every method validates
        // before its first write, so a poisoned guard still protects
        // consistent data.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

const DUPLICATE_CATEGORY: &str = "Category name already exists";

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self, is_active: Option<bool>) -> Result<Vec<Category>, DomainError> {
        let state = self.state();
        let mut categories: Vec<Category> = state
            .categories
            .values()
            .filter(|c| is_active.map_or(true, |active| c.is_active == active))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(categories)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError> {
        Ok(self.state().categories.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        Ok(self
            .state()
            .categories
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn create(&self, category: NewCategory) -> Result<Category, DomainError> {
        let mut state = self.state();
        if state.name_taken(&category.name, None) {
            return Err(DomainError::business_rule(DUPLICATE_CATEGORY));
        }
        let now = Utc::now();
        let created = Category {
            id: state.next_id(),
            name: category.name,
            description: category.description,
            is_active: category.is_active,
            created_at: now,
            updated_at: now,
        };
        state.categories.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, update: CategoryUpdate) -> Result<Option<Category>, DomainError> {
        let mut state = self.state();
        if let Some(name) = &update.name {
            if state.name_taken(name, Some(id)) {
                return Err(DomainError::business_rule(DUPLICATE_CATEGORY));
            }
        }
        Ok(state.categories.get_mut(&id).map(|category| {
            update.apply_to(category, Utc::now());
            category.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.state().categories.remove(&id).is_some())
    }

    async fn count_batches(&self, id: i64) -> Result<i64, DomainError> {
        Ok(self
            .state()
            .batches
            .values()
            .filter(|b| b.category_id == id)
            .count() as i64)
    }
}

#[async_trait]
impl BatchRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<ImportBatch>, DomainError> {
        let mut batches: Vec<ImportBatch> = self.state().batches.values().cloned().collect();
        batches.sort_by(|a, b| b.import_date.cmp(&a.import_date).then(b.id.cmp(&a.id)));
        Ok(batches)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ImportBatch>, DomainError> {
        Ok(self.state().batches.get(&id).cloned())
    }

    async fn create(&self, batch: NewBatch) -> Result<ImportBatch, DomainError> {
        let total_value = batch.total_value()?;
        let mut state = self.state();
        let category_name = state
            .categories
            .get(&batch.category_id)
            .map(|c| c.name.clone())
            .ok_or_else(|| DomainError::not_found("Category"))?;
        if state.batches.values().any(|b| b.batch_code == batch.batch_code) {
            return Err(DomainError::business_rule("Batch code already exists"));
        }
        if let Some(taken) = batch
            .identifiers
            .iter()
            .find(|id| state.products.values().any(|p| &p.imei == *id))
        {
            return Err(DomainError::business_rule(format!(
                "Product identifier already exists: {}",
                taken
            )));
        }

        let now = Utc::now();
        let created = ImportBatch {
            id: state.next_id(),
            batch_code: batch.batch_code.clone(),
            category_id: batch.category_id,
            category_name: Some(category_name),
            quantity: batch.quantity(),
            import_price: batch.import_price,
            selling_price: batch.selling_price,
            total_value,
            import_date: batch.import_date,
            supplier: batch.supplier.clone(),
            notes: batch.notes.clone(),
            created_at: now,
        };
        state.batches.insert(created.id, created.clone());

        for imei in batch.identifiers {
            let product = Product {
                id: state.next_id(),
                imei,
                name: batch.product_name.clone(),
                batch_id: created.id,
                category_id: batch.category_id,
                import_price: batch.import_price,
                selling_price: batch.selling_price,
                status: ProductStatus::InStock,
                sold_date: None,
                invoice_number: None,
                created_at: now,
            };
            state.products.insert(product.id, product);
        }
        Ok(created)
    }

    async fn stock_summary(&self) -> Result<Vec<BatchStock>, DomainError> {
        let state = self.state();
        let mut sales_by_product: HashMap<i64, Vec<i64>> = HashMap::new();
        for detail in &state.details {
            sales_by_product.entry(detail.product_id).or_default().push(detail.line_total);
        }

        let mut rows: Vec<BatchStock> = state
            .batches
            .values()
            .map(|batch| -> Result<BatchStock, DomainError> {
                let units: Vec<&Product> =
                    state.products.values().filter(|p| p.batch_id == batch.id).collect();
                let sold: Vec<&&Product> =
                    units.iter().filter(|p| p.status == ProductStatus::Sold).collect();
                let sold_lines = sold
                    .iter()
                    .filter_map(|p| sales_by_product.get(&p.id))
                    .flatten()
                    .copied();
                Ok(BatchStock {
                    batch_id: batch.id,
                    batch_code: batch.batch_code.clone(),
                    category_name: batch.category_name.clone(),
                    import_date: batch.import_date,
                    total_quantity: units.len() as i64,
                    sold_quantity: sold.len() as i64,
                    total_import_value: checked_sum(units.iter().map(|p| p.import_price))?,
                    total_sales_value: checked_sum(sold_lines)?,
                    sold_cost: checked_sum(sold.iter().map(|p| p.import_price))?,
                })
            })
            .collect::<Result<_, _>>()?;
        rows.sort_by(|a, b| b.import_date.cmp(&a.import_date).then(b.batch_id.cmp(&a.batch_id)));
        Ok(rows)
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn list_available(&self, limit: i64) -> Result<Vec<Product>, DomainError> {
        let state = self.state();
        let mut products: Vec<Product> = state
            .products
            .values()
            .filter(|p| p.is_in_stock())
            .cloned()
            .collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        products.truncate(limit.max(0) as usize);
        Ok(products)
    }

    async fn list_by_batch(&self, batch_id: i64) -> Result<Vec<Product>, DomainError> {
        Ok(self
            .state()
            .products
            .values()
            .filter(|p| p.batch_id == batch_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        Ok(self.state().products.get(&id).cloned())
    }

    async fn find_by_imei(&self, imei: &str) -> Result<Option<Product>, DomainError> {
        Ok(self.state().products.values().find(|p| p.imei == imei).cloned())
    }

    async fn inventory_totals(&self) -> Result<InventoryTotals, DomainError> {
        let state = self.state();
        let in_stock: Vec<&Product> = state.products.values().filter(|p| p.is_in_stock()).collect();
        Ok(InventoryTotals {
            total_categories: state.categories.len() as i64,
            total_batches: state.batches.len() as i64,
            total_products: state.products.len() as i64,
            in_stock: in_stock.len() as i64,
            sold: (state.products.len() - in_stock.len()) as i64,
            total_import_value: checked_sum(state.products.values().map(|p| p.import_price))?,
            stock_value: checked_sum(in_stock.iter().map(|p| p.import_price))?,
        })
    }
}

#[async_trait]
impl SalesRepository for InMemoryStore {
    async fn record_sale(&self, sale: NewSale) -> Result<SaleRecord, DomainError> {
        let mut state = self.state();
        if state.invoices.values().any(|i| i.invoice_number == sale.invoice_number) {
            return Err(DomainError::business_rule("Invoice number already exists"));
        }

        // Validate every line before touching anything.
        let mut priced = Vec::with_capacity(sale.lines.len());
        for line in &sale.lines {
            let product = state
                .products
                .get(&line.product_id)
                .ok_or_else(|| DomainError::not_found(format!("Product {}", line.product_id)))?;
            priced.push(line.price_against(product)?);
        }

        let (total_amount, total_cost) = invoice_totals(&priced)?;
        let invoice = SalesInvoice {
            id: state.next_id(),
            invoice_number: sale.invoice_number.clone(),
            customer_name: sale.customer_name,
            customer_phone: sale.customer_phone,
            payment_method: sale.payment_method,
            total_amount,
            total_cost,
            notes: sale.notes,
            sale_date: sale.sold_at,
            created_at: Utc::now(),
        };
        state.invoices.insert(invoice.id, invoice.clone());

        for line in priced {
            let detail = SalesInvoiceDetail {
                id: state.next_id(),
                invoice_id: invoice.id,
                product_id: line.product_id,
                imei: line.imei,
                quantity: 1,
                unit_price: line.unit_price,
                cost_price: line.cost_price,
                line_total: line.unit_price,
            };
            if let Some(product) = state.products.get_mut(&line.product_id) {
                product.mark_sold(&invoice.invoice_number, sale.sold_at);
            }
            state.details.push(detail);
        }

        Ok(state.record(&invoice))
    }

    async fn find_invoice(&self, id: i64) -> Result<Option<SaleRecord>, DomainError> {
        let state = self.state();
        Ok(state.invoices.get(&id).map(|invoice| state.record(invoice)))
    }

    async fn list_invoices(&self, limit: i64) -> Result<Vec<SalesInvoice>, DomainError> {
        let mut invoices: Vec<SalesInvoice> = self.state().invoices.values().cloned().collect();
        invoices.sort_by(|a, b| b.sale_date.cmp(&a.sale_date).then(b.id.cmp(&a.id)));
        invoices.truncate(limit.max(0) as usize);
        Ok(invoices)
    }

    async fn ledger_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<SaleLedgerEntry>, DomainError> {
        Ok(self
            .state()
            .invoices
            .values()
            .filter(|i| i.sale_date >= from && i.sale_date < to)
            .map(|i| SaleLedgerEntry {
                sold_at: i.sale_date,
                amount: i.total_amount,
                cost: i.total_cost,
            })
            .collect())
    }

    async fn totals(&self) -> Result<SalesTotals, DomainError> {
        let state = self.state();
        Ok(SalesTotals {
            invoice_count: state.invoices.len() as i64,
            revenue: checked_sum(state.invoices.values().map(|i| i.total_amount))?,
            cost: checked_sum(state.invoices.values().map(|i| i.total_cost))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::sale::NewSaleLine;

    async fn seeded() -> (InMemoryStore, ImportBatch) {
        let store = InMemoryStore::new();
        let category = CategoryRepository::create(
            &store,
            NewCategory { name: "iPhone".into(), description: None, is_active: true },
        )
        .await
        .unwrap();
        let batch = BatchRepository::create(
            &store,
            NewBatch {
                batch_code: "LO1".into(),
                category_id: category.id,
                import_price: 100,
                selling_price: Some(150),
                import_date: Utc::now(),
                supplier: None,
                notes: None,
                product_name: "iPhone 13".into(),
                identifiers: vec!["A1".into(), "A2".into(), "A3".into()],
            },
        )
        .await
        .unwrap();
        (store, batch)
    }

    fn sale(number: &str, product_ids: &[i64]) -> NewSale {
        NewSale {
            invoice_number: number.into(),
            customer_name: None,
            customer_phone: None,
            payment_method: "CASH".into(),
            notes: None,
            sold_at: Utc::now(),
            lines: product_ids
                .iter()
                .map(|&product_id| NewSaleLine { product_id, unit_price: None })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_batch_creates_products() {
        let (store, batch) = seeded().await;
        assert_eq!(batch.quantity, 3);
        assert_eq!(batch.total_value, 300);
        let products = store.list_by_batch(batch.id).await.unwrap();
        assert_eq!(products.len(), 3);
        assert!(products.iter().all(|p| p.is_in_stock()));
    }

    #[tokio::test]
    async fn test_failed_sale_changes_nothing() {
        let (store, batch) = seeded().await;
        let products = store.list_by_batch(batch.id).await.unwrap();
        let first = products[0].id;

        store.record_sale(sale("HD1", &[first])).await.unwrap();
        // Second product is fine, first is already sold: whole sale must fail.
        let err = store
            .record_sale(sale("HD2", &[products[1].id, first]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule { .. }));

        let second = ProductRepository::find_by_id(&store, products[1].id).await.unwrap().unwrap();
        assert!(second.is_in_stock());
        assert_eq!(store.totals().await.unwrap().invoice_count, 1);
    }

    #[tokio::test]
    async fn test_stock_summary_counts_sales() {
        let (store, batch) = seeded().await;
        let products = store.list_by_batch(batch.id).await.unwrap();
        store.record_sale(sale("HD1", &[products[0].id])).await.unwrap();

        let rows = store.stock_summary().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_quantity, 3);
        assert_eq!(rows[0].sold_quantity, 1);
        assert_eq!(rows[0].total_sales_value, 150);
        assert_eq!(rows[0].sold_cost, 100);
    }

    #[tokio::test]
    async fn test_duplicate_identifier_rejected() {
        let (store, batch) = seeded().await;
        let err = BatchRepository::create(
            &store,
            NewBatch {
                batch_code: "LO2".into(),
                category_id: batch.category_id,
                import_price: 100,
                selling_price: None,
                import_date: Utc::now(),
                supplier: None,
                notes: None,
                product_name: "iPhone 13".into(),
                identifiers: vec!["A2".into()],
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.client_message(), "Product identifier already exists: A2");
    }
}
