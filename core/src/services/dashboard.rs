//! Dashboard aggregates.
//!
//! "Today" and per-day buckets are business calendar dates in the configured
//! timezone; the server's local clock plays no part.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use std::sync::Arc;
use wh_shared::utils::timezone::{business_date, business_day_bounds, date_window};

use crate::domain::entities::money::checked_sum;
use crate::domain::value_objects::dashboard::{BatchSummary, DashboardOverview, RevenuePoint};
use crate::errors::DomainResult;
use crate::repositories::{BatchRepository, ProductRepository, SalesRepository};

pub const DEFAULT_CHART_DAYS: i64 = 7;
pub const MAX_CHART_DAYS: i64 = 365;
pub const RECENT_SALES: i64 = 5;

pub struct DashboardService {
    products: Arc<dyn ProductRepository>,
    batches: Arc<dyn BatchRepository>,
    sales: Arc<dyn SalesRepository>,
    timezone: Tz,
}

impl DashboardService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        batches: Arc<dyn BatchRepository>,
        sales: Arc<dyn SalesRepository>,
        timezone: Tz,
    ) -> Self {
        Self {
            products,
            batches,
            sales,
            timezone,
        }
    }

    pub async fn overview(&self) -> DomainResult<DashboardOverview> {
        self.overview_at(Utc::now()).await
    }

    /// Overview as seen at instant `now`
    pub async fn overview_at(&self, now: DateTime<Utc>) -> DomainResult<DashboardOverview> {
        let inventory = self.products.inventory_totals().await?;
        let totals = self.sales.totals().await?;

        let today = business_date(now, self.timezone);
        let (start, end) = business_day_bounds(today, self.timezone);
        let todays = self.sales.ledger_between(start, end).await?;
        let today_revenue = checked_sum(todays.iter().map(|e| e.amount))?;
        let today_cost = checked_sum(todays.iter().map(|e| e.cost))?;

        let recent_sales = self.sales.list_invoices(RECENT_SALES).await?;

        Ok(DashboardOverview {
            inventory,
            total_revenue: totals.revenue,
            total_profit: totals.revenue - totals.cost,
            total_invoices: totals.invoice_count,
            today,
            today_revenue,
            today_profit: today_revenue - today_cost,
            today_sales_count: todays.len() as i64,
            recent_sales,
        })
    }

    /// Per-batch sell-through, newest batch first
    pub async fn batch_summaries(&self) -> DomainResult<Vec<BatchSummary>> {
        Ok(self
            .batches
            .stock_summary()
            .await?
            .into_iter()
            .map(BatchSummary::from)
            .collect())
    }

    pub async fn revenue_chart(&self, days: Option<i64>) -> DomainResult<Vec<RevenuePoint>> {
        self.revenue_chart_at(days, Utc::now()).await
    }

    /// One point per business date in the `days`-long window ending on the
    /// business date of `now`, ascending, with zeroes for quiet days
    pub async fn revenue_chart_at(
        &self,
        days: Option<i64>,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<RevenuePoint>> {
        let days = days.unwrap_or(DEFAULT_CHART_DAYS).clamp(1, MAX_CHART_DAYS) as u32;
        let today = business_date(now, self.timezone);
        let window = date_window(today, days);

        let mut points: BTreeMap<_, RevenuePoint> = window
            .iter()
            .map(|date| (*date, RevenuePoint::empty(*date)))
            .collect();

        let first = window.first().copied().unwrap_or(today);
        let from = business_day_bounds(first, self.timezone).0;
        let to = business_day_bounds(today, self.timezone).1;
        for entry in self.sales.ledger_between(from, to).await? {
            if let Some(point) = points.get_mut(&business_date(entry.sold_at, self.timezone)) {
                point.revenue = checked_sum([point.revenue, entry.amount])?;
                point.profit = checked_sum([point.profit, entry.amount, -entry.cost])?;
                point.sales_count += 1;
            }
        }

        Ok(points.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::batch::NewBatch;
    use crate::domain::entities::category::NewCategory;
    use crate::domain::entities::sale::{NewSale, NewSaleLine};
    use crate::domain::value_objects::dashboard::BatchStatus;
    use crate::repositories::{CategoryRepository, InMemoryStore};
    use chrono::{NaiveDate, TimeZone};

    const TZ: Tz = chrono_tz::Asia::Ho_Chi_Minh;

    struct Fixture {
        service: DashboardService,
        store: Arc<InMemoryStore>,
        product_ids: Vec<i64>,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let category = CategoryRepository::create(
            store.as_ref(),
            NewCategory { name: "Cáp".into(), description: None, is_active: true },
        )
        .await
        .unwrap();
        let batch = BatchRepository::create(
            store.as_ref(),
            NewBatch {
                batch_code: "LO-DASH".into(),
                category_id: category.id,
                import_price: 30_000,
                selling_price: Some(50_000),
                import_date: Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap(),
                supplier: None,
                notes: None,
                product_name: "Cáp".into(),
                identifiers: (1..=4).map(|i| format!("LO-DASH-{:03}", i)).collect(),
            },
        )
        .await
        .unwrap();
        let product_ids = store.list_by_batch(batch.id).await.unwrap().iter().map(|p| p.id).collect();
        let service = DashboardService::new(store.clone(), store.clone(), store.clone(), TZ);
        Fixture { service, store, product_ids }
    }

    async fn sell(store: &InMemoryStore, number: &str, product_id: i64, at: DateTime<Utc>) {
        store
            .record_sale(NewSale {
                invoice_number: number.into(),
                customer_name: None,
                customer_phone: None,
                payment_method: "CASH".into(),
                notes: None,
                sold_at: at,
                lines: vec![NewSaleLine { product_id, unit_price: None }],
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_overview_today_uses_business_date() {
        let f = fixture().await;
        // 2024-03-10 18:00 UTC is 01:00 on 03-11 in Ho Chi Minh City
        sell(&f.store, "HD1", f.product_ids[0], Utc.with_ymd_and_hms(2024, 3, 10, 16, 0, 0).unwrap()).await;
        sell(&f.store, "HD2", f.product_ids[1], Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap()).await;

        let now = Utc.with_ymd_and_hms(2024, 3, 11, 3, 0, 0).unwrap();
        let overview = f.service.overview_at(now).await.unwrap();

        assert_eq!(overview.today, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(overview.today_sales_count, 1);
        assert_eq!(overview.today_revenue, 50_000);
        assert_eq!(overview.today_profit, 20_000);
        assert_eq!(overview.total_revenue, 100_000);
        assert_eq!(overview.total_profit, 40_000);
        assert_eq!(overview.total_invoices, 2);
        assert_eq!(overview.inventory.in_stock, 2);
        assert_eq!(overview.inventory.sold, 2);
        assert_eq!(overview.recent_sales[0].invoice_number, "HD2");
    }

    #[tokio::test]
    async fn test_revenue_chart_backfills_window() {
        let f = fixture().await;
        sell(&f.store, "HD1", f.product_ids[0], Utc.with_ymd_and_hms(2024, 3, 9, 5, 0, 0).unwrap()).await;
        sell(&f.store, "HD2", f.product_ids[1], Utc.with_ymd_and_hms(2024, 3, 11, 1, 0, 0).unwrap()).await;
        // Outside a 3 day window
        sell(&f.store, "HD3", f.product_ids[2], Utc.with_ymd_and_hms(2024, 3, 1, 5, 0, 0).unwrap()).await;

        let now = Utc.with_ymd_and_hms(2024, 3, 11, 3, 0, 0).unwrap();
        let chart = f.service.revenue_chart_at(Some(3), now).await.unwrap();

        let dates: Vec<String> = chart.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-09", "2024-03-10", "2024-03-11"]);
        assert_eq!(chart[0].revenue, 50_000);
        assert_eq!(chart[1], RevenuePoint::empty(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
        assert_eq!(chart[2].sales_count, 1);
        assert_eq!(chart[2].profit, 20_000);
    }

    #[tokio::test]
    async fn test_revenue_chart_days_clamped() {
        let f = fixture().await;
        let now = Utc.with_ymd_and_hms(2024, 3, 11, 3, 0, 0).unwrap();
        assert_eq!(f.service.revenue_chart_at(None, now).await.unwrap().len(), 7);
        assert_eq!(f.service.revenue_chart_at(Some(0), now).await.unwrap().len(), 1);
        assert_eq!(f.service.revenue_chart_at(Some(9999), now).await.unwrap().len(), 365);
    }

    #[tokio::test]
    async fn test_batch_summaries() {
        let f = fixture().await;
        sell(&f.store, "HD1", f.product_ids[0], Utc::now()).await;

        let summaries = f.service.batch_summaries().await.unwrap();
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.total_quantity, 4);
        assert_eq!(summary.sold_quantity, 1);
        assert_eq!(summary.remaining_quantity, 3);
        assert_eq!(summary.total_profit, 20_000);
        assert_eq!(summary.profit_margin, 40.0);
        assert_eq!(summary.status, BatchStatus::Partial);
    }
}
