//! Fixed catalogue of read-only aggregate queries
//!
//! Sales, inventory and traffic aggregates run as single static statements.
//! Summary stats are the exception: they are counted in memory from the
//! client / follow-up / task listings, so their cost grows with row count.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::PoolManager;
use crate::error::{DbError, Result};
use crate::query::Statement;
use crate::record::{to_record, Record};
use crate::repos::{ClientRepo, FollowUpRepo, InventoryRepo, SalesRepo, TaskRepo, TrafficRepo};

/// Exclusive upper age bound and label, checked in order.
const AGE_BUCKETS: &[(i32, &str)] = &[(25, "under_25"), (45, "25_44"), (65, "45_64")];

/// Everything past the last bound. A NULL age also lands here.
const AGE_BUCKET_REST: &str = "65_plus";

/// Demographic bucket for a customer age.
///
/// `None` maps to `65_plus`, same as the SQL `CASE` it mirrors.
pub fn age_bucket(age: Option<i32>) -> &'static str {
    age.and_then(|age| {
        AGE_BUCKETS
            .iter()
            .find(|(upper, _)| age < *upper)
            .map(|(_, label)| *label)
    })
    .unwrap_or(AGE_BUCKET_REST)
}

/// The `CASE` expression equivalent of [`age_bucket`] over `column`.
fn age_bucket_sql(column: &str) -> String {
    let mut sql = String::from("CASE");
    for (upper, label) in AGE_BUCKETS {
        sql.push_str(&format!(" WHEN {} < {} THEN '{}'", column, upper, label));
    }
    sql.push_str(&format!(" ELSE '{}' END", AGE_BUCKET_REST));
    sql
}

const SALES_BY_CATEGORY: &str = r#"
    SELECT category, SUM(total_amount) AS total, COUNT(*) AS count
    FROM sales
    GROUP BY category
    ORDER BY total DESC, category ASC
"#;

const SALES_BY_PAYMENT_METHOD: &str = r#"
    SELECT payment_method AS method, SUM(total_amount) AS total, COUNT(*) AS count
    FROM sales
    GROUP BY payment_method
    ORDER BY total DESC, method ASC
"#;

const LOW_STOCK: &str = r#"
    SELECT * FROM inventory
    WHERE current_stock <= minimum_stock
    ORDER BY current_stock ASC, product ASC
"#;

const TRAFFIC_BY_HOUR: &str = r#"
    SELECT hour,
           SUM(visitor_count) AS total_visitors,
           AVG(avg_transaction_value)::float8 AS avg_transaction
    FROM customer_traffic
    GROUP BY hour
    ORDER BY hour ASC
"#;

const TRAFFIC_BY_SUPERMARKET: &str = r#"
    SELECT ct.supermarket_id, s.name, SUM(ct.visitor_count) AS total_visitors
    FROM customer_traffic ct
    JOIN supermarkets s ON s.id = ct.supermarket_id
    GROUP BY ct.supermarket_id, s.name
    ORDER BY total_visitors DESC, s.name ASC
"#;

fn sales_by_demographic_sql() -> String {
    format!(
        r#"
    SELECT customer_gender AS gender,
           {} AS age_group,
           SUM(total_amount) AS total,
           COUNT(*) AS count
    FROM sales
    GROUP BY customer_gender, age_group
    ORDER BY total DESC, gender ASC, age_group ASC
"#,
        age_bucket_sql("customer_age")
    )
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_clients: usize,
    pub pending_follow_ups: usize,
    pub overdue_follow_ups: usize,
    pub active_tasks: usize,
}

/// Count summary stats from listings. A missing or null `completed` counts as
/// not completed; overdue means `scheduled_date` strictly before `now`.
pub fn summarize(
    clients: &[Record],
    follow_ups: &[Record],
    tasks: &[Record],
    now: DateTime<Utc>,
) -> SummaryStats {
    let is_open = |r: &&Record| !r.get_bool("completed").unwrap_or(false);

    let pending: Vec<&Record> = follow_ups.iter().filter(is_open).collect();
    let overdue = pending
        .iter()
        .filter(|r| r.get_timestamp("scheduled_date").is_some_and(|ts| ts < now))
        .count();

    SummaryStats {
        total_clients: clients.len(),
        pending_follow_ups: pending.len(),
        overdue_follow_ups: overdue,
        active_tasks: tasks.iter().filter(is_open).count(),
    }
}

/// One entry of the catalogue, resolvable from a loose `(kind, group_by, filter)` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsQuery {
    SalesByCategory,
    SalesByPaymentMethod,
    SalesByDemographic,
    AllSales,
    TrafficByHour,
    TrafficBySupermarket,
    AllTraffic,
    LowStock,
    AllInventory,
}

impl AnalyticsQuery {
    /// Resolve a custom analytics request.
    ///
    /// | kind      | group_by                             | filter      |
    /// |-----------|--------------------------------------|-------------|
    /// | sales     | category, payment, demographics, -   | -           |
    /// | traffic   | hour, supermarket, -                 | -           |
    /// | inventory | -                                    | low-stock, -|
    pub fn resolve(kind: &str, group_by: Option<&str>, filter: Option<&str>) -> Result<Self> {
        let query = match (kind, group_by) {
            ("sales", Some("category")) => Self::SalesByCategory,
            ("sales", Some("payment")) => Self::SalesByPaymentMethod,
            ("sales", Some("demographics")) => Self::SalesByDemographic,
            ("sales", None) => Self::AllSales,
            ("traffic", Some("hour")) => Self::TrafficByHour,
            ("traffic", Some("supermarket")) => Self::TrafficBySupermarket,
            ("traffic", None) => Self::AllTraffic,
            ("inventory", None) => match filter {
                Some("low-stock") => return Ok(Self::LowStock),
                None => return Ok(Self::AllInventory),
                Some(other) => {
                    return Err(DbError::validation(format!(
                        "unknown inventory filter '{}'",
                        other
                    )))
                }
            },
            ("sales" | "traffic" | "inventory", Some(group)) => {
                return Err(DbError::validation(format!(
                    "cannot group {} by '{}'",
                    kind, group
                )))
            }
            _ => {
                return Err(DbError::validation(format!(
                    "invalid analytics type '{}'",
                    kind
                )))
            }
        };

        if let Some(filter) = filter {
            return Err(DbError::validation(format!(
                "filter '{}' only applies to inventory",
                filter
            )));
        }
        Ok(query)
    }
}

/// Analytics aggregator
pub struct Analytics<'a> {
    pool: &'a PoolManager,
}

impl<'a> Analytics<'a> {
    pub fn new(pool: &'a PoolManager) -> Self {
        Self { pool }
    }

    /// `category, total, count`, largest total first.
    pub async fn sales_by_category(&self) -> Result<Vec<Record>> {
        self.run("sales_by_category", &Statement::new(SALES_BY_CATEGORY))
            .await
    }

    /// `method, total, count`, largest total first.
    pub async fn sales_by_payment_method(&self) -> Result<Vec<Record>> {
        self.run(
            "sales_by_payment_method",
            &Statement::new(SALES_BY_PAYMENT_METHOD),
        )
        .await
    }

    /// `gender, age_group, total, count`, largest total first.
    pub async fn sales_by_demographic(&self) -> Result<Vec<Record>> {
        self.run(
            "sales_by_demographic",
            &Statement::new(sales_by_demographic_sql()),
        )
        .await
    }

    /// Inventory rows at or below their minimum stock, emptiest first.
    pub async fn low_stock(&self) -> Result<Vec<Record>> {
        self.run("low_stock", &Statement::new(LOW_STOCK)).await
    }

    /// `hour, total_visitors, avg_transaction`, by hour.
    pub async fn traffic_by_hour(&self) -> Result<Vec<Record>> {
        self.run("traffic_by_hour", &Statement::new(TRAFFIC_BY_HOUR))
            .await
    }

    /// `supermarket_id, name, total_visitors`, busiest first. Supermarkets with
    /// no traffic rows are absent, not zero.
    pub async fn traffic_by_supermarket(&self) -> Result<Vec<Record>> {
        self.run(
            "traffic_by_supermarket",
            &Statement::new(TRAFFIC_BY_SUPERMARKET),
        )
        .await
    }

    pub async fn sales(&self) -> Result<Vec<Record>> {
        SalesRepo::new(self.pool).list().await
    }

    pub async fn inventory(&self) -> Result<Vec<Record>> {
        InventoryRepo::new(self.pool).list().await
    }

    pub async fn traffic(&self) -> Result<Vec<Record>> {
        TrafficRepo::new(self.pool).list().await
    }

    /// Client / follow-up / task counters, fetched concurrently.
    pub async fn summary(&self) -> Result<SummaryStats> {
        let clients = ClientRepo::new(self.pool);
        let follow_ups = FollowUpRepo::new(self.pool);
        let tasks = TaskRepo::new(self.pool);

        let (clients, follow_ups, tasks) =
            tokio::try_join!(clients.list(), follow_ups.list(), tasks.list())?;

        Ok(summarize(&clients, &follow_ups, &tasks, Utc::now()))
    }

    /// Run any catalogue entry.
    pub async fn run_query(&self, query: AnalyticsQuery) -> Result<Vec<Record>> {
        match query {
            AnalyticsQuery::SalesByCategory => self.sales_by_category().await,
            AnalyticsQuery::SalesByPaymentMethod => self.sales_by_payment_method().await,
            AnalyticsQuery::SalesByDemographic => self.sales_by_demographic().await,
            AnalyticsQuery::AllSales => self.sales().await,
            AnalyticsQuery::TrafficByHour => self.traffic_by_hour().await,
            AnalyticsQuery::TrafficBySupermarket => self.traffic_by_supermarket().await,
            AnalyticsQuery::AllTraffic => self.traffic().await,
            AnalyticsQuery::LowStock => self.low_stock().await,
            AnalyticsQuery::AllInventory => self.inventory().await,
        }
    }

    async fn run(&self, name: &'static str, stmt: &Statement) -> Result<Vec<Record>> {
        tracing::debug!(query = name, "running aggregate");
        let mut conn = self.pool.acquire().await?;
        let rows = stmt.query().fetch_all(&mut *conn).await?;
        rows.iter().map(to_record).collect()
    }
}
