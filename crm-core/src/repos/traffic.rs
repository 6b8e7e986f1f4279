//! Customer traffic repository - hourly visitor counts per supermarket

use crate::db::PoolManager;
use crate::error::Result;
use crate::query::{Column, TableSchema};
use crate::record::Record;

use super::table::Table;

pub static CUSTOMER_TRAFFIC: TableSchema = TableSchema {
    table: "customer_traffic",
    resource: "customer traffic",
    columns: &[
        Column::text("supermarket_id", "supermarketId"),
        Column::timestamp("date", "date"),
        Column::integer("hour", "hour"),
        Column::integer("visitor_count", "visitorCount"),
        Column::integer("avg_transaction_value", "avgTransactionValue"),
    ],
};

/// Customer traffic repository
pub struct TrafficRepo<'a> {
    table: Table<'a>,
}

impl<'a> TrafficRepo<'a> {
    pub fn new(pool: &'a PoolManager) -> Self {
        Self {
            table: Table::new(pool, &CUSTOMER_TRAFFIC),
        }
    }

    /// All traffic rows, latest day and hour first.
    pub async fn list(&self) -> Result<Vec<Record>> {
        self.table.list("date DESC, hour DESC").await
    }

    pub async fn create(&self, fields: &Record) -> Result<Record> {
        self.table.create(fields).await
    }
}
