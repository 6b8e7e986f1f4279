//! Sales repository
//!
//! Amounts are integer cents; `total_amount` is whatever the caller computed.

use crate::db::PoolManager;
use crate::error::Result;
use crate::query::{Column, TableSchema};
use crate::record::Record;

use super::table::Table;

pub static SALES: TableSchema = TableSchema {
    table: "sales",
    resource: "sale",
    columns: &[
        Column::text("supermarket_id", "supermarketId"),
        Column::timestamp("date", "date"),
        Column::text("category", "category"),
        Column::text("product", "product"),
        Column::integer("quantity", "quantity"),
        Column::integer("unit_price", "unitPrice"),
        Column::integer("total_amount", "totalAmount"),
        Column::text("payment_method", "paymentMethod"),
        Column::integer("customer_age", "customerAge"),
        Column::text("customer_gender", "customerGender"),
    ],
};

/// Sales repository
pub struct SalesRepo<'a> {
    table: Table<'a>,
}

impl<'a> SalesRepo<'a> {
    pub fn new(pool: &'a PoolManager) -> Self {
        Self {
            table: Table::new(pool, &SALES),
        }
    }

    /// All sales, most recent first.
    pub async fn list(&self) -> Result<Vec<Record>> {
        self.table.list("date DESC").await
    }

    pub async fn create(&self, fields: &Record) -> Result<Record> {
        self.table.create(fields).await
    }
}
