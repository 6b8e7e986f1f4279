//! Inventory repository - stock levels per supermarket product

use crate::db::PoolManager;
use crate::error::Result;
use crate::query::{Column, TableSchema};
use crate::record::Record;

use super::table::Table;

pub static INVENTORY: TableSchema = TableSchema {
    table: "inventory",
    resource: "inventory item",
    columns: &[
        Column::text("supermarket_id", "supermarketId"),
        Column::text("product", "product"),
        Column::text("category", "category"),
        Column::integer("current_stock", "currentStock"),
        Column::integer("minimum_stock", "minimumStock"),
        Column::timestamp("last_restocked", "lastRestocked"),
        Column::text("supplier", "supplier"),
        Column::integer("cost_price", "costPrice"),
        Column::integer("selling_price", "sellingPrice"),
    ],
};

const ORDER: &str = "product ASC";

/// Inventory repository
pub struct InventoryRepo<'a> {
    table: Table<'a>,
}

impl<'a> InventoryRepo<'a> {
    pub fn new(pool: &'a PoolManager) -> Self {
        Self {
            table: Table::new(pool, &INVENTORY),
        }
    }

    pub async fn list(&self) -> Result<Vec<Record>> {
        self.table.list(ORDER).await
    }

    pub async fn list_by_supermarket(&self, supermarket_id: &str) -> Result<Vec<Record>> {
        self.table
            .list_where("supermarket_id", supermarket_id, ORDER)
            .await
    }

    pub async fn create(&self, fields: &Record) -> Result<Record> {
        self.table.create(fields).await
    }
}
