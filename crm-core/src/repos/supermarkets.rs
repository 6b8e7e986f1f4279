//! Supermarket repository

use crate::db::PoolManager;
use crate::error::Result;
use crate::query::{Column, TableSchema};
use crate::record::Record;

use super::table::Table;

pub static SUPERMARKETS: TableSchema = TableSchema {
    table: "supermarkets",
    resource: "supermarket",
    columns: &[
        Column::text("name", "name"),
        Column::text("location", "location"),
        Column::text("city", "city"),
        Column::text("region", "region"),
        Column::text("size", "size"),
        Column::text("type", "type"),
    ],
};

/// Supermarket repository
pub struct SupermarketRepo<'a> {
    table: Table<'a>,
}

impl<'a> SupermarketRepo<'a> {
    pub fn new(pool: &'a PoolManager) -> Self {
        Self {
            table: Table::new(pool, &SUPERMARKETS),
        }
    }

    /// All supermarkets, alphabetical.
    pub async fn list(&self) -> Result<Vec<Record>> {
        self.table.list("name ASC").await
    }

    pub async fn create(&self, fields: &Record) -> Result<Record> {
        self.table.create(fields).await
    }
}
