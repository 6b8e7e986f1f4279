//! Interaction repository - append-only contact log

use crate::db::PoolManager;
use crate::error::Result;
use crate::query::{Column, TableSchema};
use crate::record::Record;

use super::table::Table;

pub static INTERACTIONS: TableSchema = TableSchema {
    table: "interactions",
    resource: "interaction",
    columns: &[
        Column::text("client_id", "clientId"),
        Column::text("type", "type"),
        Column::text("subject", "subject"),
        Column::text("notes", "notes"),
    ],
};

const ORDER: &str = "created_at DESC";

/// Interaction repository
pub struct InteractionRepo<'a> {
    table: Table<'a>,
}

impl<'a> InteractionRepo<'a> {
    pub fn new(pool: &'a PoolManager) -> Self {
        Self {
            table: Table::new(pool, &INTERACTIONS),
        }
    }

    pub async fn list(&self) -> Result<Vec<Record>> {
        self.table.list(ORDER).await
    }

    pub async fn list_by_client(&self, client_id: &str) -> Result<Vec<Record>> {
        self.table.list_where("client_id", client_id, ORDER).await
    }

    pub async fn create(&self, fields: &Record) -> Result<Record> {
        self.table.create(fields).await
    }
}
