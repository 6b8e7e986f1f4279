//! Follow-up repository
//!
//! Scheduled contacts with a client. Listed by `scheduled_date` ascending so the
//! next one due comes first.

use crate::db::PoolManager;
use crate::error::Result;
use crate::query::{Column, TableSchema};
use crate::record::Record;

use super::table::Table;

pub static FOLLOW_UPS: TableSchema = TableSchema {
    table: "follow_ups",
    resource: "follow-up",
    columns: &[
        Column::text("client_id", "clientId"),
        Column::text("title", "title"),
        Column::text("description", "description"),
        Column::timestamp("scheduled_date", "scheduledDate"),
        Column::boolean("completed", "completed"),
        Column::timestamp("completed_at", "completedAt"),
        Column::text("type", "type"),
    ],
};

const ORDER: &str = "scheduled_date ASC";

/// Follow-up repository
pub struct FollowUpRepo<'a> {
    table: Table<'a>,
}

impl<'a> FollowUpRepo<'a> {
    pub fn new(pool: &'a PoolManager) -> Self {
        Self {
            table: Table::new(pool, &FOLLOW_UPS),
        }
    }

    pub async fn list(&self) -> Result<Vec<Record>> {
        self.table.list(ORDER).await
    }

    pub async fn list_by_client(&self, client_id: &str) -> Result<Vec<Record>> {
        self.table.list_where("client_id", client_id, ORDER).await
    }

    pub async fn get(&self, id: &str) -> Result<Record> {
        self.table.get(id).await
    }

    pub async fn create(&self, fields: &Record) -> Result<Record> {
        self.table.create(fields).await
    }

    pub async fn update(&self, id: &str, fields: &Record) -> Result<Record> {
        self.table.update(id, fields).await
    }

    /// Mark done. Repeated calls keep the first `completed_at`.
    pub async fn complete(&self, id: &str) -> Result<Record> {
        self.table.complete(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.table.delete(id).await
    }
}
