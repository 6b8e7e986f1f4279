//! Task repository - to-dos optionally tied to a client

use crate::db::PoolManager;
use crate::error::Result;
use crate::query::{Column, TableSchema};
use crate::record::Record;

use super::table::Table;

pub static TASKS: TableSchema = TableSchema {
    table: "tasks",
    resource: "task",
    columns: &[
        Column::text("client_id", "clientId"),
        Column::text("title", "title"),
        Column::text("description", "description"),
        Column::timestamp("due_date", "dueDate"),
        Column::boolean("completed", "completed"),
        Column::timestamp("completed_at", "completedAt"),
        Column::text("priority", "priority"),
    ],
};

const ORDER: &str = "created_at DESC";

/// Task repository
pub struct TaskRepo<'a> {
    table: Table<'a>,
}

impl<'a> TaskRepo<'a> {
    pub fn new(pool: &'a PoolManager) -> Self {
        Self {
            table: Table::new(pool, &TASKS),
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

    pub async fn complete(&self, id: &str) -> Result<Record> {
        self.table.complete(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.table.delete(id).await
    }
}
