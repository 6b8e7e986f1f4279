//! Client repository
//!
//! Full CRUD plus case-insensitive search over name, email and company.

use crate::db::PoolManager;
use crate::error::Result;
use crate::query::{Column, Param, Statement, TableSchema};
use crate::record::Record;

use super::table::Table;

pub static CLIENTS: TableSchema = TableSchema {
    table: "clients",
    resource: "client",
    columns: &[
        Column::text("name", "name"),
        Column::text("email", "email"),
        Column::text("phone", "phone"),
        Column::text("company", "company"),
        Column::text("status", "status"),
        Column::timestamp("last_contact", "lastContact"),
    ],
};

const ORDER: &str = "created_at DESC";

/// Client repository
pub struct ClientRepo<'a> {
    table: Table<'a>,
}

impl<'a> ClientRepo<'a> {
    pub fn new(pool: &'a PoolManager) -> Self {
        Self {
            table: Table::new(pool, &CLIENTS),
        }
    }

    /// All clients, newest first.
    pub async fn list(&self) -> Result<Vec<Record>> {
        self.table.list(ORDER).await
    }

    pub async fn get(&self, id: &str) -> Result<Record> {
        self.table.get(id).await
    }

    /// Substring match (case-insensitive) on name OR email OR company.
    ///
    /// `%` and `_` in the query match literally.
    pub async fn search(&self, query: &str) -> Result<Vec<Record>> {
        let pattern = format!("%{}%", escape_like(query));
        let stmt = Statement::new(format!(
            "SELECT * FROM clients \
             WHERE name ILIKE $1 OR email ILIKE $1 OR company ILIKE $1 \
             ORDER BY {}",
            ORDER
        ))
        .bind(Param::Text(Some(pattern)));

        self.table.fetch_all(&stmt).await
    }

    pub async fn create(&self, fields: &Record) -> Result<Record> {
        self.table.create(fields).await
    }

    pub async fn update(&self, id: &str, fields: &Record) -> Result<Record> {
        self.table.update(id, fields).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.table.delete(id).await
    }
}

/// Escape LIKE wildcards using Postgres' default `\` escape character.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
