//! Shared single-statement operations over one entity table
//!
//! Entity repositories wrap a [`Table`] and expose only the operations their
//! entity defines. Every call acquires one connection, runs one statement and
//! hands the connection back before returning.

use crate::db::PoolManager;
use crate::error::{DbError, Result};
use crate::query::{build_insert, build_update, select_by_id, Param, Statement, TableSchema};
use crate::record::{to_record, Record};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Table<'a> {
    pool: &'a PoolManager,
    schema: &'static TableSchema,
}

impl<'a> Table<'a> {
    pub(crate) fn new(pool: &'a PoolManager, schema: &'static TableSchema) -> Self {
        Self { pool, schema }
    }

    /// All rows in the given order. `order_by` is a static clause, never caller input.
    pub(crate) async fn list(&self, order_by: &'static str) -> Result<Vec<Record>> {
        let stmt = Statement::new(format!(
            "SELECT * FROM {} ORDER BY {}",
            self.schema.table, order_by
        ));
        self.fetch_all(&stmt).await
    }

    /// Rows whose `column` equals `value`.
    pub(crate) async fn list_where(
        &self,
        column: &'static str,
        value: &str,
        order_by: &'static str,
    ) -> Result<Vec<Record>> {
        let stmt = Statement::new(format!(
            "SELECT * FROM {} WHERE {} = $1 ORDER BY {}",
            self.schema.table, column, order_by
        ))
        .bind(Param::Text(Some(value.to_owned())));
        self.fetch_all(&stmt).await
    }

    pub(crate) async fn get(&self, id: &str) -> Result<Record> {
        self.fetch_optional(&select_by_id(self.schema, id))
            .await?
            .ok_or_else(|| DbError::not_found(self.schema.resource, id))
    }

    pub(crate) async fn create(&self, fields: &Record) -> Result<Record> {
        let stmt = build_insert(self.schema, fields)?;
        let record = self.fetch_one(&stmt).await?;

        tracing::debug!(
            table = self.schema.table,
            id = record.id().unwrap_or_default(),
            "created"
        );
        Ok(record)
    }

    pub(crate) async fn update(&self, id: &str, fields: &Record) -> Result<Record> {
        let stmt = build_update(self.schema, id, fields)?;
        self.fetch_optional(&stmt)
            .await?
            .ok_or_else(|| DbError::not_found(self.schema.resource, id))
    }

    /// `true` if a row was removed; a missing id is `false`, not an error.
    pub(crate) async fn delete(&self, id: &str) -> Result<bool> {
        let stmt = Statement::new(format!("DELETE FROM {} WHERE id = $1", self.schema.table))
            .bind(Param::Text(Some(id.to_owned())));

        let mut conn = self.pool.acquire().await?;
        let result = stmt.query().execute(&mut *conn).await?;

        tracing::debug!(table = self.schema.table, id, rows = result.rows_affected(), "delete");
        Ok(result.rows_affected() > 0)
    }

    /// Mark completed in one statement. A row that is already completed keeps
    /// its first `completed_at`; a reopened row gets a fresh one.
    pub(crate) async fn complete(&self, id: &str) -> Result<Record> {
        let stmt = Statement::new(format!(
            "UPDATE {} SET completed = TRUE, \
             completed_at = CASE WHEN completed THEN COALESCE(completed_at, NOW()) ELSE NOW() END \
             WHERE id = $1 RETURNING *",
            self.schema.table
        ))
        .bind(Param::Text(Some(id.to_owned())));

        self.fetch_optional(&stmt)
            .await?
            .ok_or_else(|| DbError::not_found(self.schema.resource, id))
    }

    pub(crate) async fn fetch_all(&self, stmt: &Statement) -> Result<Vec<Record>> {
        tracing::debug!(table = self.schema.table, sql = stmt.sql(), "fetch all");
        let mut conn = self.pool.acquire().await?;
        let rows = stmt.query().fetch_all(&mut *conn).await?;
        rows.iter().map(to_record).collect()
    }

    pub(crate) async fn fetch_one(&self, stmt: &Statement) -> Result<Record> {
        tracing::debug!(table = self.schema.table, sql = stmt.sql(), "fetch one");
        let mut conn = self.pool.acquire().await?;
        let row = stmt.query().fetch_one(&mut *conn).await?;
        to_record(&row)
    }

    pub(crate) async fn fetch_optional(&self, stmt: &Statement) -> Result<Option<Record>> {
        tracing::debug!(table = self.schema.table, sql = stmt.sql(), "fetch optional");
        let mut conn = self.pool.acquire().await?;
        let row = stmt.query().fetch_optional(&mut *conn).await?;
        row.as_ref().map(to_record).transpose()
    }
}
