//! init-db command - create missing tables

use anyhow::{Context, Result};
use crm_core::{ensure_tables, PoolManager};
use serde_json::json;

use super::print_json;

pub async fn run_init_db(pool: &PoolManager) -> Result<()> {
    ensure_tables(pool)
        .await
        .context("failed to create tables")?;

    let tables: Vec<_> = crm_core::db::schema::table_names().collect();
    print_json(&json!({ "status": "ok", "tables": tables }))
}
