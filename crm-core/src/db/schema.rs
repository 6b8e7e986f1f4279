//! Table bootstrap for the eight CRM / supermarket tables
//!
//! Idempotent `CREATE TABLE IF NOT EXISTS`; never alters an existing table.

use sqlx::PgConnection;

use crate::db::PoolManager;
use crate::error::Result;

const TABLES: &[(&str, &str)] = &[
    (
        "clients",
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            company TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'active',
            last_contact TIMESTAMPTZ,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "follow_ups",
        r#"
        CREATE TABLE IF NOT EXISTS follow_ups (
            id TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
            client_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            scheduled_date TIMESTAMPTZ NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT FALSE,
            completed_at TIMESTAMPTZ,
            type TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "tasks",
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
            client_id TEXT,
            title TEXT NOT NULL,
            description TEXT,
            due_date TIMESTAMPTZ,
            completed BOOLEAN NOT NULL DEFAULT FALSE,
            completed_at TIMESTAMPTZ,
            priority TEXT NOT NULL DEFAULT 'medium',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "interactions",
        r#"
        CREATE TABLE IF NOT EXISTS interactions (
            id TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
            client_id TEXT NOT NULL,
            type TEXT NOT NULL,
            subject TEXT NOT NULL,
            notes TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "supermarkets",
        r#"
        CREATE TABLE IF NOT EXISTS supermarkets (
            id TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
            name TEXT NOT NULL,
            location TEXT NOT NULL,
            city TEXT NOT NULL,
            region TEXT NOT NULL,
            size TEXT NOT NULL,
            type TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "sales",
        r#"
        CREATE TABLE IF NOT EXISTS sales (
            id TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
            supermarket_id TEXT NOT NULL,
            date TIMESTAMPTZ NOT NULL,
            category TEXT NOT NULL,
            product TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            unit_price INTEGER NOT NULL,
            total_amount INTEGER NOT NULL,
            payment_method TEXT NOT NULL,
            customer_age INTEGER,
            customer_gender TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "inventory",
        r#"
        CREATE TABLE IF NOT EXISTS inventory (
            id TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
            supermarket_id TEXT NOT NULL,
            product TEXT NOT NULL,
            category TEXT NOT NULL,
            current_stock INTEGER NOT NULL,
            minimum_stock INTEGER NOT NULL,
            last_restocked TIMESTAMPTZ,
            supplier TEXT NOT NULL,
            cost_price INTEGER NOT NULL,
            selling_price INTEGER NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "customer_traffic",
        r#"
        CREATE TABLE IF NOT EXISTS customer_traffic (
            id TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
            supermarket_id TEXT NOT NULL,
            date TIMESTAMPTZ NOT NULL,
            hour INTEGER NOT NULL,
            visitor_count INTEGER NOT NULL,
            avg_transaction_value INTEGER NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
];

/// Create any of the eight tables that do not exist yet.
///
/// Parent tables come first; `<entity>_id` columns are soft references.
pub async fn ensure_tables(pool: &PoolManager) -> Result<()> {
    let mut conn = pool.acquire().await?;
    create_all(&mut conn).await
}

async fn create_all(conn: &mut PgConnection) -> Result<()> {
    tracing::info!("Ensuring CRM tables exist...");

    for (table, ddl) in TABLES {
        tracing::debug!(table, "create table if not exists");
        sqlx::query(ddl).execute(&mut *conn).await?;
    }

    tracing::info!(tables = TABLES.len(), "CRM tables ready");
    Ok(())
}

/// Table names in creation order.
pub fn table_names() -> impl Iterator<Item = &'static str> {
    TABLES.iter().map(|(name, _)| *name)
}
