//! crm-core: PostgreSQL data access for a small CRM and supermarket analytics
//!
//! Pooled connections, dynamic CRUD over allow-listed columns, and a fixed
//! catalogue of aggregate reports. Rows cross the boundary as [`Record`]s.

pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod query;
pub mod record;
pub mod repos;

pub use analytics::{Analytics, AnalyticsQuery, SummaryStats};
pub use config::{CrmConfig, DatabaseConfig};
pub use db::{ensure_tables, PoolManager};
pub use error::{DbError, Result};
pub use record::{Record, Value};
pub use repos::{
    ClientRepo, FollowUpRepo, InteractionRepo, InventoryRepo, SalesRepo, SupermarketRepo,
    TaskRepo, TrafficRepo,
};
