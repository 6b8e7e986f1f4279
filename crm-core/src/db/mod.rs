//! Database layer - connection pool and table bootstrap
//!
//! # Design Principles
//!
//! - One pool per process, held by an explicit `PoolManager` handle
//! - Pool is created on first use, never at import time
//! - Every statement checks out its own connection and returns it on drop

pub mod pool;
pub mod schema;

pub use pool::PoolManager;
pub use schema::ensure_tables;
