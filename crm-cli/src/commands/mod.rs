//! Command implementations for the crm CLI

pub mod analytics;
pub mod db;
pub mod records;

use anyhow::Result;
use serde::Serialize;

// Re-export main dispatcher functions for flat access from main.rs
pub use analytics::{run_analytics, run_custom, run_stats};
pub use db::run_init_db;
pub use records::{
    run_complete, run_create, run_delete, run_get, run_list, run_search, run_update,
};

/// Write a value to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
