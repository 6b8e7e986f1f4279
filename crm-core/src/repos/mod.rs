//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One statement per operation, one pooled connection per statement
//! - Writable columns declared in a static allow-list (`TableSchema`)
//! - Records in, records out; no driver row types leak to callers

mod table;

pub mod clients;
pub mod follow_ups;
pub mod interactions;
pub mod inventory;
pub mod sales;
pub mod supermarkets;
pub mod tasks;
pub mod traffic;

pub use clients::{ClientRepo, CLIENTS};
pub use follow_ups::{FollowUpRepo, FOLLOW_UPS};
pub use interactions::{InteractionRepo, INTERACTIONS};
pub use inventory::{InventoryRepo, INVENTORY};
pub use sales::{SalesRepo, SALES};
pub use supermarkets::{SupermarketRepo, SUPERMARKETS};
pub use tasks::{TaskRepo, TASKS};
pub use traffic::{TrafficRepo, CUSTOMER_TRAFFIC};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::TableSchema;

    fn all() -> [&'static TableSchema; 8] {
        [
            &CLIENTS,
            &FOLLOW_UPS,
            &TASKS,
            &INTERACTIONS,
            &SUPERMARKETS,
            &SALES,
            &INVENTORY,
            &CUSTOMER_TRAFFIC,
        ]
    }

    #[test]
    fn allow_lists_exclude_store_managed_columns() {
        for schema in all() {
            for key in ["id", "created_at", "createdAt"] {
                assert!(schema.column(key).is_none(), "{} allows {}", schema.table, key);
            }
        }
    }

    #[test]
    fn allow_list_names_are_unique() {
        for schema in all() {
            for (i, column) in schema.columns.iter().enumerate() {
                let clash = schema.columns[i + 1..]
                    .iter()
                    .any(|c| c.name == column.name || c.alias == column.alias);
                assert!(!clash, "{}.{} declared twice", schema.table, column.name);
            }
        }
    }

    #[test]
    fn parent_references_follow_naming() {
        for schema in [&FOLLOW_UPS, &TASKS, &INTERACTIONS] {
            assert!(schema.column("client_id").is_some(), "{}", schema.table);
        }
        for schema in [&SALES, &INVENTORY, &CUSTOMER_TRAFFIC] {
            assert!(schema.column("supermarket_id").is_some(), "{}", schema.table);
        }
    }
}
