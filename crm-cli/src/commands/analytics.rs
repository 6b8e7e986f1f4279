//! Analytics commands - dashboard stats, catalogue reports, custom requests

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crm_core::{Analytics, AnalyticsQuery, PoolManager};

use super::print_json;

#[derive(Parser, Debug)]
pub struct AnalyticsArgs {
    /// Report to run
    #[arg(value_enum)]
    pub report: Report,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Sales totals per product category
    SalesByCategory,
    /// Sales totals per payment method
    SalesByPayment,
    /// Sales totals per gender and age bucket
    SalesByDemographic,
    /// Inventory at or below minimum stock
    LowStock,
    /// Visitors and average transaction per hour of day
    TrafficByHour,
    /// Visitors per supermarket
    TrafficBySupermarket,
}

impl From<Report> for AnalyticsQuery {
    fn from(report: Report) -> Self {
        match report {
            Report::SalesByCategory => AnalyticsQuery::SalesByCategory,
            Report::SalesByPayment => AnalyticsQuery::SalesByPaymentMethod,
            Report::SalesByDemographic => AnalyticsQuery::SalesByDemographic,
            Report::LowStock => AnalyticsQuery::LowStock,
            Report::TrafficByHour => AnalyticsQuery::TrafficByHour,
            Report::TrafficBySupermarket => AnalyticsQuery::TrafficBySupermarket,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CustomArgs {
    /// Data set: sales, traffic or inventory
    #[arg(long)]
    pub kind: String,

    /// Grouping (sales: category|payment|demographics, traffic: hour|supermarket)
    #[arg(long)]
    pub group_by: Option<String>,

    /// Filter (inventory: low-stock)
    #[arg(long)]
    pub filter: Option<String>,
}

pub async fn run_stats(pool: &PoolManager) -> Result<()> {
    let stats = Analytics::new(pool)
        .summary()
        .await
        .context("failed to compute summary stats")?;
    print_json(&stats)
}

pub async fn run_analytics(args: AnalyticsArgs, pool: &PoolManager) -> Result<()> {
    let rows = Analytics::new(pool)
        .run_query(args.report.into())
        .await
        .with_context(|| format!("failed to run {:?} report", args.report))?;
    print_json(&rows)
}

pub async fn run_custom(args: CustomArgs, pool: &PoolManager) -> Result<()> {
    let query = AnalyticsQuery::resolve(
        &args.kind,
        args.group_by.as_deref(),
        args.filter.as_deref(),
    )?;
    tracing::debug!(?query, "resolved custom analytics request");

    let rows = Analytics::new(pool).run_query(query).await?;
    print_json(&rows)
}
