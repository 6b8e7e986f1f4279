//! Record commands - list, get, search, create, update, complete, delete
//!
//! Field maps come in as a JSON object (`--json '{"name": "Ada"}'` or `--json -`
//! for stdin) and use either column names or their camelCase aliases.

use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use crm_core::{
    ClientRepo, FollowUpRepo, InteractionRepo, InventoryRepo, PoolManager, Record, SalesRepo,
    SupermarketRepo, TaskRepo, TrafficRepo,
};
use serde_json::json;

use super::print_json;

/// Every stored entity
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Client,
    FollowUp,
    Task,
    Interaction,
    Supermarket,
    Sale,
    Inventory,
    Traffic,
}

/// Entities with get / update / delete by id
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editable {
    Client,
    FollowUp,
    Task,
}

/// Entities with a completion flag
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completable {
    FollowUp,
    Task,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub entity: Entity,

    /// Only rows for this client (follow-up, task, interaction)
    #[arg(long, conflicts_with = "supermarket")]
    pub client: Option<String>,

    /// Only rows for this supermarket (inventory)
    #[arg(long)]
    pub supermarket: Option<String>,
}

#[derive(Parser, Debug)]
pub struct GetArgs {
    #[arg(value_enum)]
    pub entity: Editable,
    /// Record id
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Substring to look for in client name, email or company
    pub query: String,
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    #[arg(value_enum)]
    pub entity: Entity,
    /// Field map as a JSON object, or `-` to read it from stdin
    #[arg(long, value_name = "JSON")]
    pub json: String,
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    #[arg(value_enum)]
    pub entity: Editable,
    /// Record id
    pub id: String,
    /// Fields to change as a JSON object, or `-` to read it from stdin
    #[arg(long, value_name = "JSON")]
    pub json: String,
}

#[derive(Parser, Debug)]
pub struct CompleteArgs {
    #[arg(value_enum)]
    pub entity: Completable,
    /// Record id
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    #[arg(value_enum)]
    pub entity: Editable,
    /// Record id
    pub id: String,
}

pub async fn run_list(args: ListArgs, pool: &PoolManager) -> Result<()> {
    let rows = match (args.entity, args.client.as_deref(), args.supermarket.as_deref()) {
        (Entity::Client, None, None) => ClientRepo::new(pool).list().await?,
        (Entity::FollowUp, None, None) => FollowUpRepo::new(pool).list().await?,
        (Entity::FollowUp, Some(client), None) => {
            FollowUpRepo::new(pool).list_by_client(client).await?
        }
        (Entity::Task, None, None) => TaskRepo::new(pool).list().await?,
        (Entity::Task, Some(client), None) => TaskRepo::new(pool).list_by_client(client).await?,
        (Entity::Interaction, None, None) => InteractionRepo::new(pool).list().await?,
        (Entity::Interaction, Some(client), None) => {
            InteractionRepo::new(pool).list_by_client(client).await?
        }
        (Entity::Supermarket, None, None) => SupermarketRepo::new(pool).list().await?,
        (Entity::Sale, None, None) => SalesRepo::new(pool).list().await?,
        (Entity::Inventory, None, None) => InventoryRepo::new(pool).list().await?,
        (Entity::Inventory, None, Some(store)) => {
            InventoryRepo::new(pool).list_by_supermarket(store).await?
        }
        (Entity::Traffic, None, None) => TrafficRepo::new(pool).list().await?,
        (entity, _, _) => bail!("{:?} cannot be filtered that way", entity),
    };

    tracing::debug!(entity = ?args.entity, rows = rows.len(), "listed");
    print_json(&rows)
}

pub async fn run_get(args: GetArgs, pool: &PoolManager) -> Result<()> {
    let record = match args.entity {
        Editable::Client => ClientRepo::new(pool).get(&args.id).await?,
        Editable::FollowUp => FollowUpRepo::new(pool).get(&args.id).await?,
        Editable::Task => TaskRepo::new(pool).get(&args.id).await?,
    };
    print_json(&record)
}

pub async fn run_search(args: SearchArgs, pool: &PoolManager) -> Result<()> {
    let rows = ClientRepo::new(pool).search(&args.query).await?;
    print_json(&rows)
}

pub async fn run_create(args: CreateArgs, pool: &PoolManager) -> Result<()> {
    let fields = read_fields(&args.json)?;

    let created = match args.entity {
        Entity::Client => ClientRepo::new(pool).create(&fields).await?,
        Entity::FollowUp => FollowUpRepo::new(pool).create(&fields).await?,
        Entity::Task => TaskRepo::new(pool).create(&fields).await?,
        Entity::Interaction => InteractionRepo::new(pool).create(&fields).await?,
        Entity::Supermarket => SupermarketRepo::new(pool).create(&fields).await?,
        Entity::Sale => SalesRepo::new(pool).create(&fields).await?,
        Entity::Inventory => InventoryRepo::new(pool).create(&fields).await?,
        Entity::Traffic => TrafficRepo::new(pool).create(&fields).await?,
    };
    print_json(&created)
}

pub async fn run_update(args: UpdateArgs, pool: &PoolManager) -> Result<()> {
    let fields = read_fields(&args.json)?;

    let updated = match args.entity {
        Editable::Client => ClientRepo::new(pool).update(&args.id, &fields).await?,
        Editable::FollowUp => FollowUpRepo::new(pool).update(&args.id, &fields).await?,
        Editable::Task => TaskRepo::new(pool).update(&args.id, &fields).await?,
    };
    print_json(&updated)
}

pub async fn run_complete(args: CompleteArgs, pool: &PoolManager) -> Result<()> {
    let record = match args.entity {
        Completable::FollowUp => FollowUpRepo::new(pool).complete(&args.id).await?,
        Completable::Task => TaskRepo::new(pool).complete(&args.id).await?,
    };
    print_json(&record)
}

pub async fn run_delete(args: DeleteArgs, pool: &PoolManager) -> Result<()> {
    let deleted = match args.entity {
        Editable::Client => ClientRepo::new(pool).delete(&args.id).await?,
        Editable::FollowUp => FollowUpRepo::new(pool).delete(&args.id).await?,
        Editable::Task => TaskRepo::new(pool).delete(&args.id).await?,
    };
    print_json(&json!({ "id": args.id, "deleted": deleted }))
}

/// Parse a `--json` argument, reading stdin for `-`.
fn read_fields(arg: &str) -> Result<Record> {
    let text = if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read field map from stdin")?;
        buf
    } else {
        arg.to_string()
    };
    parse_fields(&text)
}

fn parse_fields(text: &str) -> Result<Record> {
    let value: serde_json::Value =
        serde_json::from_str(text).context("field map is not valid JSON")?;
    Ok(Record::from_json(value)?)
}
