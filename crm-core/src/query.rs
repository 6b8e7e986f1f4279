//! Dynamic INSERT / UPDATE construction from partial field maps
//!
//! Column names placed in SQL text come only from a table's static allow-list;
//! caller keys are looked up against it and anything unknown is rejected before
//! a statement exists. Values are always bound parameters.

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

use crate::error::{DbError, Result};
use crate::record::{Record, Value};

/// Storage type of a writable column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Boolean,
    Timestamp,
}

/// One allow-listed column: store name, camelCase transport alias, type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub alias: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn text(name: &'static str, alias: &'static str) -> Self {
        Self { name, alias, kind: ColumnKind::Text }
    }

    pub const fn integer(name: &'static str, alias: &'static str) -> Self {
        Self { name, alias, kind: ColumnKind::Integer }
    }

    pub const fn boolean(name: &'static str, alias: &'static str) -> Self {
        Self { name, alias, kind: ColumnKind::Boolean }
    }

    pub const fn timestamp(name: &'static str, alias: &'static str) -> Self {
        Self { name, alias, kind: ColumnKind::Timestamp }
    }
}

/// Static description of an entity table and its writable columns.
///
/// `id` and `created_at` are store-managed and never part of `columns`.
#[derive(Debug)]
pub struct TableSchema {
    pub table: &'static str,
    pub resource: &'static str,
    pub columns: &'static [Column],
}

impl TableSchema {
    /// Look up a caller key by column name or alias.
    pub fn column(&self, key: &str) -> Option<&'static Column> {
        self.columns
            .iter()
            .find(|c| c.name == key || c.alias == key)
    }
}

/// A value coerced to its column's type, ready to bind
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(Option<String>),
    Int(Option<i32>),
    Bool(Option<bool>),
    Timestamp(Option<DateTime<Utc>>),
}

/// SQL text plus its positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Param>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Build the executable sqlx query, binding params in order.
    pub fn query(&self) -> Query<'_, Postgres, PgArguments> {
        self.params
            .iter()
            .fold(sqlx::query(&self.sql), |query, param| match param {
                Param::Text(v) => query.bind(v.clone()),
                Param::Int(v) => query.bind(*v),
                Param::Bool(v) => query.bind(*v),
                Param::Timestamp(v) => query.bind(*v),
            })
    }
}

/// `SELECT * FROM <table> WHERE id = $1`
pub fn select_by_id(schema: &TableSchema, id: &str) -> Statement {
    Statement::new(format!("SELECT * FROM {} WHERE id = $1", schema.table))
        .bind(Param::Text(Some(id.to_owned())))
}

/// Positional INSERT of the given fields, returning the stored row.
///
/// An empty field map inserts `DEFAULT VALUES`.
pub fn build_insert(schema: &TableSchema, fields: &Record) -> Result<Statement> {
    let mut slots = bind_fields(schema, fields)?;
    pair_completion(schema, &mut slots, WriteKind::Insert)?;

    if slots.is_empty() {
        return Ok(Statement::new(format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING *",
            schema.table
        )));
    }

    let columns: Vec<&str> = slots.iter().map(|(c, _)| c.name).collect();
    let (values, params) = render_slots(slots, 1);

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        schema.table,
        columns.join(", "),
        values.join(", ")
    );

    Ok(params
        .into_iter()
        .fold(Statement::new(sql), |stmt, param| stmt.bind(param)))
}

/// Partial UPDATE: id at `$1`, changed fields from `$2` on.
///
/// An empty field map becomes a read-by-id so the caller still learns whether
/// the row exists.
pub fn build_update(schema: &TableSchema, id: &str, fields: &Record) -> Result<Statement> {
    let mut slots = bind_fields(schema, fields)?;
    pair_completion(schema, &mut slots, WriteKind::Update)?;

    if slots.is_empty() {
        return Ok(select_by_id(schema, id));
    }

    let columns: Vec<&str> = slots.iter().map(|(c, _)| c.name).collect();
    let (values, params) = render_slots(slots, 2);
    let assignments: Vec<String> = columns
        .iter()
        .zip(&values)
        .map(|(column, value)| format!("{} = {}", column, value))
        .collect();

    let sql = format!(
        "UPDATE {} SET {} WHERE id = $1 RETURNING *",
        schema.table,
        assignments.join(", ")
    );

    let stmt = Statement::new(sql).bind(Param::Text(Some(id.to_owned())));
    Ok(params.into_iter().fold(stmt, |stmt, param| stmt.bind(param)))
}

/// Right-hand side of one column write
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Bind(Param),
    /// Fixed SQL expression, never caller text
    Expr(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteKind {
    Insert,
    Update,
}

/// SQL value text per slot, numbering placeholders from `first`, plus the
/// params those placeholders bind.
fn render_slots(slots: Vec<(&'static Column, Slot)>, first: usize) -> (Vec<String>, Vec<Param>) {
    let mut values = Vec::with_capacity(slots.len());
    let mut params = Vec::with_capacity(slots.len());

    for (_, slot) in slots {
        match slot {
            Slot::Bind(param) => {
                values.push(format!("${}", first + params.len()));
                params.push(param);
            }
            Slot::Expr(expr) => values.push(expr.to_string()),
        }
    }
    (values, params)
}

const COMPLETED: &str = "completed";
const COMPLETED_AT: &str = "completed_at";

/// Keep `completed_at` set iff `completed` is true on tables that have both.
///
/// Setting `completed` also writes `completed_at`: NULL when false, and when
/// true without an explicit timestamp, the existing one or NOW(). Writing
/// `completed_at` alone, or a timestamp next to `completed = false`, is rejected.
fn pair_completion(
    schema: &TableSchema,
    slots: &mut Vec<(&'static Column, Slot)>,
    write: WriteKind,
) -> Result<()> {
    let (Some(_), Some(stamp_column)) = (schema.column(COMPLETED), schema.column(COMPLETED_AT))
    else {
        return Ok(());
    };

    let completed = slots.iter().find_map(|(column, slot)| match slot {
        Slot::Bind(Param::Bool(flag)) if column.name == COMPLETED => Some(*flag),
        _ => None,
    });
    let stamp_pos = slots.iter().position(|(c, _)| c.name == COMPLETED_AT);
    let stamp_given = stamp_pos
        .is_some_and(|i| !matches!(slots[i].1, Slot::Bind(Param::Timestamp(None))));

    let paired = match (completed, stamp_given) {
        (None, _) if stamp_pos.is_none() => return Ok(()),
        (None, _) => {
            return Err(DbError::validation(format!(
                "{} can only be written together with {} for {}",
                COMPLETED_AT, COMPLETED, schema.resource
            )))
        }
        // NOT NULL column, the store rejects it
        (Some(None), _) => return Ok(()),
        (Some(Some(true)), true) => return Ok(()),
        (Some(Some(true)), false) => match write {
            WriteKind::Insert => "NOW()",
            WriteKind::Update => "COALESCE(completed_at, NOW())",
        },
        (Some(Some(false)), false) => "NULL",
        (Some(Some(false)), true) => {
            return Err(DbError::validation(format!(
                "{} must be null while {} is false for {}",
                COMPLETED_AT, COMPLETED, schema.resource
            )))
        }
    };

    match stamp_pos {
        Some(i) => slots[i].1 = Slot::Expr(paired),
        None => slots.push((stamp_column, Slot::Expr(paired))),
    }
    Ok(())
}

/// Resolve every key against the allow-list and coerce its value.
fn bind_fields(schema: &TableSchema, fields: &Record) -> Result<Vec<(&'static Column, Slot)>> {
    let mut bound: Vec<(&'static Column, Slot)> = Vec::with_capacity(fields.len());

    for (key, value) in fields.iter() {
        let column = schema.column(key).ok_or_else(|| {
            tracing::warn!(table = schema.table, field = key, "rejected field outside allow-list");
            DbError::validation(format!("unknown field '{}' for {}", key, schema.resource))
        })?;

        if bound.iter().any(|(c, _)| c.name == column.name) {
            return Err(DbError::validation(format!(
                "field '{}' given more than once for {}",
                column.name, schema.resource
            )));
        }

        bound.push((column, Slot::Bind(coerce(column, value)?)));
    }

    Ok(bound)
}

fn coerce(column: &Column, value: &Value) -> Result<Param> {
    let mismatch = || {
        DbError::validation(format!(
            "field '{}' expects {:?}, got {}",
            column.name,
            column.kind,
            value.kind()
        ))
    };

    match (column.kind, value) {
        (ColumnKind::Text, Value::Null) => Ok(Param::Text(None)),
        (ColumnKind::Text, Value::Text(s)) => Ok(Param::Text(Some(s.clone()))),

        (ColumnKind::Integer, Value::Null) => Ok(Param::Int(None)),
        (ColumnKind::Integer, Value::Integer(n)) => i32::try_from(*n)
            .map(|n| Param::Int(Some(n)))
            .map_err(|_| {
                DbError::validation(format!("field '{}' out of range: {}", column.name, n))
            }),

        (ColumnKind::Boolean, Value::Null) => Ok(Param::Bool(None)),
        (ColumnKind::Boolean, Value::Boolean(b)) => Ok(Param::Bool(Some(*b))),

        (ColumnKind::Timestamp, Value::Null) => Ok(Param::Timestamp(None)),
        (ColumnKind::Timestamp, Value::Timestamp(ts)) => Ok(Param::Timestamp(Some(*ts))),
        (ColumnKind::Timestamp, Value::Text(s)) => parse_timestamp(s)
            .map(|ts| Param::Timestamp(Some(ts)))
            .ok_or_else(|| {
                DbError::validation(format!(
                    "field '{}' is not an ISO-8601 timestamp: '{}'",
                    column.name, s
                ))
            }),

        _ => Err(mismatch()),
    }
}

/// RFC 3339, or a zone-less ISO-8601 datetime taken as UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.and_utc())
}
