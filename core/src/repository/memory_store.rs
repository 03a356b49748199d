//! In-Memory Store
//!
//! `RemoteStore` over plain vectors, used by the browser build when no
//! hosted store is configured. Applies the column checks, insert defaults
//! and table constraints (NOT NULL, CHECK, UNIQUE) of the SQLite tables.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::schema::{
    allowed_values, column, columns, insert_default, non_negative, not_null, unique, writable,
};
use super::traits::RemoteStore;
use crate::domain::{DomainError, DomainResult, OrderBy, Row, Table};

pub struct MemoryStore {
    tables: Mutex<HashMap<Table, Vec<Row>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store pre-filled with rows that already carry their ids
    pub fn with_rows(rows: impl IntoIterator<Item = (Table, Row)>) -> Self {
        let mut tables: HashMap<Table, Vec<Row>> = HashMap::new();
        for (table, row) in rows {
            tables.entry(table).or_default().push(row);
        }
        Self {
            tables: Mutex::new(tables),
            next_id: AtomicU64::new(1),
        }
    }

    fn fresh_id(&self) -> String {
        format!("mem-{}", self.next_id.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn check_fields(table: Table, fields: &Row) -> DomainResult<()> {
    for (name, value) in fields {
        let (col, kind) = writable(table, name)?;
        if !kind.accepts(value) {
            return Err(DomainError::InvalidInput(format!(
                "bad value for {}.{}: {}",
                table, col, value
            )));
        }
    }
    Ok(())
}

/// Table constraints on a complete row; violations read like the hosted store's errors
fn check_constraints(table: Table, row: &Row, others: &[Row]) -> DomainResult<()> {
    for name in not_null(table) {
        if row.get(*name).map_or(true, Value::is_null) {
            return Err(DomainError::Remote(format!(
                "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
                name, table
            )));
        }
    }
    for (name, value) in row {
        let allowed = allowed_values(table, name);
        let bad_enum = match (allowed, value.as_str()) {
            (Some(allowed), Some(v)) => !allowed.contains(&v),
            _ => false,
        };
        let negative = non_negative(table, name) && value.as_f64().map_or(false, |v| v < 0.0);
        if bad_enum || negative {
            return Err(DomainError::Remote(format!(
                "new row for relation \"{}\" violates check constraint \"{}_{}_check\"",
                table, table, name
            )));
        }
    }
    for name in unique(table) {
        let Some(value) = row.get(*name).filter(|v| !v.is_null()) else {
            continue;
        };
        let taken = others
            .iter()
            .any(|other| id_of(other) != id_of(row) && other.get(*name) == Some(value));
        if taken {
            return Err(DomainError::Remote(format!(
                "duplicate key value violates unique constraint \"{}_{}_key\"",
                table, name
            )));
        }
    }
    Ok(())
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn id_of(row: &Row) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl RemoteStore for MemoryStore {
    async fn list(&self, table: Table, order: OrderBy) -> DomainResult<Vec<Row>> {
        let (order_col, _) = column(table, order.column)?;
        let tables = self.tables.lock().await;
        let mut rows: Vec<(usize, Row)> = tables
            .get(&table)
            .map(|rows| rows.iter().cloned().enumerate().collect())
            .unwrap_or_default();

        // Ties keep insertion order, reversed along with a descending sort
        rows.sort_by(|(ia, a), (ib, b)| {
            compare(a.get(order_col), b.get(order_col)).then(ia.cmp(ib))
        });
        if !order.ascending {
            rows.reverse();
        }
        debug!(%table, count = rows.len(), "list");
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    async fn insert(&self, table: Table, fields: Row) -> DomainResult<Row> {
        check_fields(table, &fields)?;
        let today = Utc::now().date_naive();
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let mut row = Row::new();
        for (name, _) in columns(table) {
            let value = match *name {
                "id" => Value::String(self.fresh_id()),
                "created_at" | "updated_at" => Value::String(stamp.clone()),
                _ => fields
                    .get(*name)
                    .cloned()
                    .filter(|v| !v.is_null())
                    .unwrap_or_else(|| insert_default(table, name, today)),
            };
            row.insert((*name).to_string(), value);
        }

        let mut tables = self.tables.lock().await;
        let rows = tables.entry(table).or_default();
        check_constraints(table, &row, &rows[..])?;
        debug!(%table, id = id_of(&row).unwrap_or_default(), "insert");
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: Table, id: &str, fields: Row) -> DomainResult<Row> {
        check_fields(table, &fields)?;
        let mut tables = self.tables.lock().await;
        let rows = tables.entry(table).or_default();
        let index = rows
            .iter()
            .position(|row| id_of(row) == Some(id))
            .ok_or_else(|| DomainError::NotFound(format!("{}/{}", table, id)))?;

        let mut row = rows[index].clone();
        for (name, value) in fields {
            row.insert(name, value);
        }
        row.insert(
            "updated_at".into(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        check_constraints(table, &row, &rows[..])?;
        debug!(%table, %id, "update");
        rows[index] = row.clone();
        Ok(row)
    }

    async fn delete(&self, table: Table, id: &str) -> DomainResult<()> {
        let mut tables = self.tables.lock().await;
        if let Some(rows) = tables.get_mut(&table) {
            rows.retain(|row| id_of(row) != Some(id));
        }
        debug!(%table, %id, "delete");
        Ok(())
    }

    async fn select_eq(
        &self,
        table: Table,
        column_name: &str,
        value: &str,
    ) -> DomainResult<Vec<Row>> {
        let (col, _) = column(table, column_name)?;
        let tables = self.tables.lock().await;
        let rows: Vec<Row> = tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.get(col).and_then(Value::as_str) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        debug!(%table, column = col, count = rows.len(), "select_eq");
        Ok(rows)
    }
}
