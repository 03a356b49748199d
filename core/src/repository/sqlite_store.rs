//! SQLite Store
//!
//! Local `RemoteStore` backed by one rusqlite connection. Ids are uuid v4,
//! timestamps RFC 3339 with microseconds, like the hosted store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::schema::{column, columns, writable, ColumnKind};
use super::traits::RemoteStore;
use crate::domain::{DomainError, DomainResult, OrderBy, Row, Table};

/// SQLite implementation of the remote store
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

fn remote(e: rusqlite::Error) -> DomainError {
    DomainError::Remote(e.to_string())
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn select_list(table: Table) -> String {
    columns(table)
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// JSON value -> SQLite value for a column of the given kind
fn to_sql(table: Table, name: &str, kind: ColumnKind, value: &Value) -> DomainResult<SqlValue> {
    if !kind.accepts(value) {
        return Err(DomainError::InvalidInput(format!(
            "bad value for {}.{}: {}",
            table, name, value
        )));
    }
    Ok(match value {
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Number(n) => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        _ => SqlValue::Null,
    })
}

/// SQLite value -> JSON value for a column of the given kind
fn from_sql(kind: ColumnKind, value: ValueRef<'_>) -> Value {
    match (kind, value) {
        (_, ValueRef::Null) => Value::Null,
        (ColumnKind::Bool, ValueRef::Integer(i)) => Value::Bool(i != 0),
        (_, ValueRef::Integer(i)) => Value::from(i),
        (_, ValueRef::Real(f)) => Value::from(f),
        (_, ValueRef::Text(t)) => Value::String(String::from_utf8_lossy(t).into_owned()),
        (_, ValueRef::Blob(_)) => Value::Null,
    }
}

fn read_row(table: Table, row: &rusqlite::Row<'_>) -> rusqlite::Result<Row> {
    let mut out = Row::new();
    for (i, (name, kind)) in columns(table).iter().enumerate() {
        out.insert((*name).to_string(), from_sql(*kind, row.get_ref(i)?));
    }
    Ok(out)
}

fn query_rows(
    conn: &Connection,
    table: Table,
    sql: &str,
    params: Vec<SqlValue>,
) -> DomainResult<Vec<Row>> {
    let mut stmt = conn.prepare(sql).map_err(remote)?;
    let rows = stmt
        .query_map(params_from_iter(params), |row| read_row(table, row))
        .map_err(remote)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(remote)
}

fn find_by_id(conn: &Connection, table: Table, id: &str) -> DomainResult<Option<Row>> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", select_list(table), table);
    let mut rows = query_rows(conn, table, &sql, vec![SqlValue::Text(id.to_string())])?;
    Ok(rows.pop())
}

/// Checked (column, value) pairs for a write
fn bind_fields(table: Table, fields: &Row) -> DomainResult<Vec<(&'static str, SqlValue)>> {
    fields
        .iter()
        .map(|(name, value)| {
            let (column, kind) = writable(table, name)?;
            Ok((column, to_sql(table, column, kind, value)?))
        })
        .collect()
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl RemoteStore for SqliteStore {
    async fn list(&self, table: Table, order: OrderBy) -> DomainResult<Vec<Row>> {
        let (order_col, _) = column(table, order.column)?;
        let direction = if order.ascending { "ASC" } else { "DESC" };
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {} {dir}, rowid {dir}",
            select_list(table),
            table,
            order_col,
            dir = direction
        );

        let conn = self.conn.lock().await;
        let rows = query_rows(&conn, table, &sql, Vec::new())?;
        debug!(%table, count = rows.len(), "list");
        Ok(rows)
    }

    async fn insert(&self, table: Table, fields: Row) -> DomainResult<Row> {
        let bound = bind_fields(table, &fields)?;
        let id = uuid::Uuid::new_v4().to_string();
        let stamp = now();

        let mut names = vec!["id", "created_at", "updated_at"];
        let mut values = vec![
            SqlValue::Text(id.clone()),
            SqlValue::Text(stamp.clone()),
            SqlValue::Text(stamp),
        ];
        for (name, value) in bound {
            names.push(name);
            values.push(value);
        }
        let placeholders = (1..=names.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            names.join(", "),
            placeholders
        );

        let conn = self.conn.lock().await;
        conn.execute(&sql, params_from_iter(values)).map_err(remote)?;
        debug!(%table, %id, "insert");
        find_by_id(&conn, table, &id)?
            .ok_or_else(|| DomainError::NotFound(format!("{}/{}", table, id)))
    }

    async fn update(&self, table: Table, id: &str, fields: Row) -> DomainResult<Row> {
        let bound = bind_fields(table, &fields)?;

        let mut assignments = Vec::with_capacity(bound.len() + 1);
        let mut values = Vec::with_capacity(bound.len() + 2);
        for (i, (name, value)) in bound.into_iter().enumerate() {
            assignments.push(format!("{} = ?{}", name, i + 1));
            values.push(value);
        }
        assignments.push(format!("updated_at = ?{}", values.len() + 1));
        values.push(SqlValue::Text(now()));
        let id_param = values.len() + 1;
        values.push(SqlValue::Text(id.to_string()));

        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            table,
            assignments.join(", "),
            id_param
        );

        let conn = self.conn.lock().await;
        let changed = conn.execute(&sql, params_from_iter(values)).map_err(remote)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("{}/{}", table, id)));
        }
        debug!(%table, %id, columns = fields.len(), "update");
        find_by_id(&conn, table, id)?
            .ok_or_else(|| DomainError::NotFound(format!("{}/{}", table, id)))
    }

    async fn delete(&self, table: Table, id: &str) -> DomainResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", table);
        let conn = self.conn.lock().await;
        let removed = conn.execute(&sql, [id]).map_err(remote)?;
        debug!(%table, %id, removed, "delete");
        Ok(())
    }

    async fn select_eq(
        &self,
        table: Table,
        column_name: &str,
        value: &str,
    ) -> DomainResult<Vec<Row>> {
        let (col, _) = column(table, column_name)?;
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1 ORDER BY rowid",
            select_list(table),
            table,
            col
        );

        let conn = self.conn.lock().await;
        let rows = query_rows(&conn, table, &sql, vec![SqlValue::Text(value.to_string())])?;
        debug!(%table, column = col, count = rows.len(), "select_eq");
        Ok(rows)
    }
}
