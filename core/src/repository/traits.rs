//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for the remote store.
//! Implementations: hosted PostgREST, local SQLite.

use async_trait::async_trait;

use crate::domain::{decode_row, DomainResult, OrderBy, Record, Row, Table};

/// Table-addressed store exchanging untyped rows
///
/// All operations are async to support various backends. On wasm the
/// futures are not `Send`, so the bound is relaxed there.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait RemoteStore: Send + Sync {
    /// All rows of a table in the given order
    async fn list(&self, table: Table, order: OrderBy) -> DomainResult<Vec<Row>>;

    /// Insert one row; the store assigns id and timestamps
    async fn insert(&self, table: Table, fields: Row) -> DomainResult<Row>;

    /// Update the listed columns of one row
    async fn update(&self, table: Table, id: &str, fields: Row) -> DomainResult<Row>;

    /// Delete one row by id
    async fn delete(&self, table: Table, id: &str) -> DomainResult<()>;

    /// Rows whose `column` equals `value`
    async fn select_eq(&self, table: Table, column: &str, value: &str) -> DomainResult<Vec<Row>>;
}

/// List and decode every record of `R`'s table
pub async fn list_records<R: Record>(store: &dyn RemoteStore) -> DomainResult<Vec<R>> {
    let rows = store.list(R::TABLE, R::ORDER).await?;
    rows.into_iter().map(decode_row::<R>).collect()
}
