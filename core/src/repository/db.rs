//! Database Connection and Setup
//!
//! Opens the local SQLite database and runs migrations. The table layout
//! mirrors the hosted store so either backend serves the same rows.

use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use super::sqlite_store::SqliteStore;
use crate::domain::{DomainError, DomainResult};

/// Initialize database with path (":memory:" for a throwaway store)
pub async fn init_db(db_path: &Path) -> DomainResult<SqliteStore> {
    let conn = if db_path.as_os_str() == ":memory:" {
        Connection::open_in_memory()
    } else {
        Connection::open(db_path)
    }
    .map_err(|e| DomainError::Remote(format!("Failed to open db: {}", e)))?;

    run_migrations(&conn).map_err(|e| DomainError::Remote(format!("Migration failed: {}", e)))?;
    info!(path = %db_path.display(), "sqlite store ready");

    Ok(SqliteStore::new(conn))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
        CREATE TABLE IF NOT EXISTS flats (
            id TEXT PRIMARY KEY,
            number TEXT NOT NULL UNIQUE,
            owner_name TEXT NOT NULL,
            phone TEXT,
            email TEXT,
            membership_fee REAL,
            last_payment_date TEXT,
            status TEXT NOT NULL DEFAULT 'active'
                CHECK (status IN ('active', 'inactive', 'pending')),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS donations (
            id TEXT PRIMARY KEY,
            donor_name TEXT NOT NULL,
            amount REAL NOT NULL CHECK (amount >= 0),
            purpose TEXT NOT NULL,
            date TEXT NOT NULL DEFAULT (date('now')),
            payment_method TEXT NOT NULL
                CHECK (payment_method IN ('cash', 'online', 'cheque')),
            flat_id TEXT REFERENCES flats(id) ON DELETE SET NULL,
            phone TEXT,
            email TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS collections (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL DEFAULT (date('now')),
            amount REAL NOT NULL CHECK (amount >= 0),
            collected_by TEXT NOT NULL,
            purpose TEXT NOT NULL,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS expenses (
            id TEXT PRIMARY KEY,
            description TEXT NOT NULL,
            amount REAL NOT NULL CHECK (amount >= 0),
            category TEXT NOT NULL,
            date TEXT NOT NULL DEFAULT (date('now')),
            approved_by TEXT NOT NULL,
            receipt TEXT,
            vendor TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS fixed_expenses (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            amount REAL NOT NULL CHECK (amount >= 0),
            frequency TEXT NOT NULL
                CHECK (frequency IN ('monthly', 'quarterly', 'yearly')),
            category TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS profiles (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL UNIQUE,
            username TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('admin', 'user')),
            full_name TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )?;

    // Flat label typed on the donation form; added after the first release
    if !column_exists(conn, "donations", "flat_number")? {
        conn.execute("ALTER TABLE donations ADD COLUMN flat_number TEXT", [])?;
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_donations_date ON donations(date);
        CREATE INDEX IF NOT EXISTS idx_collections_date ON collections(date);
        CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Table;
    use crate::repository::schema::columns;

    #[test]
    fn test_schema_matches_migrations() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        for table in Table::ALL {
            for (name, _) in columns(table) {
                assert!(
                    column_exists(&conn, table.as_str(), name).unwrap(),
                    "{}.{} missing",
                    table,
                    name
                );
            }
        }
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
    }
}
