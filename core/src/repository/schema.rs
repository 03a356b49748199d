//! Table Schema
//!
//! Column layout of every table, shared by the local store backends.
//! Column names are only ever taken from here when building SQL.

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::{DomainError, DomainResult, Table};

/// How a column's JSON value is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Text,
    Real,
    /// Stored as INTEGER 0/1
    Bool,
}

pub(crate) type Column = (&'static str, ColumnKind);

use ColumnKind::{Bool, Real, Text};

const DONATIONS: &[Column] = &[
    ("id", Text),
    ("donor_name", Text),
    ("amount", Real),
    ("purpose", Text),
    ("date", Text),
    ("payment_method", Text),
    ("flat_id", Text),
    ("flat_number", Text),
    ("phone", Text),
    ("email", Text),
    ("notes", Text),
    ("created_at", Text),
    ("updated_at", Text),
];

const COLLECTIONS: &[Column] = &[
    ("id", Text),
    ("date", Text),
    ("amount", Real),
    ("collected_by", Text),
    ("purpose", Text),
    ("notes", Text),
    ("created_at", Text),
    ("updated_at", Text),
];

const EXPENSES: &[Column] = &[
    ("id", Text),
    ("description", Text),
    ("amount", Real),
    ("category", Text),
    ("date", Text),
    ("approved_by", Text),
    ("receipt", Text),
    ("vendor", Text),
    ("created_at", Text),
    ("updated_at", Text),
];

const FIXED_EXPENSES: &[Column] = &[
    ("id", Text),
    ("title", Text),
    ("amount", Real),
    ("frequency", Text),
    ("category", Text),
    ("start_date", Text),
    ("end_date", Text),
    ("is_active", Bool),
    ("created_at", Text),
    ("updated_at", Text),
];

const FLATS: &[Column] = &[
    ("id", Text),
    ("number", Text),
    ("owner_name", Text),
    ("phone", Text),
    ("email", Text),
    ("membership_fee", Real),
    ("last_payment_date", Text),
    ("status", Text),
    ("created_at", Text),
    ("updated_at", Text),
];

const PROFILES: &[Column] = &[
    ("id", Text),
    ("user_id", Text),
    ("username", Text),
    ("role", Text),
    ("full_name", Text),
    ("created_at", Text),
    ("updated_at", Text),
];

/// Columns of a table, in select order
pub(crate) fn columns(table: Table) -> &'static [Column] {
    match table {
        Table::Donations => DONATIONS,
        Table::Collections => COLLECTIONS,
        Table::Expenses => EXPENSES,
        Table::FixedExpenses => FIXED_EXPENSES,
        Table::Flats => FLATS,
        Table::Profiles => PROFILES,
    }
}

/// Look up a column by name; unknown columns are rejected
pub(crate) fn column(table: Table, name: &str) -> DomainResult<Column> {
    columns(table)
        .iter()
        .copied()
        .find(|(column, _)| *column == name)
        .ok_or_else(|| DomainError::InvalidInput(format!("unknown column {}.{}", table, name)))
}

/// Columns the store stamps itself
pub(crate) const MANAGED: [&str; 3] = ["id", "created_at", "updated_at"];

/// A column a client may write; store-managed columns are refused
pub(crate) fn writable(table: Table, name: &str) -> DomainResult<Column> {
    let found = column(table, name)?;
    if MANAGED.contains(&found.0) {
        return Err(DomainError::InvalidInput(format!(
            "{}.{} is managed by the store",
            table, found.0
        )));
    }
    Ok(found)
}

/// Columns declared NOT NULL, checked after insert defaults are applied
pub(crate) fn not_null(table: Table) -> &'static [&'static str] {
    match table {
        Table::Donations => &["donor_name", "amount", "purpose", "date", "payment_method"],
        Table::Collections => &["date", "amount", "collected_by", "purpose"],
        Table::Expenses => &["description", "amount", "category", "date", "approved_by"],
        Table::FixedExpenses => {
            &["title", "amount", "frequency", "category", "start_date", "is_active"]
        }
        Table::Flats => &["number", "owner_name", "status"],
        Table::Profiles => &["user_id", "username", "role"],
    }
}

/// Columns declared UNIQUE
pub(crate) fn unique(table: Table) -> &'static [&'static str] {
    match table {
        Table::Flats => &["number"],
        Table::Profiles => &["user_id"],
        _ => &[],
    }
}

/// Values a CHECK constraint allows for an enumerated column
pub(crate) fn allowed_values(table: Table, column: &str) -> Option<&'static [&'static str]> {
    match (table, column) {
        (Table::Donations, "payment_method") => Some(&["cash", "online", "cheque"]),
        (Table::FixedExpenses, "frequency") => Some(&["monthly", "quarterly", "yearly"]),
        (Table::Flats, "status") => Some(&["active", "inactive", "pending"]),
        (Table::Profiles, "role") => Some(&["admin", "user"]),
        _ => None,
    }
}

/// Amount columns carry `CHECK (amount >= 0)`
pub(crate) fn non_negative(table: Table, column: &str) -> bool {
    column == "amount" && table != Table::Flats && table != Table::Profiles
}

impl ColumnKind {
    /// Whether a JSON value can be stored in a column of this kind
    pub(crate) fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (ColumnKind::Text, Value::String(_))
                | (ColumnKind::Real, Value::Number(_))
                | (ColumnKind::Bool, Value::Bool(_))
        )
    }
}

/// Value the store fills in when an insert omits `column`
pub(crate) fn insert_default(table: Table, column: &str, today: NaiveDate) -> Value {
    match (table, column) {
        (Table::Donations | Table::Collections | Table::Expenses, "date") => {
            Value::String(today.format("%Y-%m-%d").to_string())
        }
        (Table::FixedExpenses, "is_active") => Value::Bool(true),
        (Table::Flats, "status") => Value::String("active".into()),
        (Table::Profiles, "role") => Value::String("user".into()),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_column_rejected() {
        assert!(column(Table::Flats, "owner_name").is_ok());
        assert!(matches!(
            column(Table::Flats, "owner_name; DROP TABLE flats"),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_managed_columns_not_writable() {
        for table in Table::ALL {
            for managed in MANAGED {
                assert!(column(table, managed).is_ok(), "{}.{}", table, managed);
                assert!(writable(table, managed).is_err());
            }
        }
        assert!(writable(Table::Donations, "donor_name").is_ok());
    }

    #[test]
    fn test_kind_accepts() {
        assert!(ColumnKind::Real.accepts(&serde_json::json!(2500.5)));
        assert!(ColumnKind::Bool.accepts(&Value::Null));
        assert!(!ColumnKind::Real.accepts(&serde_json::json!("2500")));
        assert!(!ColumnKind::Text.accepts(&serde_json::json!(true)));
    }

    #[test]
    fn test_insert_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(
            insert_default(Table::Expenses, "date", today),
            Value::String("2024-01-15".into())
        );
        assert_eq!(insert_default(Table::FixedExpenses, "is_active", today), Value::Bool(true));
        assert_eq!(insert_default(Table::Flats, "phone", today), Value::Null);
    }

    #[test]
    fn test_constraint_columns_exist() {
        for table in Table::ALL {
            for name in not_null(table).iter().chain(unique(table)) {
                assert!(column(table, name).is_ok(), "{}.{}", table, name);
            }
        }
        assert_eq!(
            allowed_values(Table::Flats, "status"),
            Some(&["active", "inactive", "pending"][..])
        );
        assert!(non_negative(Table::Collections, "amount"));
        assert!(!non_negative(Table::Flats, "membership_fee"));
    }
}
