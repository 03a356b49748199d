//! Domain Layer - Stored Records
//!
//! Binds each entity to its remote table and to a typed form draft.
//! Rows travel to and from the store as untyped column maps; the
//! serde field names of each record are the remote column names.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::entity::{DomainError, DomainResult, Entity};

/// One row as exchanged with the store: remote column name -> value
pub type Row = serde_json::Map<String, Value>;

/// Remote collections addressed by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Donations,
    Collections,
    Expenses,
    FixedExpenses,
    Flats,
    Profiles,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::Donations,
        Table::Collections,
        Table::Expenses,
        Table::FixedExpenses,
        Table::Flats,
        Table::Profiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Donations => "donations",
            Table::Collections => "collections",
            Table::Expenses => "expenses",
            Table::FixedExpenses => "fixed_expenses",
            Table::Flats => "flats",
            Table::Profiles => "profiles",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable ordering requested from the store on list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub ascending: bool,
}

impl OrderBy {
    pub const fn asc(column: &'static str) -> Self {
        Self { column, ascending: true }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self { column, ascending: false }
    }
}

/// A record type that lives in one remote table
pub trait Record: Entity + Serialize + DeserializeOwned + 'static {
    const TABLE: Table;
    const ORDER: OrderBy;
    /// Singular noun for user-visible messages ("flat", "fixed expense")
    const NOUN: &'static str;
    /// Plural noun for user-visible messages
    const PLURAL: &'static str;

    type Draft: Draft<Self>;
}

/// In-progress form values for one record type
///
/// Values are kept as typed by the user; parsing happens in `to_row`.
pub trait Draft<R>: Default + Clone + PartialEq + Send + Sync + 'static {
    /// Typed single-field update, one variant per editable column
    type Field: Clone + Send + Sync + 'static;

    /// Pre-fill from an existing record
    fn from_record(record: &R) -> Self;

    /// Apply one field update
    fn apply(&mut self, field: Self::Field);

    /// Remote column names of required fields that are still empty
    fn missing(&self) -> Vec<&'static str>;

    /// Remote row holding every form column
    fn to_row(&self) -> DomainResult<Row>;
}

/// Records that carry a calendar date usable for range filtering
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Check required fields, then build the row to send
pub fn validate<R: Record>(draft: &R::Draft) -> DomainResult<Row> {
    let missing = draft.missing();
    if !missing.is_empty() {
        return Err(DomainError::MissingFields(
            missing.into_iter().map(String::from).collect(),
        ));
    }
    draft.to_row()
}

/// Decode a store row into a record
pub fn decode_row<R: Record>(row: Row) -> DomainResult<R> {
    serde_json::from_value(Value::Object(row))
        .map_err(|e| DomainError::Decode(format!("{}: {}", R::TABLE, e)))
}

/// Columns of `current` whose value differs from `original`
pub fn changed_columns(original: &Row, current: &Row) -> Row {
    current
        .iter()
        .filter(|(column, value)| original.get(column.as_str()) != Some(*value))
        .map(|(column, value)| (column.clone(), value.clone()))
        .collect()
}

// ========================
// Field conversion helpers
// ========================

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub(crate) fn text(s: &str) -> Value {
    Value::String(s.trim().to_string())
}

/// Empty input maps to NULL
pub(crate) fn optional_text(s: &str) -> Value {
    if is_blank(s) {
        Value::Null
    } else {
        text(s)
    }
}

pub(crate) fn parse_amount(column: &str, s: &str) -> DomainResult<Decimal> {
    let amount = Decimal::from_str(s.trim())
        .map_err(|_| DomainError::InvalidInput(format!("{} must be a number", column)))?;
    if amount.is_sign_negative() {
        return Err(DomainError::InvalidInput(format!("{} must not be negative", column)));
    }
    if !survives_float(amount) {
        return Err(DomainError::InvalidInput(format!("{} has too many digits", column)));
    }
    Ok(amount)
}

/// Amounts are stored as floating point; the value read back must equal the one typed
fn survives_float(amount: Decimal) -> bool {
    amount
        .to_f64()
        .and_then(|f| Decimal::from_str(&f.to_string()).ok())
        .map_or(false, |back| back == amount)
}

pub(crate) fn amount_value(amount: Decimal) -> Value {
    amount.to_f64().map(Value::from).unwrap_or(Value::Null)
}

pub(crate) fn amount_text(amount: Decimal) -> String {
    amount.normalize().to_string()
}

pub(crate) fn date_value(date: NaiveDate) -> Value {
    Value::String(date.format("%Y-%m-%d").to_string())
}

pub(crate) fn optional_date(date: Option<NaiveDate>) -> Value {
    date.map(date_value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_names_round_trip() {
        for table in Table::ALL {
            assert_eq!(Table::parse(table.as_str()), Some(table));
        }
        assert_eq!(Table::FixedExpenses.as_str(), "fixed_expenses");
        assert_eq!(Table::parse("members"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", " 2500.50 ").unwrap(), Decimal::new(250050, 2));
        assert!(matches!(parse_amount("amount", "abc"), Err(DomainError::InvalidInput(_))));
        assert!(matches!(parse_amount("amount", "-10"), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_amount_rejects_lossy_values() {
        assert!(matches!(
            parse_amount("amount", "12345678901234567.89"),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_amount("amount", "0.1234567890123456789"),
            Err(DomainError::InvalidInput(_))
        ));
        assert_eq!(parse_amount("amount", "0.1").unwrap(), Decimal::new(1, 1));
        assert_eq!(parse_amount("amount", "100000").unwrap(), Decimal::from(100000));
        assert_eq!(amount_value(parse_amount("amount", "1234567.89").unwrap()), json!(1234567.89));
    }

    #[test]
    fn test_optional_text_blank_is_null() {
        assert_eq!(optional_text("   "), Value::Null);
        assert_eq!(optional_text(" A-101 "), json!("A-101"));
    }

    #[test]
    fn test_changed_columns() {
        let original = json!({ "title": "Priest salary", "amount": 8000.0 });
        let current = json!({ "title": "Priest salary", "amount": 9000.0 });
        let changed = changed_columns(
            original.as_object().unwrap(),
            current.as_object().unwrap(),
        );
        assert_eq!(changed.len(), 1);
        assert_eq!(changed.get("amount"), Some(&json!(9000.0)));
    }
}
