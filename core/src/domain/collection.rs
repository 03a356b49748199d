//! Collection Entity
//!
//! Money gathered by a volunteer (door-to-door, festival drives, dues).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{DomainResult, Entity, RecordId};
use super::record::{
    amount_text, amount_value, date_value, is_blank, optional_text, parse_amount, text, Dated,
    Draft, OrderBy, Record, Row, Table,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: RecordId,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub collected_by: String,
    pub purpose: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Collection {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Dated for Collection {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Record for Collection {
    const TABLE: Table = Table::Collections;
    const ORDER: OrderBy = OrderBy::desc("created_at");
    const NOUN: &'static str = "collection";
    const PLURAL: &'static str = "collections";

    type Draft = CollectionDraft;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionDraft {
    pub date: Option<NaiveDate>,
    pub amount: String,
    pub collected_by: String,
    pub purpose: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionField {
    Date(NaiveDate),
    Amount(String),
    CollectedBy(String),
    Purpose(String),
    Notes(String),
}

impl CollectionField {
    pub fn column(&self) -> &'static str {
        match self {
            CollectionField::Date(_) => "date",
            CollectionField::Amount(_) => "amount",
            CollectionField::CollectedBy(_) => "collected_by",
            CollectionField::Purpose(_) => "purpose",
            CollectionField::Notes(_) => "notes",
        }
    }
}

impl Draft<Collection> for CollectionDraft {
    type Field = CollectionField;

    fn from_record(record: &Collection) -> Self {
        Self {
            date: Some(record.date),
            amount: amount_text(record.amount),
            collected_by: record.collected_by.clone(),
            purpose: record.purpose.clone(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    fn apply(&mut self, field: CollectionField) {
        match field {
            CollectionField::Date(v) => self.date = Some(v),
            CollectionField::Amount(v) => self.amount = v,
            CollectionField::CollectedBy(v) => self.collected_by = v,
            CollectionField::Purpose(v) => self.purpose = v,
            CollectionField::Notes(v) => self.notes = v,
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        [
            ("amount", &self.amount),
            ("collected_by", &self.collected_by),
            ("purpose", &self.purpose),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(column, _)| column)
        .collect()
    }

    fn to_row(&self) -> DomainResult<Row> {
        let mut row = Row::new();
        if let Some(date) = self.date {
            row.insert("date".into(), date_value(date));
        }
        row.insert("amount".into(), amount_value(parse_amount("amount", &self.amount)?));
        row.insert("collected_by".into(), text(&self.collected_by));
        row.insert("purpose".into(), text(&self.purpose));
        row.insert("notes".into(), optional_text(&self.notes));
        Ok(row)
    }
}
