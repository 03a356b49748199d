//! Expense Entity
//!
//! A one-off payment made by the society, approved by an office bearer.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{DomainResult, Entity, RecordId};
use super::record::{
    amount_text, amount_value, date_value, is_blank, optional_text, parse_amount, text, Dated,
    Draft, OrderBy, Record, Row, Table,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub approved_by: String,
    /// Receipt reference or link
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Expense {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Dated for Expense {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Record for Expense {
    const TABLE: Table = Table::Expenses;
    const ORDER: OrderBy = OrderBy::desc("created_at");
    const NOUN: &'static str = "expense";
    const PLURAL: &'static str = "expenses";

    type Draft = ExpenseDraft;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub approved_by: String,
    pub receipt: String,
    pub vendor: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseField {
    Description(String),
    Amount(String),
    Category(String),
    Date(NaiveDate),
    ApprovedBy(String),
    Receipt(String),
    Vendor(String),
}

impl ExpenseField {
    pub fn column(&self) -> &'static str {
        match self {
            ExpenseField::Description(_) => "description",
            ExpenseField::Amount(_) => "amount",
            ExpenseField::Category(_) => "category",
            ExpenseField::Date(_) => "date",
            ExpenseField::ApprovedBy(_) => "approved_by",
            ExpenseField::Receipt(_) => "receipt",
            ExpenseField::Vendor(_) => "vendor",
        }
    }
}

impl Draft<Expense> for ExpenseDraft {
    type Field = ExpenseField;

    fn from_record(record: &Expense) -> Self {
        Self {
            description: record.description.clone(),
            amount: amount_text(record.amount),
            category: record.category.clone(),
            date: Some(record.date),
            approved_by: record.approved_by.clone(),
            receipt: record.receipt.clone().unwrap_or_default(),
            vendor: record.vendor.clone().unwrap_or_default(),
        }
    }

    fn apply(&mut self, field: ExpenseField) {
        match field {
            ExpenseField::Description(v) => self.description = v,
            ExpenseField::Amount(v) => self.amount = v,
            ExpenseField::Category(v) => self.category = v,
            ExpenseField::Date(v) => self.date = Some(v),
            ExpenseField::ApprovedBy(v) => self.approved_by = v,
            ExpenseField::Receipt(v) => self.receipt = v,
            ExpenseField::Vendor(v) => self.vendor = v,
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        [
            ("description", &self.description),
            ("amount", &self.amount),
            ("category", &self.category),
            ("approved_by", &self.approved_by),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(column, _)| column)
        .collect()
    }

    fn to_row(&self) -> DomainResult<Row> {
        let mut row = Row::new();
        row.insert("description".into(), text(&self.description));
        row.insert("amount".into(), amount_value(parse_amount("amount", &self.amount)?));
        row.insert("category".into(), text(&self.category));
        if let Some(date) = self.date {
            row.insert("date".into(), date_value(date));
        }
        row.insert("approved_by".into(), text(&self.approved_by));
        row.insert("receipt".into(), optional_text(&self.receipt));
        row.insert("vendor".into(), optional_text(&self.vendor));
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_negative_amount_rejected() {
        let mut draft = ExpenseDraft::default();
        draft.apply(ExpenseField::Description("Electricity Bill".into()));
        draft.apply(ExpenseField::Amount("-3500".into()));
        draft.apply(ExpenseField::Category("Utilities".into()));
        draft.apply(ExpenseField::ApprovedBy("Treasurer".into()));
        assert!(draft.missing().is_empty());
        assert!(matches!(draft.to_row(), Err(DomainError::InvalidInput(_))));
    }
}
