//! Fixed Expense Entity
//!
//! A recurring-charge template (salaries, rent, utilities). Not itself a
//! transaction; it describes what recurs, how often and for how long.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{DomainResult, Entity, RecordId};
use super::record::{
    amount_text, amount_value, date_value, is_blank, optional_date, parse_amount, text, Draft,
    OrderBy, Record, Row, Table,
};

/// How often a fixed expense recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Monthly, Frequency::Quarterly, Frequency::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: RecordId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub frequency: Frequency,
    pub category: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for FixedExpense {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for FixedExpense {
    const TABLE: Table = Table::FixedExpenses;
    const ORDER: OrderBy = OrderBy::desc("created_at");
    const NOUN: &'static str = "fixed expense";
    const PLURAL: &'static str = "fixed expenses";

    type Draft = FixedExpenseDraft;
}

/// Fixed expense form values
///
/// A fresh draft starts monthly and active, with no start date picked.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedExpenseDraft {
    pub title: String,
    pub amount: String,
    pub frequency: Option<Frequency>,
    pub category: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl Default for FixedExpenseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            frequency: Some(Frequency::Monthly),
            category: String::new(),
            start_date: None,
            end_date: None,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FixedExpenseField {
    Title(String),
    Amount(String),
    Frequency(Frequency),
    Category(String),
    StartDate(NaiveDate),
    /// `None` clears the end date
    EndDate(Option<NaiveDate>),
    IsActive(bool),
}

impl FixedExpenseField {
    pub fn column(&self) -> &'static str {
        match self {
            FixedExpenseField::Title(_) => "title",
            FixedExpenseField::Amount(_) => "amount",
            FixedExpenseField::Frequency(_) => "frequency",
            FixedExpenseField::Category(_) => "category",
            FixedExpenseField::StartDate(_) => "start_date",
            FixedExpenseField::EndDate(_) => "end_date",
            FixedExpenseField::IsActive(_) => "is_active",
        }
    }
}

impl Draft<FixedExpense> for FixedExpenseDraft {
    type Field = FixedExpenseField;

    fn from_record(record: &FixedExpense) -> Self {
        Self {
            title: record.title.clone(),
            amount: amount_text(record.amount),
            frequency: Some(record.frequency),
            category: record.category.clone(),
            start_date: Some(record.start_date),
            end_date: record.end_date,
            is_active: record.is_active,
        }
    }

    fn apply(&mut self, field: FixedExpenseField) {
        match field {
            FixedExpenseField::Title(v) => self.title = v,
            FixedExpenseField::Amount(v) => self.amount = v,
            FixedExpenseField::Frequency(v) => self.frequency = Some(v),
            FixedExpenseField::Category(v) => self.category = v,
            FixedExpenseField::StartDate(v) => self.start_date = Some(v),
            FixedExpenseField::EndDate(v) => self.end_date = v,
            FixedExpenseField::IsActive(v) => self.is_active = v,
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.title) {
            missing.push("title");
        }
        if is_blank(&self.amount) {
            missing.push("amount");
        }
        if is_blank(&self.category) {
            missing.push("category");
        }
        if self.frequency.is_none() {
            missing.push("frequency");
        }
        if self.start_date.is_none() {
            missing.push("start_date");
        }
        missing
    }

    fn to_row(&self) -> DomainResult<Row> {
        let mut row = Row::new();
        row.insert("title".into(), text(&self.title));
        row.insert("amount".into(), amount_value(parse_amount("amount", &self.amount)?));
        if let Some(frequency) = self.frequency {
            row.insert("frequency".into(), frequency.as_str().into());
        }
        row.insert("category".into(), text(&self.category));
        if let Some(start) = self.start_date {
            row.insert("start_date".into(), date_value(start));
        }
        row.insert("end_date".into(), optional_date(self.end_date));
        row.insert("is_active".into(), self.is_active.into());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_draft() {
        let draft = FixedExpenseDraft::default();
        assert_eq!(draft.frequency, Some(Frequency::Monthly));
        assert!(draft.is_active);
        assert_eq!(draft.missing(), vec!["title", "amount", "category", "start_date"]);
    }

    #[test]
    fn test_end_date_can_be_cleared() {
        let mut draft = FixedExpenseDraft::default();
        draft.apply(FixedExpenseField::Title("Priest salary".into()));
        draft.apply(FixedExpenseField::Amount("8000".into()));
        draft.apply(FixedExpenseField::Category("Salaries".into()));
        draft.apply(FixedExpenseField::StartDate(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        draft.apply(FixedExpenseField::EndDate(NaiveDate::from_ymd_opt(2025, 3, 31)));
        draft.apply(FixedExpenseField::EndDate(None));

        let row = draft.to_row().unwrap();
        assert_eq!(row.get("start_date"), Some(&json!("2024-04-01")));
        assert_eq!(row.get("end_date"), Some(&serde_json::Value::Null));
        assert_eq!(row.get("frequency"), Some(&json!("monthly")));
        assert_eq!(row.get("is_active"), Some(&json!(true)));
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!(Frequency::parse("quarterly"), Some(Frequency::Quarterly));
        assert_eq!(Frequency::parse("weekly"), None);
    }
}
