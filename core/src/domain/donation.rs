//! Donation Entity
//!
//! A gift recorded against a donor, optionally linked to a flat.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{DomainResult, Entity, RecordId};
use super::record::{
    amount_text, amount_value, date_value, is_blank, optional_text, parse_amount, text, Dated,
    Draft, OrderBy, Record, Row, Table,
};

/// How a donation was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Online,
    Cheque,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Cash, PaymentMethod::Online, PaymentMethod::Cheque];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Online => "online",
            PaymentMethod::Cheque => "cheque",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: RecordId,
    pub donor_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub purpose: String,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    /// Reference to the donor's flat record, when known
    #[serde(default)]
    pub flat_id: Option<RecordId>,
    /// Flat label as typed on the form (e.g. "A-101")
    #[serde(default)]
    pub flat_number: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Donation {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Dated for Donation {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Record for Donation {
    const TABLE: Table = Table::Donations;
    const ORDER: OrderBy = OrderBy::desc("created_at");
    const NOUN: &'static str = "donation";
    const PLURAL: &'static str = "donations";

    type Draft = DonationDraft;
}

/// Donation form values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationDraft {
    pub donor_name: String,
    pub amount: String,
    pub purpose: String,
    pub payment_method: Option<PaymentMethod>,
    /// Left empty on create; the store stamps the current date
    pub date: Option<NaiveDate>,
    pub flat_number: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

/// One edited donation form field
#[derive(Debug, Clone, PartialEq)]
pub enum DonationField {
    DonorName(String),
    Amount(String),
    Purpose(String),
    PaymentMethod(PaymentMethod),
    Date(NaiveDate),
    FlatNumber(String),
    Phone(String),
    Email(String),
    Notes(String),
}

impl DonationField {
    /// Remote column this field writes
    pub fn column(&self) -> &'static str {
        match self {
            DonationField::DonorName(_) => "donor_name",
            DonationField::Amount(_) => "amount",
            DonationField::Purpose(_) => "purpose",
            DonationField::PaymentMethod(_) => "payment_method",
            DonationField::Date(_) => "date",
            DonationField::FlatNumber(_) => "flat_number",
            DonationField::Phone(_) => "phone",
            DonationField::Email(_) => "email",
            DonationField::Notes(_) => "notes",
        }
    }
}

impl Draft<Donation> for DonationDraft {
    type Field = DonationField;

    fn from_record(record: &Donation) -> Self {
        Self {
            donor_name: record.donor_name.clone(),
            amount: amount_text(record.amount),
            purpose: record.purpose.clone(),
            payment_method: Some(record.payment_method),
            date: Some(record.date),
            flat_number: record.flat_number.clone().unwrap_or_default(),
            phone: record.phone.clone().unwrap_or_default(),
            email: record.email.clone().unwrap_or_default(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    fn apply(&mut self, field: DonationField) {
        match field {
            DonationField::DonorName(v) => self.donor_name = v,
            DonationField::Amount(v) => self.amount = v,
            DonationField::Purpose(v) => self.purpose = v,
            DonationField::PaymentMethod(v) => self.payment_method = Some(v),
            DonationField::Date(v) => self.date = Some(v),
            DonationField::FlatNumber(v) => self.flat_number = v,
            DonationField::Phone(v) => self.phone = v,
            DonationField::Email(v) => self.email = v,
            DonationField::Notes(v) => self.notes = v,
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.donor_name) {
            missing.push("donor_name");
        }
        if is_blank(&self.amount) {
            missing.push("amount");
        }
        if is_blank(&self.purpose) {
            missing.push("purpose");
        }
        if self.payment_method.is_none() {
            missing.push("payment_method");
        }
        missing
    }

    fn to_row(&self) -> DomainResult<Row> {
        let mut row = Row::new();
        row.insert("donor_name".into(), text(&self.donor_name));
        row.insert("amount".into(), amount_value(parse_amount("amount", &self.amount)?));
        row.insert("purpose".into(), text(&self.purpose));
        if let Some(method) = self.payment_method {
            row.insert("payment_method".into(), method.as_str().into());
        }
        if let Some(date) = self.date {
            row.insert("date".into(), date_value(date));
        }
        row.insert("flat_number".into(), optional_text(&self.flat_number));
        row.insert("phone".into(), optional_text(&self.phone));
        row.insert("email".into(), optional_text(&self.email));
        row.insert("notes".into(), optional_text(&self.notes));
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{decode_row, validate};
    use crate::domain::DomainError;
    use serde_json::json;

    fn filled_draft() -> DonationDraft {
        let mut draft = DonationDraft::default();
        draft.apply(DonationField::DonorName("Rajesh Kumar".into()));
        draft.apply(DonationField::Amount("5000".into()));
        draft.apply(DonationField::Purpose("Festival Celebration".into()));
        draft.apply(DonationField::PaymentMethod(PaymentMethod::Online));
        draft.apply(DonationField::FlatNumber("A-101".into()));
        draft
    }

    #[test]
    fn test_required_fields() {
        let draft = DonationDraft::default();
        assert_eq!(draft.missing(), vec!["donor_name", "amount", "purpose", "payment_method"]);
        assert!(filled_draft().missing().is_empty());
    }

    #[test]
    fn test_validate_reports_missing_columns() {
        let mut draft = filled_draft();
        draft.apply(DonationField::Purpose("   ".into()));
        let err = validate::<Donation>(&draft).unwrap_err();
        assert_eq!(err, DomainError::MissingFields(vec!["purpose".to_string()]));
    }

    #[test]
    fn test_row_uses_remote_column_names() {
        let row = filled_draft().to_row().unwrap();
        assert_eq!(row.get("donor_name"), Some(&json!("Rajesh Kumar")));
        assert_eq!(row.get("payment_method"), Some(&json!("online")));
        assert_eq!(row.get("flat_number"), Some(&json!("A-101")));
        assert_eq!(row.get("email"), Some(&serde_json::Value::Null));
        assert!(!row.contains_key("date"));
    }

    #[test]
    fn test_unknown_payment_method_is_decode_error() {
        let row = json!({
            "id": "1", "donor_name": "X", "amount": 10, "purpose": "Y",
            "date": "2024-01-15", "payment_method": "card"
        });
        let result = decode_row::<Donation>(row.as_object().unwrap().clone());
        assert!(matches!(result, Err(DomainError::Decode(_))));
    }

    #[test]
    fn test_draft_from_record_round_trip() {
        let row = json!({
            "id": "7", "donor_name": "Priya Sharma", "amount": 2500.0,
            "purpose": "Temple Maintenance", "date": "2024-01-12",
            "payment_method": "cash", "flat_number": "B-205",
            "created_at": "2024-01-12T08:30:00.000000+00:00"
        });
        let donation = decode_row::<Donation>(row.as_object().unwrap().clone()).unwrap();
        let draft = DonationDraft::from_record(&donation);
        assert_eq!(draft.amount, "2500");
        assert_eq!(draft.flat_number, "B-205");
        assert_eq!(draft.payment_method, Some(PaymentMethod::Cash));
    }
}
