//! Flat Entity
//!
//! An apartment unit in the society and its membership record.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{DomainResult, Entity, RecordId};
use super::record::{
    amount_text, amount_value, is_blank, optional_date, optional_text, parse_amount, text, Draft,
    OrderBy, Record, Row, Table,
};

/// Membership status of a flat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl FlatStatus {
    pub const ALL: [FlatStatus; 3] =
        [FlatStatus::Active, FlatStatus::Inactive, FlatStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlatStatus::Active => "active",
            FlatStatus::Inactive => "inactive",
            FlatStatus::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flat {
    pub id: RecordId,
    /// Unit label, unique within the society (e.g. "A-101")
    pub number: String,
    pub owner_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub membership_fee: Option<Decimal>,
    #[serde(default)]
    pub last_payment_date: Option<NaiveDate>,
    pub status: FlatStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Flat {
    pub fn is_active(&self) -> bool {
        self.status == FlatStatus::Active
    }
}

impl Entity for Flat {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for Flat {
    const TABLE: Table = Table::Flats;
    const ORDER: OrderBy = OrderBy::asc("number");
    const NOUN: &'static str = "flat";
    const PLURAL: &'static str = "flats";

    type Draft = FlatDraft;
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlatDraft {
    pub number: String,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    /// Optional; blank means no fee recorded
    pub membership_fee: String,
    pub last_payment_date: Option<NaiveDate>,
    pub status: FlatStatus,
}

impl Default for FlatDraft {
    fn default() -> Self {
        Self {
            number: String::new(),
            owner_name: String::new(),
            phone: String::new(),
            email: String::new(),
            membership_fee: String::new(),
            last_payment_date: None,
            status: FlatStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlatField {
    Number(String),
    OwnerName(String),
    Phone(String),
    Email(String),
    MembershipFee(String),
    LastPaymentDate(Option<NaiveDate>),
    Status(FlatStatus),
}

impl FlatField {
    pub fn column(&self) -> &'static str {
        match self {
            FlatField::Number(_) => "number",
            FlatField::OwnerName(_) => "owner_name",
            FlatField::Phone(_) => "phone",
            FlatField::Email(_) => "email",
            FlatField::MembershipFee(_) => "membership_fee",
            FlatField::LastPaymentDate(_) => "last_payment_date",
            FlatField::Status(_) => "status",
        }
    }
}

impl Draft<Flat> for FlatDraft {
    type Field = FlatField;

    fn from_record(record: &Flat) -> Self {
        Self {
            number: record.number.clone(),
            owner_name: record.owner_name.clone(),
            phone: record.phone.clone().unwrap_or_default(),
            email: record.email.clone().unwrap_or_default(),
            membership_fee: record.membership_fee.map(amount_text).unwrap_or_default(),
            last_payment_date: record.last_payment_date,
            status: record.status,
        }
    }

    fn apply(&mut self, field: FlatField) {
        match field {
            FlatField::Number(v) => self.number = v,
            FlatField::OwnerName(v) => self.owner_name = v,
            FlatField::Phone(v) => self.phone = v,
            FlatField::Email(v) => self.email = v,
            FlatField::MembershipFee(v) => self.membership_fee = v,
            FlatField::LastPaymentDate(v) => self.last_payment_date = v,
            FlatField::Status(v) => self.status = v,
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        [("number", &self.number), ("owner_name", &self.owner_name)]
            .into_iter()
            .filter(|(_, value)| is_blank(value))
            .map(|(column, _)| column)
            .collect()
    }

    fn to_row(&self) -> DomainResult<Row> {
        let fee = if is_blank(&self.membership_fee) {
            serde_json::Value::Null
        } else {
            amount_value(parse_amount("membership_fee", &self.membership_fee)?)
        };

        let mut row = Row::new();
        row.insert("number".into(), text(&self.number));
        row.insert("owner_name".into(), text(&self.owner_name));
        row.insert("phone".into(), optional_text(&self.phone));
        row.insert("email".into(), optional_text(&self.email));
        row.insert("membership_fee".into(), fee);
        row.insert("last_payment_date".into(), optional_date(self.last_payment_date));
        row.insert("status".into(), self.status.as_str().into());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::decode_row;
    use serde_json::json;

    #[test]
    fn test_blank_fee_is_null() {
        let mut draft = FlatDraft::default();
        draft.apply(FlatField::Number("C-301".into()));
        draft.apply(FlatField::OwnerName("Anil Verma".into()));
        let row = draft.to_row().unwrap();
        assert_eq!(row.get("membership_fee"), Some(&serde_json::Value::Null));
        assert_eq!(row.get("status"), Some(&json!("active")));
    }

    #[test]
    fn test_decode_with_fee() {
        let row = json!({
            "id": "f1", "number": "A-101", "owner_name": "Rajesh Kumar",
            "membership_fee": 1200, "status": "pending", "last_payment_date": null
        });
        let flat = decode_row::<Flat>(row.as_object().unwrap().clone()).unwrap();
        assert_eq!(flat.membership_fee, Some(Decimal::new(1200, 0)));
        assert_eq!(flat.status, FlatStatus::Pending);
        assert!(!flat.is_active());
    }
}
