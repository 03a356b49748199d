//! Domain Layer
//!
//! Contains all domain records and core abstractions.
//! This layer has no I/O; rows are plain serde_json maps.

mod entity;
pub mod record;
mod donation;
mod collection;
mod expense;
mod fixed_expense;
mod flat;
mod profile;

pub use entity::{DomainError, DomainResult, Entity, RecordId};
pub use record::{changed_columns, decode_row, validate, Dated, Draft, OrderBy, Record, Row, Table};
pub use donation::{Donation, DonationDraft, DonationField, PaymentMethod};
pub use collection::{Collection, CollectionDraft, CollectionField};
pub use expense::{Expense, ExpenseDraft, ExpenseField};
pub use fixed_expense::{FixedExpense, FixedExpenseDraft, FixedExpenseField, Frequency};
pub use flat::{Flat, FlatDraft, FlatField, FlatStatus};
pub use profile::{Profile, ProfileDraft, ProfileField, Role};
