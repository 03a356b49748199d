//! Pages
//!
//! One component per navigation page.

mod collections;
mod coming_soon;
mod dashboard;
mod donations;
mod expenses;
mod fixed_expenses;
mod flats;

pub use collections::CollectionsPage;
pub use coming_soon::ComingSoon;
pub use dashboard::DashboardPage;
pub use donations::DonationsPage;
pub use expenses::ExpensesPage;
pub use fixed_expenses::FixedExpensesPage;
pub use flats::FlatsPage;

use chrono::NaiveDate;

/// Day/month/year, as dates are written in India
pub(crate) fn show_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub(crate) fn show_opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
