//! Sample dataset shown before a store is wired in, and used to seed the
//! in-memory store of the browser build.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{
    Collection, Donation, Expense, Flat, FlatStatus, PaymentMethod, Profile, Record, RecordId, Role,
    Row, Table,
};
use crate::session::LOCAL_USER_ID;
use crate::views::DashboardStats;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal calendar dates below are all valid
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn rupees(amount: i64) -> Decimal {
    Decimal::from(amount)
}

fn some(s: &str) -> Option<String> {
    Some(s.to_string())
}

pub fn donations() -> Vec<Donation> {
    let donation = |id: &str, donor: &str, amount, purpose: &str, on, method, flat: &str| Donation {
        id: RecordId::new(id),
        donor_name: donor.into(),
        amount: rupees(amount),
        purpose: purpose.into(),
        date: on,
        payment_method: method,
        flat_id: None,
        flat_number: some(flat),
        phone: None,
        email: None,
        notes: None,
        created_at: None,
        updated_at: None,
    };

    vec![
        Donation {
            phone: some("+91 9876543210"),
            email: some("rajesh@email.com"),
            ..donation(
                "1",
                "Rajesh Kumar",
                5000,
                "Festival Celebration",
                date(2024, 1, 15),
                PaymentMethod::Online,
                "A-101",
            )
        },
        Donation {
            phone: some("+91 9876543211"),
            ..donation(
                "2",
                "Priya Sharma",
                2500,
                "Temple Maintenance",
                date(2024, 1, 12),
                PaymentMethod::Cash,
                "B-205",
            )
        },
        Donation {
            phone: some("+91 9876543212"),
            email: some("anand@email.com"),
            ..donation(
                "3",
                "Anand Patel",
                10000,
                "New Temple Construction",
                date(2024, 1, 10),
                PaymentMethod::Cheque,
                "C-304",
            )
        },
        Donation {
            phone: some("+91 9876543213"),
            ..donation(
                "4",
                "Sunita Devi",
                1500,
                "Daily Aarti Supplies",
                date(2024, 1, 8),
                PaymentMethod::Cash,
                "A-102",
            )
        },
    ]
}

pub fn collections() -> Vec<Collection> {
    let collection = |id: &str, on, amount, by: &str, purpose: &str, notes: &str| Collection {
        id: RecordId::new(id),
        date: on,
        amount: rupees(amount),
        collected_by: by.into(),
        purpose: purpose.into(),
        notes: some(notes),
        created_at: None,
        updated_at: None,
    };

    vec![
        collection(
            "1",
            date(2024, 1, 15),
            3500,
            "Ram Prasad",
            "Weekly Collection",
            "Door-to-door collection",
        ),
        collection(
            "2",
            date(2024, 1, 14),
            2800,
            "Geeta Sharma",
            "Festival Special Collection",
            "Special collection for upcoming festival",
        ),
        collection(
            "3",
            date(2024, 1, 13),
            4200,
            "Mohan Lal",
            "Monthly Membership",
            "Monthly membership fees",
        ),
    ]
}

pub fn expenses() -> Vec<Expense> {
    let expense = |id: &str,
                   description: &str,
                   amount,
                   category: &str,
                   on,
                   approved: &str,
                   vendor: &str| Expense {
        id: RecordId::new(id),
        description: description.into(),
        amount: rupees(amount),
        category: category.into(),
        date: on,
        approved_by: approved.into(),
        receipt: None,
        vendor: some(vendor),
        created_at: None,
        updated_at: None,
    };

    vec![
        expense(
            "1",
            "Flowers and Garlands",
            1200,
            "Pooja Supplies",
            date(2024, 1, 15),
            "Secretary",
            "Local Flower Shop",
        ),
        expense(
            "2",
            "Electricity Bill",
            3500,
            "Utilities",
            date(2024, 1, 14),
            "Treasurer",
            "State Electricity Board",
        ),
        expense(
            "3",
            "Sound System Repair",
            2800,
            "Maintenance",
            date(2024, 1, 12),
            "President",
            "Audio Tech Services",
        ),
        expense(
            "4",
            "Cleaning Supplies",
            800,
            "Maintenance",
            date(2024, 1, 10),
            "Secretary",
            "General Store",
        ),
    ]
}

pub fn flats() -> Vec<Flat> {
    let flat = |id: &str,
                number: &str,
                owner: &str,
                phone: &str,
                paid: Option<NaiveDate>,
                status| Flat {
        id: RecordId::new(id),
        number: number.into(),
        owner_name: owner.into(),
        phone: some(phone),
        email: None,
        membership_fee: Some(rupees(500)),
        last_payment_date: paid,
        status,
        created_at: None,
        updated_at: None,
    };

    vec![
        Flat {
            email: some("rajesh@email.com"),
            ..flat(
                "1",
                "A-101",
                "Rajesh Kumar",
                "+91 9876543210",
                Some(date(2024, 1, 1)),
                FlatStatus::Active,
            )
        },
        flat(
            "2",
            "A-102",
            "Sunita Devi",
            "+91 9876543213",
            Some(date(2023, 12, 15)),
            FlatStatus::Pending,
        ),
        flat(
            "3",
            "B-205",
            "Priya Sharma",
            "+91 9876543211",
            Some(date(2024, 1, 5)),
            FlatStatus::Active,
        ),
        Flat {
            email: some("anand@email.com"),
            ..flat(
                "4",
                "C-304",
                "Anand Patel",
                "+91 9876543212",
                Some(date(2024, 1, 1)),
                FlatStatus::Active,
            )
        },
        flat("5", "B-201", "Vikram Singh", "+91 9876543214", None, FlatStatus::Inactive),
    ]
}

/// Admin profile for the local sign-in
pub fn profiles() -> Vec<Profile> {
    vec![Profile {
        id: RecordId::new("1"),
        user_id: LOCAL_USER_ID.into(),
        username: "admin".into(),
        role: Role::Admin,
        full_name: some("Temple Admin"),
        created_at: None,
        updated_at: None,
    }]
}

/// The fixed dashboard figures that accompany the sample data
pub fn dashboard_stats() -> DashboardStats {
    DashboardStats {
        total_donations: rupees(19000),
        total_collections: rupees(10500),
        total_expenses: rupees(8300),
        net_balance: rupees(21200),
        monthly_donations: rupees(19000),
        monthly_collections: rupees(10500),
        monthly_expenses: rupees(8300),
        total_flats: 5,
        active_flats: 3,
    }
}

/// Oldest first, so a newest-first listing shows the samples in their given order
fn rows_of<R: Record>(records: Vec<R>) -> impl Iterator<Item = (Table, Row)> {
    records.into_iter().rev().filter_map(|record| match serde_json::to_value(&record) {
        Ok(serde_json::Value::Object(row)) => Some((R::TABLE, row)),
        _ => None,
    })
}

/// Every sample record as a store row, for seeding a local store
pub fn rows() -> Vec<(Table, Row)> {
    rows_of(profiles())
        .chain(rows_of(flats()))
        .chain(rows_of(donations()))
        .chain(rows_of(collections()))
        .chain(rows_of(expenses()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decode_row;

    #[test]
    fn test_sample_totals_match_stats() {
        let stats = dashboard_stats();
        let donated: Decimal = donations().iter().map(|d| d.amount).sum();
        let collected: Decimal = collections().iter().map(|c| c.amount).sum();
        let spent: Decimal = expenses().iter().map(|e| e.amount).sum();

        assert_eq!(donated, stats.total_donations);
        assert_eq!(collected, stats.total_collections);
        assert_eq!(spent, stats.total_expenses);
        assert_eq!(flats().len(), stats.total_flats);
        assert_eq!(flats().iter().filter(|f| f.is_active()).count(), stats.active_flats);
    }

    #[test]
    fn test_rows_decode_back() {
        let rows = rows();
        assert_eq!(rows.len(), 17);
        for (table, row) in rows {
            if table == Table::Flats {
                assert!(decode_row::<Flat>(row).is_ok());
            }
        }
    }
}
