//! Dashboard View
//!
//! Read-only summary: headline totals, the flats ratio and the most recent
//! donations and expenses. The figures come either from a static snapshot
//! or from aggregating the store.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{Collection, Dated, DomainResult, Donation, Expense, Flat, Record};
use crate::repository::{list_records, RemoteStore};
use crate::seed;

/// Number of rows in each recent-activity list
pub const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    pub total_donations: Decimal,
    pub total_collections: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    pub monthly_donations: Decimal,
    pub monthly_collections: Decimal,
    pub monthly_expenses: Decimal,
    pub total_flats: usize,
    pub active_flats: usize,
}

fn sum<'a, R: Dated + 'a>(
    records: impl IntoIterator<Item = &'a R>,
    amount: impl Fn(&R) -> Decimal,
    month_of: NaiveDate,
) -> (Decimal, Decimal) {
    records.into_iter().fold((Decimal::ZERO, Decimal::ZERO), |(all, month), r| {
        let value = amount(r);
        let date = r.date();
        let in_month = date.year() == month_of.year() && date.month() == month_of.month();
        (all + value, if in_month { month + value } else { month })
    })
}

impl DashboardStats {
    /// Aggregate already-loaded records; monthly figures cover `today`'s month
    pub fn compute(
        donations: &[Donation],
        collections: &[Collection],
        expenses: &[Expense],
        flats: &[Flat],
        today: NaiveDate,
    ) -> Self {
        let (total_donations, monthly_donations) = sum(donations, |d| d.amount, today);
        let (total_collections, monthly_collections) = sum(collections, |c| c.amount, today);
        let (total_expenses, monthly_expenses) = sum(expenses, |e| e.amount, today);

        Self {
            total_donations,
            total_collections,
            total_expenses,
            net_balance: total_donations + total_collections - total_expenses,
            monthly_donations,
            monthly_collections,
            monthly_expenses,
            total_flats: flats.len(),
            active_flats: flats.iter().filter(|f| f.is_active()).count(),
        }
    }
}

/// Stats aggregated from the four tables of the store
pub async fn dashboard_stats(
    store: &dyn RemoteStore,
    today: NaiveDate,
) -> DomainResult<DashboardStats> {
    let donations = list_records::<Donation>(store).await?;
    let collections = list_records::<Collection>(store).await?;
    let expenses = list_records::<Expense>(store).await?;
    let flats = list_records::<Flat>(store).await?;
    Ok(DashboardStats::compute(&donations, &collections, &expenses, &flats, today))
}

/// The first `n` records of `R` in its list order
pub async fn recent<R: Record>(store: &dyn RemoteStore, n: usize) -> DomainResult<Vec<R>> {
    let mut records = list_records::<R>(store).await?;
    records.truncate(n);
    Ok(records)
}

/// Fixed figures and lists shown when the dashboard is not reading the store
#[derive(Debug, Clone, PartialEq)]
pub struct StaticSnapshot {
    pub stats: DashboardStats,
    pub donations: Vec<Donation>,
    pub expenses: Vec<Expense>,
}

impl StaticSnapshot {
    pub fn sample() -> Self {
        Self {
            stats: seed::dashboard_stats(),
            donations: seed::donations(),
            expenses: seed::expenses(),
        }
    }
}

/// Month-over-month change printed under a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trend {
    pub percent: u32,
    pub positive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Currency(Decimal),
    Text(String),
}

impl StatValue {
    pub fn display(&self) -> String {
        match self {
            StatValue::Currency(amount) => format_inr(*amount),
            StatValue::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    /// Localizer key of the card title
    pub title_key: &'static str,
    pub value: StatValue,
    pub trend: Option<Trend>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_donations: Vec<Donation>,
    pub recent_expenses: Vec<Expense>,
    /// Month the figures describe
    pub period: NaiveDate,
    trends: bool,
}

impl Dashboard {
    pub fn from_snapshot(snapshot: StaticSnapshot) -> Self {
        let period = snapshot
            .donations
            .first()
            .map(|d| d.date)
            .unwrap_or_default();
        Self {
            stats: snapshot.stats,
            recent_donations: snapshot.donations.into_iter().take(RECENT_LIMIT).collect(),
            recent_expenses: snapshot.expenses.into_iter().take(RECENT_LIMIT).collect(),
            period,
            trends: true,
        }
    }

    pub async fn load(store: &dyn RemoteStore, today: NaiveDate) -> DomainResult<Self> {
        Ok(Self {
            stats: dashboard_stats(store, today).await?,
            recent_donations: recent::<Donation>(store, RECENT_LIMIT).await?,
            recent_expenses: recent::<Expense>(store, RECENT_LIMIT).await?,
            period: today,
            trends: false,
        })
    }

    /// "January 2024"
    pub fn period_label(&self) -> String {
        self.period.format("%B %Y").to_string()
    }

    /// Four currency cards followed by the active/total flats card.
    /// Trends are only known for the snapshot figures.
    pub fn stat_cards(&self) -> Vec<StatCard> {
        let trend = |percent, positive| self.trends.then_some(Trend { percent, positive });
        let s = &self.stats;
        vec![
            StatCard {
                title_key: "total_donations",
                value: StatValue::Currency(s.total_donations),
                trend: trend(12, true),
            },
            StatCard {
                title_key: "total_collections",
                value: StatValue::Currency(s.total_collections),
                trend: trend(8, true),
            },
            StatCard {
                title_key: "total_expenses",
                value: StatValue::Currency(s.total_expenses),
                trend: trend(5, false),
            },
            StatCard {
                title_key: "net_balance",
                value: StatValue::Currency(s.net_balance),
                trend: trend(15, true),
            },
            StatCard {
                title_key: "active_flats",
                value: StatValue::Text(format!("{}/{}", s.active_flats, s.total_flats)),
                trend: None,
            },
        ]
    }
}

/// Rupee amount with Indian digit grouping and no fraction: `₹1,00,000`
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };
    format!("{}₹{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Row, Table};
    use crate::repository::MemoryStore;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(Decimal::from(100000)), "₹1,00,000");
        assert_eq!(format_inr(Decimal::from(21200)), "₹21,200");
        assert_eq!(format_inr(Decimal::from(800)), "₹800");
        assert_eq!(format_inr(Decimal::from(12345678)), "₹1,23,45,678");
        assert_eq!(format_inr(Decimal::new(99950, 2)), "₹1,000");
        assert_eq!(format_inr(Decimal::from(-1500)), "-₹1,500");
        assert_eq!(format_inr(Decimal::ZERO), "₹0");
    }

    #[test]
    fn test_snapshot_dashboard() {
        let dashboard = Dashboard::from_snapshot(StaticSnapshot::sample());
        assert_eq!(dashboard.recent_donations.len(), 3);
        assert_eq!(dashboard.recent_donations[0].donor_name, "Rajesh Kumar");
        assert_eq!(dashboard.recent_expenses[2].description, "Sound System Repair");
        assert_eq!(dashboard.period_label(), "January 2024");

        let cards = dashboard.stat_cards();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[3].value.display(), "₹21,200");
        assert_eq!(cards[4].value.display(), "3/5");
        assert_eq!(cards[2].trend, Some(Trend { percent: 5, positive: false }));
    }

    #[test]
    fn test_net_balance() {
        let stats = DashboardStats::compute(
            &seed::donations(),
            &seed::collections(),
            &seed::expenses(),
            &seed::flats(),
            date(2024, 1, 20),
        );
        assert_eq!(stats, seed::dashboard_stats());
        assert_eq!(
            stats.net_balance,
            stats.total_donations + stats.total_collections - stats.total_expenses
        );
    }

    #[test]
    fn test_monthly_only_counts_current_month() {
        let stats = DashboardStats::compute(
            &seed::donations(),
            &[],
            &seed::expenses(),
            &[],
            date(2024, 2, 1),
        );
        assert_eq!(stats.total_donations, Decimal::from(19000));
        assert_eq!(stats.monthly_donations, Decimal::ZERO);
        assert_eq!(stats.monthly_expenses, Decimal::ZERO);
        assert_eq!(stats.net_balance, Decimal::from(19000 - 8300));
    }

    #[tokio::test]
    async fn test_stats_from_store() {
        let store = MemoryStore::with_rows(seed::rows());
        let stats = dashboard_stats(&store, date(2024, 1, 31)).await.unwrap();
        assert_eq!(stats, seed::dashboard_stats());
    }

    #[tokio::test]
    async fn test_recent_is_newest_first() {
        let store = MemoryStore::with_rows(seed::rows());
        let row: Row = json!({
            "description": "Prasad Sweets", "amount": 650, "category": "Pooja Supplies",
            "approved_by": "Secretary"
        })
        .as_object()
        .unwrap()
        .clone();
        store.insert(Table::Expenses, row).await.unwrap();

        let latest = recent::<Expense>(&store, 3).await.unwrap();
        assert_eq!(latest.len(), 3);
        assert_eq!(latest[0].description, "Prasad Sweets");
        assert_eq!(latest[1].description, "Flowers and Garlands");

        let dashboard = Dashboard::load(&store, date(2024, 1, 31)).await.unwrap();
        assert_eq!(dashboard.recent_expenses[0].description, "Prasad Sweets");
        assert!(dashboard.stat_cards().iter().all(|card| card.trend.is_none()));
    }
}
