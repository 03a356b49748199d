//! Date range picker state

use chrono::NaiveDate;

use crate::domain::Dated;

/// Inclusive range; an unset end is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// `from` later than `to`; such a range contains no date
    pub fn is_inverted(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Records whose date falls inside `range`, in their original order
pub fn filter_by_date<'a, R: Dated>(items: &'a [R], range: &DateRange) -> Vec<&'a R> {
    items.iter().filter(|item| range.contains(item.date())).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateFilter {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateFilter {
    pub fn from_date(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn set_from(&mut self, date: Option<NaiveDate>) {
        self.from = date;
    }

    pub fn set_to(&mut self, date: Option<NaiveDate>) {
        self.to = date;
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.from, self.to)
    }

    pub fn can_apply(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Hands the current pair to `on_change` as is. Does nothing and
    /// returns false while neither bound is set.
    pub fn apply(&self, on_change: impl FnOnce(Option<NaiveDate>, Option<NaiveDate>)) -> bool {
        if !self.can_apply() {
            return false;
        }
        on_change(self.from, self.to);
        true
    }

    pub fn clear(&mut self, on_change: impl FnOnce(Option<NaiveDate>, Option<NaiveDate>)) {
        self.from = None;
        self.to = None;
        on_change(None, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use std::cell::Cell;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_apply_needs_a_bound() {
        let mut filter = DateFilter::default();
        let calls = Cell::new(0);
        assert!(!filter.can_apply());
        assert!(!filter.apply(|_, _| calls.set(calls.get() + 1)));
        assert_eq!(calls.get(), 0);

        filter.set_to(Some(date(2024, 1, 12)));
        let seen = Cell::new(None);
        assert!(filter.apply(|from, to| seen.set(Some((from, to)))));
        assert_eq!(seen.get(), Some((None, Some(date(2024, 1, 12)))));
    }

    #[test]
    fn test_january_range_passes_through_unchanged() {
        let mut filter = DateFilter::default();
        filter.set_from(Some(date(2024, 1, 1)));
        filter.set_to(Some(date(2024, 1, 31)));

        let seen = Cell::new(None);
        assert!(filter.apply(|from, to| seen.set(Some((from, to)))));
        assert_eq!(seen.get(), Some((Some(date(2024, 1, 1)), Some(date(2024, 1, 31)))));
        assert_eq!(filter.from_date(), Some(date(2024, 1, 1)));
        assert_eq!(filter.to_date(), Some(date(2024, 1, 31)));
    }

    #[test]
    fn test_inverted_range_passes_through() {
        let mut filter = DateFilter::default();
        filter.set_from(Some(date(2024, 2, 1)));
        filter.set_to(Some(date(2024, 1, 1)));

        let seen = Cell::new(None);
        assert!(filter.apply(|from, to| seen.set(Some((from, to)))));
        assert_eq!(seen.get(), Some((Some(date(2024, 2, 1)), Some(date(2024, 1, 1)))));

        let range = filter.range();
        assert!(range.is_inverted());
        assert!(filter_by_date(&seed::donations(), &range).is_empty());
    }

    #[test]
    fn test_clear_reports_empty_pair() {
        let mut filter = DateFilter::default();
        filter.set_from(Some(date(2024, 1, 1)));
        let seen = Cell::new(Some((Some(date(2000, 1, 1)), None)));
        filter.clear(|from, to| seen.set(Some((from, to))));
        assert_eq!(seen.get(), Some((None, None)));
        assert_eq!(filter, DateFilter::default());
    }

    #[test]
    fn test_filter_by_date_is_inclusive() {
        let donations = seed::donations();
        let range = DateRange::new(Some(date(2024, 1, 10)), Some(date(2024, 1, 12)));
        let names: Vec<_> = filter_by_date(&donations, &range)
            .into_iter()
            .map(|d| d.donor_name.as_str())
            .collect();
        assert_eq!(names, ["Priya Sharma", "Anand Patel"]);

        let open_end = DateRange::new(Some(date(2024, 1, 14)), None);
        assert_eq!(filter_by_date(&seed::expenses(), &open_end).len(), 2);
        assert_eq!(filter_by_date(&seed::collections(), &DateRange::default()).len(), 3);
    }
}
