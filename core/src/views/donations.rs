//! Donations view
//!
//! Keeps its list in memory, seeded from the sample dataset. Shares the
//! form and validation path with the store-backed views but never calls a
//! store: creates prepend, edits replace in place, deletes filter by id.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use super::crud::{delete_prompt, Confirm, RemoveOutcome};
use super::form::FormState;
use super::notice::{Notice, Notices};
use crate::domain::{
    decode_row, validate, Donation, DonationField, DomainError, DomainResult, RecordId, Row,
};
use crate::session::Session;

pub struct DonationsView {
    items: Vec<Donation>,
    form: FormState<Donation>,
    can_write: bool,
    notices: Notices,
}

impl DonationsView {
    pub fn new(session: &Session, seed: Vec<Donation>) -> Self {
        Self {
            items: seed,
            form: FormState::Closed,
            can_write: session.is_admin(),
            notices: Notices::default(),
        }
    }

    pub fn items(&self) -> &[Donation] {
        &self.items
    }

    pub fn form(&self) -> &FormState<Donation> {
        &self.form
    }

    pub fn show_write_controls(&self) -> bool {
        self.can_write
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn open_create(&mut self) {
        self.form = FormState::create();
    }

    pub fn open_edit(&mut self, donation: &Donation) {
        self.form = FormState::edit(donation);
    }

    pub fn edit_field(&mut self, field: DonationField) {
        self.form.apply(field);
    }

    pub fn cancel(&mut self) {
        self.form = FormState::Closed;
    }

    pub fn submit(&mut self) -> DomainResult<()> {
        self.submit_at(Utc::now())
    }

    /// Submit with an explicit clock. New donations get the clock's
    /// millisecond timestamp as id and its date.
    pub fn submit_at(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        let result = self.apply_form(now);
        match &result {
            Ok(message) => {
                self.form = FormState::Closed;
                self.notices.push(Notice::success(*message));
            }
            Err(e) => self.notices.push(Notice::error(e.to_string())),
        }
        result.map(|_| ())
    }

    fn apply_form(&mut self, now: DateTime<Utc>) -> DomainResult<&'static str> {
        match &self.form {
            FormState::Closed => Err(DomainError::InvalidInput("no form is open".into())),
            FormState::Creating(draft) => {
                let mut row = validate::<Donation>(draft)?;
                let id = self.fresh_id(now.timestamp_millis());
                row.insert("id".into(), Value::String(id.to_string()));
                let today = now.date_naive().format("%Y-%m-%d").to_string();
                row.entry("date").or_insert_with(|| Value::String(today));
                let donation = decode_row::<Donation>(row)?;
                debug!(id = %donation.id, "donation added");
                self.items.insert(0, donation);
                Ok("Donation added successfully")
            }
            FormState::Editing { id, draft, .. } => {
                let fields = validate::<Donation>(draft)?;
                let index = self
                    .items
                    .iter()
                    .position(|d| &d.id == id)
                    .ok_or_else(|| DomainError::NotFound(format!("donations/{}", id)))?;
                let mut row: Row = match serde_json::to_value(&self.items[index]) {
                    Ok(Value::Object(row)) => row,
                    _ => return Err(DomainError::Decode(format!("donations/{}", id))),
                };
                row.extend(fields);
                self.items[index] = decode_row::<Donation>(row)?;
                debug!(%id, "donation updated");
                Ok("Donation updated successfully")
            }
        }
    }

    /// Millisecond timestamp, bumped past any id already in the list
    fn fresh_id(&self, millis: i64) -> i64 {
        let mut candidate = millis;
        while self.items.iter().any(|d| d.id.as_str() == candidate.to_string()) {
            candidate += 1;
        }
        candidate
    }

    pub fn remove(&mut self, id: &RecordId, confirm: &dyn Confirm) -> RemoveOutcome {
        if !confirm.confirm(&delete_prompt::<Donation>()) {
            return RemoveOutcome::Declined;
        }
        self.items.retain(|d| &d.id != id);
        self.notices.push(Notice::success("Donation deleted successfully"));
        RemoveOutcome::Removed
    }

    /// Case-insensitive match on donor name, purpose or flat number
    pub fn search(&self, term: &str) -> Vec<&Donation> {
        let needle = term.trim().to_lowercase();
        self.items
            .iter()
            .filter(|d| {
                needle.is_empty()
                    || d.donor_name.to_lowercase().contains(&needle)
                    || d.purpose.to_lowercase().contains(&needle)
                    || d
                        .flat_number
                        .as_deref()
                        .is_some_and(|flat| flat.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

/// Sum of donation amounts
pub fn total<'a>(donations: impl IntoIterator<Item = &'a Donation>) -> Decimal {
    donations.into_iter().map(|d| d.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaymentMethod, Profile, Role};
    use crate::seed;
    use crate::session::User;
    use chrono::TimeZone;

    fn admin() -> Session {
        Session::new(
            User { id: "u-1".into(), email: None },
            Some(Profile {
                id: RecordId::new("p-1"),
                user_id: "u-1".into(),
                username: "treasurer".into(),
                role: Role::Admin,
                full_name: None,
                created_at: None,
                updated_at: None,
            }),
        )
    }

    fn view() -> DonationsView {
        DonationsView::new(&admin(), seed::donations())
    }

    fn fill(view: &mut DonationsView) {
        view.open_create();
        view.edit_field(DonationField::DonorName("Meera Joshi".into()));
        view.edit_field(DonationField::Amount("1100".into()));
        view.edit_field(DonationField::Purpose("Annadanam".into()));
        view.edit_field(DonationField::PaymentMethod(PaymentMethod::Online));
    }

    #[test]
    fn test_create_prepends_with_timestamp_id() {
        let mut view = view();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap();
        fill(&mut view);
        view.submit_at(now).unwrap();

        assert_eq!(view.items().len(), 5);
        let first = &view.items()[0];
        assert_eq!(first.id.as_str(), now.timestamp_millis().to_string());
        assert_eq!(first.date, now.date_naive());
        assert_eq!(first.donor_name, "Meera Joshi");
        assert_eq!(view.form(), &FormState::Closed);
        assert_eq!(view.last_notice(), Some(&Notice::success("Donation added successfully")));
    }

    #[test]
    fn test_colliding_id_is_bumped() {
        let mut view = view();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap();
        fill(&mut view);
        view.submit_at(now).unwrap();
        fill(&mut view);
        view.submit_at(now).unwrap();

        let first = view.items()[0].id.as_str().to_string();
        let second = view.items()[1].id.as_str().to_string();
        assert_ne!(first, second);
        assert_eq!(first, (now.timestamp_millis() + 1).to_string());
    }

    #[test]
    fn test_missing_fields_leave_list_unchanged() {
        let mut view = view();
        view.open_create();
        view.edit_field(DonationField::DonorName("Meera Joshi".into()));
        let err = view.submit().unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingFields(vec![
                "amount".into(),
                "purpose".into(),
                "payment_method".into()
            ])
        );
        assert_eq!(view.items().len(), 4);
        assert!(view.form().is_open());
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut view = view();
        let target = view.items()[1].clone();
        view.open_edit(&target);
        view.edit_field(DonationField::Amount("3000".into()));
        view.submit().unwrap();

        assert_eq!(view.items().len(), 4);
        assert_eq!(view.items()[1].id, target.id);
        assert_eq!(view.items()[1].amount, Decimal::from(3000));
        assert_eq!(view.items()[1].date, target.date);
        assert_eq!(view.items()[1].phone, target.phone);
    }

    #[test]
    fn test_remove_needs_confirmation() {
        let mut view = view();
        let id = view.items()[0].id.clone();

        assert_eq!(view.remove(&id, &|_: &str| false), RemoveOutcome::Declined);
        assert_eq!(view.items().len(), 4);

        assert_eq!(view.remove(&id, &|_: &str| true), RemoveOutcome::Removed);
        assert_eq!(view.items().len(), 3);
        assert!(view.items().iter().all(|d| d.id != id));
    }

    #[test]
    fn test_search_and_total() {
        let view = view();
        let by_flat = view.search("a-10");
        assert_eq!(by_flat.len(), 2);
        assert_eq!(total(by_flat), Decimal::from(6500));

        let by_purpose = view.search("TEMPLE");
        assert_eq!(by_purpose.len(), 2);

        assert_eq!(view.search("").len(), 4);
        assert_eq!(total(view.items()), Decimal::from(19000));
        assert!(view.search("nobody").is_empty());
    }
}
