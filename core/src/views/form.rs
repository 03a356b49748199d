//! Add/Edit dialog state

use crate::domain::{Draft, Record, RecordId};

/// The one open dialog of a view, if any
#[derive(Debug, Clone, PartialEq)]
pub enum FormState<R: Record> {
    Closed,
    Creating(R::Draft),
    Editing {
        id: RecordId,
        /// Draft as first opened, used to send only changed columns
        original: R::Draft,
        draft: R::Draft,
    },
}

impl<R: Record> Default for FormState<R> {
    fn default() -> Self {
        FormState::Closed
    }
}

impl<R: Record> FormState<R> {
    pub fn create() -> Self {
        FormState::Creating(R::Draft::default())
    }

    pub fn edit(record: &R) -> Self {
        let draft = R::Draft::from_record(record);
        FormState::Editing {
            id: record.id().clone(),
            original: draft.clone(),
            draft,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::Closed)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, FormState::Editing { .. })
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        match self {
            FormState::Closed => None,
            FormState::Creating(draft) | FormState::Editing { draft, .. } => Some(draft),
        }
    }

    /// Apply one field update; ignored while closed
    pub fn apply(&mut self, field: <R::Draft as Draft<R>>::Field) {
        match self {
            FormState::Closed => {}
            FormState::Creating(draft) | FormState::Editing { draft, .. } => draft.apply(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Flat, FlatDraft, FlatField, FlatStatus};

    fn flat() -> Flat {
        Flat {
            id: RecordId::new("4"),
            number: "C-304".into(),
            owner_name: "Anand Patel".into(),
            phone: None,
            email: Some("anand@email.com".into()),
            membership_fee: None,
            last_payment_date: None,
            status: FlatStatus::Active,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_closed_ignores_edits() {
        let mut form = FormState::<Flat>::Closed;
        form.apply(FlatField::Number("A-1".into()));
        assert_eq!(form, FormState::Closed);
        assert!(form.draft().is_none());
    }

    #[test]
    fn test_edit_keeps_original() {
        let mut form = FormState::edit(&flat());
        form.apply(FlatField::OwnerName("A. Patel".into()));
        match form {
            FormState::Editing { id, original, draft } => {
                assert_eq!(id.as_str(), "4");
                assert_eq!(original.owner_name, "Anand Patel");
                assert_eq!(draft.owner_name, "A. Patel");
            }
            other => panic!("expected editing, got {:?}", other),
        }
    }

    #[test]
    fn test_create_starts_from_default() {
        let form = FormState::<Flat>::create();
        assert!(form.is_open());
        assert!(!form.is_editing());
        assert_eq!(form.draft(), Some(&FlatDraft::default()));
    }
}
