//! Per-Entity Management View
//!
//! One generic list/add/edit/delete cycle, instantiated per record type.
//! Store calls are split into `begin_*` / `complete_*` halves so a UI can
//! await the store without holding the view; the `fetch`, `submit` and
//! `remove` helpers compose the halves for callers that can.
//!
//! Every successful write is followed by a full re-fetch, never a local
//! patch, so the list always reflects the store.

use tracing::{debug, error};

use super::form::FormState;
use super::notice::{Notice, Notices};
use crate::domain::{
    changed_columns, decode_row, validate, Draft, DomainError, DomainResult, Record, RecordId, Row,
    Table,
};
use crate::repository::RemoteStore;
use crate::session::Session;

/// Identifies one in-flight fetch; only the latest one may land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Insert,
    Update,
    Delete,
}

/// A store write prepared by the view
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Insert { table: Table, fields: Row },
    Update { table: Table, id: RecordId, fields: Row },
    Delete { table: Table, id: RecordId },
}

impl WriteOp {
    pub fn kind(&self) -> WriteKind {
        match self {
            WriteOp::Insert { .. } => WriteKind::Insert,
            WriteOp::Update { .. } => WriteKind::Update,
            WriteOp::Delete { .. } => WriteKind::Delete,
        }
    }

    pub async fn execute(&self, store: &dyn RemoteStore) -> DomainResult<()> {
        match self {
            WriteOp::Insert { table, fields } => {
                store.insert(*table, fields.clone()).await.map(|_| ())
            }
            WriteOp::Update { table, id, fields } => {
                store.update(*table, id.as_str(), fields.clone()).await.map(|_| ())
            }
            WriteOp::Delete { table, id } => store.delete(*table, id.as_str()).await,
        }
    }
}

/// Asks the user a yes/no question before a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Declined,
}

/// Prompt shown before deleting one record of `R`
pub fn delete_prompt<R: Record>() -> String {
    format!("Are you sure you want to delete this {}?", R::NOUN)
}

fn capitalized(noun: &str) -> String {
    let mut chars = noun.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct CrudView<R: Record> {
    items: Vec<R>,
    is_loading: bool,
    form: FormState<R>,
    generation: u64,
    torn_down: bool,
    can_write: bool,
    notices: Notices,
}

impl<R: Record> CrudView<R> {
    /// Write controls are decided once, from the session at construction
    pub fn new(session: &Session) -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            form: FormState::Closed,
            generation: 0,
            torn_down: false,
            can_write: session.is_admin(),
            notices: Notices::default(),
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn form(&self) -> &FormState<R> {
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

    // ========================
    // Fetch
    // ========================

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.is_loading = true;
        FetchTicket(self.generation)
    }

    /// Land a fetch result. Returns false when the ticket is stale or the
    /// view is gone, in which case nothing changes.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: DomainResult<Vec<Row>>) -> bool {
        if self.torn_down || ticket.0 != self.generation {
            debug!(table = %R::TABLE, ticket = ticket.0, "discarding stale fetch");
            return false;
        }
        self.is_loading = false;

        let decoded = result.and_then(|rows| {
            rows.into_iter()
                .map(decode_row::<R>)
                .collect::<DomainResult<Vec<R>>>()
        });
        match decoded {
            Ok(items) => {
                debug!(table = %R::TABLE, count = items.len(), "fetched");
                self.items = items;
            }
            Err(e) => {
                error!(table = %R::TABLE, error = %e, "fetch failed");
                self.notices.push(Notice::error(format!("Failed to fetch {}", R::PLURAL)));
            }
        }
        true
    }

    pub async fn fetch(&mut self, store: &dyn RemoteStore) -> bool {
        let ticket = self.begin_fetch();
        let result = store.list(R::TABLE, R::ORDER).await;
        self.complete_fetch(ticket, result)
    }

    // ========================
    // Form
    // ========================

    pub fn open_create(&mut self) {
        self.form = FormState::create();
    }

    pub fn open_edit(&mut self, record: &R) {
        self.form = FormState::edit(record);
    }

    pub fn edit_field(&mut self, field: <R::Draft as Draft<R>>::Field) {
        self.form.apply(field);
    }

    pub fn cancel(&mut self) {
        self.form = FormState::Closed;
    }

    /// Validate the open form and prepare its write. Validation failures
    /// queue a notice and leave the form as it is.
    pub fn begin_submit(&mut self) -> DomainResult<WriteOp> {
        let prepared = match &self.form {
            FormState::Closed => Err(DomainError::InvalidInput("no form is open".into())),
            FormState::Creating(draft) => validate::<R>(draft).map(|fields| WriteOp::Insert {
                table: R::TABLE,
                fields,
            }),
            FormState::Editing { id, original, draft } => validate::<R>(draft).map(|current| {
                let changed = original
                    .to_row()
                    .map(|before| changed_columns(&before, &current))
                    .unwrap_or_default();
                WriteOp::Update {
                    table: R::TABLE,
                    id: id.clone(),
                    fields: if changed.is_empty() { current } else { changed },
                }
            }),
        };

        if let Err(e) = &prepared {
            debug!(table = %R::TABLE, error = %e, "submit rejected");
            self.notices.push(Notice::error(e.to_string()));
        }
        prepared
    }

    /// Land a write result. Returns true when the write succeeded and the
    /// list should be re-fetched.
    pub fn complete_write(&mut self, op: &WriteOp, result: DomainResult<()>) -> bool {
        if self.torn_down {
            return false;
        }
        match result {
            Ok(()) => {
                let verb = match op.kind() {
                    WriteKind::Insert => "added",
                    WriteKind::Update => "updated",
                    WriteKind::Delete => "deleted",
                };
                if op.kind() != WriteKind::Delete {
                    self.form = FormState::Closed;
                }
                self.notices.push(Notice::success(format!(
                    "{} {} successfully",
                    capitalized(R::NOUN),
                    verb
                )));
                true
            }
            Err(e) => {
                error!(table = %R::TABLE, kind = ?op.kind(), error = %e, "write failed");
                self.notices.push(Notice::error(e.to_string()));
                false
            }
        }
    }

    pub async fn submit(&mut self, store: &dyn RemoteStore) -> DomainResult<()> {
        let op = self.begin_submit()?;
        let result = op.execute(store).await;
        if self.complete_write(&op, result.clone()) {
            self.fetch(store).await;
        }
        result
    }

    // ========================
    // Delete
    // ========================

    /// Ask for confirmation; `None` when the user declined
    pub fn begin_remove(&self, id: &RecordId, confirm: &dyn Confirm) -> Option<WriteOp> {
        if !confirm.confirm(&delete_prompt::<R>()) {
            debug!(table = %R::TABLE, %id, "delete declined");
            return None;
        }
        Some(WriteOp::Delete {
            table: R::TABLE,
            id: id.clone(),
        })
    }

    pub async fn remove(
        &mut self,
        store: &dyn RemoteStore,
        id: &RecordId,
        confirm: &dyn Confirm,
    ) -> DomainResult<RemoveOutcome> {
        let Some(op) = self.begin_remove(id, confirm) else {
            return Ok(RemoveOutcome::Declined);
        };
        let result = op.execute(store).await;
        if self.complete_write(&op, result.clone()) {
            self.fetch(store).await;
        }
        result.map(|()| RemoveOutcome::Removed)
    }

    /// The view is gone; late responses are dropped from here on
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Collection, CollectionField, Expense, ExpenseField, Flat, FlatField, FlatStatus, OrderBy,
        Profile, RecordId, Role,
    };
    use crate::i18n::{translate, Language};
    use crate::repository::MemoryStore;
    use crate::session::User;
    use crate::views::{NavigationShell, Page};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// MemoryStore that can be told to fail and remembers what it was sent
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_list: AtomicBool,
        fail_writes: AtomicBool,
        writes: AtomicUsize,
        last_update: Mutex<Option<Row>>,
    }

    #[async_trait]
    impl RemoteStore for FlakyStore {
        async fn list(&self, table: Table, order: OrderBy) -> DomainResult<Vec<Row>> {
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(DomainError::Remote("connection reset".into()));
            }
            self.inner.list(table, order).await
        }

        async fn insert(&self, table: Table, fields: Row) -> DomainResult<Row> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(DomainError::Remote("permission denied for table".into()));
            }
            self.inner.insert(table, fields).await
        }

        async fn update(&self, table: Table, id: &str, fields: Row) -> DomainResult<Row> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            *self.last_update.lock().unwrap() = Some(fields.clone());
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(DomainError::Remote("permission denied for table".into()));
            }
            self.inner.update(table, id, fields).await
        }

        async fn delete(&self, table: Table, id: &str) -> DomainResult<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(DomainError::Remote("permission denied for table".into()));
            }
            self.inner.delete(table, id).await
        }

        async fn select_eq(
            &self,
            table: Table,
            column: &str,
            value: &str,
        ) -> DomainResult<Vec<Row>> {
            self.inner.select_eq(table, column, value).await
        }
    }

    fn admin() -> Session {
        Session::new(
            User { id: "u-1".into(), email: None },
            Some(Profile {
                id: RecordId::new("p-1"),
                user_id: "u-1".into(),
                username: "president".into(),
                role: Role::Admin,
                full_name: None,
                created_at: None,
                updated_at: None,
            }),
        )
    }

    fn fill_flat(view: &mut CrudView<Flat>, number: &str, owner: &str) {
        view.open_create();
        view.edit_field(FlatField::Number(number.into()));
        view.edit_field(FlatField::OwnerName(owner.into()));
    }

    #[tokio::test]
    async fn test_insert_then_fetch() {
        let store = FlakyStore::default();
        let mut view = CrudView::<Flat>::new(&admin());
        view.fetch(&store).await;
        assert!(view.items().is_empty());

        fill_flat(&mut view, "A-101", "Rajesh Kumar");
        view.edit_field(FlatField::MembershipFee("500".into()));
        view.submit(&store).await.unwrap();

        assert_eq!(view.form(), &FormState::Closed);
        assert_eq!(view.items().len(), 1);
        let flat = &view.items()[0];
        assert_eq!(flat.number, "A-101");
        assert_eq!(flat.owner_name, "Rajesh Kumar");
        assert_eq!(flat.status, FlatStatus::Active);
        assert_eq!(view.last_notice(), Some(&Notice::success("Flat added successfully")));
    }

    #[tokio::test]
    async fn test_edit_sends_changed_columns_only() {
        let store = FlakyStore::default();
        let mut view = CrudView::<Flat>::new(&admin());
        fill_flat(&mut view, "A-102", "Sunita Devi");
        view.submit(&store).await.unwrap();
        let original = view.items()[0].clone();

        view.open_edit(&original);
        view.edit_field(FlatField::Status(FlatStatus::Pending));
        view.submit(&store).await.unwrap();

        let sent = store.last_update.lock().unwrap().clone().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent.get("status"), Some(&json!("pending")));

        assert_eq!(view.items().len(), 1);
        assert_eq!(view.items()[0].id, original.id);
        assert_eq!(view.items()[0].status, FlatStatus::Pending);
        assert_eq!(view.last_notice().unwrap().message, "Flat updated successfully");
    }

    #[tokio::test]
    async fn test_unchanged_edit_sends_full_row() {
        let store = FlakyStore::default();
        let mut view = CrudView::<Flat>::new(&admin());
        fill_flat(&mut view, "B-205", "Priya Sharma");
        view.submit(&store).await.unwrap();

        let flat = view.items()[0].clone();
        view.open_edit(&flat);
        view.submit(&store).await.unwrap();

        let sent = store.last_update.lock().unwrap().clone().unwrap();
        assert!(sent.contains_key("number"));
        assert!(sent.contains_key("owner_name"));
        assert!(sent.contains_key("status"));
    }

    #[tokio::test]
    async fn test_missing_fields_make_no_store_call() {
        let store = FlakyStore::default();
        let mut view = CrudView::<Collection>::new(&admin());
        view.open_create();
        view.edit_field(CollectionField::Purpose("Weekly Collection".into()));

        let err = view.submit(&store).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingFields(vec!["amount".into(), "collected_by".into()])
        );
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
        assert!(view.form().is_open());
        assert!(view.last_notice().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_unparseable_amount_is_invalid_input() {
        let store = FlakyStore::default();
        let mut view = CrudView::<Expense>::new(&admin());
        view.open_create();
        view.edit_field(ExpenseField::Description("Cleaning Supplies".into()));
        view.edit_field(ExpenseField::Amount("eight hundred".into()));
        view.edit_field(ExpenseField::Category("Maintenance".into()));
        view.edit_field(ExpenseField::ApprovedBy("Secretary".into()));

        let err = view.submit(&store).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_duplicate_flat_number_is_rejected() {
        let store = MemoryStore::with_rows(crate::seed::rows());
        let mut view = CrudView::<Flat>::new(&admin());
        view.fetch(&store).await;
        let before = view.items().len();

        fill_flat(&mut view, "A-101", "Someone Else");
        let err = view.submit(&store).await.unwrap_err();

        assert!(matches!(err, DomainError::Remote(_)));
        assert!(view.form().is_open());
        assert!(view.last_notice().unwrap().is_error());
        view.fetch(&store).await;
        assert_eq!(view.items().len(), before);
        assert_eq!(view.items().iter().filter(|f| f.number == "A-101").count(), 1);
    }

    #[tokio::test]
    async fn test_amount_beyond_float_precision_makes_no_store_call() {
        let store = FlakyStore::default();
        let mut view = CrudView::<Collection>::new(&admin());
        view.open_create();
        view.edit_field(CollectionField::Amount("12345678901234567.89".into()));
        view.edit_field(CollectionField::CollectedBy("Ram Prasad".into()));
        view.edit_field(CollectionField::Purpose("Weekly Collection".into()));

        let err = view.submit(&store).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
        assert!(view.form().is_open());
    }

    #[tokio::test]
    async fn test_language_switch_leaves_view_state_alone() {
        let store = MemoryStore::with_rows(crate::seed::rows());
        let mut view = CrudView::<Flat>::new(&admin());
        view.fetch(&store).await;
        fill_flat(&mut view, "D-401", "Meera Iyer");
        let mut shell = NavigationShell::default();
        shell.select_page("flats").unwrap();

        let items = view.items().to_vec();
        let form = view.form().clone();
        let mut language = Language::En;
        let label_before = translate(language, shell.current().id());

        language = Language::Hi;

        assert_eq!(view.items(), &items[..]);
        assert_eq!(view.form(), &form);
        assert_eq!(shell.current(), Page::Flats);
        assert_eq!(label_before, "Flats");
        assert_eq!(translate(language, shell.current().id()), "फ्लैट");
    }

    #[tokio::test]
    async fn test_store_failure_keeps_form_open() {
        let store = FlakyStore::default();
        let mut view = CrudView::<Flat>::new(&admin());
        fill_flat(&mut view, "C-304", "Anand Patel");
        view.submit(&store).await.unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        fill_flat(&mut view, "B-201", "Vikram Singh");
        let draft_before = view.form().clone();
        let err = view.submit(&store).await.unwrap_err();

        assert_eq!(err, DomainError::Remote("permission denied for table".into()));
        assert_eq!(view.form(), &draft_before);
        assert_eq!(view.items().len(), 1);
        assert_eq!(
            view.last_notice(),
            Some(&Notice::error("permission denied for table"))
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_items() {
        let store = FlakyStore::default();
        let mut view = CrudView::<Flat>::new(&admin());
        fill_flat(&mut view, "A-101", "Rajesh Kumar");
        view.submit(&store).await.unwrap();
        view.drain_notices();

        store.fail_list.store(true, Ordering::SeqCst);
        assert!(view.fetch(&store).await);
        assert_eq!(view.items().len(), 1);
        assert!(!view.is_loading());
        assert_eq!(view.drain_notices(), vec![Notice::error("Failed to fetch flats")]);
    }

    #[tokio::test]
    async fn test_remove_confirmed_and_declined() {
        let store = FlakyStore::default();
        let mut view = CrudView::<Flat>::new(&admin());
        fill_flat(&mut view, "A-101", "Rajesh Kumar");
        view.submit(&store).await.unwrap();
        let id = view.items()[0].id.clone();
        let writes_before = store.writes.load(Ordering::SeqCst);

        let asked = Mutex::new(String::new());
        let decline = |prompt: &str| {
            *asked.lock().unwrap() = prompt.to_string();
            false
        };
        let outcome = view.remove(&store, &id, &decline).await.unwrap();
        assert_eq!(outcome, RemoveOutcome::Declined);
        assert_eq!(*asked.lock().unwrap(), "Are you sure you want to delete this flat?");
        assert_eq!(store.writes.load(Ordering::SeqCst), writes_before);
        assert_eq!(view.items().len(), 1);

        let outcome = view.remove(&store, &id, &|_: &str| true).await.unwrap();
        assert_eq!(outcome, RemoveOutcome::Removed);
        assert!(view.items().iter().all(|f| f.id != id));
        assert_eq!(view.last_notice().unwrap().message, "Flat deleted successfully");
    }

    #[tokio::test]
    async fn test_remove_failure_leaves_items() {
        let store = FlakyStore::default();
        let mut view = CrudView::<Flat>::new(&admin());
        fill_flat(&mut view, "A-101", "Rajesh Kumar");
        view.submit(&store).await.unwrap();
        let id = view.items()[0].id.clone();

        store.fail_writes.store(true, Ordering::SeqCst);
        assert!(view.remove(&store, &id, &|_: &str| true).await.is_err());
        assert_eq!(view.items().len(), 1);
        assert!(view.last_notice().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_stale_ticket_discarded() {
        let store = FlakyStore::default();
        let mut view = CrudView::<Flat>::new(&admin());

        let stale = view.begin_fetch();
        let fresh = view.begin_fetch();
        let rows = store.list(Table::Flats, OrderBy::asc("number")).await;
        assert!(!view.complete_fetch(stale, rows.clone()));
        assert!(view.is_loading());
        assert!(view.complete_fetch(fresh, rows));
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_teardown_drops_late_fetch() {
        let store = FlakyStore::default();
        store
            .inner
            .insert(
                Table::Flats,
                json!({ "number": "A-101", "owner_name": "Rajesh Kumar" })
                    .as_object()
                    .unwrap()
                    .clone(),
            )
            .await
            .unwrap();

        let mut view = CrudView::<Flat>::new(&admin());
        let ticket = view.begin_fetch();
        view.teardown();
        let rows = store.list(Table::Flats, OrderBy::asc("number")).await;
        assert!(!view.complete_fetch(ticket, rows));
        assert!(view.items().is_empty());
        assert!(view.drain_notices().is_empty());
    }

    #[test]
    fn test_write_controls_follow_session() {
        assert!(CrudView::<Flat>::new(&admin()).show_write_controls());
        assert!(!CrudView::<Flat>::new(&Session::anonymous()).show_write_controls());
    }

    #[test]
    fn test_success_message_nouns() {
        let mut view = CrudView::<crate::domain::FixedExpense>::new(&admin());
        let op = WriteOp::Delete { table: Table::FixedExpenses, id: RecordId::new("1") };
        assert!(view.complete_write(&op, Ok(())));
        assert_eq!(view.last_notice().unwrap().message, "Fixed expense deleted successfully");
    }
}
