//! Store-Backed Page State
//!
//! Wraps a `CrudView` in a signal and runs its store calls on the local
//! executor. Responses landing after the page unmounts are dropped by the
//! view's teardown.

use leptos::prelude::*;
use leptos::task::spawn_local;
use mandir_admin_lib::domain::{Draft, Record, RecordId};
use mandir_admin_lib::views::{CrudView, WriteOp};

use crate::context::{use_app_context, AppContext};
use crate::store::{store_push_notices, use_app_store, AppStore};

pub type FieldOf<R> = <<R as Record>::Draft as Draft<R>>::Field;

pub struct CrudHandle<R: Record> {
    pub state: RwSignal<CrudView<R>>,
    ctx: AppContext,
    app_store: AppStore,
}

impl<R: Record> Clone for CrudHandle<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Record> Copy for CrudHandle<R> {}

impl<R: Record> CrudHandle<R> {
    /// Move queued notices into toasts
    fn flush(self) {
        if let Some(notices) = self.state.try_update(|view| view.drain_notices()) {
            store_push_notices(&self.app_store, notices);
        }
    }

    pub fn refresh(self) {
        let Some(ticket) = self.state.try_update(|view| view.begin_fetch()) else {
            return;
        };
        let store = self.ctx.store();
        spawn_local(async move {
            let result = store.list(R::TABLE, R::ORDER).await;
            self.state.try_update(|view| view.complete_fetch(ticket, result));
            self.flush();
        });
    }

    pub fn open_create(self) {
        self.state.update(|view| view.open_create());
    }

    pub fn open_edit(self, record: &R) {
        self.state.update(|view| view.open_edit(record));
    }

    pub fn edit(self, field: FieldOf<R>) {
        self.state.update(|view| view.edit_field(field));
    }

    pub fn cancel(self) {
        self.state.update(|view| view.cancel());
    }

    pub fn submit(self) {
        match self.state.try_update(|view| view.begin_submit()) {
            Some(Ok(op)) => self.write(op),
            _ => self.flush(),
        }
    }

    /// Delete `id` once the user answered the inline prompt
    pub fn remove(self, id: RecordId, confirmed: bool) {
        let answer = move |_: &str| confirmed;
        let op = self
            .state
            .try_with_untracked(|view| view.begin_remove(&id, &answer))
            .flatten();
        if let Some(op) = op {
            self.write(op);
        }
    }

    fn write(self, op: WriteOp) {
        let store = self.ctx.store();
        spawn_local(async move {
            let result = op.execute(store.as_ref()).await;
            let refetch = self
                .state
                .try_update(|view| view.complete_write(&op, result))
                .unwrap_or(false);
            self.flush();
            if refetch {
                self.refresh();
            }
        });
    }
}

/// Page state for `R`, fetched on mount and torn down on unmount
pub fn use_crud<R: Record>() -> CrudHandle<R> {
    let ctx = use_app_context();
    let state = RwSignal::new(CrudView::<R>::new(&ctx.session.get_untracked()));
    let handle = CrudHandle {
        state,
        ctx,
        app_store: use_app_store(),
    };
    handle.refresh();

    on_cleanup(move || {
        state.try_update(|view| view.teardown());
    });
    handle
}
