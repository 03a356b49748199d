//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;
use mandir_admin_lib::repository::RemoteStore;
use mandir_admin_lib::session::AuthBackend;
use mandir_admin_lib::{translate, Backend, Language, Session};

/// App-wide handles and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    backend: StoredValue<Backend>,
    /// UI language - read
    pub language: ReadSignal<Language>,
    /// UI language - write
    set_language: WriteSignal<Language>,
    /// Signed-in user, if any - read
    pub session: ReadSignal<Session>,
    /// Signed-in user, if any - write
    set_session: WriteSignal<Session>,
}

impl AppContext {
    pub fn new(
        backend: Backend,
        language: (ReadSignal<Language>, WriteSignal<Language>),
        session: (ReadSignal<Session>, WriteSignal<Session>),
    ) -> Self {
        Self {
            backend: StoredValue::new(backend),
            language: language.0,
            set_language: language.1,
            session: session.0,
            set_session: session.1,
        }
    }

    pub fn store(&self) -> Arc<dyn RemoteStore> {
        self.backend.with_value(|backend| backend.store.clone())
    }

    pub fn auth(&self) -> Arc<dyn AuthBackend> {
        self.backend.with_value(|backend| backend.auth.clone())
    }

    /// Translate `key` in the current language (tracked)
    pub fn t(&self, key: &'static str) -> &'static str {
        translate(self.language.get(), key)
    }

    pub fn set_language(&self, language: Language) {
        self.set_language.set(language);
    }

    pub fn set_session(&self, session: Session) {
        self.set_session.set(session);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
