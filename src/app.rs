//! Mandir Admin Frontend App
//!
//! Login gate, navigation shell and the active page.

use leptos::prelude::*;
use mandir_admin_lib::views::{Page, PageContent};
use mandir_admin_lib::{AppConfig, Backend, Session};
use reactive_stores::Store;

use crate::components::{LoginForm, Navigation, ToastStack};
use crate::context::AppContext;
use crate::pages::{
    CollectionsPage, ComingSoon, DashboardPage, DonationsPage, ExpensesPage, FixedExpensesPage,
    FlatsPage,
};
use crate::store::{AppState, AppStateStoreFields};

fn render_page(page: Page) -> AnyView {
    match page {
        Page::Dashboard => view! { <DashboardPage /> }.into_any(),
        Page::Donations => view! { <DonationsPage /> }.into_any(),
        Page::Collections => view! { <CollectionsPage /> }.into_any(),
        Page::Expenses => view! { <ExpensesPage /> }.into_any(),
        Page::FixedExpenses => view! { <FixedExpensesPage /> }.into_any(),
        Page::Flats => view! { <FlatsPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();
    let backend = Backend::hosted_or_memory(&config);
    tracing::info!(backend = ?backend.kind, language = %config.default_language, "starting");

    // State
    let language = signal(config.default_language);
    let session = signal(Session::anonymous());
    let store = Store::new(AppState::default());

    // Provide context to all children
    let ctx = AppContext::new(backend, language, session);
    provide_context(ctx);
    provide_context(store);

    let signed_in = move || ctx.session.with(Session::is_signed_in);
    let content = move || match store.nav().with(|nav| nav.content()) {
        PageContent::Bound(page) => render_page(page),
        PageContent::ComingSoon(page) => view! { <ComingSoon page=page /> }.into_any(),
    };

    view! {
        <div class="app-layout">
            <Show when=signed_in fallback=|| view! { <LoginForm /> }>
                <Navigation />
                <main class="main-content">{content}</main>
            </Show>
            <ToastStack />
        </div>
    }
}
