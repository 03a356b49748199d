use leptos::prelude::*;
use mandir_admin_lib::views::Page;

use crate::context::use_app_context;

/// Placeholder for pages without a component
#[component]
pub fn ComingSoon(page: Page) -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <section class="page coming-soon">
            <h1>{move || ctx.t(page.id())}</h1>
            <h2>{move || ctx.t("coming_soon")}</h2>
            <p>{move || ctx.t("coming_soon_subtitle")}</p>
        </section>
    }
}
