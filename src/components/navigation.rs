//! Navigation Component
//!
//! Header with the society name, page menu, language switcher and logout.

use leptos::prelude::*;
use leptos::task::spawn_local;
use mandir_admin_lib::views::Page;
use mandir_admin_lib::{Language, Session};

use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn Navigation() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let logout = move |_| {
        let auth = ctx.auth();
        let mut session = ctx.session.get_untracked();
        spawn_local(async move {
            session.sign_out(auth.as_ref()).await;
            ctx.set_session(session);
        });
    };

    let greeting = move || {
        ctx.session.with(|s: &Session| s.profile().map(|p| p.display_name().to_string()))
    };

    view! {
        <nav class="navigation">
            <div class="nav-header">
                <span class="nav-logo">"🛕"</span>
                <span class="nav-title">{move || ctx.t("temple_society")}</span>
            </div>
            <ul class="nav-menu">
                {Page::ALL
                    .into_iter()
                    .map(|page| {
                        view! {
                            <li>
                                <button
                                    class=move || {
                                        if store.nav().get().current() == page {
                                            "nav-item active"
                                        } else {
                                            "nav-item"
                                        }
                                    }
                                    on:click=move |_| store.nav().write().select(page)
                                >
                                    {move || ctx.t(page.id())}
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="nav-footer">
                <label class="nav-language">
                    {move || ctx.t("language")}
                    <select
                        prop:value=move || ctx.language.get().code()
                        on:change=move |ev| {
                            if let Some(language) = Language::parse(&event_target_value(&ev)) {
                                ctx.set_language(language);
                            }
                        }
                    >
                        {Language::ALL
                            .into_iter()
                            .map(|language| {
                                view! {
                                    <option
                                        value=language.code()
                                        selected=move || ctx.language.get() == language
                                    >
                                        {language.native_name()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                {move || greeting().map(|name| view! { <span class="nav-user">{name}</span> })}
                <button class="outline-btn" on:click=logout>{move || ctx.t("logout")}</button>
            </div>
        </nav>
    }
}
