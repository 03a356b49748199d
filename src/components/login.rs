//! Login Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use mandir_admin_lib::session::establish;
use mandir_admin_lib::views::Notice;

use crate::context::use_app_context;
use crate::store::{store_push_toast, use_app_store};

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (pending, set_pending) = signal(false);

    let sign_in = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        set_pending.set(true);
        let (email, password) = (email.get_untracked(), password.get_untracked());
        let (auth, remote) = (ctx.auth(), ctx.store());
        spawn_local(async move {
            match establish(auth.as_ref(), remote.as_ref(), &email, &password).await {
                Ok(session) => ctx.set_session(session),
                Err(e) => {
                    tracing::warn!(error = %e, "sign in failed");
                    store_push_toast(&store, Notice::error(e.to_string()));
                }
            }
            set_pending.set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=sign_in>
                <h1>{move || ctx.t("welcome")}</h1>
                <p class="login-subtitle">{move || ctx.t("login_subtitle")}</p>
                <label class="form-field">
                    <span class="form-label">{move || ctx.t("email")}</span>
                    <input
                        type="email"
                        required=true
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-field">
                    <span class="form-label">{move || ctx.t("password")}</span>
                    <input
                        type="password"
                        required=true
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="primary-btn" disabled=move || pending.get()>
                    {move || ctx.t("signin")}
                </button>
            </form>
        </div>
    }
}
