//! Add/Edit dialog shell

use leptos::prelude::*;

use crate::context::use_app_context;

/// Modal form with save/cancel; `title` is a localizer key
#[component]
pub fn FormDialog(
    #[prop(into)] title: Signal<&'static str>,
    #[prop(into)] on_submit: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
    children: Children,
) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=|ev| ev.stop_propagation()>
                <h2 class="dialog-title">{move || ctx.t(title.get())}</h2>
                <form
                    class="dialog-form"
                    on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        on_submit.run(());
                    }
                >
                    {children()}
                    <div class="dialog-actions">
                        <button type="submit" class="primary-btn">{move || ctx.t("save")}</button>
                        <button type="button" class="outline-btn" on:click=move |_| on_cancel.run(())>
                            {move || ctx.t("cancel")}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
