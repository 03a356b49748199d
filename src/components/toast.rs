//! Toast notifications

use leptos::prelude::*;
use mandir_admin_lib::views::NoticeLevel;

use crate::store::{store_dismiss_toast, use_app_store, AppStateStoreFields};

#[component]
pub fn ToastStack() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-stack">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.notice.level {
                        NoticeLevel::Success => "toast success",
                        NoticeLevel::Error => "toast error",
                    };
                    view! {
                        <div class=class on:click=move |_| store_dismiss_toast(&store, id)>
                            <strong class="toast-title">{toast.notice.title}</strong>
                            <p class="toast-message">{toast.notice.message}</p>
                        </div>
                    }
                }
            />
        </div>
    }
}
