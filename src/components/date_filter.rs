//! Date Filter Component
//!
//! From/to pickers with apply and clear. Reports the chosen pair to the
//! page, which does the filtering.

use chrono::NaiveDate;
use leptos::prelude::*;
use mandir_admin_lib::views::DateFilter;

use super::form_fields::{date_input_value, parse_date_input};
use crate::context::use_app_context;

#[component]
pub fn DateFilterBar(
    #[prop(into)] on_change: Callback<(Option<NaiveDate>, Option<NaiveDate>)>,
) -> impl IntoView {
    let ctx = use_app_context();
    let filter = RwSignal::new(DateFilter::default());

    let apply = move |_| {
        filter.with_untracked(|f| f.apply(|from, to| on_change.run((from, to))));
    };
    let clear = move |_| {
        filter.update(|f| f.clear(|from, to| on_change.run((from, to))));
    };

    view! {
        <div class="date-filter">
            <span class="date-filter-title">{move || ctx.t("filter_by_date")}</span>
            <label>
                {move || ctx.t("from_date")}
                <input
                    type="date"
                    prop:value=move || date_input_value(filter.get().from_date())
                    on:change=move |ev| {
                        let date = parse_date_input(&event_target_value(&ev));
                        filter.update(|f| f.set_from(date));
                    }
                />
            </label>
            <label>
                {move || ctx.t("to_date")}
                <input
                    type="date"
                    prop:value=move || date_input_value(filter.get().to_date())
                    on:change=move |ev| {
                        let date = parse_date_input(&event_target_value(&ev));
                        filter.update(|f| f.set_to(date));
                    }
                />
            </label>
            <button
                class="primary-btn"
                disabled=move || !filter.get().can_apply()
                on:click=apply
            >
                {move || ctx.t("apply_filter")}
            </button>
            <button class="outline-btn" on:click=clear>
                {move || ctx.t("clear_filter")}
            </button>
        </div>
    }
}
