//! Form Field Components
//!
//! Labelled inputs shared by every add/edit dialog. Labels are localizer
//! keys.

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::context::use_app_context;

/// `YYYY-MM-DD` as used by date inputs; blank or malformed gives `None`
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

#[component]
pub fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <label class="form-field">
            <span class="form-label">{move || ctx.t(label)} {required.then_some(" *")}</span>
            <input
                type=input_type
                required=required
                step=(input_type == "number").then_some("any")
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn DateField(
    label: &'static str,
    #[prop(into)] value: Signal<Option<NaiveDate>>,
    #[prop(into)] on_change: Callback<Option<NaiveDate>>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <label class="form-field">
            <span class="form-label">{move || ctx.t(label)} {required.then_some(" *")}</span>
            <input
                type="date"
                required=required
                prop:value=move || date_input_value(value.get())
                on:change=move |ev| on_change.run(parse_date_input(&event_target_value(&ev)))
            />
        </label>
    }
}

/// Select over a closed set; options are (value, localizer key) pairs
#[component]
pub fn SelectField(
    label: &'static str,
    options: Vec<(&'static str, &'static str)>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <label class="form-field">
            <span class="form-label">{move || ctx.t(label)} {required.then_some(" *")}</span>
            <select
                required=required
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="" disabled=true>"-"</option>
                {options
                    .into_iter()
                    .map(|(option, key)| {
                        view! {
                            <option value=option selected=move || value.get() == option>
                                {move || ctx.t(key)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

#[component]
pub fn CheckboxField(
    label: &'static str,
    #[prop(into)] value: Signal<bool>,
    #[prop(into)] on_change: Callback<bool>,
) -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <label class="form-field checkbox">
            <input
                type="checkbox"
                prop:checked=move || value.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
            <span class="form-label">{move || ctx.t(label)}</span>
        </label>
    }
}
