//! Donations Page
//!
//! Works on the in-memory sample list; see `DonationsView`.

use chrono::NaiveDate;
use leptos::prelude::*;
use mandir_admin_lib::domain::{Donation, DonationField, PaymentMethod};
use mandir_admin_lib::seed;
use mandir_admin_lib::views::{
    delete_prompt, filter_by_date, format_inr, total, DateRange, DonationsView,
};

use super::show_date;
use crate::components::{
    DateField, DateFilterBar, DeleteConfirmButton, FormDialog, SelectField, TextField,
};
use crate::context::use_app_context;
use crate::store::{store_push_notices, use_app_store};

fn payment_options() -> Vec<(&'static str, &'static str)> {
    PaymentMethod::ALL.iter().map(|m| (m.as_str(), m.as_str())).collect()
}

#[component]
pub fn DonationsPage() -> impl IntoView {
    let ctx = use_app_context();
    let app_store = use_app_store();
    let state = RwSignal::new(DonationsView::new(&ctx.session.get_untracked(), seed::donations()));
    let (search, set_search) = signal(String::new());
    let range = RwSignal::new(DateRange::default());

    let flush = move || {
        if let Some(notices) = state.try_update(|view| view.drain_notices()) {
            store_push_notices(&app_store, notices);
        }
    };

    let rows = Memo::new(move |_| {
        let term = search.get();
        let range = range.get();
        state.with(|view| {
            view.search(&term)
                .into_iter()
                .filter(|d| range.contains(d.date))
                .cloned()
                .collect::<Vec<Donation>>()
        })
    });
    let can_write = move || state.with(|view| view.show_write_controls());

    view! {
        <section class="page">
            <div class="page-header">
                <div>
                    <h1>{move || ctx.t("donations")}</h1>
                </div>
                <Show when=can_write>
                    <button class="primary-btn" on:click=move |_| state.update(|view| view.open_create())>
                        {move || ctx.t("add_donation")}
                    </button>
                </Show>
            </div>

            <div class="toolbar">
                <input
                    class="search-input"
                    type="search"
                    placeholder=move || ctx.t("search")
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <DateFilterBar on_change=move |(from, to): (Option<NaiveDate>, Option<NaiveDate>)| {
                    range.set(DateRange::new(from, to))
                } />
                <span class="total-chip">
                    {move || ctx.t("total")} ": " {move || rows.with(|rows| format_inr(total(rows)))}
                </span>
            </div>

            <div class="card-list">
                {move || rows.get().into_iter().map(|donation| {
                    let record = donation.clone();
                    let id = donation.id.clone();
                    let method = donation.payment_method.as_str();
                    view! {
                        <div class="card donation-card">
                            <div class="donation-main">
                                <div>
                                    <h3>{donation.donor_name.clone()}</h3>
                                    <p class="muted">{donation.purpose.clone()}</p>
                                </div>
                                <div class="donation-amount">
                                    <p class="amount positive">{format_inr(donation.amount)}</p>
                                    <p class="muted">{show_date(donation.date)}</p>
                                </div>
                            </div>
                            <div class="badges">
                                <span class=format!("badge {}", method)>{move || ctx.t(method)}</span>
                                {donation.flat_number.clone().map(|flat| view! {
                                    <span class="badge outline">{move || ctx.t("flat_number")} ": " {flat.clone()}</span>
                                })}
                            </div>
                            <div class="contact muted">
                                {donation.phone.clone().map(|phone| view! { <p>"📞 " {phone}</p> })}
                                {donation.email.clone().map(|email| view! { <p>"✉️ " {email}</p> })}
                            </div>
                            <Show when=can_write>
                                <div class="row-actions">
                                    <button class="outline-btn" on:click={
                                        let record = record.clone();
                                        move |_| state.update(|view| view.open_edit(&record))
                                    }>
                                        {move || ctx.t("edit")}
                                    </button>
                                    <DeleteConfirmButton
                                        button_class="delete-btn"
                                        prompt={delete_prompt::<Donation>()}
                                        on_confirm={
                                            let id = id.clone();
                                            move |_| {
                                                state.update(|view| {
                                                    view.remove(&id, &|_: &str| true);
                                                });
                                                flush();
                                            }
                                        }
                                    />
                                </div>
                            </Show>
                        </div>
                    }
                }).collect_view()}
            </div>
            <Show when=move || rows.with(Vec::is_empty)>
                <p class="empty">{move || ctx.t("no_records")}</p>
            </Show>

            <Show when=move || state.with(|view| view.form().is_open())>
                <DonationForm state=state on_done=move |_| flush() />
            </Show>
        </section>
    }
}

#[component]
fn DonationForm(
    state: RwSignal<DonationsView>,
    #[prop(into)] on_done: Callback<()>,
) -> impl IntoView {
    let draft = move || state.with(|view| view.form().draft().cloned().unwrap_or_default());
    let edit = move |field: DonationField| state.update(|view| view.edit_field(field));
    let title = Signal::derive(move || {
        if state.with(|view| view.form().is_editing()) { "edit" } else { "add_donation" }
    });
    let submit = move |_| {
        state.update(|view| {
            // Failures are queued as notices
            let _ = view.submit();
        });
        on_done.run(());
    };

    view! {
        <FormDialog title=title on_submit=submit on_cancel=move |_| state.update(|view| view.cancel())>
            <TextField
                label="donor_name"
                required=true
                value=Signal::derive(move || draft().donor_name)
                on_input=move |v: String| edit(DonationField::DonorName(v))
            />
            <TextField
                label="amount"
                input_type="number"
                required=true
                value=Signal::derive(move || draft().amount)
                on_input=move |v: String| edit(DonationField::Amount(v))
            />
            <TextField
                label="purpose"
                required=true
                value=Signal::derive(move || draft().purpose)
                on_input=move |v: String| edit(DonationField::Purpose(v))
            />
            <SelectField
                label="payment_method"
                required=true
                options=payment_options()
                value=Signal::derive(move || {
                    draft().payment_method.map(|m| m.as_str().to_string()).unwrap_or_default()
                })
                on_change=move |v: String| {
                    if let Some(method) = PaymentMethod::parse(&v) {
                        edit(DonationField::PaymentMethod(method));
                    }
                }
            />
            <DateField
                label="date"
                value=Signal::derive(move || draft().date)
                on_change={move |date: Option<NaiveDate>| {
                    if let Some(date) = date {
                        edit(DonationField::Date(date));
                    }
                }}
            />
            <TextField
                label="flat_number"
                value=Signal::derive(move || draft().flat_number)
                on_input=move |v: String| edit(DonationField::FlatNumber(v))
            />
            <TextField
                label="phone"
                input_type="tel"
                value=Signal::derive(move || draft().phone)
                on_input=move |v: String| edit(DonationField::Phone(v))
            />
            <TextField
                label="email"
                input_type="email"
                value=Signal::derive(move || draft().email)
                on_input=move |v: String| edit(DonationField::Email(v))
            />
            <TextField
                label="notes"
                value=Signal::derive(move || draft().notes)
                on_input=move |v: String| edit(DonationField::Notes(v))
            />
        </FormDialog>
    }
}
