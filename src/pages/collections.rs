//! Collections Page

use chrono::NaiveDate;
use leptos::prelude::*;
use mandir_admin_lib::domain::{Collection, CollectionField};
use mandir_admin_lib::views::{delete_prompt, filter_by_date, format_inr, DateRange};
use rust_decimal::Decimal;

use super::{show_date, show_opt};
use crate::components::{DateField, DateFilterBar, DeleteConfirmButton, FormDialog, TextField};
use crate::context::use_app_context;
use crate::crud::{use_crud, CrudHandle};

#[component]
pub fn CollectionsPage() -> impl IntoView {
    let ctx = use_app_context();
    let crud = use_crud::<Collection>();
    let state = crud.state;
    let range = RwSignal::new(DateRange::default());

    let rows = Memo::new(move |_| {
        let range = range.get();
        state.with(|view| {
            filter_by_date(view.items(), &range)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    });
    let can_write = move || state.with(|view| view.show_write_controls());

    view! {
        <section class="page">
            <div class="page-header">
                <h1>{move || ctx.t("collections")}</h1>
                <Show when=can_write>
                    <button class="primary-btn" on:click=move |_| crud.open_create()>
                        {move || ctx.t("add_collection")}
                    </button>
                </Show>
            </div>

            <div class="toolbar">
                <DateFilterBar on_change=move |(from, to): (Option<NaiveDate>, Option<NaiveDate>)| {
                    range.set(DateRange::new(from, to))
                } />
                <span class="total-chip">
                    {move || ctx.t("total")} ": "
                    {move || format_inr(rows.with(|rows| rows.iter().map(|c| c.amount).sum::<Decimal>()))}
                </span>
            </div>

            <Show when=move || !state.with(|view| view.is_loading() && view.items().is_empty())
                fallback=move || view! { <p class="loading">{move || ctx.t("loading")}</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{move || ctx.t("date")}</th>
                            <th>{move || ctx.t("amount")}</th>
                            <th>{move || ctx.t("collected_by")}</th>
                            <th>{move || ctx.t("purpose")}</th>
                            <th>{move || ctx.t("notes")}</th>
                            <Show when=can_write><th>{move || ctx.t("actions")}</th></Show>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || rows.get()
                            key=|collection| (collection.id.clone(), collection.updated_at)
                            children=move |collection: Collection| {
                                let record = collection.clone();
                                let id = collection.id.clone();
                                view! {
                                    <tr>
                                        <td>{show_date(collection.date)}</td>
                                        <td class="amount positive">{format_inr(collection.amount)}</td>
                                        <td>{collection.collected_by.clone()}</td>
                                        <td>{collection.purpose.clone()}</td>
                                        <td>{show_opt(&collection.notes)}</td>
                                        <Show when=can_write>
                                            <td class="row-actions">
                                                <button class="outline-btn" on:click={
                                                    let record = record.clone();
                                                    move |_| crud.open_edit(&record)
                                                }>
                                                    {move || ctx.t("edit")}
                                                </button>
                                                <DeleteConfirmButton
                                                    button_class="delete-btn"
                                                    prompt={delete_prompt::<Collection>()}
                                                    on_confirm={
                                                        let id = id.clone();
                                                        move |_| crud.remove(id.clone(), true)
                                                    }
                                                />
                                            </td>
                                        </Show>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || rows.with(Vec::is_empty)>
                    <p class="empty">{move || ctx.t("no_records")}</p>
                </Show>
            </Show>

            <Show when=move || state.with(|view| view.form().is_open())>
                <CollectionForm crud=crud />
            </Show>
        </section>
    }
}

#[component]
fn CollectionForm(crud: CrudHandle<Collection>) -> impl IntoView {
    let draft = move || crud.state.with(|view| view.form().draft().cloned().unwrap_or_default());
    let title = Signal::derive(move || {
        if crud.state.with(|view| view.form().is_editing()) { "edit" } else { "add_collection" }
    });

    view! {
        <FormDialog title=title on_submit=move |_| crud.submit() on_cancel=move |_| crud.cancel()>
            <DateField
                label="date"
                value=Signal::derive(move || draft().date)
                on_change={move |date: Option<NaiveDate>| {
                    if let Some(date) = date {
                        crud.edit(CollectionField::Date(date));
                    }
                }}
            />
            <TextField
                label="amount"
                input_type="number"
                required=true
                value=Signal::derive(move || draft().amount)
                on_input=move |v: String| crud.edit(CollectionField::Amount(v))
            />
            <TextField
                label="collected_by"
                required=true
                value=Signal::derive(move || draft().collected_by)
                on_input=move |v: String| crud.edit(CollectionField::CollectedBy(v))
            />
            <TextField
                label="purpose"
                required=true
                value=Signal::derive(move || draft().purpose)
                on_input=move |v: String| crud.edit(CollectionField::Purpose(v))
            />
            <TextField
                label="notes"
                value=Signal::derive(move || draft().notes)
                on_input=move |v: String| crud.edit(CollectionField::Notes(v))
            />
        </FormDialog>
    }
}
