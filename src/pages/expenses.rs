//! Expenses Page

use chrono::NaiveDate;
use leptos::prelude::*;
use mandir_admin_lib::domain::{Expense, ExpenseField};
use mandir_admin_lib::views::{delete_prompt, filter_by_date, format_inr, DateRange};
use rust_decimal::Decimal;

use super::{show_date, show_opt};
use crate::components::{DateField, DateFilterBar, DeleteConfirmButton, FormDialog, TextField};
use crate::context::use_app_context;
use crate::crud::{use_crud, CrudHandle};

#[component]
pub fn ExpensesPage() -> impl IntoView {
    let ctx = use_app_context();
    let crud = use_crud::<Expense>();
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
                <h1>{move || ctx.t("expenses")}</h1>
                <Show when=can_write>
                    <button class="primary-btn" on:click=move |_| crud.open_create()>
                        {move || ctx.t("add_expense")}
                    </button>
                </Show>
            </div>

            <div class="toolbar">
                <DateFilterBar on_change=move |(from, to): (Option<NaiveDate>, Option<NaiveDate>)| {
                    range.set(DateRange::new(from, to))
                } />
                <span class="total-chip">
                    {move || ctx.t("total")} ": "
                    {move || format_inr(rows.with(|rows| rows.iter().map(|e| e.amount).sum::<Decimal>()))}
                </span>
            </div>

            <Show when=move || !state.with(|view| view.is_loading() && view.items().is_empty())
                fallback=move || view! { <p class="loading">{move || ctx.t("loading")}</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{move || ctx.t("date")}</th>
                            <th>{move || ctx.t("description")}</th>
                            <th>{move || ctx.t("category")}</th>
                            <th>{move || ctx.t("amount")}</th>
                            <th>{move || ctx.t("approved_by")}</th>
                            <th>{move || ctx.t("vendor")}</th>
                            <Show when=can_write><th>{move || ctx.t("actions")}</th></Show>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || rows.get()
                            key=|expense| (expense.id.clone(), expense.updated_at)
                            children=move |expense: Expense| {
                                let record = expense.clone();
                                let id = expense.id.clone();
                                view! {
                                    <tr>
                                        <td>{show_date(expense.date)}</td>
                                        <td>
                                            {expense.description.clone()}
                                            {expense.receipt.clone().map(|r| view! { <span class="receipt">" #" {r}</span> })}
                                        </td>
                                        <td><span class="badge">{expense.category.clone()}</span></td>
                                        <td class="amount negative">"-" {format_inr(expense.amount)}</td>
                                        <td>{expense.approved_by.clone()}</td>
                                        <td>{show_opt(&expense.vendor)}</td>
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
                                                    prompt={delete_prompt::<Expense>()}
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
                <ExpenseForm crud=crud />
            </Show>
        </section>
    }
}

#[component]
fn ExpenseForm(crud: CrudHandle<Expense>) -> impl IntoView {
    let draft = move || crud.state.with(|view| view.form().draft().cloned().unwrap_or_default());
    let title = Signal::derive(move || {
        if crud.state.with(|view| view.form().is_editing()) { "edit" } else { "add_expense" }
    });

    view! {
        <FormDialog title=title on_submit=move |_| crud.submit() on_cancel=move |_| crud.cancel()>
            <TextField
                label="description"
                required=true
                value=Signal::derive(move || draft().description)
                on_input=move |v: String| crud.edit(ExpenseField::Description(v))
            />
            <TextField
                label="amount"
                input_type="number"
                required=true
                value=Signal::derive(move || draft().amount)
                on_input=move |v: String| crud.edit(ExpenseField::Amount(v))
            />
            <TextField
                label="category"
                required=true
                value=Signal::derive(move || draft().category)
                on_input=move |v: String| crud.edit(ExpenseField::Category(v))
            />
            <DateField
                label="date"
                value=Signal::derive(move || draft().date)
                on_change={move |date: Option<NaiveDate>| {
                    if let Some(date) = date {
                        crud.edit(ExpenseField::Date(date));
                    }
                }}
            />
            <TextField
                label="approved_by"
                required=true
                value=Signal::derive(move || draft().approved_by)
                on_input=move |v: String| crud.edit(ExpenseField::ApprovedBy(v))
            />
            <TextField
                label="vendor"
                value=Signal::derive(move || draft().vendor)
                on_input=move |v: String| crud.edit(ExpenseField::Vendor(v))
            />
            <TextField
                label="receipt"
                value=Signal::derive(move || draft().receipt)
                on_input=move |v: String| crud.edit(ExpenseField::Receipt(v))
            />
        </FormDialog>
    }
}
