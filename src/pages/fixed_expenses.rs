//! Fixed Expenses Page

use chrono::NaiveDate;
use leptos::prelude::*;
use mandir_admin_lib::domain::{FixedExpense, FixedExpenseField, Frequency};
use mandir_admin_lib::views::{delete_prompt, format_inr};

use super::show_date;
use crate::components::{
    CheckboxField, DateField, DeleteConfirmButton, FormDialog, SelectField, TextField,
};
use crate::context::use_app_context;
use crate::crud::{use_crud, CrudHandle};

fn frequency_options() -> Vec<(&'static str, &'static str)> {
    Frequency::ALL.iter().map(|f| (f.as_str(), f.as_str())).collect()
}

#[component]
pub fn FixedExpensesPage() -> impl IntoView {
    let ctx = use_app_context();
    let crud = use_crud::<FixedExpense>();
    let state = crud.state;
    let can_write = move || state.with(|view| view.show_write_controls());

    view! {
        <section class="page">
            <div class="page-header">
                <h1>{move || ctx.t("fixed_expenses")}</h1>
                <Show when=can_write>
                    <button class="primary-btn" on:click=move |_| crud.open_create()>
                        {move || ctx.t("add_fixed_expense")}
                    </button>
                </Show>
            </div>

            <Show when=move || !state.with(|view| view.is_loading() && view.items().is_empty())
                fallback=move || view! { <p class="loading">{move || ctx.t("loading")}</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{move || ctx.t("title")}</th>
                            <th>{move || ctx.t("amount")}</th>
                            <th>{move || ctx.t("frequency")}</th>
                            <th>{move || ctx.t("category")}</th>
                            <th>{move || ctx.t("start_date")}</th>
                            <th>{move || ctx.t("end_date")}</th>
                            <th>{move || ctx.t("status")}</th>
                            <Show when=can_write><th>{move || ctx.t("actions")}</th></Show>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || state.with(|view| view.items().to_vec())
                            key=|expense| (expense.id.clone(), expense.updated_at)
                            children=move |expense: FixedExpense| {
                                let record = expense.clone();
                                let id = expense.id.clone();
                                let frequency = expense.frequency.as_str();
                                let (status_class, status_key) = if expense.is_active {
                                    ("badge active", "active")
                                } else {
                                    ("badge inactive", "inactive")
                                };
                                view! {
                                    <tr>
                                        <td>{expense.title.clone()}</td>
                                        <td class="amount">{format_inr(expense.amount)}</td>
                                        <td>{move || ctx.t(frequency)}</td>
                                        <td>{expense.category.clone()}</td>
                                        <td>{show_date(expense.start_date)}</td>
                                        <td>{expense.end_date.map(show_date).unwrap_or_default()}</td>
                                        <td><span class=status_class>{move || ctx.t(status_key)}</span></td>
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
                                                    prompt={delete_prompt::<FixedExpense>()}
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
            </Show>

            <Show when=move || state.with(|view| view.form().is_open())>
                <FixedExpenseForm crud=crud />
            </Show>
        </section>
    }
}

#[component]
fn FixedExpenseForm(crud: CrudHandle<FixedExpense>) -> impl IntoView {
    let draft = move || crud.state.with(|view| view.form().draft().cloned().unwrap_or_default());
    let title = Signal::derive(move || {
        if crud.state.with(|view| view.form().is_editing()) { "edit" } else { "add_fixed_expense" }
    });

    view! {
        <FormDialog title=title on_submit=move |_| crud.submit() on_cancel=move |_| crud.cancel()>
            <TextField
                label="title"
                required=true
                value=Signal::derive(move || draft().title)
                on_input=move |v: String| crud.edit(FixedExpenseField::Title(v))
            />
            <TextField
                label="amount"
                input_type="number"
                required=true
                value=Signal::derive(move || draft().amount)
                on_input=move |v: String| crud.edit(FixedExpenseField::Amount(v))
            />
            <SelectField
                label="frequency"
                required=true
                options=frequency_options()
                value=Signal::derive(move || {
                    draft().frequency.map(|f| f.as_str().to_string()).unwrap_or_default()
                })
                on_change=move |v: String| {
                    if let Some(frequency) = Frequency::parse(&v) {
                        crud.edit(FixedExpenseField::Frequency(frequency));
                    }
                }
            />
            <TextField
                label="category"
                required=true
                value=Signal::derive(move || draft().category)
                on_input=move |v: String| crud.edit(FixedExpenseField::Category(v))
            />
            <DateField
                label="start_date"
                required=true
                value=Signal::derive(move || draft().start_date)
                on_change={move |date: Option<NaiveDate>| {
                    if let Some(date) = date {
                        crud.edit(FixedExpenseField::StartDate(date));
                    }
                }}
            />
            <DateField
                label="end_date"
                value=Signal::derive(move || draft().end_date)
                on_change={move |date: Option<NaiveDate>| crud.edit(FixedExpenseField::EndDate(date))}
            />
            <CheckboxField
                label="is_active"
                value=Signal::derive(move || draft().is_active)
                on_change=move |checked: bool| crud.edit(FixedExpenseField::IsActive(checked))
            />
        </FormDialog>
    }
}
