//! Flats Page

use chrono::NaiveDate;
use leptos::prelude::*;
use mandir_admin_lib::domain::{Flat, FlatField, FlatStatus};
use mandir_admin_lib::views::{delete_prompt, format_inr};

use super::{show_date, show_opt};
use crate::components::{DateField, DeleteConfirmButton, FormDialog, SelectField, TextField};
use crate::context::use_app_context;
use crate::crud::{use_crud, CrudHandle};

fn status_options() -> Vec<(&'static str, &'static str)> {
    FlatStatus::ALL.iter().map(|s| (s.as_str(), s.as_str())).collect()
}

#[component]
pub fn FlatsPage() -> impl IntoView {
    let ctx = use_app_context();
    let crud = use_crud::<Flat>();
    let state = crud.state;
    let can_write = move || state.with(|view| view.show_write_controls());
    let active_count = move || {
        state.with(|view| {
            let active = view.items().iter().filter(|f| f.is_active()).count();
            format!("{}/{}", active, view.items().len())
        })
    };

    view! {
        <section class="page">
            <div class="page-header">
                <h1>{move || ctx.t("flats")}</h1>
                <span class="badge">{move || ctx.t("active_flats")} ": " {active_count}</span>
                <Show when=can_write>
                    <button class="primary-btn" on:click=move |_| crud.open_create()>
                        {move || ctx.t("add_flat")}
                    </button>
                </Show>
            </div>

            <Show when=move || !state.with(|view| view.is_loading() && view.items().is_empty())
                fallback=move || view! { <p class="loading">{move || ctx.t("loading")}</p> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{move || ctx.t("flat_number_label")}</th>
                            <th>{move || ctx.t("owner_name")}</th>
                            <th>{move || ctx.t("phone")}</th>
                            <th>{move || ctx.t("membership_fee")}</th>
                            <th>{move || ctx.t("last_payment")}</th>
                            <th>{move || ctx.t("status")}</th>
                            <Show when=can_write><th>{move || ctx.t("actions")}</th></Show>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || state.with(|view| view.items().to_vec())
                            key=|flat| (flat.id.clone(), flat.updated_at)
                            children=move |flat: Flat| {
                                let record = flat.clone();
                                let id = flat.id.clone();
                                let status = flat.status.as_str();
                                view! {
                                    <tr>
                                        <td class="strong">{flat.number.clone()}</td>
                                        <td>{flat.owner_name.clone()}</td>
                                        <td>{show_opt(&flat.phone)}</td>
                                        <td>{flat.membership_fee.map(format_inr).unwrap_or_default()}</td>
                                        <td>{flat.last_payment_date.map(show_date).unwrap_or_default()}</td>
                                        <td>
                                            <span class=format!("badge {}", status)>{move || ctx.t(status)}</span>
                                        </td>
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
                                                    prompt={delete_prompt::<Flat>()}
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
                <FlatForm crud=crud />
            </Show>
        </section>
    }
}

#[component]
fn FlatForm(crud: CrudHandle<Flat>) -> impl IntoView {
    let draft = move || crud.state.with(|view| view.form().draft().cloned().unwrap_or_default());
    let title = Signal::derive(move || {
        if crud.state.with(|view| view.form().is_editing()) { "edit" } else { "add_flat" }
    });

    view! {
        <FormDialog title=title on_submit=move |_| crud.submit() on_cancel=move |_| crud.cancel()>
            <TextField
                label="flat_number_label"
                required=true
                value=Signal::derive(move || draft().number)
                on_input=move |v: String| crud.edit(FlatField::Number(v))
            />
            <TextField
                label="owner_name"
                required=true
                value=Signal::derive(move || draft().owner_name)
                on_input=move |v: String| crud.edit(FlatField::OwnerName(v))
            />
            <TextField
                label="phone"
                input_type="tel"
                value=Signal::derive(move || draft().phone)
                on_input=move |v: String| crud.edit(FlatField::Phone(v))
            />
            <TextField
                label="email"
                input_type="email"
                value=Signal::derive(move || draft().email)
                on_input=move |v: String| crud.edit(FlatField::Email(v))
            />
            <TextField
                label="membership_fee"
                input_type="number"
                value=Signal::derive(move || draft().membership_fee)
                on_input=move |v: String| crud.edit(FlatField::MembershipFee(v))
            />
            <DateField
                label="last_payment"
                value=Signal::derive(move || draft().last_payment_date)
                on_change={move |date: Option<NaiveDate>| crud.edit(FlatField::LastPaymentDate(date))}
            />
            <SelectField
                label="status"
                options=status_options()
                value=Signal::derive(move || draft().status.as_str().to_string())
                on_change=move |v: String| {
                    if let Some(status) = FlatStatus::parse(&v) {
                        crud.edit(FlatField::Status(status));
                    }
                }
            />
        </FormDialog>
    }
}
