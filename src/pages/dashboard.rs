//! Dashboard Page
//!
//! Stat cards plus recent donations and expenses, from the static snapshot.

use leptos::prelude::*;
use mandir_admin_lib::views::{format_inr, Dashboard, StaticSnapshot};

use super::show_date;
use crate::components::StatsCard;
use crate::context::use_app_context;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let dashboard = Dashboard::from_snapshot(StaticSnapshot::sample());
    let period = dashboard.period_label();

    view! {
        <section class="page dashboard">
            <div class="page-header">
                <h1>{move || ctx.t("dashboard")}</h1>
                <span class="badge">{period}</span>
            </div>

            <div class="stats-grid">
                {dashboard
                    .stat_cards()
                    .into_iter()
                    .map(|card| view! { <StatsCard card=card /> })
                    .collect_view()}
            </div>

            <div class="recent-grid">
                <div class="card">
                    <h2>{move || ctx.t("recent_donations")}</h2>
                    <ul class="recent-list">
                        {dashboard
                            .recent_donations
                            .iter()
                            .map(|donation| {
                                view! {
                                    <li class="recent-item">
                                        <div>
                                            <p class="recent-name">{donation.donor_name.clone()}</p>
                                            <p class="recent-sub">{donation.purpose.clone()}</p>
                                        </div>
                                        <div class="recent-amount">
                                            <p class="amount positive">{format_inr(donation.amount)}</p>
                                            <p class="recent-sub">{show_date(donation.date)}</p>
                                        </div>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </div>
                <div class="card">
                    <h2>{move || ctx.t("recent_expenses")}</h2>
                    <ul class="recent-list">
                        {dashboard
                            .recent_expenses
                            .iter()
                            .map(|expense| {
                                view! {
                                    <li class="recent-item">
                                        <div>
                                            <p class="recent-name">{expense.description.clone()}</p>
                                            <p class="recent-sub">{expense.category.clone()}</p>
                                        </div>
                                        <div class="recent-amount">
                                            <p class="amount negative">"-" {format_inr(expense.amount)}</p>
                                            <p class="recent-sub">{show_date(expense.date)}</p>
                                        </div>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </div>
            </div>
        </section>
    }
}
