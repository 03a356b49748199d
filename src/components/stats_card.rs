//! Dashboard stat card

use leptos::prelude::*;
use mandir_admin_lib::views::StatCard;

use crate::context::use_app_context;

#[component]
pub fn StatsCard(card: StatCard) -> impl IntoView {
    let ctx = use_app_context();
    let title = card.title_key;
    let value = card.value.display();

    view! {
        <div class="stats-card">
            <p class="stats-title">{move || ctx.t(title)}</p>
            <p class="stats-value">{value}</p>
            {card.trend.map(|trend| {
                let (class, arrow) = if trend.positive {
                    ("stats-trend up", "↑")
                } else {
                    ("stats-trend down", "↓")
                };
                view! { <p class=class>{format!("{} {}%", arrow, trend.percent)}</p> }
            })}
        </div>
    }
}
