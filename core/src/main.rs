//! Native entry point
//!
//! Opens the store named by the `MANDIR_*` environment (SQLite unless a
//! hosted project is configured) and logs a summary of its contents.

use chrono::Utc;
use mandir_admin_lib::domain::DomainResult;
use mandir_admin_lib::views::{dashboard_stats, format_inr};
use mandir_admin_lib::{AppConfig, Backend};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = AppConfig::from_env();
    if let Err(e) = run(&config).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config: &AppConfig) -> DomainResult<()> {
    let backend = Backend::from_config(config).await?;
    let stats = dashboard_stats(backend.store.as_ref(), Utc::now().date_naive()).await?;
    info!(
        backend = ?backend.kind,
        donations = %format_inr(stats.total_donations),
        collections = %format_inr(stats.total_collections),
        expenses = %format_inr(stats.total_expenses),
        balance = %format_inr(stats.net_balance),
        flats = %format!("{}/{}", stats.active_flats, stats.total_flats),
        "store ready"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandir_admin_lib::BackendKind;

    #[tokio::test]
    async fn test_run_opens_local_store() {
        let config = AppConfig {
            sqlite_path: ":memory:".into(),
            ..AppConfig::default()
        };
        run(&config).await.unwrap();
        assert_eq!(Backend::from_config(&config).await.unwrap().kind, BackendKind::Sqlite);
    }
}
