//! Store and auth wiring
//!
//! Picks the hosted service when it is configured, otherwise a local store
//! with the local sign-in.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{DomainResult, Profile, Record};
use crate::repository::{MemoryStore, RemoteStore};
use crate::seed;
use crate::session::{load_profile, AuthBackend, LocalAuth, LOCAL_USER_ID};

/// Which backend a [`Backend`] talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Hosted,
    Sqlite,
    Memory,
}

#[derive(Clone)]
pub struct Backend {
    pub kind: BackendKind,
    pub store: Arc<dyn RemoteStore>,
    pub auth: Arc<dyn AuthBackend>,
}

impl Backend {
    /// PostgREST tables plus GoTrue sign-in on the same project
    #[cfg(feature = "rest")]
    pub fn hosted(base_url: &str, anon_key: &str) -> Self {
        let client = Arc::new(crate::repository::PostgrestStore::new(base_url, anon_key));
        Self {
            kind: BackendKind::Hosted,
            store: client.clone(),
            auth: client,
        }
    }

    /// In-memory store holding the sample dataset
    pub fn in_memory() -> Self {
        Self {
            kind: BackendKind::Memory,
            store: Arc::new(MemoryStore::with_rows(seed::rows())),
            auth: Arc::new(LocalAuth),
        }
    }

    #[cfg(feature = "sqlite")]
    pub async fn sqlite(path: &std::path::Path) -> DomainResult<Self> {
        let store = crate::repository::init_db(path).await?;
        ensure_local_profile(&store).await?;
        Ok(Self {
            kind: BackendKind::Sqlite,
            store: Arc::new(store),
            auth: Arc::new(LocalAuth),
        })
    }

    /// Hosted when configured, otherwise the in-memory sample store
    pub fn hosted_or_memory(config: &AppConfig) -> Self {
        #[cfg(feature = "rest")]
        {
            if let (Some(url), Some(key)) = (&config.supabase_url, &config.supabase_anon_key) {
                info!(%url, "using hosted store");
                return Self::hosted(url, key);
            }
        }
        #[cfg(not(feature = "rest"))]
        let _ = config;
        info!("using in-memory sample store");
        Self::in_memory()
    }

    /// Hosted when configured, else SQLite when compiled in, else in-memory
    pub async fn from_config(config: &AppConfig) -> DomainResult<Self> {
        #[cfg(feature = "sqlite")]
        {
            if !(cfg!(feature = "rest") && config.remote_configured()) {
                info!(path = %config.sqlite_path.display(), "using local SQLite store");
                return Self::sqlite(&config.sqlite_path).await;
            }
        }
        Ok(Self::hosted_or_memory(config))
    }
}

/// Create the admin profile for the local sign-in if it is missing
pub async fn ensure_local_profile(store: &dyn RemoteStore) -> DomainResult<()> {
    if load_profile(store, LOCAL_USER_ID).await?.is_some() {
        return Ok(());
    }
    let row = json!({ "user_id": LOCAL_USER_ID, "username": "admin", "role": "admin" });
    if let Value::Object(fields) = row {
        store.insert(Profile::TABLE, fields).await?;
        info!("created local admin profile");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::establish;

    #[tokio::test]
    async fn test_local_profile_created_once() {
        let store = MemoryStore::new();
        ensure_local_profile(&store).await.unwrap();
        ensure_local_profile(&store).await.unwrap();

        let rows = store.select_eq(Profile::TABLE, "user_id", LOCAL_USER_ID).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["role"], "admin");
    }

    #[test]
    fn test_unconfigured_falls_back_to_memory() {
        let backend = Backend::hosted_or_memory(&AppConfig::default());
        assert_eq!(backend.kind, BackendKind::Memory);
    }

    #[tokio::test]
    async fn test_in_memory_backend_signs_in_as_admin() {
        let backend = Backend::in_memory();
        assert_eq!(backend.kind, BackendKind::Memory);
        let session = establish(backend.auth.as_ref(), backend.store.as_ref(), "a@b.c", "pw")
            .await
            .unwrap();
        assert!(session.is_admin());
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_from_config_without_remote_uses_sqlite() {
        let config = AppConfig {
            sqlite_path: ":memory:".into(),
            ..AppConfig::default()
        };
        let backend = Backend::from_config(&config).await.unwrap();
        assert_eq!(backend.kind, BackendKind::Sqlite);
        assert!(load_profile(backend.store.as_ref(), LOCAL_USER_ID).await.unwrap().is_some());
    }

    #[cfg(feature = "rest")]
    #[tokio::test]
    async fn test_from_config_prefers_hosted() {
        let config = AppConfig {
            supabase_url: Some("https://abc.supabase.co".into()),
            supabase_anon_key: Some("anon".into()),
            ..AppConfig::default()
        };
        let backend = Backend::from_config(&config).await.unwrap();
        assert_eq!(backend.kind, BackendKind::Hosted);
    }
}
