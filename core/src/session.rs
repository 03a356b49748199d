//! Auth / Session Context
//!
//! The signed-in user and their profile, handed to each view when it is
//! built. Views read `is_admin` once; they never look the session up.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{decode_row, DomainError, DomainResult, Profile, Record};
use crate::repository::RemoteStore;

/// Authenticated identity as reported by the auth backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Sign-in provider
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AuthBackend: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<User>;
    async fn sign_out(&self) -> DomainResult<()>;
}

/// User id the local backend signs everyone in as
pub const LOCAL_USER_ID: &str = "local-admin";

/// Sign-in for builds without a hosted auth service. Any non-blank
/// credentials sign in as [`LOCAL_USER_ID`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAuth;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AuthBackend for LocalAuth {
    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::InvalidInput("email and password are required".into()));
        }
        Ok(User {
            id: LOCAL_USER_ID.to_string(),
            email: Some(email.trim().to_string()),
        })
    }

    async fn sign_out(&self) -> DomainResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
    profile: Option<Profile>,
}

impl Session {
    pub fn new(user: User, profile: Option<Profile>) -> Self {
        Self {
            user: Some(user),
            profile,
        }
    }

    /// No one signed in
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// True only with a loaded profile whose role is admin
    pub fn is_admin(&self) -> bool {
        self.profile.as_ref().is_some_and(Profile::is_admin)
    }

    /// Clear the session. A backend failure is logged; the local session is
    /// cleared either way.
    pub async fn sign_out(&mut self, auth: &dyn AuthBackend) {
        if let Err(e) = auth.sign_out().await {
            warn!(error = %e, "sign out failed at the auth backend");
        }
        self.user = None;
        self.profile = None;
    }
}

/// Profile row belonging to `user_id`, if any
pub async fn load_profile(store: &dyn RemoteStore, user_id: &str) -> DomainResult<Option<Profile>> {
    let rows = store.select_eq(Profile::TABLE, "user_id", user_id).await?;
    rows.into_iter().next().map(decode_row::<Profile>).transpose()
}

/// Sign in and load the user's profile
pub async fn establish(
    auth: &dyn AuthBackend,
    store: &dyn RemoteStore,
    email: &str,
    password: &str,
) -> DomainResult<Session> {
    let user = auth.sign_in(email, password).await?;
    let profile = load_profile(store, &user.id).await?;
    info!(
        user = %user.id,
        admin = profile.as_ref().is_some_and(Profile::is_admin),
        "session established"
    );
    Ok(Session::new(user, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Row, Table};
    use crate::repository::MemoryStore;
    use crate::seed;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FakeAuth {
        fail_sign_out: bool,
        signed_out: AtomicBool,
    }

    impl FakeAuth {
        fn new(fail_sign_out: bool) -> Self {
            Self {
                fail_sign_out,
                signed_out: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl AuthBackend for FakeAuth {
        async fn sign_in(&self, email: &str, password: &str) -> DomainResult<User> {
            if password != "secret" {
                return Err(DomainError::Remote("Invalid login credentials".into()));
            }
            Ok(User {
                id: "u-1".into(),
                email: Some(email.to_string()),
            })
        }

        async fn sign_out(&self) -> DomainResult<()> {
            self.signed_out.store(true, Ordering::SeqCst);
            if self.fail_sign_out {
                return Err(DomainError::Remote("network down".into()));
            }
            Ok(())
        }
    }

    fn profile_row(user_id: &str, role: &str) -> (Table, Row) {
        let row = json!({
            "id": "p-1", "user_id": user_id, "username": "secretary",
            "role": role, "full_name": null
        });
        (Table::Profiles, row.as_object().unwrap().clone())
    }

    #[tokio::test]
    async fn test_establish_loads_admin_profile() {
        let store = MemoryStore::with_rows([profile_row("u-1", "admin")]);
        let auth = FakeAuth::new(false);

        let session = establish(&auth, &store, "sec@mandir.org", "secret").await.unwrap();
        assert!(session.is_signed_in());
        assert!(session.is_admin());
        assert_eq!(session.profile().unwrap().username, "secretary");
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_admin() {
        let store = MemoryStore::new();
        let auth = FakeAuth::new(false);

        let session = establish(&auth, &store, "someone@mandir.org", "secret").await.unwrap();
        assert!(session.is_signed_in());
        assert!(session.profile().is_none());
        assert!(!session.is_admin());
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let store = MemoryStore::new();
        let auth = FakeAuth::new(false);
        let err = establish(&auth, &store, "x@y.z", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_sign_out_clears_even_when_backend_fails() {
        let store = MemoryStore::with_rows([profile_row("u-1", "user")]);
        let auth = FakeAuth::new(true);
        let mut session = establish(&auth, &store, "a@b.c", "secret").await.unwrap();
        assert!(!session.is_admin());

        session.sign_out(&auth).await;
        assert!(auth.signed_out.load(Ordering::SeqCst));
        assert_eq!(session, Session::anonymous());
    }

    #[tokio::test]
    async fn test_local_auth_with_seeded_profile() {
        let store = MemoryStore::with_rows(seed::rows());
        let session = establish(&LocalAuth, &store, "admin@mandir.org", "any").await.unwrap();
        assert_eq!(session.user().unwrap().id, LOCAL_USER_ID);
        assert!(session.is_admin());

        let err = establish(&LocalAuth, &store, "  ", "any").await.unwrap_err();
        assert!(err.is_validation());
    }
}
