//! Application configuration
//!
//! Native builds read `MANDIR_*` environment variables at startup; the
//! browser build bakes them in at compile time.

use std::path::PathBuf;

use crate::i18n::Language;

pub const ENV_SUPABASE_URL: &str = "MANDIR_SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "MANDIR_SUPABASE_ANON_KEY";
pub const ENV_LANGUAGE: &str = "MANDIR_LANGUAGE";
pub const ENV_SQLITE_PATH: &str = "MANDIR_SQLITE_PATH";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub default_language: Language,
    pub sqlite_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            default_language: Language::En,
            sqlite_path: PathBuf::from("mandir_admin.db"),
        }
    }
}

impl AppConfig {
    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            supabase_url: get(ENV_SUPABASE_URL).map(|url| url.trim_end_matches('/').to_string()),
            supabase_anon_key: get(ENV_SUPABASE_ANON_KEY),
            default_language: get(ENV_LANGUAGE)
                .and_then(|code| Language::parse(&code))
                .unwrap_or(defaults.default_language),
            sqlite_path: get(ENV_SQLITE_PATH).map(PathBuf::from).unwrap_or(defaults.sqlite_path),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Values captured when the crate was compiled
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            match key {
                ENV_SUPABASE_URL => option_env!("MANDIR_SUPABASE_URL"),
                ENV_SUPABASE_ANON_KEY => option_env!("MANDIR_SUPABASE_ANON_KEY"),
                ENV_LANGUAGE => option_env!("MANDIR_LANGUAGE"),
                ENV_SQLITE_PATH => option_env!("MANDIR_SQLITE_PATH"),
                _ => None,
            }
            .map(str::to_string)
        })
    }

    /// Both the hosted store URL and its key are present
    pub fn remote_configured(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }
}
