//! Mandir Admin Core
//!
//! Layered architecture:
//! - domain: Records, drafts and validation
//! - repository: Remote store abstraction and its backends
//! - session: Signed-in user and role
//! - views: Per-screen state machines driven by the frontend
//! - backend: Picks a store and auth provider from the config

pub mod backend;
pub mod config;
pub mod domain;
pub mod i18n;
pub mod repository;
pub mod seed;
pub mod session;
pub mod views;

pub use backend::{Backend, BackendKind};
pub use config::AppConfig;
pub use domain::{DomainError, DomainResult};
pub use i18n::{translate, Language};
pub use session::Session;
