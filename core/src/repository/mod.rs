//! Repository Layer
//!
//! Remote store abstraction and its backends.

mod traits;
mod schema;
mod memory_store;
#[cfg(feature = "sqlite")]
mod db;
#[cfg(feature = "sqlite")]
mod sqlite_store;
#[cfg(feature = "rest")]
mod rest_store;


pub use traits::{list_records, RemoteStore};
pub use memory_store::MemoryStore;
#[cfg(feature = "sqlite")]
pub use db::init_db;
#[cfg(feature = "sqlite")]
pub use sqlite_store::SqliteStore;
#[cfg(feature = "rest")]
pub use rest_store::PostgrestStore;
