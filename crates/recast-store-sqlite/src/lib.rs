//! SQLite backend for the recast sentence store.
//!
//! A single [`rusqlite::Connection`] owned by [`SqliteStore`]; every call runs
//! to completion on the caller's thread.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
