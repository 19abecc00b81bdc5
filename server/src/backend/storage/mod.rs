//! # Storage Layer
//!
//! Two interchangeable backends sit behind the [`traits::Connection`] and
//! [`traits::AccountStorage`] traits: a process-local in-memory model and a
//! SQLite DAO. Both feed their raw rows through `domain::ledger`.

pub mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryConnection;
pub use sqlite::DbConnection;
pub use traits::{AccountStorage, Connection};
