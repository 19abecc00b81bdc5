//! SQLite storage: the persistent document DAO.
//!
//! Three tables play the role of the document collections: `accounts`,
//! `transactions` and a single-row-per-collection `counter` used to mint IDs.

pub mod account_repository;
pub mod connection;
pub mod documents;

pub use account_repository::AccountRepository;
pub use connection::DbConnection;
