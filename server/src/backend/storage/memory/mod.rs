//! In-memory storage: each account owns its acts directly.

pub mod account_repository;
pub mod connection;

pub use account_repository::AccountRepository;
pub use connection::MemoryConnection;
