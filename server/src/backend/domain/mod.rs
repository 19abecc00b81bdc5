//! # Domain Module
//!
//! Business logic of the account ledger, independent of transport and storage.
//!
//! ## Module Organization
//!
//! - **models**: typed values (`Cents`, `CalendarDate`) and entities (`Account`, `Act`)
//! - **validation**: string parameter parsing into typed values
//! - **commands**: typed queries and commands handed to storage
//! - **ledger**: filtering, chronological ordering, windowing and running balances
//! - **errors**: the `BAD_REQ` / `NOT_FOUND` / `DB` / `INTERNAL` taxonomy
//! - **accounts_service**: the facade every caller goes through
//!
//! ## Business Rules
//!
//! - Amounts are integer cents; conversion to currency units happens only for display
//! - An account's balance always equals the sum of its acts
//! - Reads order acts by date, keeping posting order among equal dates

pub mod accounts_service;
pub mod commands;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod validation;

pub use accounts_service::AccountsService;
pub use errors::{LedgerError, LedgerResult};
