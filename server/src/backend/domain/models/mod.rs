pub mod account;
pub mod act;
pub mod calendar_date;
pub mod cents;
pub mod id;

pub use account::{Account, AccountLedger, Accounts};
pub use act::{Act, StatementEntry};
pub use calendar_date::CalendarDate;
pub use cents::Cents;
pub use id::{generate_id, IdSequence};
