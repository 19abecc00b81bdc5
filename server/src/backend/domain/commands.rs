//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The service facade validates the string-typed
//! parameters from the `shared` crate and builds these typed values.

use super::models::{CalendarDate, Cents};
use shared::DEFAULT_COUNT;

/// `index`/`count` window applied after filtering and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub index: usize,
    pub count: usize,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            index: 0,
            count: DEFAULT_COUNT,
        }
    }
}

pub mod accounts {
    use super::Window;

    /// Filters for listing accounts; `None` fields match anything.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct AccountSearchQuery {
        pub id: Option<String>,
        pub holder_id: Option<String>,
        pub window: Window,
    }
}

pub mod acts {
    use super::{CalendarDate, Cents, Window};

    /// Input for posting a new act to an account.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PostActCommand {
        pub account_id: String,
        pub amount: Cents,
        pub date: CalendarDate,
        pub memo: String,
    }

    /// Filters for querying an account's acts. All present filters must match.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct ActQuery {
        pub act_id: Option<String>,
        pub date: Option<CalendarDate>,
        pub memo_text: Option<String>,
        pub window: Window,
    }

    /// Inclusive date range for a statement; `None` is unbounded on that side.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct StatementRange {
        pub from_date: Option<CalendarDate>,
        pub to_date: Option<CalendarDate>,
    }
}
