//! Client-side search
//!
//! - Filter: case-insensitive title matching with an explicit empty signal
//! - Debounce: cancellable timer and the last-query-wins search driver

pub mod debounce;
pub mod filter;

pub use debounce::{DebounceTimer, DebouncedSearch, SearchOutcome, DEFAULT_QUIET_PERIOD};
pub use filter::{filter_titles, Filtered};
