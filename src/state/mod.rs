//! Application state and pure transitions.
//!
//! The pure core of the explorer: the per-node expansion/fetch state machine
//! ([`TreeState`]), the expansion decision logic ([`expansion`]), and the
//! root application state ([`AppState`]). Every transition here is a pure
//! function from (state, args) to new state; all I/O lives in the shell.

pub mod app_state;
pub mod expansion;
pub mod tree_state;

#[cfg(test)]
mod app_state_tests;
#[cfg(test)]
mod tree_state_tests;

pub use app_state::{AppState, RootLoad};
pub use expansion::{commit_outcome, handle_retry, handle_toggle, FetchOutcome, FetchRequest};
pub use tree_state::TreeState;
