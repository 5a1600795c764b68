//! lazytree
//!
//! TUI explorer for lazily loaded hierarchical trees.
//!
//! Renders an arbitrarily deep fake file/folder hierarchy whose branch
//! children are fetched asynchronously and only on first expansion, with
//! per-node loading and error states that never block sibling nodes.
//! Built as a pure core (state transitions in [`state`]) and an impure
//! shell (terminal loop and fetch workers in [`view`] and [`source`]).

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
