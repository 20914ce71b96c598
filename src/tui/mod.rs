//! TUI module for sortviz.
//!
//! Reusable application state and key handling for the `sortviz-tui`
//! binary, kept here so it can be tested without a terminal. The binary
//! owns terminal I/O and the playback loop.

#[cfg(feature = "tui")]
pub mod app;

#[cfg(feature = "tui")]
pub use app::{AppAction, ChartColumn, SortApp};
