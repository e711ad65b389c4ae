// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod model;
pub mod notes;
pub mod session;
pub mod storage;
pub mod vault;

#[cfg(feature = "tui")]
pub mod tui;
