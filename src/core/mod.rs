//! Core library components.
//!
//! Name mapping, store backends, settings and the copy itself. Nothing in
//! here prints to the terminal.

pub mod config;
pub mod constants;
pub mod domain;
pub mod mapping;
pub mod migrate;
pub mod store;
