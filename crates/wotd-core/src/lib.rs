//! Core domain + application logic for the word-of-the-day bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind a
//! port (trait) implemented in the adapter crate.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod profile;
pub mod router;
pub mod selector;
pub mod stats;

pub use errors::{Error, Result};
