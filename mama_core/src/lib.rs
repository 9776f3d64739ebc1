#![forbid(unsafe_code)]

//! Core domain model and command handling for the mama health journal.
//!
//! This crate provides:
//! - Entry types (meals, workouts, goals, milk, weight, measurements, notes)
//! - The in-memory journal with its filtered "shown" view
//! - Line-oriented persistence with atomic rewrites
//! - Text command parsing and execution

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod datetime;
pub mod entry;
pub mod entry_list;
pub mod storage;
pub mod command;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use entry::Entry;
pub use entry_list::{EntryList, Filter};
pub use storage::Storage;
pub use command::{Command, CommandResult, Context, Execute};
