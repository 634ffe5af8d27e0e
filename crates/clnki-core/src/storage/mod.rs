//! Storage Module
//!
//! JSON documents in a per-user data directory:
//! - `decks.json`: every deck, keyed by name, cards keyed by id
//! - `settings.json`: the FSRS parameter set and daily limits
//! - `schedule.json`: remaining due sets for the day they were drawn

mod json;

pub use json::{Result, Storage, StorageError, DECKS_FILE, SCHEDULE_FILE, SETTINGS_FILE};
