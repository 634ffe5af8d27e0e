//! Test Data Directory
//!
//! Provides isolated data directories for testing:
//! - Temporary directories that are automatically cleaned up
//! - Reopening the same directory to simulate a fresh process
//! - Raw access to the JSON documents for format assertions

use std::path::{Path, PathBuf};

use clnki_core::{resume_collection, Collection, DailySchedule, ParameterSet, Storage};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Manager for test data directories
///
/// Each test gets its own directory so runs never interfere.
/// The directory is deleted when the manager is dropped.
///
/// # Example
///
/// ```rust,ignore
/// let dir = TestDataDir::new_temp();
/// let (mut collection, params) = dir.open(today);
/// // ... review ...
/// dir.save(&collection, today, &params);
///
/// // Same documents, new Storage handle
/// let (reloaded, _) = dir.reopen().open(today);
/// ```
pub struct TestDataDir {
    /// The storage instance
    pub storage: Storage,
    /// Temporary directory (kept alive to prevent premature deletion)
    _temp_dir: Option<TempDir>,
    /// Path to the data directory
    path: PathBuf,
}

impl TestDataDir {
    /// Create a data directory inside a fresh temporary directory
    pub fn new_temp() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("clnki");
        let storage = Storage::new(Some(path.clone())).expect("Failed to create test storage");

        Self {
            storage,
            _temp_dir: Some(temp_dir),
            path,
        }
    }

    /// Open a new Storage handle on the same directory
    ///
    /// The returned manager does not own the directory; keep `self` alive.
    pub fn reopen(&self) -> Self {
        let storage =
            Storage::new(Some(self.path.clone())).expect("Failed to reopen test storage");
        Self {
            storage,
            _temp_dir: None,
            path: self.path.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, decks and the saved schedule, then resume `today` like the CLI does
    pub fn open(&self, today: NaiveDate) -> (Collection, ParameterSet) {
        let params = self.storage.load_settings().expect("Failed to load settings");
        let mut collection = self
            .storage
            .load_collection()
            .expect("Failed to load collection");
        let saved = self.storage.load_schedule().expect("Failed to load schedule");
        resume_collection(&mut collection, today, &params, saved.as_ref())
            .expect("Failed to schedule");
        (collection, params)
    }

    /// Persist the collection and today's remaining due sets
    pub fn save(&self, collection: &Collection, today: NaiveDate, params: &ParameterSet) {
        self.storage
            .save_collection(collection)
            .expect("Failed to save collection");
        self.storage
            .save_schedule(&DailySchedule::capture(collection, today, params))
            .expect("Failed to save schedule");
    }

    /// Parsed `decks.json`, for asserting on the stored format
    pub fn raw_decks(&self) -> serde_json::Value {
        let text = std::fs::read_to_string(self.storage.decks_path())
            .expect("Failed to read decks.json");
        serde_json::from_str(&text).expect("decks.json is not valid JSON")
    }

    /// Write `decks.json` by hand, as a user editing the file would
    pub fn write_raw_decks(&self, value: &serde_json::Value) {
        let text = serde_json::to_string_pretty(value).expect("Failed to encode decks");
        std::fs::write(self.storage.decks_path(), text).expect("Failed to write decks.json");
    }
}
