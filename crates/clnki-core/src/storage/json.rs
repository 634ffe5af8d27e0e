//! JSON Storage Implementation
//!
//! Three documents in one data directory: `decks.json` (every deck and card),
//! `settings.json` (the parameter set) and `schedule.json` (today's remaining
//! due sets). Writes go through a temporary
//! file and a rename so a crash never leaves a half-written document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::deck::Collection;
use crate::fsrs::ParameterSet;
use crate::schedule::DailySchedule;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON document
    #[error("JSON error in {}: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
    /// Deck not found
    #[error("Deck not found: {0}")]
    DeckNotFound(String),
    /// Deck name already taken
    #[error("Deck already exists: {0}")]
    DeckExists(String),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

/// File name of the deck document
pub const DECKS_FILE: &str = "decks.json";

/// File name of the settings document
pub const SETTINGS_FILE: &str = "settings.json";

/// File name of the daily schedule snapshot
pub const SCHEDULE_FILE: &str = "schedule.json";

// ============================================================================
// STORAGE
// ============================================================================

/// Data directory holding the deck and settings documents
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    /// Open (and create if needed) a data directory; `None` picks the
    /// platform default
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("com", "clnki", "clnki").ok_or_else(|| {
                    StorageError::Init("Could not determine project directories".to_string())
                })?;
                proj_dirs.data_dir().to_path_buf()
            }
        };
        fs::create_dir_all(&data_dir)?;

        tracing::debug!(data_dir = %data_dir.display(), "Storage opened");
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn decks_path(&self) -> PathBuf {
        self.data_dir.join(DECKS_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.data_dir.join(SCHEDULE_FILE)
    }

    /// Load settings; defaults when the file does not exist yet
    pub fn load_settings(&self) -> Result<ParameterSet> {
        let path = self.settings_path();
        match read_json(&path)? {
            Some(params) => Ok(params),
            None => {
                tracing::info!("No settings file found, using defaults");
                Ok(ParameterSet::default())
            }
        }
    }

    pub fn save_settings(&self, params: &ParameterSet) -> Result<()> {
        write_json(&self.settings_path(), params)
    }

    /// Load every deck; empty when the file does not exist yet
    ///
    /// Due sets come back empty; run the daily scheduler afterwards.
    pub fn load_collection(&self) -> Result<Collection> {
        let collection: Collection = read_json(&self.decks_path())?.unwrap_or_default();
        tracing::debug!(decks = collection.len(), "Collection loaded");
        Ok(collection)
    }

    pub fn save_collection(&self, collection: &Collection) -> Result<()> {
        write_json(&self.decks_path(), collection)
    }

    /// Load the last schedule snapshot
    ///
    /// The snapshot can always be rebuilt, so an unreadable one is logged and
    /// treated as absent.
    pub fn load_schedule(&self) -> Result<Option<DailySchedule>> {
        match read_json(&self.schedule_path()) {
            Ok(schedule) => Ok(schedule),
            Err(StorageError::Json { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "Ignoring unreadable schedule");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn save_schedule(&self, schedule: &DailySchedule) -> Result<()> {
        write_json(&self.schedule_path(), schedule)
    }
}

/// `Ok(None)` when the file is missing or blank
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
