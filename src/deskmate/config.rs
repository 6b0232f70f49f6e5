use crate::book::DEFAULT_UPCOMING_DAYS;
use crate::error::{AssistantError, Result};
use crate::notebook::NoteSort;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for deskmate, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssistantConfig {
    /// File holding the address book, relative to the data directory
    #[serde(default = "default_contacts_file")]
    pub contacts_file: String,

    /// File holding the notebook, relative to the data directory
    #[serde(default = "default_notes_file")]
    pub notes_file: String,

    /// Window used by `birthdays` when no day count is given
    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: i64,

    /// Sort applied by `list-notes` when none is given
    #[serde(default)]
    pub note_sort: NoteSort,
}

fn default_contacts_file() -> String {
    "contacts.json".to_string()
}

fn default_notes_file() -> String {
    "notes.json".to_string()
}

fn default_upcoming_days() -> i64 {
    DEFAULT_UPCOMING_DAYS
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            contacts_file: default_contacts_file(),
            notes_file: default_notes_file(),
            upcoming_days: default_upcoming_days(),
            note_sort: NoteSort::default(),
        }
    }
}

impl AssistantConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AssistantError::Io)?;
        let config: AssistantConfig =
            serde_json::from_str(&content).map_err(AssistantError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(AssistantError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AssistantError::Serialization)?;
        fs::write(config_path, content).map_err(AssistantError::Io)?;
        Ok(())
    }
}
