use super::DataStore;
use crate::book::AddressBook;
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::notebook::NoteBook;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    contacts_file: String,
    notes_file: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        let defaults = AssistantConfig::default();
        Self {
            root,
            contacts_file: defaults.contacts_file,
            notes_file: defaults.notes_file,
        }
    }

    /// Uses the file names from `config`.
    pub fn with_config(mut self, config: &AssistantConfig) -> Self {
        self.contacts_file = config.contacts_file.clone();
        self.notes_file = config.notes_file.clone();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contacts_path(&self) -> PathBuf {
        self.root.join(&self.contacts_file)
    }

    pub fn notes_path(&self) -> PathBuf {
        self.root.join(&self.notes_file)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(AssistantError::Io)?;
        }
        Ok(())
    }
}

fn load_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        log::debug!("{} not found, starting empty", path.display());
        return Ok(T::default());
    }
    let content = fs::read_to_string(path).map_err(AssistantError::Io)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&content).map_err(|e| {
        AssistantError::Store(format!("cannot read {}: {}", path.display(), e))
    })
}

/// Writes next to the target and renames, so an interrupted save never leaves
/// a truncated file behind.
fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).map_err(AssistantError::Serialization)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).map_err(AssistantError::Io)?;
    fs::rename(&tmp, path).map_err(AssistantError::Io)?;
    Ok(())
}

impl DataStore for FileStore {
    fn load_contacts(&self) -> Result<AddressBook> {
        load_json(&self.contacts_path())
    }

    fn load_notes(&self) -> Result<NoteBook> {
        load_json(&self.notes_path())
    }

    fn save_contacts(&mut self, book: &AddressBook) -> Result<()> {
        self.ensure_dir()?;
        save_json(&self.contacts_path(), book)
    }

    fn save_notes(&mut self, notebook: &NoteBook) -> Result<()> {
        self.ensure_dir()?;
        save_json(&self.notes_path(), notebook)
    }
}
