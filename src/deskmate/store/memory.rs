use super::DataStore;
use crate::book::AddressBook;
use crate::error::{AssistantError, Result};
use crate::notebook::NoteBook;

/// Keeps serialized snapshots in memory, so tests exercise the same serde
/// path as the file store without touching the disk.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    contacts: Option<String>,
    notes: Option<String>,
    fail_saves: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose saves always fail, for exercising shutdown paths.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn has_contacts(&self) -> bool {
        self.contacts.is_some()
    }

    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_saves {
            return Err(AssistantError::Store("store is read-only".to_string()));
        }
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn load_contacts(&self) -> Result<AddressBook> {
        match &self.contacts {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(AddressBook::new()),
        }
    }

    fn load_notes(&self) -> Result<NoteBook> {
        match &self.notes {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(NoteBook::new()),
        }
    }

    fn save_contacts(&mut self, book: &AddressBook) -> Result<()> {
        self.check_writable()?;
        self.contacts = Some(serde_json::to_string(book)?);
        Ok(())
    }

    fn save_notes(&mut self, notebook: &NoteBook) -> Result<()> {
        self.check_writable()?;
        self.notes = Some(serde_json::to_string(notebook)?);
        Ok(())
    }
}
