//! # Storage Layer
//!
//! The [`DataStore`] trait hides where the address book and the notebook are
//! kept between runs. Both containers are loaded whole at startup and saved
//! whole at shutdown; nothing is written in between.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one pretty-printed JSON file per
//!   container inside the data directory.
//! - [`memory::InMemoryStore`]: keeps serialized snapshots in memory, for
//!   tests of everything above the storage layer.
//!
//! ## Missing data
//!
//! A store that has never been written loads as empty containers. This is
//! the normal first-run path, not an error.
//!
//! ```text
//! <data dir>/
//! ├── contacts.json   # AddressBook, keyed by contact name
//! ├── notes.json      # NoteBook, keyed by note UUID
//! └── config.json     # AssistantConfig (optional)
//! ```

use crate::book::AddressBook;
use crate::error::Result;
use crate::notebook::NoteBook;

pub mod fs;
pub mod memory;

pub trait DataStore {
    /// Load the address book, or an empty one if none was saved yet.
    fn load_contacts(&self) -> Result<AddressBook>;

    /// Load the notebook, or an empty one if none was saved yet.
    fn load_notes(&self) -> Result<NoteBook>;

    fn save_contacts(&mut self, book: &AddressBook) -> Result<()>;

    fn save_notes(&mut self, notebook: &NoteBook) -> Result<()>;
}
