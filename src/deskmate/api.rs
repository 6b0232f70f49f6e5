//! # API Facade
//!
//! [`AssistantApi`] is the one entry point a front end talks to. It owns the
//! storage backend and the [`Session`], turns a line of input into a command
//! call, and saves both books when asked.
//!
//! It never prints. Errors from a command come back as an error message inside
//! the [`CmdResult`], so a front end can show them and keep going.
//!
//! Generic over [`DataStore`]: `AssistantApi<FileStore>` in the binary,
//! `AssistantApi<InMemoryStore>` in tests.

use crate::commands::helpers::tokenize;
use crate::commands::{self, CmdMessage, CmdResult, Confirm, Session, Settings};
use crate::error::Result;
use crate::store::DataStore;

pub struct AssistantApi<S: DataStore> {
    store: S,
    session: Session,
}

impl<S: DataStore> AssistantApi<S> {
    /// Loads both books from `store`. A file that exists but cannot be read
    /// is an error; missing files start empty.
    pub fn open(store: S, settings: Settings) -> Result<Self> {
        let book = store.load_contacts()?;
        let notebook = store.load_notes()?;
        log::debug!(
            "loaded {} contact(s) and {} note(s)",
            book.len(),
            notebook.len()
        );
        Ok(Self {
            store,
            session: Session::new(book, notebook, settings),
        })
    }

    /// Tokenizes and runs one line of input. Blank lines do nothing.
    pub fn execute_line(&mut self, line: &str, confirm: &mut dyn Confirm) -> CmdResult {
        let tokens = tokenize(line);
        match tokens.split_first() {
            Some((command, args)) => self.execute(command, args, confirm),
            None => CmdResult::default(),
        }
    }

    /// Runs one command. Failures become a single error message.
    pub fn execute(&mut self, command: &str, args: &[String], confirm: &mut dyn Confirm) -> CmdResult {
        log::debug!("running '{}' with {} argument(s)", command, args.len());
        match commands::dispatch(&mut self.session, command, args, confirm) {
            Ok(result) => result,
            Err(e) => {
                log::debug!("'{}' failed: {}", command, e);
                CmdResult::default().with_message(CmdMessage::error(e.to_string()))
            }
        }
    }

    /// Writes both books. Both are attempted even if the first fails; the
    /// first error is returned.
    pub fn save(&mut self) -> Result<()> {
        let contacts = self.store.save_contacts(&self.session.book);
        let notes = self.store.save_notes(&self.session.notebook);
        if contacts.is_ok() && notes.is_ok() {
            log::debug!("saved contacts and notes");
        }
        contacts.and(notes)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{AssumeNo, AssumeYes, MessageLevel};
    use crate::store::memory::InMemoryStore;

    fn api() -> AssistantApi<InMemoryStore> {
        AssistantApi::open(InMemoryStore::new(), Settings::default()).unwrap()
    }

    #[test]
    fn quoted_names_reach_the_command() {
        let mut api = api();
        let r = api.execute_line(r#"add "John Smith" 0671234567"#, &mut AssumeNo);
        assert_eq!(r.messages[0].level, MessageLevel::Success);
        assert!(api.session().book.find("John Smith").is_some());
    }

    #[test]
    fn blank_line_is_a_noop() {
        let mut api = api();
        let r = api.execute_line("   ", &mut AssumeNo);
        assert!(r.messages.is_empty());
        assert!(!r.exit);
    }

    #[test]
    fn errors_become_messages() {
        let mut api = api();
        let r = api.execute_line("phone Ghost", &mut AssumeNo);
        assert_eq!(r.messages.len(), 1);
        assert_eq!(r.messages[0].level, MessageLevel::Error);
        assert_eq!(r.messages[0].content, "Contact 'Ghost' not found.");

        let r = api.execute_line("ad John", &mut AssumeNo);
        assert!(r.messages[0].content.contains("Did you mean: add"));
    }

    #[test]
    fn command_names_ignore_case() {
        let mut api = api();
        let r = api.execute_line("HELLO", &mut AssumeNo);
        assert_eq!(r.messages[0].content, "How can I help you?");
    }

    #[test]
    fn save_and_reopen() {
        let mut api = api();
        api.execute_line("add John 0671234567", &mut AssumeNo);
        api.execute_line("add-note \"call John\" work", &mut AssumeNo);
        api.save().unwrap();

        let AssistantApi { store, .. } = api;
        let reopened = AssistantApi::open(store, Settings::default()).unwrap();
        assert_eq!(reopened.session().book.len(), 1);
        assert_eq!(reopened.session().notebook.len(), 1);
    }

    #[test]
    fn delete_uses_the_given_confirmation() {
        let mut api = api();
        api.execute_line("add John 0671234567", &mut AssumeNo);
        api.execute_line("delete John", &mut AssumeNo);
        assert_eq!(api.session().book.len(), 1);
        api.execute_line("delete John", &mut AssumeYes);
        assert!(api.session().book.is_empty());
    }

    #[test]
    fn failed_save_is_reported() {
        let mut api = AssistantApi::open(InMemoryStore::failing(), Settings::default()).unwrap();
        api.execute_line("add John 0671234567", &mut AssumeNo);
        assert!(api.save().is_err());
    }
}
