//! # Command Layer
//!
//! Every user command is a row in [`COMMANDS`]: a name, optional aliases, a
//! usage line, a one-line summary, and the handler that runs it. Dispatch is a
//! table lookup, so adding a command means adding a row and a handler.
//!
//! Handlers take the [`Session`] (the two containers plus settings), the
//! command's arguments, and a [`Confirm`] used by destructive commands. They
//! return a [`CmdResult`] describing what happened; they never print.

use crate::book::{AddressBook, UpcomingBirthday, DEFAULT_UPCOMING_DAYS};
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::index::DisplayNote;
use crate::model::Record;
use crate::notebook::{NoteBook, NoteSort};
use crate::suggest::suggest;
use chrono::{Local, NaiveDate};

pub mod address;
pub mod birthdays;
pub mod contacts;
pub mod email;
pub mod general;
pub mod helpers;
pub mod notes;
pub mod stats;

pub use stats::Stats;

/// Command tokens, as typed by the user.
pub mod names {
    pub const HELLO: &str = "hello";
    pub const ADD_CONTACT: &str = "add";
    pub const CHANGE_PHONE: &str = "change";
    pub const SHOW_PHONES: &str = "phone";
    pub const ALL_CONTACTS: &str = "all";
    pub const SEARCH_CONTACTS: &str = "search";
    pub const DELETE_CONTACT: &str = "delete";
    pub const ADD_BIRTHDAY: &str = "add-birthday";
    pub const SHOW_BIRTHDAY: &str = "show-birthday";
    pub const DELETE_BIRTHDAY: &str = "delete-birthday";
    pub const UPCOMING_BIRTHDAYS: &str = "birthdays";
    pub const ADD_EMAIL: &str = "add-email";
    pub const SHOW_EMAIL: &str = "show-email";
    pub const DELETE_EMAIL: &str = "delete-email";
    pub const ADD_ADDRESS: &str = "add-address";
    pub const CHANGE_ADDRESS: &str = "change-address";
    pub const REMOVE_ADDRESS: &str = "remove-address";
    pub const ADD_NOTE: &str = "add-note";
    pub const LIST_NOTES: &str = "list-notes";
    pub const SEARCH_NOTES: &str = "search-notes";
    pub const SEARCH_TAGS: &str = "search-tags";
    pub const EDIT_NOTE: &str = "edit-note";
    pub const DELETE_NOTE: &str = "delete-note";
    pub const STATS: &str = "stats";
    pub const HELP: &str = "help";
    pub const EXIT: &str = "exit";
}

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Approves everything (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Refuses everything.
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&mut self, _prompt: &str) -> bool {
        false
    }
}

/// Settings handlers read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub upcoming_days: i64,
    pub note_sort: NoteSort,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            note_sort: NoteSort::default(),
        }
    }
}

impl From<&AssistantConfig> for Settings {
    fn from(config: &AssistantConfig) -> Self {
        Self {
            upcoming_days: config.upcoming_days,
            note_sort: config.note_sort,
        }
    }
}

/// The state every handler works on.
#[derive(Debug, Default)]
pub struct Session {
    pub book: AddressBook,
    pub notebook: NoteBook,
    pub settings: Settings,
    today: Option<NaiveDate>,
}

impl Session {
    pub fn new(book: AddressBook, notebook: NoteBook, settings: Settings) -> Self {
        Self {
            book,
            notebook,
            settings,
            today: None,
        }
    }

    /// Pins the reference date used by date-relative commands.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// How a note listing was ordered, for the listing header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteListing {
    pub sort: NoteSort,
    pub reverse: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub contacts: Vec<Record>,
    /// Search term to emphasize when rendering `contacts`.
    pub highlight: Option<String>,
    pub notes: Vec<DisplayNote>,
    pub listing: Option<NoteListing>,
    pub birthdays: Vec<UpcomingBirthday>,
    pub stats: Option<Stats>,
    pub commands: Vec<&'static CommandSpec>,
    pub exit: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_contacts(mut self, contacts: Vec<Record>) -> Self {
        self.contacts = contacts;
        self
    }

    pub fn with_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_birthdays(mut self, birthdays: Vec<UpcomingBirthday>) -> Self {
        self.birthdays = birthdays;
        self
    }
}

pub type Handler = fn(&mut Session, &[String], &mut dyn Confirm) -> Result<CmdResult>;

/// Command groups, in the order `help` shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Contacts,
    Birthdays,
    Email,
    Address,
    Notes,
    General,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Contacts => "Contacts:",
            CommandGroup::Birthdays => "Birthdays:",
            CommandGroup::Email => "Email:",
            CommandGroup::Address => "Address:",
            CommandGroup::Notes => "Notes:",
            CommandGroup::General => "General:",
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Contacts,
            CommandGroup::Birthdays,
            CommandGroup::Email,
            CommandGroup::Address,
            CommandGroup::Notes,
            CommandGroup::General,
        ]
    }
}

pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub group: CommandGroup,
    pub usage: &'static str,
    pub summary: &'static str,
    pub handler: Handler,
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec").field("name", &self.name).finish()
    }
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: names::ADD_CONTACT,
        aliases: &[],
        group: CommandGroup::Contacts,
        usage: "add <name> <phone>",
        summary: "Create a contact, or add a phone to an existing one",
        handler: contacts::add,
    },
    CommandSpec {
        name: names::CHANGE_PHONE,
        aliases: &[],
        group: CommandGroup::Contacts,
        usage: "change <name> <old phone> <new phone>",
        summary: "Replace one of a contact's phones",
        handler: contacts::change,
    },
    CommandSpec {
        name: names::SHOW_PHONES,
        aliases: &[],
        group: CommandGroup::Contacts,
        usage: "phone <name>",
        summary: "Show a contact's phones",
        handler: contacts::phones,
    },
    CommandSpec {
        name: names::ALL_CONTACTS,
        aliases: &[],
        group: CommandGroup::Contacts,
        usage: "all",
        summary: "List every contact",
        handler: contacts::all,
    },
    CommandSpec {
        name: names::SEARCH_CONTACTS,
        aliases: &[],
        group: CommandGroup::Contacts,
        usage: "search <query>",
        summary: "Find contacts by name, phone or email",
        handler: contacts::search,
    },
    CommandSpec {
        name: names::DELETE_CONTACT,
        aliases: &[],
        group: CommandGroup::Contacts,
        usage: "delete <name>",
        summary: "Delete a contact (asks first)",
        handler: contacts::delete,
    },
    CommandSpec {
        name: names::ADD_BIRTHDAY,
        aliases: &[],
        group: CommandGroup::Birthdays,
        usage: "add-birthday <name> <DD.MM.YYYY>",
        summary: "Set a contact's birthday",
        handler: birthdays::add,
    },
    CommandSpec {
        name: names::SHOW_BIRTHDAY,
        aliases: &[],
        group: CommandGroup::Birthdays,
        usage: "show-birthday <name>",
        summary: "Show a contact's birthday",
        handler: birthdays::show,
    },
    CommandSpec {
        name: names::DELETE_BIRTHDAY,
        aliases: &[],
        group: CommandGroup::Birthdays,
        usage: "delete-birthday <name>",
        summary: "Clear a contact's birthday",
        handler: birthdays::delete,
    },
    CommandSpec {
        name: names::UPCOMING_BIRTHDAYS,
        aliases: &[],
        group: CommandGroup::Birthdays,
        usage: "birthdays [days]",
        summary: "Birthdays to congratulate within the next days",
        handler: birthdays::upcoming,
    },
    CommandSpec {
        name: names::ADD_EMAIL,
        aliases: &[],
        group: CommandGroup::Email,
        usage: "add-email <name> <email>",
        summary: "Set or replace a contact's email",
        handler: email::add,
    },
    CommandSpec {
        name: names::SHOW_EMAIL,
        aliases: &[],
        group: CommandGroup::Email,
        usage: "show-email <name>",
        summary: "Show a contact's email",
        handler: email::show,
    },
    CommandSpec {
        name: names::DELETE_EMAIL,
        aliases: &[],
        group: CommandGroup::Email,
        usage: "delete-email <name>",
        summary: "Clear a contact's email",
        handler: email::delete,
    },
    CommandSpec {
        name: names::ADD_ADDRESS,
        aliases: &[],
        group: CommandGroup::Address,
        usage: "add-address <name> <address…>",
        summary: "Set a contact's address",
        handler: address::add,
    },
    CommandSpec {
        name: names::CHANGE_ADDRESS,
        aliases: &[],
        group: CommandGroup::Address,
        usage: "change-address <name> <address…>",
        summary: "Replace a contact's existing address",
        handler: address::change,
    },
    CommandSpec {
        name: names::REMOVE_ADDRESS,
        aliases: &[],
        group: CommandGroup::Address,
        usage: "remove-address <name>",
        summary: "Clear a contact's address",
        handler: address::remove,
    },
    CommandSpec {
        name: names::ADD_NOTE,
        aliases: &[],
        group: CommandGroup::Notes,
        usage: "add-note <text> [tags…]",
        summary: "Create a note, optionally tagged",
        handler: notes::add,
    },
    CommandSpec {
        name: names::LIST_NOTES,
        aliases: &["notes"],
        group: CommandGroup::Notes,
        usage: "list-notes [created|updated|text|tags] [asc|desc]",
        summary: "List notes in the chosen order",
        handler: notes::list,
    },
    CommandSpec {
        name: names::SEARCH_NOTES,
        aliases: &[],
        group: CommandGroup::Notes,
        usage: "search-notes <query>",
        summary: "Find notes by text or tag",
        handler: notes::search,
    },
    CommandSpec {
        name: names::SEARCH_TAGS,
        aliases: &[],
        group: CommandGroup::Notes,
        usage: "search-tags <tag> [tag…]",
        summary: "Find notes carrying all the given tags",
        handler: notes::search_tags,
    },
    CommandSpec {
        name: names::EDIT_NOTE,
        aliases: &[],
        group: CommandGroup::Notes,
        usage: "edit-note <number|text> <new text> [tags…]",
        summary: "Replace a note's text and tags",
        handler: notes::edit,
    },
    CommandSpec {
        name: names::DELETE_NOTE,
        aliases: &[],
        group: CommandGroup::Notes,
        usage: "delete-note <number|text>",
        summary: "Delete a note (asks first)",
        handler: notes::delete,
    },
    CommandSpec {
        name: names::STATS,
        aliases: &[],
        group: CommandGroup::General,
        usage: "stats",
        summary: "Counts of contacts, notes and upcoming birthdays",
        handler: stats::run,
    },
    CommandSpec {
        name: names::HELLO,
        aliases: &[],
        group: CommandGroup::General,
        usage: "hello",
        summary: "Say hello",
        handler: general::hello,
    },
    CommandSpec {
        name: names::HELP,
        aliases: &["?"],
        group: CommandGroup::General,
        usage: "help",
        summary: "Show this list",
        handler: general::help,
    },
    CommandSpec {
        name: names::EXIT,
        aliases: &["close"],
        group: CommandGroup::General,
        usage: "exit",
        summary: "Save and quit",
        handler: general::exit,
    },
];

/// Finds the command for `token`, ignoring case.
pub fn lookup(token: &str) -> Option<&'static CommandSpec> {
    let token = token.to_lowercase();
    COMMANDS
        .iter()
        .find(|spec| spec.name == token || spec.aliases.contains(&token.as_str()))
}

/// Every name and alias a user may type.
pub fn vocabulary() -> impl Iterator<Item = &'static str> {
    COMMANDS
        .iter()
        .flat_map(|spec| std::iter::once(spec.name).chain(spec.aliases.iter().copied()))
}

/// Runs the command named by `token`.
pub fn dispatch(
    session: &mut Session,
    token: &str,
    args: &[String],
    confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    let spec = lookup(token).ok_or_else(|| AssistantError::UnknownCommand {
        token: token.to_string(),
        suggestions: suggest(token, vocabulary()),
    })?;
    (spec.handler)(session, args, confirm)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{Session, Settings};
    use crate::book::AddressBook;
    use crate::notebook::NoteBook;
    use chrono::NaiveDate;

    pub fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// An empty session pinned to Wednesday 2024-06-05.
    pub fn session() -> Session {
        Session::new(AddressBook::new(), NoteBook::new(), Settings::default())
            .with_today(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut all: Vec<_> = vocabulary().collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn lookup_ignores_case_and_knows_aliases() {
        assert_eq!(lookup("ADD").unwrap().name, "add");
        assert_eq!(lookup("close").unwrap().name, "exit");
        assert_eq!(lookup("?").unwrap().name, "help");
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn unknown_token_carries_suggestions() {
        let mut session = Session::default();
        let err = dispatch(&mut session, "ad", &[], &mut AssumeNo).unwrap_err();
        match err {
            AssistantError::UnknownCommand { suggestions, .. } => {
                assert_eq!(suggestions.first().map(String::as_str), Some("add"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn every_group_has_commands() {
        for group in CommandGroup::all() {
            assert!(COMMANDS.iter().any(|c| c.group == *group), "{group:?}");
        }
    }
}
