use super::{CmdResult, Confirm, Session};
use crate::error::Result;

/// Totals across both books.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub contacts: usize,
    pub phones: usize,
    pub with_birthday: usize,
    pub with_email: usize,
    pub with_address: usize,
    pub notes: usize,
    pub tags: usize,
    /// Birthdays within the configured window.
    pub upcoming_birthdays: usize,
}

pub fn collect(session: &Session) -> Stats {
    let book = &session.book;
    let mut stats = Stats {
        contacts: book.len(),
        notes: session.notebook.len(),
        tags: session.notebook.all_tags().len(),
        upcoming_birthdays: book
            .upcoming_birthdays(session.settings.upcoming_days, session.today())
            .len(),
        ..Stats::default()
    };
    for record in book.records() {
        stats.phones += record.phones().len();
        stats.with_birthday += usize::from(record.birthday().is_some());
        stats.with_email += usize::from(record.email().is_some());
        stats.with_address += usize::from(record.address().is_some());
    }
    stats
}

pub fn run(session: &mut Session, _args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    Ok(CmdResult {
        stats: Some(collect(session)),
        ..CmdResult::default()
    })
}
