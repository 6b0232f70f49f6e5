//! # Note Indexing
//!
//! Notes are stored under UUIDs, which nobody wants to type. Every listing
//! numbers notes 1, 2, 3… by their position in that listing, and commands
//! that target a note accept either such a number or a fragment of the
//! note's text.
//!
//! Numbers are never stored. They are derived from a fresh sort each time, so
//! adding, deleting or editing notes can shift them. Commands that accept a
//! number resolve it against the default listing ([`NoteSort::Created`],
//! newest first), which is also how `search` results are numbered.

use crate::model::Note;
use crate::notebook::{NoteBook, NoteSort};
use std::fmt;
use std::str::FromStr;

/// The sort every note number refers to unless a listing says otherwise.
pub const CANONICAL_SORT: NoteSort = NoteSort::Created;

/// A user-facing, 1-based note position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteIndex(pub usize);

impl fmt::Display for NoteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A note paired with the number it is shown under.
#[derive(Debug, Clone)]
pub struct DisplayNote {
    pub note: Note,
    pub index: NoteIndex,
}

/// Numbers an arbitrary subset of notes (e.g. search hits) by their position
/// in the canonical listing, keeping the subset's order.
pub fn index_subset(notebook: &NoteBook, subset: Vec<&Note>) -> Vec<DisplayNote> {
    let canonical = notebook.get_all_notes(CANONICAL_SORT, None);
    subset
        .into_iter()
        .filter_map(|note| {
            canonical
                .iter()
                .position(|n| n.id() == note.id())
                .map(|i| DisplayNote {
                    note: note.clone(),
                    index: NoteIndex(i + 1),
                })
        })
        .collect()
}

/// How a command argument picks a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSelector {
    Index(NoteIndex),
    Text(String),
}

impl NoteSelector {
    /// Resolves the selector against the canonical listing.
    pub fn resolve<'a>(&self, notebook: &'a NoteBook) -> Option<&'a Note> {
        match self {
            NoteSelector::Index(NoteIndex(n)) => notebook.get_note_by_number(*n, CANONICAL_SORT),
            NoteSelector::Text(fragment) => notebook.find_note_by_text(fragment),
        }
    }
}

impl FromStr for NoteSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Note identifier cannot be empty".to_string());
        }
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = digits.parse() {
                return Ok(NoteSelector::Index(NoteIndex(n)));
            }
        }
        Ok(NoteSelector::Text(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn notebook() -> NoteBook {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut nb = NoteBook::new();
        for (i, text) in ["first", "second", "third"].iter().enumerate() {
            let note = Note::new_at(text, Vec::<String>::new(), base + Duration::hours(i as i64));
            nb.add_note(note.unwrap());
        }
        nb
    }

    #[test]
    fn other_sorts_keep_canonical_numbers() {
        let nb = notebook();
        let listed = index_subset(&nb, nb.get_all_notes(NoteSort::Text, None));
        let shown: Vec<_> = listed
            .iter()
            .map(|d| format!("{} {}", d.index, d.note.text()))
            .collect();
        assert_eq!(shown, ["#3 first", "#2 second", "#1 third"]);
    }

    #[test]
    fn subset_keeps_canonical_numbers() {
        let nb = notebook();
        let hits = nb.search_notes("ir");
        let indexed = index_subset(&nb, hits);
        let pairs: Vec<_> = indexed.iter().map(|d| (d.index.0, d.note.text())).collect();
        // Canonical order is newest first: third (1), second (2), first (3).
        assert_eq!(pairs, [(3, "first"), (1, "third")]);
    }

    #[test]
    fn parses_numbers_and_text() {
        assert_eq!("2".parse(), Ok(NoteSelector::Index(NoteIndex(2))));
        assert_eq!("#2".parse(), Ok(NoteSelector::Index(NoteIndex(2))));
        assert_eq!("2b".parse(), Ok(NoteSelector::Text("2b".into())));
        assert_eq!("milk".parse(), Ok(NoteSelector::Text("milk".into())));
        assert!(" ".parse::<NoteSelector>().is_err());
    }

    #[test]
    fn resolves_against_canonical_listing() {
        let nb = notebook();
        let pick = |s: &str| {
            s.parse::<NoteSelector>()
                .unwrap()
                .resolve(&nb)
                .map(|n| n.text().to_string())
        };
        assert_eq!(pick("1").as_deref(), Some("third"));
        assert_eq!(pick("SEC").as_deref(), Some("second"));
        assert_eq!(pick("0"), None);
        assert_eq!(pick("7"), None);
    }
}
