//! # Notebook
//!
//! Notes keyed by their UUID. Users never see the UUID: they refer to a note
//! by its position in a sorted listing (see [`crate::index`]), and that
//! position is derived from a fresh sort on every call.

use crate::model::Note;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Sort keys for note listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteSort {
    #[default]
    Created,
    Updated,
    Text,
    Tags,
}

impl NoteSort {
    pub const ALL: [NoteSort; 4] = [
        NoteSort::Created,
        NoteSort::Updated,
        NoteSort::Text,
        NoteSort::Tags,
    ];

    /// Parses a sort name, treating anything unknown as [`NoteSort::Created`].
    pub fn lenient(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Newest first for timestamps, A to Z for text keys.
    pub fn default_reverse(self) -> bool {
        matches!(self, NoteSort::Created | NoteSort::Updated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteSort::Created => "created",
            NoteSort::Updated => "updated",
            NoteSort::Text => "text",
            NoteSort::Tags => "tags",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NoteSort::Created => "by creation date",
            NoteSort::Updated => "by update date",
            NoteSort::Text => "alphabetically",
            NoteSort::Tags => "by tags",
        }
    }
}

impl fmt::Display for NoteSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteSort::ALL
            .into_iter()
            .find(|sort| sort.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown sort key: {}", s))
    }
}

/// Serialized as a map from id to note. Loading rejects an entry whose key is
/// not the note's id, or a note updated before it was created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<Uuid, Note>", into = "HashMap<Uuid, Note>")]
pub struct NoteBook {
    notes: HashMap<Uuid, Note>,
}

impl TryFrom<HashMap<Uuid, Note>> for NoteBook {
    type Error = String;

    fn try_from(notes: HashMap<Uuid, Note>) -> Result<Self, Self::Error> {
        for (id, note) in &notes {
            if *id != note.id() {
                return Err(format!("note stored under {} has id {}", id, note.id()));
            }
            if note.updated_at() < note.created_at() {
                return Err(format!("note {} was updated before it was created", id));
            }
        }
        Ok(Self { notes })
    }
}

impl From<NoteBook> for HashMap<Uuid, Note> {
    fn from(notebook: NoteBook) -> Self {
        notebook.notes
    }
}

impl NoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Stores the note under its id. Returns `true` when the id was new and
    /// `false` when an existing note was replaced.
    pub fn add_note(&mut self, note: Note) -> bool {
        self.notes.insert(note.id(), note).is_none()
    }

    pub fn delete_note(&mut self, id: &Uuid) -> bool {
        self.notes.remove(id).is_some()
    }

    pub fn get(&self, id: &Uuid) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut Note> {
        self.notes.get_mut(id)
    }

    /// All notes sorted by `sort_by`. `reverse: None` picks the key's default
    /// direction. Untagged notes sort after tagged ones under
    /// [`NoteSort::Tags`] in either direction.
    pub fn get_all_notes(&self, sort_by: NoteSort, reverse: Option<bool>) -> Vec<&Note> {
        let reverse = reverse.unwrap_or_else(|| sort_by.default_reverse());
        let mut notes: Vec<&Note> = self.notes.values().collect();
        // Stable base order so equal keys do not depend on map iteration.
        notes.sort_by(|a, b| a.created_at().cmp(&b.created_at()).then(a.id().cmp(&b.id())));

        let directed = |ord: Ordering| if reverse { ord.reverse() } else { ord };

        match sort_by {
            NoteSort::Created => notes.sort_by(|a, b| directed(a.created_at().cmp(&b.created_at()))),
            NoteSort::Updated => notes.sort_by(|a, b| directed(a.updated_at().cmp(&b.updated_at()))),
            NoteSort::Text => {
                notes.sort_by_cached_key(|n| n.text().to_lowercase());
                if reverse {
                    notes.reverse();
                }
            }
            NoteSort::Tags => notes.sort_by(|a, b| {
                match (first_tag_key(a), first_tag_key(b)) {
                    (Some(x), Some(y)) => directed(x.cmp(&y)),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }),
        }

        notes
    }

    /// The note at 1-based `number` in the default-direction listing for
    /// `sort_by`.
    pub fn get_note_by_number(&self, number: usize, sort_by: NoteSort) -> Option<&Note> {
        if number == 0 {
            return None;
        }
        self.get_all_notes(sort_by, None).get(number - 1).copied()
    }

    pub fn get_note_id_by_number(&self, number: usize, sort_by: NoteSort) -> Option<Uuid> {
        self.get_note_by_number(number, sort_by).map(Note::id)
    }

    /// 1-based position of `id` in the default-direction listing for `sort_by`.
    pub fn ordinal_of(&self, id: &Uuid, sort_by: NoteSort) -> Option<usize> {
        self.get_all_notes(sort_by, None)
            .iter()
            .position(|n| n.id() == *id)
            .map(|i| i + 1)
    }

    /// First note, oldest first, whose text contains `fragment` ignoring case.
    pub fn find_note_by_text(&self, fragment: &str) -> Option<&Note> {
        let needle = fragment.to_lowercase();
        self.get_all_notes(NoteSort::Created, Some(false))
            .into_iter()
            .find(|n| n.text().to_lowercase().contains(&needle))
    }

    /// Notes whose text or any tag contains `query`, ignoring case.
    pub fn search_notes(&self, query: &str) -> Vec<&Note> {
        let needle = query.to_lowercase();
        self.get_all_notes(NoteSort::Created, Some(false))
            .into_iter()
            .filter(|n| {
                n.text().to_lowercase().contains(&needle)
                    || n.tags().iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Notes carrying every tag in `tags`, ignoring case. No tags, no notes.
    pub fn search_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<&Note> {
        if tags.is_empty() {
            return Vec::new();
        }
        let wanted: Vec<String> = tags.iter().map(|t| t.as_ref().to_lowercase()).collect();

        self.get_all_notes(NoteSort::Created, Some(false))
            .into_iter()
            .filter(|n| {
                let have: Vec<String> = n.tags().iter().map(|t| t.to_lowercase()).collect();
                wanted.iter().all(|w| have.contains(w))
            })
            .collect()
    }

    /// Distinct tags across all notes, compared ignoring case, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .notes
            .values()
            .flat_map(|n| n.tags().iter().map(|t| t.to_lowercase()))
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }
}

fn first_tag_key(note: &Note) -> Option<String> {
    note.tags().first().map(|t| t.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 5, 9, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn note_at(text: &str, tags: &[&str], minutes: i64) -> Note {
        Note::new_at(text, tags.iter().copied(), at(minutes)).unwrap()
    }

    /// Three notes created one minute apart: "beta" (oldest), "Alpha", "gamma".
    fn sample() -> NoteBook {
        let mut nb = NoteBook::new();
        nb.add_note(note_at("beta", &["work"], 0));
        nb.add_note(note_at("Alpha", &[], 1));
        nb.add_note(note_at("gamma", &["Home", "work"], 2));
        nb
    }

    fn texts(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|n| n.text().to_string()).collect()
    }

    #[test]
    fn add_note_reports_insert_or_replace() {
        let mut nb = NoteBook::new();
        let mut note = note_at("one", &[], 0);
        assert!(nb.add_note(note.clone()));
        note.set_text("one, edited").unwrap();
        assert!(!nb.add_note(note.clone()));
        assert_eq!(nb.len(), 1);
        assert_eq!(nb.get(&note.id()).unwrap().text(), "one, edited");
    }

    #[test]
    fn delete_note_reports_presence() {
        let mut nb = sample();
        let id = nb.get_note_id_by_number(1, NoteSort::Created).unwrap();
        assert!(nb.delete_note(&id));
        assert!(!nb.delete_note(&id));
        assert_eq!(nb.len(), 2);
    }

    #[test]
    fn created_defaults_to_newest_first() {
        let nb = sample();
        assert_eq!(texts(&nb.get_all_notes(NoteSort::Created, None)), ["gamma", "Alpha", "beta"]);
        assert_eq!(
            texts(&nb.get_all_notes(NoteSort::Created, Some(false))),
            ["beta", "Alpha", "gamma"]
        );
    }

    #[test]
    fn updated_follows_latest_edit() {
        let mut nb = sample();
        let id = nb.get_note_id_by_number(3, NoteSort::Created).unwrap();
        nb.get_mut(&id).unwrap().add_tag("fresh");
        assert_eq!(nb.get_all_notes(NoteSort::Updated, None)[0].text(), "beta");
    }

    #[test]
    fn text_sort_ignores_case_and_defaults_ascending() {
        let nb = sample();
        assert_eq!(texts(&nb.get_all_notes(NoteSort::Text, None)), ["Alpha", "beta", "gamma"]);
        assert_eq!(
            texts(&nb.get_all_notes(NoteSort::Text, Some(true))),
            ["gamma", "beta", "Alpha"]
        );
    }

    #[test]
    fn untagged_notes_sort_last_in_both_directions() {
        let nb = sample();
        assert_eq!(texts(&nb.get_all_notes(NoteSort::Tags, None)), ["gamma", "beta", "Alpha"]);
        assert_eq!(
            texts(&nb.get_all_notes(NoteSort::Tags, Some(true))),
            ["beta", "gamma", "Alpha"]
        );
    }

    #[test]
    fn unknown_sort_name_falls_back_to_created() {
        assert_eq!(NoteSort::lenient("bogus"), NoteSort::Created);
        assert_eq!(NoteSort::lenient("TEXT"), NoteSort::Text);
        assert!("bogus".parse::<NoteSort>().is_err());
    }

    #[test]
    fn number_lookup_is_one_based_and_bounded() {
        let nb = sample();
        assert_eq!(nb.get_note_by_number(1, NoteSort::Created).unwrap().text(), "gamma");
        assert_eq!(nb.get_note_by_number(3, NoteSort::Text).unwrap().text(), "gamma");
        assert!(nb.get_note_by_number(0, NoteSort::Created).is_none());
        assert!(nb.get_note_by_number(4, NoteSort::Created).is_none());
        assert!(nb.get_note_id_by_number(9, NoteSort::Created).is_none());
    }

    #[test]
    fn ordinals_move_when_notes_are_added() {
        let mut nb = sample();
        let beta = nb.find_note_by_text("beta").unwrap().id();
        assert_eq!(nb.ordinal_of(&beta, NoteSort::Created), Some(3));
        nb.add_note(note_at("delta", &[], 3));
        assert_eq!(nb.ordinal_of(&beta, NoteSort::Created), Some(4));
    }

    #[test]
    fn find_by_text_is_case_insensitive() {
        let nb = sample();
        assert_eq!(nb.find_note_by_text("ALP").unwrap().text(), "Alpha");
        assert!(nb.find_note_by_text("zeta").is_none());
    }

    #[test]
    fn search_matches_text_or_tags_once() {
        let mut nb = sample();
        nb.add_note(note_at("work plan", &["work"], 5));
        let found = nb.search_notes("WORK");
        assert_eq!(texts(&found), ["beta", "gamma", "work plan"]);
        assert_eq!(texts(&nb.search_notes("hom")), ["gamma"]);
    }

    #[test]
    fn tag_search_requires_every_tag() {
        let mut nb = NoteBook::new();
        nb.add_note(note_at("tagged", &["A", "B", "C"], 0));
        assert_eq!(nb.search_by_tags(&["a", "b"]).len(), 1);
        assert!(nb.search_by_tags(&["a", "d"]).is_empty());
        assert!(nb.search_by_tags::<&str>(&[]).is_empty());
    }

    #[test]
    fn all_tags_are_distinct_ignoring_case() {
        let mut nb = sample();
        nb.add_note(note_at("x", &["WORK", "misc"], 9));
        assert_eq!(nb.all_tags(), ["home", "misc", "work"]);
    }
}
