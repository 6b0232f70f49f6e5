//! Note commands.
//!
//! Listings and search results show every note under its number in the
//! canonical listing (newest first), whatever order they are displayed in, so
//! the number a user reads is the number `edit-note` and `delete-note` accept.

use super::helpers::{describe_tags, parse_tags, preview, require, resolve_note};
use super::{names, CmdMessage, CmdResult, Confirm, NoteListing, Session};
use crate::error::{AssistantError, Result};
use crate::index::{index_subset, CANONICAL_SORT};
use crate::model::Note;
use crate::notebook::NoteSort;

const PREVIEW_LEN: usize = 50;

/// `add-note <text> [tags…]`
pub fn add(session: &mut Session, args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    require(args, 1, names::ADD_NOTE, "the note text")?;
    let note = Note::new(&args[0], parse_tags(&args[1..]))?;
    let id = note.id();
    let tags = describe_tags(note.tags());
    session.notebook.add_note(note);

    let number = session.notebook.ordinal_of(&id, CANONICAL_SORT).unwrap_or(1);
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Note #{} added ({}).",
        number, tags
    ))))
}

/// Accepts a sort key and a direction in any order: `text`, `sort=tags`,
/// `asc`/`a`, `desc`/`d`. Unknown keys fall back to the creation date.
pub fn list(session: &mut Session, args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    let mut sort = session.settings.note_sort;
    let mut reverse = None;

    for arg in args {
        let arg = arg.trim().to_lowercase();
        match arg.as_str() {
            "a" | "asc" => reverse = Some(false),
            "d" | "desc" => reverse = Some(true),
            other => {
                let key = other.strip_prefix("sort=").unwrap_or(other);
                sort = NoteSort::lenient(key);
                if sort.as_str() != key {
                    log::debug!("unknown sort key '{}', using {}", key, sort);
                }
            }
        }
    }

    let reverse = reverse.unwrap_or_else(|| sort.default_reverse());
    let notebook = &session.notebook;
    if notebook.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No notes yet.")));
    }

    let sorted = notebook.get_all_notes(sort, Some(reverse));
    let mut result = CmdResult::default().with_notes(index_subset(notebook, sorted));
    result.listing = Some(NoteListing { sort, reverse });
    Ok(result)
}

/// Matches note text and tags; multi-word queries are joined with spaces.
pub fn search(session: &mut Session, args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    require(args, 1, names::SEARCH_NOTES, "a search query")?;
    let query = args.join(" ");

    let notebook = &session.notebook;
    let found = index_subset(notebook, notebook.search_notes(&query));
    let message = if found.is_empty() {
        CmdMessage::info(format!("No notes match '{}'.", query))
    } else {
        CmdMessage::info(format!("Found {} note(s):", found.len()))
    };
    Ok(CmdResult::default().with_message(message).with_notes(found))
}

pub fn search_tags(
    session: &mut Session,
    args: &[String],
    _confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    require(args, 1, names::SEARCH_TAGS, "at least one tag")?;
    let tags = parse_tags(args);
    if tags.is_empty() {
        return Err(AssistantError::MissingArgs {
            command: names::SEARCH_TAGS,
            requirement: "at least one tag",
        });
    }

    let notebook = &session.notebook;
    let found = index_subset(notebook, notebook.search_by_tags(&tags));
    let message = if found.is_empty() {
        CmdMessage::info(format!("No notes tagged {}.", tags.join(", ")))
    } else {
        CmdMessage::info(format!("Notes tagged {}:", tags.join(", ")))
    };
    Ok(CmdResult::default().with_message(message).with_notes(found))
}

/// `edit-note <number|text> <new text> [tags…]` replaces both the text and
/// the whole tag list.
pub fn edit(session: &mut Session, args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    require(args, 2, names::EDIT_NOTE, "a note number or text, and the new text")?;
    let (id, _) = resolve_note(&session.notebook, &args[0])?;

    let note = session
        .notebook
        .get_mut(&id)
        .ok_or_else(|| AssistantError::NoteNotFound(args[0].clone()))?;
    note.set_text(&args[1])?;
    note.edit_tags(parse_tags(&args[2..]));
    let tags = describe_tags(note.tags());

    let number = session.notebook.ordinal_of(&id, CANONICAL_SORT).unwrap_or(0);
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Note #{} updated ({}).",
        number, tags
    ))))
}

/// The whole argument list is the selector, so a text fragment needs no
/// quotes.
pub fn delete(session: &mut Session, args: &[String], confirm: &mut dyn Confirm) -> Result<CmdResult> {
    require(args, 1, names::DELETE_NOTE, "a note number or text")?;
    let (id, number) = resolve_note(&session.notebook, &args.join(" "))?;
    let text = session
        .notebook
        .get(&id)
        .map(|n| preview(n.text(), PREVIEW_LEN))
        .unwrap_or_default();

    if !confirm.confirm(&format!("Delete note #{} \"{}\"?", number, text)) {
        return Ok(CmdResult::default().with_message(CmdMessage::info("Deletion cancelled.")));
    }
    session.notebook.delete_note(&id);
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Note deleted: {}",
        text
    ))))
}
