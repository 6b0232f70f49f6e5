use crate::book::AddressBook;
use crate::error::{AssistantError, Result};
use crate::index::{NoteSelector, CANONICAL_SORT};
use crate::model::{Name, Record};
use crate::notebook::NoteBook;
use uuid::Uuid;

/// Fails with `MissingArgs` unless at least `count` arguments were given.
pub fn require(
    args: &[String],
    count: usize,
    command: &'static str,
    requirement: &'static str,
) -> Result<()> {
    if args.len() < count || args.iter().take(count).any(|a| a.trim().is_empty()) {
        return Err(AssistantError::MissingArgs {
            command,
            requirement,
        });
    }
    Ok(())
}

/// Looks a contact up by the name as it would be stored, so stray spaces
/// around an argument still find it.
pub fn contact<'a>(book: &'a AddressBook, name: &str) -> Result<&'a Record> {
    let name = Name::new(name)?;
    book.find(name.as_str())
        .ok_or_else(|| AssistantError::ContactNotFound(name.to_string()))
}

pub fn contact_mut<'a>(book: &'a mut AddressBook, name: &str) -> Result<&'a mut Record> {
    let name = Name::new(name)?;
    book.find_mut(name.as_str())
        .ok_or_else(|| AssistantError::ContactNotFound(name.to_string()))
}

/// Resolves a note number or text fragment to the note's id and its number in
/// the canonical listing.
pub fn resolve_note(notebook: &NoteBook, raw: &str) -> Result<(Uuid, usize)> {
    let selector: NoteSelector = raw.parse().map_err(AssistantError::InvalidArgument)?;
    let note = selector
        .resolve(notebook)
        .ok_or_else(|| AssistantError::NoteNotFound(raw.trim().to_string()))?;
    let number = notebook.ordinal_of(&note.id(), CANONICAL_SORT).unwrap_or(0);
    Ok((note.id(), number))
}

/// Tags from the remaining arguments. Each argument may itself hold several
/// tags separated by commas. Blank tags are dropped, duplicates (ignoring
/// case) keep their first spelling.
pub fn parse_tags(args: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in args
        .iter()
        .flat_map(|a| a.split(|c: char| c == ',' || c.is_whitespace()))
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            tags.push(tag.to_string());
        }
    }
    tags
}

pub fn describe_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "no tags".to_string()
    } else {
        tags.join(", ")
    }
}

/// Splits an input line into tokens on whitespace. Double quotes group words
/// into one token; an unterminated quote runs to the end of the line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }
    tokens
}

/// Shortens `text` to `max` characters, marking the cut with an ellipsis.
pub fn preview(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() <= max && first_line.len() == text.len() {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}
