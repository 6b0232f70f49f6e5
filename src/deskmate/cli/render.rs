//! Terminal output for a [`CmdResult`].
//!
//! Column widths are measured with `unicode-width` on the plain text and
//! colour is applied afterwards, so escape codes never skew the layout.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use deskmate::book::UpcomingBirthday;
use deskmate::commands::{
    CmdMessage, CmdResult, CommandGroup, CommandSpec, MessageLevel, NoteListing, Stats,
};
use deskmate::index::DisplayNote;
use deskmate::model::{Phone, Record};
use deskmate::notebook::NoteSort;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 20;
const PHONES_WIDTH: usize = 30;
const BIRTHDAY_WIDTH: usize = 10;
const EMAIL_WIDTH: usize = 26;
const ADDRESS_WIDTH: usize = 30;
const NOTE_WIDTH: usize = 48;
const TAGS_WIDTH: usize = 24;
const TIME_WIDTH: usize = 16;
const USAGE_WIDTH: usize = 50;
const EMPTY: &str = "-";

pub(super) fn render_result(result: &CmdResult) {
    print_messages(&result.messages);
    if !result.contacts.is_empty() {
        print_contacts(&result.contacts, result.highlight.as_deref());
    }
    if !result.notes.is_empty() {
        print_notes(&result.notes, result.listing);
    }
    if !result.birthdays.is_empty() {
        print_birthdays(&result.birthdays);
    }
    if let Some(stats) = &result.stats {
        print_stats(stats);
    }
    if !result.commands.is_empty() {
        print_help(&result.commands);
    }
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_contacts(records: &[Record], highlight: Option<&str>) {
    let header = [
        cell("Name", NAME_WIDTH),
        cell("Phones", PHONES_WIDTH),
        cell("Birthday", BIRTHDAY_WIDTH),
        cell("Email", EMAIL_WIDTH),
        cell("Address", ADDRESS_WIDTH),
    ];
    println!("{}", header.join("  ").bold());

    let needle = highlight.map(str::to_lowercase);
    for record in records {
        let phones: Vec<String> = record.phones().iter().map(Phone::formatted).collect();
        let birthday = record.birthday().map(ToString::to_string);
        let address = record.address().map(|a| a.as_str().replace('\n', ", "));

        let columns = [
            (record.name().as_str().to_string(), NAME_WIDTH),
            (or_empty(if phones.is_empty() { None } else { Some(phones.join("; ")) }), PHONES_WIDTH),
            (or_empty(birthday), BIRTHDAY_WIDTH),
            (or_empty(record.email().map(|e| e.as_str().to_string())), EMAIL_WIDTH),
            (or_empty(address), ADDRESS_WIDTH),
        ];
        let line: Vec<String> = columns
            .iter()
            .map(|(text, width)| {
                let padded = cell(text, *width);
                match &needle {
                    Some(n) if matches_search(text, n) => padded.yellow().bold().to_string(),
                    _ => padded,
                }
            })
            .collect();
        println!("{}", line.join("  "));
    }
}

/// Digits in a formatted phone are compared without the punctuation.
fn matches_search(text: &str, needle: &str) -> bool {
    let lower = text.to_lowercase();
    if lower.contains(needle) {
        return true;
    }
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    !digits.is_empty() && needle.chars().all(|c| c.is_ascii_digit()) && digits.contains(needle)
}

fn print_notes(notes: &[DisplayNote], listing: Option<NoteListing>) {
    if let Some(listing) = listing {
        println!(
            "{}",
            format!(
                "Notes {}, {}:",
                listing.sort.label(),
                direction_label(listing.sort, listing.reverse)
            )
            .bold()
        );
    }

    for dn in notes {
        let index = format!("{}", dn.index);
        let text = dn.note.text().replace('\n', " ");
        let tags = if dn.note.tags().is_empty() {
            EMPTY.to_string()
        } else {
            dn.note.tags().join(", ")
        };
        println!(
            "{} {}  {}  {}",
            cell(&index, 5).yellow(),
            cell(&text, NOTE_WIDTH),
            cell(&tags, TAGS_WIDTH).cyan(),
            format_time_ago(dn.note.updated_at()).dimmed()
        );
    }
}

fn direction_label(sort: NoteSort, reverse: bool) -> &'static str {
    match (sort, reverse) {
        (NoteSort::Created | NoteSort::Updated, true) => "newest first",
        (NoteSort::Created | NoteSort::Updated, false) => "oldest first",
        (_, false) => "A to Z",
        (_, true) => "Z to A",
    }
}

fn print_birthdays(birthdays: &[UpcomingBirthday]) {
    for b in birthdays {
        let when = match b.days_until {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {} days", n),
        };
        println!(
            "{}  {}  congratulate on {} ({})",
            cell(&b.name, NAME_WIDTH).bold(),
            b.birthday,
            b.congratulation_date.format("%a %d.%m.%Y"),
            when
        );
    }
}

fn print_stats(stats: &Stats) {
    let rows = [
        ("Contacts", stats.contacts),
        ("Phones", stats.phones),
        ("With birthday", stats.with_birthday),
        ("With email", stats.with_email),
        ("With address", stats.with_address),
        ("Notes", stats.notes),
        ("Tags", stats.tags),
        ("Upcoming birthdays", stats.upcoming_birthdays),
    ];
    for (label, value) in rows {
        println!("{} {}", cell(label, 20).dimmed(), value);
    }
}

fn print_help(commands: &[&'static CommandSpec]) {
    for group in CommandGroup::all() {
        let in_group: Vec<_> = commands.iter().filter(|c| c.group == *group).collect();
        if in_group.is_empty() {
            continue;
        }
        println!("{}", group.heading().bold());
        for spec in in_group {
            let mut summary = spec.summary.to_string();
            if !spec.aliases.is_empty() {
                summary.push_str(&format!(" (also: {})", spec.aliases.join(", ")));
            }
            println!("  {} {}", styled_usage(spec.usage), summary.dimmed());
        }
        println!();
    }
}

fn styled_usage(usage: &str) -> ColoredString {
    cell(usage, USAGE_WIDTH).cyan()
}

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_else(|| EMPTY.to_string())
}

/// Pads or truncates `s` to exactly `width` display columns.
fn cell(s: &str, width: usize) -> String {
    let shown = truncate_to_width(s, width);
    let padding = width.saturating_sub(shown.width());
    format!("{}{}", shown, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let text = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", text, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_have_fixed_width() {
        assert_eq!(cell("abc", 5), "abc  ");
        assert_eq!(cell("abcdefgh", 5), "abcd…");
        assert_eq!(cell("日本語", 4).width(), 4);
    }

    #[test]
    fn search_highlight_ignores_phone_punctuation() {
        assert!(matches_search("(067)123-4567", "1234"));
        assert!(matches_search("John Smith", "smith"));
        assert!(!matches_search("John", "jane"));
    }

    #[test]
    fn direction_wording() {
        assert_eq!(direction_label(NoteSort::Created, true), "newest first");
        assert_eq!(direction_label(NoteSort::Text, false), "A to Z");
        assert_eq!(direction_label(NoteSort::Tags, true), "Z to A");
    }
}
