//! # Address Book
//!
//! A keyed collection of [`Record`]s. Keys are contact names, compared
//! exactly (case-sensitive). Adding a record under an existing name replaces
//! it.
//!
//! Searching is case-insensitive and treats the query as a regular
//! expression; a query that is not a valid pattern is matched literally.
//!
//! ## Upcoming birthdays
//!
//! [`AddressBook::upcoming_birthdays`] projects every birthday onto the
//! reference year. An occurrence still ahead (or today) that lands on a
//! weekend is moved to the following Monday, the day the contact gets
//! congratulated. An occurrence already passed this year moves to next year
//! as-is, without the weekend shift.

use crate::error::{AssistantError, Result};
use crate::model::{Birthday, Record};
use chrono::{Datelike, NaiveDate, Weekday};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

/// Serialized as a map from name to record. Loading rejects an entry whose
/// key is not its record's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Record>", into = "BTreeMap<String, Record>")]
pub struct AddressBook {
    records: BTreeMap<String, Record>,
}

impl TryFrom<BTreeMap<String, Record>> for AddressBook {
    type Error = String;

    fn try_from(records: BTreeMap<String, Record>) -> std::result::Result<Self, Self::Error> {
        if let Some((key, record)) = records.iter().find(|(k, r)| k.as_str() != r.name().as_str()) {
            return Err(format!(
                "contact stored under '{}' is named '{}'",
                key,
                record.name()
            ));
        }
        Ok(Self { records })
    }
}

impl From<AddressBook> for BTreeMap<String, Record> {
    fn from(book: AddressBook) -> Self {
        book.records
    }
}

/// One entry of the upcoming-birthdays window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    pub name: String,
    /// The stored birthday, including the birth year.
    pub birthday: Birthday,
    /// When to congratulate: this year's or next year's occurrence, moved
    /// off the weekend when applicable.
    pub congratulation_date: NaiveDate,
    pub days_until: i64,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in name order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn add_record(&mut self, record: Record) {
        self.records
            .insert(record.name().as_str().to_string(), record);
    }

    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    pub fn delete(&mut self, name: &str) -> Result<Record> {
        self.records
            .remove(name)
            .ok_or_else(|| AssistantError::ContactNotFound(name.to_string()))
    }

    pub fn search_by_name(&self, query: &str) -> Vec<&Record> {
        let pattern = search_pattern(query);
        self.records()
            .filter(|r| pattern.is_match(r.name().as_str()))
            .collect()
    }

    pub fn search_by_phone(&self, query: &str) -> Vec<&Record> {
        let pattern = search_pattern(query);
        self.records()
            .filter(|r| r.phones().iter().any(|p| pattern.is_match(p.as_str())))
            .collect()
    }

    pub fn search_by_email(&self, query: &str) -> Vec<&Record> {
        let pattern = search_pattern(query);
        self.records()
            .filter(|r| r.email().is_some_and(|e| pattern.is_match(e.as_str())))
            .collect()
    }

    /// Address search is not offered; always returns nothing.
    pub fn search_by_address(&self, _query: &str) -> Vec<&Record> {
        Vec::new()
    }

    /// Union of the name, phone and email searches, each record once, in
    /// name order.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let pattern = search_pattern(query);
        self.records()
            .filter(|r| {
                pattern.is_match(r.name().as_str())
                    || r.phones().iter().any(|p| pattern.is_match(p.as_str()))
                    || r.email().is_some_and(|e| pattern.is_match(e.as_str()))
            })
            .collect()
    }

    /// Birthdays whose congratulation date falls within `days_ahead` days of
    /// `today`, both ends inclusive. The result is unordered.
    pub fn upcoming_birthdays(&self, days_ahead: i64, today: NaiveDate) -> Vec<UpcomingBirthday> {
        let mut result = Vec::new();

        for record in self.records() {
            let Some(birthday) = record.birthday() else {
                continue;
            };

            let mut candidate = occurrence_in(birthday.date(), today.year());
            if candidate < today {
                candidate = occurrence_in(birthday.date(), today.year() + 1);
            } else {
                candidate = roll_to_weekday(candidate);
            }

            let days_until = (candidate - today).num_days();
            if (0..=days_ahead).contains(&days_until) {
                result.push(UpcomingBirthday {
                    name: record.name().as_str().to_string(),
                    birthday: *birthday,
                    congratulation_date: candidate,
                    days_until,
                });
            }
        }

        result
    }
}

/// The birthday's month/day in `year`. 29 February becomes 28 February in
/// years without one.
fn occurrence_in(birthday: NaiveDate, year: i32) -> NaiveDate {
    birthday
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, birthday.month(), 28))
        .unwrap_or(birthday)
}

fn roll_to_weekday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + chrono::Duration::days(2),
        Weekday::Sun => date + chrono::Duration::days(1),
        _ => date,
    }
}

fn search_pattern(query: &str) -> Regex {
    RegexBuilder::new(query)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(query))
                .case_insensitive(true)
                .build()
        })
        .unwrap_or_else(|_| Regex::new("$^").expect("empty pattern compiles"))
}
