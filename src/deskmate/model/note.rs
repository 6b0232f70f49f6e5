use crate::error::ValidationError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A free-text note with tags.
///
/// `created_at` is fixed at construction. `updated_at` moves forward on every
/// mutation, and two mutations in a row always yield two distinct, increasing
/// timestamps even when the clock has not ticked in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: Uuid,
    text: String,
    #[serde(default)]
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new<I, T>(text: &str, tags: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new_at(text, tags, Utc::now())
    }

    /// Builds a note stamped with `now` instead of the current time.
    pub fn new_at<I, T>(text: &str, tags: I, now: DateTime<Utc>) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        validate_text(text)?;
        Ok(Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            tags: dedup_tags(tags),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn set_text(&mut self, text: &str) -> Result<(), ValidationError> {
        validate_text(text)?;
        self.text = text.to_string();
        self.touch();
        Ok(())
    }

    /// Appends `tag` unless it is already present. Returns whether it was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        self.touch();
        true
    }

    /// Returns whether the tag was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        if self.tags.len() == before {
            return false;
        }
        self.touch();
        true
    }

    /// Replaces the whole tag list. Always counts as a modification.
    pub fn edit_tags<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = dedup_tags(tags);
        self.touch();
    }

    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::nanoseconds(1)
        };
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tags.is_empty() {
            write!(f, "{} | Tags: no tags", self.text)
        } else {
            write!(f, "{} | Tags: {}", self.text, self.tags.join(", "))
        }
    }
}

fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyNoteText);
    }
    Ok(())
}

fn dedup_tags<I, T>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut result: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.into();
        if !result.contains(&tag) {
            result.push(tag);
        }
    }
    result
}
