//! Validated field types for contact records.
//!
//! Each type wraps a primitive and can only be built through its `new`
//! constructor (or `TryFrom<String>`, which serde uses when loading), so a
//! value held in a [`Record`](super::Record) has always passed validation.

use crate::error::ValidationError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PHONE_LEN: usize = 10;
pub const DATE_FORMAT: &str = "%d.%m.%Y";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

/// Strips everything but ASCII digits. Used both to build a [`Phone`] and to
/// normalize lookup values before comparing against stored phones.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let digits = normalize_phone(raw);
        if digits.is_empty() {
            return Err(ValidationError::EmptyPhone);
        }
        if digits.len() != PHONE_LEN {
            return Err(ValidationError::PhoneLength {
                raw: raw.to_string(),
                expected: PHONE_LEN,
                found: digits.len(),
            });
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the number as `(067)123-4567`.
    pub fn formatted(&self) -> String {
        format!("({}){}-{}", &self.0[..3], &self.0[3..6], &self.0[6..])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        if !EMAIL_PATTERN.is_match(&email) {
            return Err(ValidationError::EmailFormat(raw.trim().to_string()));
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// Parses `DD.MM.YYYY`. The year must have exactly four digits; chrono's
    /// `%Y` alone would take `90` as the year 90.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let year = trimmed.rsplit('.').next().unwrap_or_default();
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::BirthdayFormat(raw.to_string()));
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::BirthdayFormat(raw.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyAddress);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_field {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }
    };
}

string_field!(Name);
string_field!(Phone);
string_field!(Email);
string_field!(Address);

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl TryFrom<String> for Birthday {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Birthday> for String {
    fn from(value: Birthday) -> Self {
        value.to_string()
    }
}
