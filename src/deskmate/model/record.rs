use super::fields::{normalize_phone, Address, Birthday, Email, Name, Phone};
use crate::error::{AssistantError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single contact. The name is the key in the address book and cannot be
/// changed once the record exists; every other field is freely replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,
    #[serde(default)]
    phones: Vec<Phone>,
    #[serde(default)]
    email: Option<Email>,
    #[serde(default)]
    birthday: Option<Birthday>,
    #[serde(default)]
    address: Option<Address>,
}

impl Record {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: Name::new(name)?,
            phones: Vec::new(),
            email: None,
            birthday: None,
            address: None,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn add_phone(&mut self, raw: &str) -> Result<()> {
        let phone = Phone::new(raw)?;
        if self.phones.contains(&phone) {
            return Err(AssistantError::DuplicatePhone(phone.to_string()));
        }
        self.phones.push(phone);
        Ok(())
    }

    /// Replaces `old` with `new`, keeping its position in the list.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<()> {
        let position = self
            .position_of(old)
            .ok_or_else(|| AssistantError::PhoneNotFound(old.to_string()))?;
        let phone = Phone::new(new)?;
        if self
            .phones
            .iter()
            .enumerate()
            .any(|(i, p)| i != position && *p == phone)
        {
            return Err(AssistantError::DuplicatePhone(phone.to_string()));
        }
        self.phones[position] = phone;
        Ok(())
    }

    /// Returns whether a phone was removed.
    pub fn delete_phone(&mut self, value: &str) -> bool {
        match self.position_of(value) {
            Some(position) => {
                self.phones.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn find_phone(&self, value: &str) -> Option<&Phone> {
        self.position_of(value).map(|i| &self.phones[i])
    }

    fn position_of(&self, value: &str) -> Option<usize> {
        let digits = normalize_phone(value);
        self.phones.iter().position(|p| p.as_str() == digits)
    }

    pub fn add_birthday(&mut self, raw: &str) -> Result<()> {
        self.birthday = Some(Birthday::new(raw)?);
        Ok(())
    }

    pub fn remove_birthday(&mut self) -> Option<Birthday> {
        self.birthday.take()
    }

    pub fn add_email(&mut self, raw: &str) -> Result<()> {
        self.email = Some(Email::new(raw)?);
        Ok(())
    }

    pub fn delete_email(&mut self) -> Option<Email> {
        self.email.take()
    }

    pub fn add_address(&mut self, raw: &str) -> Result<()> {
        self.address = Some(Address::new(raw)?);
        Ok(())
    }

    pub fn remove_address(&mut self) -> Option<Address> {
        self.address.take()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phones = if self.phones.is_empty() {
            "no phones".to_string()
        } else {
            self.phones
                .iter()
                .map(Phone::as_str)
                .collect::<Vec<_>>()
                .join("; ")
        };
        write!(f, "Contact name: {}, phones: {}", self.name, phones)?;
        match &self.birthday {
            Some(b) => write!(f, ", birthday: {}", b),
            None => write!(f, ", birthday: no birthday"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn john() -> Record {
        let mut r = Record::new("John").unwrap();
        r.add_phone("0671234567").unwrap();
        r.add_phone("0501112233").unwrap();
        r
    }

    #[test]
    fn new_record_requires_a_name() {
        assert!(matches!(
            Record::new(" "),
            Err(AssistantError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn add_phone_rejects_duplicates_after_normalizing() {
        let mut r = john();
        let err = r.add_phone("067-123-45-67").unwrap_err();
        assert!(matches!(err, AssistantError::DuplicatePhone(p) if p == "0671234567"));
        assert_eq!(r.phones().len(), 2);
    }

    #[test]
    fn add_phone_propagates_validation() {
        let mut r = john();
        assert!(matches!(
            r.add_phone("123"),
            Err(AssistantError::Validation(ValidationError::PhoneLength { .. }))
        ));
    }

    #[test]
    fn edit_phone_keeps_position() {
        let mut r = john();
        r.edit_phone("0671234567", "0939998877").unwrap();
        let phones: Vec<_> = r.phones().iter().map(Phone::as_str).collect();
        assert_eq!(phones, vec!["0939998877", "0501112233"]);
    }

    #[test]
    fn edit_phone_missing_old_is_not_found() {
        let mut r = john();
        assert!(matches!(
            r.edit_phone("1111111111", "0939998877"),
            Err(AssistantError::PhoneNotFound(_))
        ));
    }

    #[test]
    fn edit_phone_with_invalid_new_leaves_record_untouched() {
        let mut r = john();
        assert!(r.edit_phone("0671234567", "12").is_err());
        assert!(r.find_phone("0671234567").is_some());
    }

    #[test]
    fn delete_phone_is_a_noop_when_absent() {
        let mut r = john();
        assert!(!r.delete_phone("1111111111"));
        assert!(r.delete_phone("050 111 22 33"));
        assert_eq!(r.phones().len(), 1);
    }

    #[test]
    fn single_value_fields_overwrite_and_clear() {
        let mut r = john();
        r.add_email("a@b.com").unwrap();
        r.add_email("c@d.org").unwrap();
        assert_eq!(r.email().unwrap().as_str(), "c@d.org");
        assert!(r.delete_email().is_some());
        assert!(r.email().is_none());

        r.add_birthday("01.01.1990").unwrap();
        r.add_birthday("02.02.1992").unwrap();
        assert_eq!(r.birthday().unwrap().to_string(), "02.02.1992");
        assert!(r.remove_birthday().is_some());
        assert!(r.remove_birthday().is_none());

        r.add_address("Kyiv").unwrap();
        r.add_address("Lviv").unwrap();
        assert_eq!(r.address().unwrap().as_str(), "Lviv");
        r.remove_address();
        assert!(r.address().is_none());
    }

    #[test]
    fn failed_overwrite_keeps_previous_value() {
        let mut r = john();
        r.add_email("a@b.com").unwrap();
        assert!(r.add_email("nope").is_err());
        assert_eq!(r.email().unwrap().as_str(), "a@b.com");
    }

    #[test]
    fn display_summarizes_contact() {
        let r = john();
        assert_eq!(
            r.to_string(),
            "Contact name: John, phones: 0671234567; 0501112233, birthday: no birthday"
        );
    }
}
