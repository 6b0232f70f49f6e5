use super::helpers::{contact, contact_mut, require};
use super::{names, CmdMessage, CmdResult, Confirm, Session};
use crate::error::Result;
use crate::model::{Name, Phone, Record};

/// Creates the contact if needed, then adds the phone. A new contact is only
/// stored once its first phone is valid.
pub fn add(session: &mut Session, args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    require(args, 2, names::ADD_CONTACT, "a name and a phone number")?;
    let name = Name::new(&args[0])?;
    let phone = args[1].as_str();

    if let Some(record) = session.book.find_mut(name.as_str()) {
        record.add_phone(phone)?;
        log::debug!("added phone to existing contact {}", name);
        return Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Contact '{}' updated with phone '{}'.",
            name, phone
        ))));
    }

    let mut record = Record::new(name.as_str())?;
    record.add_phone(phone)?;
    session.book.add_record(record);
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Contact '{}' with phone '{}' added.",
        name, phone
    ))))
}

pub fn change(
    session: &mut Session,
    args: &[String],
    _confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    require(args, 3, names::CHANGE_PHONE, "a name, the old phone and the new phone")?;
    let (name, old, new) = (args[0].as_str(), args[1].as_str(), args[2].as_str());

    let record = contact_mut(&mut session.book, name)?;
    record.edit_phone(old, new)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Phone for '{}' changed from {} to {}.",
        record.name(), old, new
    ))))
}

pub fn phones(
    session: &mut Session,
    args: &[String],
    _confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    require(args, 1, names::SHOW_PHONES, "a name")?;
    let record = contact(&session.book, &args[0])?;

    let message = if record.phones().is_empty() {
        CmdMessage::info(format!("{} has no phones.", record.name()))
    } else {
        let phones: Vec<String> = record.phones().iter().map(Phone::formatted).collect();
        CmdMessage::info(format!("{}: {}", record.name(), phones.join("; ")))
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn all(session: &mut Session, _args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    if session.book.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No contacts saved yet.")));
    }
    Ok(CmdResult::default().with_contacts(session.book.records().cloned().collect()))
}

/// Multi-word queries are joined back together with single spaces.
pub fn search(
    session: &mut Session,
    args: &[String],
    _confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    require(args, 1, names::SEARCH_CONTACTS, "a search query")?;
    let query = args.join(" ");

    let found: Vec<Record> = session.book.search(&query).into_iter().cloned().collect();
    let mut result = CmdResult::default();
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!("No contacts match '{}'.", query)));
    } else {
        result.add_message(CmdMessage::info(format!("Found {} contact(s):", found.len())));
    }
    result.highlight = Some(query);
    Ok(result.with_contacts(found))
}

pub fn delete(
    session: &mut Session,
    args: &[String],
    confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    require(args, 1, names::DELETE_CONTACT, "a name")?;
    let name = contact(&session.book, &args[0])?.name().to_string();

    if !confirm.confirm(&format!("Delete contact '{}'?", name)) {
        return Ok(CmdResult::default().with_message(CmdMessage::info("Deletion cancelled.")));
    }
    session.book.delete(&name)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Contact '{}' deleted.",
        name
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{args, session};
    use crate::commands::{AssumeNo, AssumeYes, MessageLevel};
    use crate::error::AssistantError;

    #[test]
    fn add_creates_then_extends_contact() {
        let mut s = session();
        add(&mut s, &args(&["John", "0671234567"]), &mut AssumeNo).unwrap();
        let r = add(&mut s, &args(&["John", "0509876543"]), &mut AssumeNo).unwrap();
        assert!(r.messages[0].content.contains("updated"));
        assert_eq!(s.book.find("John").unwrap().phones().len(), 2);
    }

    #[test]
    fn padded_name_extends_the_existing_contact() {
        let mut s = session();
        add(&mut s, &args(&["John", "0671234567"]), &mut AssumeNo).unwrap();
        s.book.find_mut("John").unwrap().add_email("john@mail.com").unwrap();

        let r = add(&mut s, &args(&["John ", "0501112233"]), &mut AssumeNo).unwrap();
        assert!(r.messages[0].content.contains("updated"));
        assert_eq!(s.book.len(), 1);
        let john = s.book.find("John").unwrap();
        assert_eq!(john.phones().len(), 2);
        assert!(john.email().is_some());

        let r = phones(&mut s, &args(&["  John"]), &mut AssumeNo).unwrap();
        assert!(r.messages[0].content.starts_with("John: "));
        delete(&mut s, &args(&[" John "]), &mut AssumeYes).unwrap();
        assert!(s.book.is_empty());
    }

    #[test]
    fn add_with_bad_phone_creates_nothing() {
        let mut s = session();
        let err = add(&mut s, &args(&["John", "123"]), &mut AssumeNo).unwrap_err();
        assert!(matches!(err, AssistantError::Validation(_)));
        assert!(s.book.is_empty());
    }

    #[test]
    fn add_requires_two_arguments() {
        let mut s = session();
        let err = add(&mut s, &args(&["John"]), &mut AssumeNo).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: [add] command requires a name and a phone number."
        );
    }

    #[test]
    fn change_replaces_phone() {
        let mut s = session();
        add(&mut s, &args(&["John", "0671234567"]), &mut AssumeNo).unwrap();
        change(&mut s, &args(&["John", "0671234567", "0931112233"]), &mut AssumeNo).unwrap();
        assert!(s.book.find("John").unwrap().find_phone("0931112233").is_some());

        let err = change(&mut s, &args(&["Jane", "1", "2"]), &mut AssumeNo).unwrap_err();
        assert_eq!(err.to_string(), "Contact 'Jane' not found.");
    }

    #[test]
    fn phones_are_formatted() {
        let mut s = session();
        add(&mut s, &args(&["John", "0671234567"]), &mut AssumeNo).unwrap();
        let r = phones(&mut s, &args(&["John"]), &mut AssumeNo).unwrap();
        assert_eq!(r.messages[0].content, "John: (067)123-4567");
    }

    #[test]
    fn all_on_empty_book_says_so() {
        let mut s = session();
        let r = all(&mut s, &[], &mut AssumeNo).unwrap();
        assert!(r.contacts.is_empty());
        assert_eq!(r.messages[0].content, "No contacts saved yet.");
    }

    #[test]
    fn search_joins_words_and_highlights() {
        let mut s = session();
        add(&mut s, &args(&["John Smith", "0671234567"]), &mut AssumeNo).unwrap();
        add(&mut s, &args(&["Jane", "0509876543"]), &mut AssumeNo).unwrap();
        let r = search(&mut s, &args(&["john", "smith"]), &mut AssumeNo).unwrap();
        assert_eq!(r.contacts.len(), 1);
        assert_eq!(r.highlight.as_deref(), Some("john smith"));
    }

    #[test]
    fn delete_asks_first() {
        let mut s = session();
        add(&mut s, &args(&["John", "0671234567"]), &mut AssumeNo).unwrap();

        let r = delete(&mut s, &args(&["John"]), &mut AssumeNo).unwrap();
        assert_eq!(r.messages[0].content, "Deletion cancelled.");
        assert_eq!(s.book.len(), 1);

        let r = delete(&mut s, &args(&["John"]), &mut AssumeYes).unwrap();
        assert_eq!(r.messages[0].level, MessageLevel::Success);
        assert!(s.book.is_empty());
    }

    #[test]
    fn delete_unknown_contact_does_not_ask() {
        struct Panicky;
        impl Confirm for Panicky {
            fn confirm(&mut self, _prompt: &str) -> bool {
                panic!("should not be asked")
            }
        }
        let mut s = session();
        assert!(delete(&mut s, &args(&["Ghost"]), &mut Panicky).is_err());
    }
}
