use super::helpers::{contact, contact_mut, require};
use super::{names, CmdMessage, CmdResult, Confirm, Session};
use crate::error::{AssistantError, Result};

pub fn add(session: &mut Session, args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    require(args, 2, names::ADD_BIRTHDAY, "a name and a date (DD.MM.YYYY)")?;
    let record = contact_mut(&mut session.book, &args[0])?;
    record.add_birthday(&args[1])?;

    let birthday = record.birthday().map(ToString::to_string).unwrap_or_default();
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Birthday for '{}' set to {}.",
        record.name(),
        birthday
    ))))
}

pub fn show(session: &mut Session, args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    require(args, 1, names::SHOW_BIRTHDAY, "a name")?;
    let record = contact(&session.book, &args[0])?;

    let message = match record.birthday() {
        Some(b) => CmdMessage::info(format!("{}'s birthday: {}", record.name(), b)),
        None => CmdMessage::info(format!("{} has no birthday set.", record.name())),
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn delete(
    session: &mut Session,
    args: &[String],
    _confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    require(args, 1, names::DELETE_BIRTHDAY, "a name")?;
    let record = contact_mut(&mut session.book, &args[0])?;

    let message = match record.remove_birthday() {
        Some(_) => CmdMessage::success(format!("Birthday removed for '{}'.", record.name())),
        None => CmdMessage::warning(format!("{} has no birthday to remove.", record.name())),
    };
    Ok(CmdResult::default().with_message(message))
}

/// `birthdays [days]`; without a count the configured window applies.
pub fn upcoming(
    session: &mut Session,
    args: &[String],
    _confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    let days = match args.first() {
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
            AssistantError::InvalidArgument(format!("'{}' is not a number of days.", raw))
        })?,
        None => session.settings.upcoming_days,
    };

    let mut found = session.book.upcoming_birthdays(days, session.today());
    found.sort_by(|a, b| a.days_until.cmp(&b.days_until).then_with(|| a.name.cmp(&b.name)));

    let message = if found.is_empty() {
        CmdMessage::info(format!("No birthdays in the next {} days.", days))
    } else {
        CmdMessage::info(format!("Birthdays in the next {} days:", days))
    };
    Ok(CmdResult::default()
        .with_message(message)
        .with_birthdays(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{args, session};
    use crate::commands::{contacts, AssumeNo, MessageLevel};
    use chrono::NaiveDate;

    fn with_contacts(people: &[(&str, &str)]) -> Session {
        let mut s = session();
        for (i, (name, birthday)) in people.iter().enumerate() {
            let phone = format!("06712345{:02}", i);
            contacts::add(&mut s, &args(&[*name, phone.as_str()]), &mut AssumeNo).unwrap();
            add(&mut s, &args(&[*name, *birthday]), &mut AssumeNo).unwrap();
        }
        s
    }

    #[test]
    fn add_and_show() {
        let mut s = with_contacts(&[("John", "08.06.1990")]);
        let r = show(&mut s, &args(&["John"]), &mut AssumeNo).unwrap();
        assert_eq!(r.messages[0].content, "John's birthday: 08.06.1990");
    }

    #[test]
    fn add_rejects_bad_date() {
        let mut s = with_contacts(&[]);
        contacts::add(&mut s, &args(&["John", "0671234567"]), &mut AssumeNo).unwrap();
        let err = add(&mut s, &args(&["John", "1990-06-08"]), &mut AssumeNo).unwrap_err();
        assert!(err.to_string().contains("DD.MM.YYYY"));
    }

    #[test]
    fn delete_twice_warns() {
        let mut s = with_contacts(&[("John", "08.06.1990")]);
        delete(&mut s, &args(&["John"]), &mut AssumeNo).unwrap();
        let r = delete(&mut s, &args(&["John"]), &mut AssumeNo).unwrap();
        assert_eq!(r.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn upcoming_uses_configured_window_and_sorts() {
        let mut s = with_contacts(&[
            ("Zed", "06.06.1980"),
            ("Ann", "08.06.1990"),
            ("Bob", "10.06.1985"),
            ("Far", "01.07.1985"),
        ]);
        let r = upcoming(&mut s, &[], &mut AssumeNo).unwrap();
        let names: Vec<_> = r.birthdays.iter().map(|b| b.name.as_str()).collect();
        // Ann's Saturday birthday moves to Monday the 10th, alongside Bob.
        assert_eq!(names, vec!["Zed", "Ann", "Bob"]);
        assert_eq!(
            r.birthdays[1].congratulation_date,
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
        );
    }

    #[test]
    fn upcoming_accepts_explicit_days() {
        let mut s = with_contacts(&[("Far", "01.07.1985")]);
        let r = upcoming(&mut s, &args(&["30"]), &mut AssumeNo).unwrap();
        assert_eq!(r.birthdays.len(), 1);

        let r = upcoming(&mut s, &args(&["3"]), &mut AssumeNo).unwrap();
        assert_eq!(r.messages[0].content, "No birthdays in the next 3 days.");
    }

    #[test]
    fn upcoming_rejects_non_numbers() {
        let mut s = session();
        assert!(upcoming(&mut s, &args(&["soon"]), &mut AssumeNo).is_err());
    }
}
