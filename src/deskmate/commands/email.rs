use super::helpers::{contact, contact_mut, require};
use super::{names, CmdMessage, CmdResult, Confirm, Session};
use crate::error::Result;

pub fn add(session: &mut Session, args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    require(args, 2, names::ADD_EMAIL, "a name and an email")?;
    let record = contact_mut(&mut session.book, &args[0])?;
    let replaced = record.email().is_some();
    record.add_email(&args[1])?;

    let verb = if replaced { "updated" } else { "added" };
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Email {} for '{}'.",
        verb,
        record.name()
    ))))
}

pub fn show(session: &mut Session, args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    require(args, 1, names::SHOW_EMAIL, "a name")?;
    let record = contact(&session.book, &args[0])?;

    let message = match record.email() {
        Some(email) => CmdMessage::info(format!("{}'s email: {}", record.name(), email)),
        None => CmdMessage::info(format!("{} has no email set.", record.name())),
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn delete(
    session: &mut Session,
    args: &[String],
    _confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    require(args, 1, names::DELETE_EMAIL, "a name")?;
    let record = contact_mut(&mut session.book, &args[0])?;

    let message = match record.delete_email() {
        Some(_) => CmdMessage::success(format!("Email removed for '{}'.", record.name())),
        None => CmdMessage::warning(format!("{} has no email to remove.", record.name())),
    };
    Ok(CmdResult::default().with_message(message))
}
