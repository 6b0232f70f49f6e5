//! Address commands. Everything after the name is the address, so
//! `add-address John Kyiv Main st. 1` needs no quoting.

use super::helpers::{contact_mut, require};
use super::{names, CmdMessage, CmdResult, Confirm, Session};
use crate::error::Result;

pub fn add(session: &mut Session, args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    require(args, 2, names::ADD_ADDRESS, "a name and an address")?;
    let record = contact_mut(&mut session.book, &args[0])?;
    record.add_address(&args[1..].join(" "))?;

    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Address added for '{}'.",
        record.name()
    ))))
}

/// Only replaces an address that is already there.
pub fn change(
    session: &mut Session,
    args: &[String],
    _confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    require(args, 2, names::CHANGE_ADDRESS, "a name and the new address")?;
    let record = contact_mut(&mut session.book, &args[0])?;

    if record.address().is_none() {
        return Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
            "{} has no address yet. Use add-address instead.",
            record.name()
        ))));
    }
    record.add_address(&args[1..].join(" "))?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Address updated for '{}'.",
        record.name()
    ))))
}

pub fn remove(
    session: &mut Session,
    args: &[String],
    _confirm: &mut dyn Confirm,
) -> Result<CmdResult> {
    require(args, 1, names::REMOVE_ADDRESS, "a name")?;
    let record = contact_mut(&mut session.book, &args[0])?;

    let message = match record.remove_address() {
        Some(_) => CmdMessage::success(format!("Address removed for '{}'.", record.name())),
        None => CmdMessage::warning(format!("{} has no address to remove.", record.name())),
    };
    Ok(CmdResult::default().with_message(message))
}
