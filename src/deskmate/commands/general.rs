use super::{CmdMessage, CmdResult, Confirm, Session, COMMANDS};
use crate::error::Result;

pub fn hello(_session: &mut Session, _args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    Ok(CmdResult::default().with_message(CmdMessage::info("How can I help you?")))
}

pub fn help(_session: &mut Session, _args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    Ok(CmdResult {
        commands: COMMANDS.iter().collect(),
        ..CmdResult::default()
    })
}

/// Saving happens on the way out, in the caller.
pub fn exit(_session: &mut Session, _args: &[String], _confirm: &mut dyn Confirm) -> Result<CmdResult> {
    Ok(CmdResult {
        exit: true,
        ..CmdResult::default()
    }
    .with_message(CmdMessage::info("Good bye!")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::session;
    use crate::commands::{dispatch, AssumeNo};

    #[test]
    fn help_lists_every_command() {
        let r = help(&mut session(), &[], &mut AssumeNo).unwrap();
        assert_eq!(r.commands.len(), COMMANDS.len());
    }

    #[test]
    fn exit_and_close_both_end_the_session() {
        let mut s = session();
        assert!(dispatch(&mut s, "exit", &[], &mut AssumeNo).unwrap().exit);
        assert!(dispatch(&mut s, "close", &[], &mut AssumeNo).unwrap().exit);
        assert!(!dispatch(&mut s, "hello", &[], &mut AssumeNo).unwrap().exit);
    }
}
