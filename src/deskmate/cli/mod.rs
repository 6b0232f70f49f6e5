//! # CLI Layer
//!
//! One terminal client for the deskmate library. It is the only code that:
//! - parses process arguments (`setup.rs`)
//! - reads stdin, asks for confirmation and handles signals (`commands.rs`)
//! - decides colours and layout (`render.rs`)
//!
//! Everything it shows comes from a [`deskmate::commands::CmdResult`]; it
//! never reaches into the books directly.

mod commands;
mod render;
mod setup;

pub use commands::run;
