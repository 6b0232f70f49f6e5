//! # Deskmate Architecture
//!
//! Deskmate keeps an address book and a notebook and answers typed commands
//! about them. The library holds all of it; the `deskmate` binary is a thin
//! terminal client on top.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Flags, the input loop, confirmation prompts, colours     │
//! │  - The only place that touches stdin/stdout/exit codes      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Tokenizes a line, dispatches it, turns errors into       │
//! │    messages, saves on request                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - One handler per command, looked up in a static table     │
//! │  - Work on the Session, return a CmdResult                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain (model/, book.rs, notebook.rs, index.rs)            │
//! │  Storage (store/): DataStore, FileStore, InMemoryStore      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Validation
//!
//! Every contact field is a newtype built through a validating constructor
//! (see [`model::fields`]), so a [`model::Record`] can only ever hold valid
//! values. Failed validation leaves the record as it was.
//!
//! ## Note numbers
//!
//! Notes are keyed by UUID but addressed by their position in a sorted
//! listing, recomputed on every call. See [`index`].
//!
//! ## No I/O in the core
//!
//! Nothing below the CLI prints, reads stdin or exits the process. Deletion
//! prompts go through the [`commands::Confirm`] trait so the same commands
//! run unattended in tests.

pub mod api;
pub mod book;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod notebook;
pub mod store;
pub mod suggest;
