//! Core data types: validated contact fields, [`Record`] and [`Note`].

pub mod fields;
mod note;
mod record;

pub use fields::{Address, Birthday, Email, Name, Phone};
pub use note::Note;
pub use record::Record;
