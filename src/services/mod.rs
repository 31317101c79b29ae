//! Interfaces to collaborators outside the renaming engine.

pub mod messages;
pub mod nfo;
