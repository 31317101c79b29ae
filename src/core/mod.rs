//! Core renaming engine.

pub mod artifacts;
pub mod cleanup;
pub mod executor;
pub mod layout;
pub mod renamer;
pub mod scanner;
pub mod subtitles;

pub use renamer::{RenameOutcome, Renamer};
