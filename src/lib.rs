//! Media Renamer Library
//!
//! Renames and relocates movie folders and their sidecar files (subtitles,
//! artwork, metadata documents) according to a template-driven naming
//! policy.

pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
