//! Utility modules.

pub mod fs;
pub mod hash;
pub mod language;
pub mod retry;
pub mod stacking;
