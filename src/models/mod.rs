//! Data models.

pub mod media;
pub mod naming;
pub mod plan;
pub mod policy;
pub mod report;
