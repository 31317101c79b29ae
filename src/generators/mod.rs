//! Name generators: template tokens, template expansion and sidecar names.

pub mod artwork;
pub mod template;
pub mod token;
