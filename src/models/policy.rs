//! Naming policy configuration.

use super::media::ArtifactType;
use super::naming::{FanartNaming, NfoConnector, NfoNaming, PosterNaming};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-supplied naming policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingPolicy {
    /// Folder template, relative to the datasource (empty = keep folder).
    pub folder_template: String,
    /// Filename template (without extension).
    pub filename_template: String,
    /// Metadata document variants, in order.
    pub nfo_variants: Vec<NfoNaming>,
    /// Poster variants, in order.
    pub poster_variants: Vec<PosterNaming>,
    /// Fanart variants, in order.
    pub fanart_variants: Vec<FanartNaming>,
    /// Which extra artwork types are kept.
    pub artwork: ArtworkToggles,
    /// Replace spaces in generated names.
    pub space_substitution: bool,
    /// Replacement used when `space_substitution` is on.
    pub space_replacement: String,
    /// Transliterate generated names to ASCII.
    pub ascii_replacement: bool,
    /// Remove metadata documents not written by us.
    pub nfo_cleanup: bool,
    /// Create a set folder even if the set has only one member.
    pub set_folder_for_single_item: bool,
    /// Metadata document flavour in use.
    pub nfo_connector: NfoConnector,
}

/// Toggles for artwork that has a single fixed name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkToggles {
    pub banner: bool,
    pub clearart: bool,
    pub discart: bool,
    pub logo: bool,
    pub thumb: bool,
    pub extra_fanart: bool,
    pub extra_thumb: bool,
}

impl ArtworkToggles {
    /// Whether the given artwork type is enabled.
    pub fn enabled(&self, artifact_type: ArtifactType) -> bool {
        match artifact_type {
            ArtifactType::Banner => self.banner,
            ArtifactType::ClearArt => self.clearart,
            ArtifactType::DiscArt => self.discart,
            ArtifactType::Logo => self.logo,
            ArtifactType::Thumb => self.thumb,
            ArtifactType::ExtraFanart => self.extra_fanart,
            ArtifactType::ExtraThumb => self.extra_thumb,
            _ => false,
        }
    }
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            folder_template: "$T ($Y)".to_string(),
            filename_template: "$T ($Y)".to_string(),
            nfo_variants: vec![NfoNaming::FilenameNfo],
            poster_variants: vec![PosterNaming::PosterJpg],
            fanart_variants: vec![FanartNaming::FanartJpg],
            artwork: ArtworkToggles::default(),
            space_substitution: false,
            space_replacement: "_".to_string(),
            ascii_replacement: false,
            nfo_cleanup: false,
            set_folder_for_single_item: false,
            nfo_connector: NfoConnector::default(),
        }
    }
}

impl NamingPolicy {
    /// Delimiter placed before a stacking marker.
    pub fn stacking_delimiter(&self) -> &str {
        if self.space_substitution {
            &self.space_replacement
        } else {
            " "
        }
    }

    /// A folder template is unique when it can only be produced by one item:
    /// a title token together with the year, or the IMDB id.
    pub fn is_folder_template_unique(&self) -> bool {
        is_folder_template_unique(&self.folder_template)
    }

    /// A filename template is usable when it contains a title token.
    pub fn is_filename_template_usable(&self) -> bool {
        let pattern = self.filename_template.trim().to_uppercase();
        pattern.contains("$T") || pattern.contains("$E") || pattern.contains("$O")
    }

    /// Check settings that would produce broken names.
    pub fn validate(&self) -> Result<()> {
        if self.space_substitution {
            const ILLEGAL: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
            if self.space_replacement.contains(ILLEGAL) {
                return Err(crate::Error::Configuration(format!(
                    "space replacement '{}' contains characters not allowed in filenames",
                    self.space_replacement
                )));
            }
        }
        Ok(())
    }
}

/// See [`NamingPolicy::is_folder_template_unique`].
pub fn is_folder_template_unique(template: &str) -> bool {
    let template = template.to_uppercase();
    ((template.contains("$T") || template.contains("$E") || template.contains("$O"))
        && template.contains("$Y"))
        || template.contains("$I")
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("media_renamer")
}

/// Default location of the naming policy file.
pub fn default_policy_path() -> PathBuf {
    dirs_config_path().join("naming.toml")
}

/// Load a naming policy from a TOML file, falling back to defaults when the
/// file does not exist.
pub fn load_policy(path: &Path) -> Result<NamingPolicy> {
    if !path.exists() {
        tracing::debug!("No naming policy at {:?}, using defaults", path);
        return Ok(NamingPolicy::default());
    }

    let content = std::fs::read_to_string(path)?;
    let policy: NamingPolicy = toml::from_str(&content)?;
    policy.validate()?;
    Ok(policy)
}

/// Save a naming policy as TOML.
pub fn save_policy(policy: &NamingPolicy, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(policy)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    tracing::info!("Naming policy saved to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_template_uniqueness() {
        assert!(is_folder_template_unique("$T ($Y)"));
        assert!(is_folder_template_unique("$E - $Y"));
        assert!(is_folder_template_unique("$O {$Y}"));
        assert!(is_folder_template_unique("$I"));
        assert!(is_folder_template_unique("$S/$I"));
        assert!(!is_folder_template_unique("$S"));
        assert!(!is_folder_template_unique("$T"));
        assert!(!is_folder_template_unique("$G/$Y"));
    }

    #[test]
    fn test_folder_template_uniqueness_ignores_case() {
        assert!(is_folder_template_unique("$t ($y)"));
        assert!(is_folder_template_unique("$o - $Y"));
        assert!(is_folder_template_unique("$i"));
        assert!(!is_folder_template_unique("$s"));
    }

    #[test]
    fn test_default_policy_path() {
        let path = default_policy_path();
        assert!(path.ends_with("media_renamer/naming.toml"));
    }

    #[test]
    fn test_filename_template_usable() {
        let mut policy = NamingPolicy::default();
        assert!(policy.is_filename_template_usable());

        policy.filename_template = "$y $o".to_string();
        assert!(policy.is_filename_template_usable());

        policy.filename_template = "$Y $R".to_string();
        assert!(!policy.is_filename_template_usable());

        policy.filename_template = String::new();
        assert!(!policy.is_filename_template_usable());
    }

    #[test]
    fn test_stacking_delimiter() {
        let mut policy = NamingPolicy::default();
        assert_eq!(policy.stacking_delimiter(), " ");
        policy.space_substitution = true;
        policy.space_replacement = ".".to_string();
        assert_eq!(policy.stacking_delimiter(), ".");
    }

    #[test]
    fn test_validate_rejects_separator_replacement() {
        let policy = NamingPolicy {
            space_substitution: true,
            space_replacement: "/".to_string(),
            ..Default::default()
        };
        assert!(matches!(policy.validate(), Err(crate::Error::Configuration(_))));
    }

    #[test]
    fn test_policy_toml_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("conf").join("naming.toml");
        let policy = NamingPolicy {
            folder_template: "$N/$T ($Y)".to_string(),
            nfo_variants: vec![NfoNaming::MovieNfo, NfoNaming::FilenameNfo],
            artwork: ArtworkToggles {
                banner: true,
                ..Default::default()
            },
            ..Default::default()
        };

        save_policy(&policy, &path).unwrap();
        assert_eq!(load_policy(&path).unwrap(), policy);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let policy: NamingPolicy = toml::from_str("folder_template = \"$S\"\n").unwrap();
        assert_eq!(policy.folder_template, "$S");
        assert_eq!(policy.filename_template, "$T ($Y)");
        assert_eq!(policy.poster_variants, vec![PosterNaming::PosterJpg]);
    }

    #[test]
    fn test_missing_policy_file_is_default() {
        let policy = load_policy(Path::new("/nonexistent/naming.toml")).unwrap();
        assert_eq!(policy, NamingPolicy::default());
    }
}
