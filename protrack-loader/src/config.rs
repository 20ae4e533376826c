use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use protrack_core::Rgb;
use protrack_parsers::TrackPalette;
use protrack_variants::{VariantPalette, VariantStyle};

use crate::errors::{ConfigError, ConfigResult};

pub const ACCESSION_PLACEHOLDER: &str = "{accession}";
pub const DEFAULT_TIMEOUT_MS: u64 = 8000;

const FEATURES_URL: &str = "https://www.ebi.ac.uk/proteins/api/features/{accession}";
const VARIATION_URL: &str = "https://www.ebi.ac.uk/proteins/api/variation/{accession}";
const PROTEOMICS_URL: &str = "https://www.ebi.ac.uk/proteins/api/proteomics/{accession}";
const ANTIGEN_URL: &str = "https://www.ebi.ac.uk/proteins/api/antigen/{accession}";

///
/// Where each source is loaded from. A source left out of an explicit
/// `[sources]` table is disabled; leaving out the table altogether enables
/// the four protein API sources.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SourcesConfig {
    pub features: Option<String>,
    pub variation: Option<String>,
    pub proteomics: Option<String>,
    pub antigen: Option<String>,
    pub structures: Option<String>,
    /// A local structures payload used instead of a remote one.
    pub structures_inline: Option<PathBuf>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig {
            features: Some(FEATURES_URL.to_string()),
            variation: Some(VARIATION_URL.to_string()),
            proteomics: Some(PROTEOMICS_URL.to_string()),
            antigen: Some(ANTIGEN_URL.to_string()),
            structures: None,
            structures_inline: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ColorConfig {
    pub disease: Rgb,
    pub non_disease: Rgb,
    pub uncertain: Rgb,
    pub unknown: Rgb,
    pub deleterious: Rgb,
    pub benign: Rgb,
    pub observed: Rgb,
    pub unobserved: Rgb,
}

impl Default for ColorConfig {
    fn default() -> Self {
        let variants = VariantPalette::default();
        let tracks = TrackPalette::default();
        ColorConfig {
            disease: variants.disease,
            non_disease: variants.non_disease,
            uncertain: variants.uncertain,
            unknown: variants.unknown,
            deleterious: variants.deleterious,
            benign: variants.benign,
            observed: tracks.observed,
            unobserved: tracks.unobserved,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProtrackConfig {
    pub timeout_ms: u64,
    pub overwrite_predictions: bool,
    pub sources: SourcesConfig,
    pub colors: ColorConfig,
}

impl Default for ProtrackConfig {
    fn default() -> Self {
        ProtrackConfig {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            overwrite_predictions: false,
            sources: SourcesConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl ProtrackConfig {
    ///
    /// Check the options that cannot be expressed in the types alone.
    ///
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if self.sources.structures.is_some() && self.sources.structures_inline.is_some() {
            return Err(ConfigError::ConflictingSources(
                "structures",
                "structures_inline",
            ));
        }

        let templates = [
            ("features", &self.sources.features),
            ("variation", &self.sources.variation),
            ("proteomics", &self.sources.proteomics),
            ("antigen", &self.sources.antigen),
            ("structures", &self.sources.structures),
        ];
        for (name, template) in templates {
            if let Some(template) = template {
                if !template.contains(ACCESSION_PLACEHOLDER) {
                    return Err(ConfigError::MissingPlaceholder(name));
                }
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn variant_style(&self) -> VariantStyle {
        VariantStyle {
            palette: VariantPalette {
                disease: self.colors.disease,
                non_disease: self.colors.non_disease,
                uncertain: self.colors.uncertain,
                unknown: self.colors.unknown,
                deleterious: self.colors.deleterious,
                benign: self.colors.benign,
            },
            overwrite_predictions: self.overwrite_predictions,
        }
    }

    pub fn track_palette(&self) -> TrackPalette {
        TrackPalette {
            observed: self.colors.observed,
            unobserved: self.colors.unobserved,
            ..Default::default()
        }
    }
}

/// Substitute the accession into a source URL template.
pub fn expand_template(template: &str, accession: &str) -> String {
    template.replace(ACCESSION_PLACEHOLDER, accession)
}

impl FromStr for ProtrackConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ProtrackConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<&Path> for ProtrackConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        toml_str.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_try_from_toml() {
        let path = PathBuf::from("../tests/data/protrack.toml");
        let config = ProtrackConfig::try_from(path.as_path()).unwrap();

        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert!(config.overwrite_predictions);
        assert_eq!(config.sources.features.as_deref(), Some(FEATURES_URL));
        // an explicit [sources] table only enables what it lists
        assert_eq!(config.sources.proteomics, None);
        assert_eq!(config.sources.antigen, None);
        assert_eq!(config.colors.disease, Rgb::new(0xaa, 0x00, 0x00));
        assert_eq!(config.colors.benign, ColorConfig::default().benign);
        assert_eq!(config.track_palette().observed, Rgb::new(0x12, 0x34, 0x56));
    }

    #[rstest]
    fn test_empty_config_has_defaults() {
        let config: ProtrackConfig = "".parse().unwrap();
        assert_eq!(config, ProtrackConfig::default());
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.sources.antigen.as_deref(), Some(ANTIGEN_URL));
        assert_eq!(config.variant_style(), VariantStyle::default());
    }

    #[rstest]
    fn test_conflicting_structure_sources() {
        let raw = r#"
            [sources]
            structures = "https://example.org/structures/{accession}"
            structures_inline = "structures.json"
        "#;
        let err = raw.parse::<ProtrackConfig>().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ConflictingSources("structures", "structures_inline")
        ));
    }

    #[rstest]
    #[case("timeout_ms = 0")]
    #[case("[sources]\nfeatures = \"https://example.org/features\"")]
    #[case("[colors]\ndisease = \"red-ish\"")]
    fn test_invalid_configs(#[case] raw: &str) {
        assert!(raw.parse::<ProtrackConfig>().is_err());
    }

    #[rstest]
    fn test_expand_template() {
        assert_eq!(
            expand_template(VARIATION_URL, "P05067"),
            "https://www.ebi.ac.uk/proteins/api/variation/P05067"
        );
    }
}
