//! Errata assembly configuration.
//!
//! Every setting has a default, so an empty TOML file (or no file at all)
//! yields the stock Red Hat advisory layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::links::LinkCleaner;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {}: {source}", .config_path.display())]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {}: {source}", .config_path.display())]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where the assembler finds its inputs and how it cleans them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrataConfig {
    /// Key of the nested frontmatter table holding advisory metadata.
    pub metadata_table: String,
    /// Prefix joined with the advisory path to build its public URL.
    pub portal_url: String,
    pub strip_angle_brackets: bool,
    /// Sections never shown in listings.
    pub excluded_sections: Vec<String>,
    pub fields: FieldNames,
    pub sections: SectionNames,
}

/// Frontmatter keys read from the metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub title: String,
    pub issued: String,
    pub path: String,
    pub summary: String,
    pub product_names: String,
    pub product_details: String,
}

/// Section headers the assembler pulls from the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionNames {
    pub description: String,
    pub solution: String,
    pub fixes: String,
}

impl Default for ErrataConfig {
    fn default() -> Self {
        Self {
            metadata_table: "extra".to_string(),
            portal_url: "https://access.redhat.com".to_string(),
            strip_angle_brackets: true,
            excluded_sections: vec!["Updated Packages".to_string()],
            fields: FieldNames::default(),
            sections: SectionNames::default(),
        }
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            title: "title".to_string(),
            issued: "portal_publication_date".to_string(),
            path: "path".to_string(),
            summary: "portal_summary".to_string(),
            product_names: "portal_product_names".to_string(),
            product_details: "portal_product_filter".to_string(),
        }
    }
}

impl Default for SectionNames {
    fn default() -> Self {
        Self {
            description: "Description".to_string(),
            solution: "Solution".to_string(),
            fixes: "Fixes".to_string(),
        }
    }
}

impl ErrataConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed or a field has the
    /// wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a configuration file. A missing file is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read
    /// and [`ConfigError::Parse`] if it is not a valid configuration.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let config = Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %config_path.display(), "loaded errata config");
        Ok(Some(config))
    }

    pub fn link_cleaner(&self) -> LinkCleaner {
        LinkCleaner::new(self.strip_angle_brackets)
    }

    pub fn is_excluded(&self, section: &str) -> bool {
        self.excluded_sections.iter().any(|s| s == section)
    }
}
