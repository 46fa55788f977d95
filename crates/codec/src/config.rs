//! Link codec configuration.
//!
//! Can be deserialized from a JSON file so that a deployment whose
//! prediction tables carry different columns can still produce stable links.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::columns::ColumnCatalog;
use crate::error::ConfigError;

/// Origin prepended to paths by [`LinkCodec::share_url`](crate::LinkCodec::share_url).
pub const DEFAULT_BASE_URL: &str = "https://www.crisprindelphi.design";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Scheme and host of the dashboard, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "ColumnCatalog::batch")]
    pub batch_columns: ColumnCatalog,
    #[serde(default = "ColumnCatalog::gene")]
    pub gene_columns: ColumnCatalog,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            batch_columns: ColumnCatalog::batch(),
            gene_columns: ColumnCatalog::gene(),
        }
    }
}

impl LinkConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LinkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded link config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.ends_with('/') {
            return Err(ConfigError::Invalid(format!(
                "base_url must not end with '/': {}",
                self.base_url
            )));
        }
        self.batch_columns
            .validate("batch_columns")
            .map_err(ConfigError::Invalid)?;
        self.gene_columns
            .validate("gene_columns")
            .map_err(ConfigError::Invalid)?;
        Ok(())
    }
}
