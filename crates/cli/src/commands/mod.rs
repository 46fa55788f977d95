pub mod check;
pub mod decode;
pub mod encode;
pub mod sequence;
pub mod show_config;

use anyhow::{Context, Result};
use seqlink_codec::LinkConfig;
use std::path::Path;

/// Loads the link configuration, or the dashboard defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<LinkConfig> {
    match path {
        Some(path) => LinkConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(LinkConfig::default()),
    }
}
