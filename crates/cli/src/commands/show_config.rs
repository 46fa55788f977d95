use anyhow::{Context, Result};
use seqlink_codec::LinkConfig;

pub fn show_config(config: &LinkConfig) -> Result<()> {
    let json = config.to_json_pretty().context("Failed to serialize config")?;
    println!("{json}");
    Ok(())
}
