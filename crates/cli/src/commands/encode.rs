use anyhow::{Context, Result};
use seqlink_codec::{LinkCodec, LinkConfig, ShareState};
use std::io::Read;
use std::path::Path;

use crate::args::EncodeArgs;

fn read_state(path: &Path) -> Result<ShareState> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read state from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {}", path.display()))?
    };
    serde_json::from_str(&json).context("Failed to parse view state")
}

pub fn encode_link(config: LinkConfig, args: &EncodeArgs) -> Result<()> {
    let state = read_state(&args.state)?;
    let codec = LinkCodec::new(config);

    let link = if args.url {
        codec.share_url(&state)
    } else {
        codec.encode(&state)
    }
    .with_context(|| format!("Failed to encode {} link", state.mode()))?;

    println!("{link}");
    Ok(())
}
