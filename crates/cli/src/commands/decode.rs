use anyhow::{bail, Context, Result};
use seqlink_codec::{LinkCodec, LinkConfig, Mode};

use crate::args::DecodeArgs;

pub fn decode_link(config: LinkConfig, args: &DecodeArgs) -> Result<()> {
    let codec = LinkCodec::new(config);
    let path = codec.strip_base_url(args.link.trim());

    let Some(mode) = args.mode.or_else(|| Mode::from_path(path)) else {
        println!("invalid");
        bail!("Link does not name a view (expected /single_, /batch_ or /gene_)");
    };

    match codec.decode_detailed(mode, path) {
        Ok(state) => {
            let json = serde_json::to_string_pretty(&state).context("Failed to serialize state")?;
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            println!("invalid");
            bail!("Rejected {mode} link: {e}");
        }
    }
}
