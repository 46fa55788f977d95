use clap::Args;
use seqlink_codec::Mode;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// View state (JSON), tagged with its mode, e.g. {"mode": "single", ...}
    ///
    /// Use '-' to read from standard input.
    #[arg(short, long)]
    pub state: PathBuf,

    /// Print the full share URL instead of the path
    #[arg(long)]
    pub url: bool,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Link path, e.g. /single_mESC_-_ACGT_2, or a full share URL
    #[arg(allow_hyphen_values = true)]
    pub link: String,

    /// View the link must belong to (single, batch, gene)
    ///
    /// Detected from the path prefix if not given.
    #[arg(short, long)]
    pub mode: Option<Mode>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// File with one link per line; blank lines and lines starting with '#'
    /// are skipped
    #[arg(short, long)]
    pub input: PathBuf,

    /// Only print the summary
    #[arg(short, long)]
    pub quiet: bool,
}
