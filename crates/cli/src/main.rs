mod args;
mod commands;
mod printing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use args::{CheckArgs, DecodeArgs, EncodeArgs};
use commands::{check, decode, encode, sequence, show_config};

/// Seqlink: shareable links for the indel prediction dashboard
///
/// Builds, decodes and checks the URL paths that restore a view of the
/// dashboard (single target, batch scan or gene scan) from a link.
#[derive(Parser, Debug)]
#[command(name = "seqlink")]
#[command(author, version, about = "Builds and checks shareable dashboard links", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Link configuration file (JSON)
    ///
    /// Overrides the base URL and the table column sets. Missing keys keep
    /// the dashboard defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print diagnostics, including why a link was rejected
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack a DNA sequence into URL-safe chunks and a leftover.
    EncodeSeq {
        /// Sequence over A, C, G, T
        sequence: String,
    },

    /// Unpack chunks and leftover back into the DNA sequence.
    DecodeSeq {
        /// Chunk field ('-' when the sequence is shorter than one k-mer)
        #[arg(allow_hyphen_values = true)]
        chunks: String,

        /// Leftover field ('-' when the length is a multiple of the k-mer size)
        #[arg(allow_hyphen_values = true)]
        leftover: String,
    },

    /// Build a link from a view state stored as JSON.
    Encode(EncodeArgs),

    /// Decode a link and print the view state as JSON.
    Decode(DecodeArgs),

    /// Check a file of links, one per line.
    ///
    /// Links are decoded in parallel; every rejected line is reported.
    Check(CheckArgs),

    /// Print the effective link configuration.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::EncodeSeq { sequence } => {
            sequence::encode_sequence(&sequence)?;
        }
        Commands::DecodeSeq { chunks, leftover } => {
            sequence::decode_sequence(&chunks, &leftover)?;
        }
        Commands::Encode(args) => {
            encode::encode_link(config, &args)?;
        }
        Commands::Decode(args) => {
            decode::decode_link(config, &args)?;
        }
        Commands::Check(args) => {
            check::check_links(config, &args)?;
        }
        Commands::Config => {
            show_config::show_config(&config)?;
        }
    }

    Ok(())
}
