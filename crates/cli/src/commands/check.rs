use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use seqlink_codec::{DecodeError, LinkCodec, LinkConfig, Mode};

use crate::args::CheckArgs;
use crate::printing::{print_check_summary, print_rejected_link};

/// Outcome of checking one line of the input file.
#[derive(Debug)]
pub struct LinkCheck {
    pub line: usize,
    pub result: Result<Mode, LinkRejection>,
}

#[derive(Debug)]
pub enum LinkRejection {
    UnknownView,
    Invalid(DecodeError),
}

impl std::fmt::Display for LinkRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownView => f.write_str("Link does not name a view"),
            Self::Invalid(e) => write!(f, "{e}"),
        }
    }
}

fn check_link(codec: &LinkCodec<'_>, link: &str) -> Result<Mode, LinkRejection> {
    let path = codec.strip_base_url(link);
    let mode = Mode::from_path(path).ok_or(LinkRejection::UnknownView)?;
    codec
        .decode_detailed(mode, path)
        .map(|_| mode)
        .map_err(LinkRejection::Invalid)
}

pub fn check_links(config: LinkConfig, args: &CheckArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let links: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    log::info!(
        "Checking {} links from {}",
        links.len(),
        args.input.display()
    );

    let codec = LinkCodec::new(config);
    let checks: Vec<LinkCheck> = links
        .par_iter()
        .map(|&(line, link)| LinkCheck {
            line,
            result: check_link(&codec, link),
        })
        .collect();

    if !args.quiet {
        for check in &checks {
            if let Err(rejection) = &check.result {
                print_rejected_link(check.line, rejection);
            }
        }
    }
    print_check_summary(&checks);

    let invalid = checks.iter().filter(|c| c.result.is_err()).count();
    if invalid > 0 {
        bail!("{invalid} of {} links are invalid", checks.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_link() {
        let codec = LinkCodec::default();
        assert!(matches!(
            check_link(&codec, "/single_mESC_-_ACGT_2"),
            Ok(Mode::Single)
        ));
        assert!(matches!(
            check_link(
                &codec,
                "https://www.crisprindelphi.design/single_mESC_-_ACGT_2"
            ),
            Ok(Mode::Single)
        ));
        assert!(matches!(
            check_link(&codec, "/other_1"),
            Err(LinkRejection::UnknownView)
        ));
        assert!(matches!(
            check_link(&codec, "/single_mESC_-_ACGT"),
            Err(LinkRejection::Invalid(DecodeError::InvalidFieldCount { .. }))
        ));
    }
}
