//! Chunked encoding of DNA strings.
//!
//! A sequence is cut into non-overlapping 9-mers from the start. Each 9-mer
//! becomes one symbol triplet; the `len % 9` trailing bases are kept verbatim
//! as the leftover. Both parts are rendered as separate path fields, with
//! [`SENTINEL`] standing in for an empty part.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alphabet::{is_base, KmerTable, KMER_LEN, TRIPLET_LEN};
use crate::error::{DecodeError, EncodeError};

/// Literal marking an absent field.
pub const SENTINEL: &str = "-";

/// A DNA sequence split into encoded chunks and a verbatim leftover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedSequence {
    /// Concatenated symbol triplets, one per full k-mer.
    pub chunks: String,
    /// Trailing bases, always shorter than one k-mer.
    pub leftover: String,
}

impl EncodedSequence {
    /// Path field for the chunks.
    pub fn chunks_field(&self) -> &str {
        if self.chunks.is_empty() {
            SENTINEL
        } else {
            &self.chunks
        }
    }

    /// Path field for the leftover.
    pub fn leftover_field(&self) -> &str {
        if self.leftover.is_empty() {
            SENTINEL
        } else {
            &self.leftover
        }
    }

    /// Number of encoded k-mers.
    pub fn num_chunks(&self) -> usize {
        self.chunks.len() / TRIPLET_LEN
    }

    /// Length of the sequence this value decodes to.
    pub fn decoded_len(&self) -> usize {
        self.num_chunks() * KMER_LEN + self.leftover.len()
    }
}

impl fmt::Display for EncodedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.chunks_field(), self.leftover_field())
    }
}

/// Encodes `seq` with the process-wide table.
pub fn encode_sequence(seq: &str) -> Result<EncodedSequence, EncodeError> {
    encode_sequence_with(KmerTable::global(), seq)
}

/// Encodes `seq` with an explicit table.
pub fn encode_sequence_with(table: &KmerTable, seq: &str) -> Result<EncodedSequence, EncodeError> {
    if let Some((position, base)) = seq
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii() || !is_base(*c as u8))
    {
        return Err(EncodeError::InvalidBase { base, position });
    }

    let bytes = seq.as_bytes();
    let windows = bytes.chunks_exact(KMER_LEN);
    let leftover = windows.remainder();

    let mut chunks = String::with_capacity(bytes.len() / KMER_LEN * TRIPLET_LEN);
    for kmer in windows {
        let position = chunks.len() / TRIPLET_LEN * KMER_LEN;
        let triplet = table.triplet(kmer).ok_or(EncodeError::InvalidBase {
            base: kmer[0] as char,
            position,
        })?;
        chunks.extend(triplet.iter().map(|&b| b as char));
    }

    let encoded = EncodedSequence {
        chunks,
        leftover: leftover.iter().map(|&b| b as char).collect(),
    };
    log::trace!(
        "Encoded {} bases into {} chunks + {} leftover",
        seq.len(),
        encoded.num_chunks(),
        encoded.leftover.len()
    );
    Ok(encoded)
}

/// Decodes a pair of path fields with the process-wide table.
pub fn decode_sequence(chunks: &str, leftover: &str) -> Result<String, DecodeError> {
    decode_sequence_with(KmerTable::global(), chunks, leftover)
}

/// Decodes a pair of path fields with an explicit table.
///
/// `chunks` may be [`SENTINEL`] or empty for "no chunks"; `leftover` may be
/// [`SENTINEL`] for "no leftover".
pub fn decode_sequence_with(
    table: &KmerTable,
    chunks: &str,
    leftover: &str,
) -> Result<String, DecodeError> {
    let chunks = if chunks == SENTINEL { "" } else { chunks };
    let leftover = if leftover == SENTINEL {
        ""
    } else {
        validate_leftover(leftover)?
    };

    if chunks.len() % TRIPLET_LEN != 0 {
        return Err(DecodeError::InvalidSequenceEncoding(format!(
            "chunk length {} is not a multiple of {TRIPLET_LEN}",
            chunks.len()
        )));
    }

    let mut seq = String::with_capacity(chunks.len() / TRIPLET_LEN * KMER_LEN + leftover.len());
    for triplet in chunks.as_bytes().chunks_exact(TRIPLET_LEN) {
        let kmer = table.kmer(triplet).ok_or_else(|| {
            DecodeError::InvalidSequenceEncoding(format!(
                "unknown triplet {:?}",
                String::from_utf8_lossy(triplet)
            ))
        })?;
        seq.extend(kmer.iter().map(|&b| b as char));
    }
    seq.push_str(leftover);
    Ok(seq)
}

fn validate_leftover(leftover: &str) -> Result<&str, DecodeError> {
    if leftover.is_empty() || leftover.len() >= KMER_LEN {
        return Err(DecodeError::InvalidSequenceEncoding(format!(
            "leftover must hold 1 to {} bases, got {}",
            KMER_LEN - 1,
            leftover.len()
        )));
    }
    if !leftover.bytes().all(is_base) {
        return Err(DecodeError::InvalidSequenceEncoding(format!(
            "leftover {leftover:?} contains non-ACGT characters"
        )));
    }
    Ok(leftover)
}
