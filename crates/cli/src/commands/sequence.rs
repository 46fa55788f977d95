use anyhow::{Context, Result};

pub fn encode_sequence(sequence: &str) -> Result<()> {
    let encoded = seqlink_codec::encode_sequence(sequence).context("Failed to encode sequence")?;
    log::debug!(
        "{} bp packed into {} chunks, {} leftover bases",
        sequence.len(),
        encoded.num_chunks(),
        sequence.len() % seqlink_codec::KMER_LEN
    );
    println!("{encoded}");
    Ok(())
}

pub fn decode_sequence(chunks: &str, leftover: &str) -> Result<()> {
    let sequence =
        seqlink_codec::decode_sequence(chunks, leftover).context("Failed to decode sequence")?;
    println!("{sequence}");
    Ok(())
}
