//! Shareable-link codec for the indel prediction dashboard.
//!
//! Packs DNA sequences and view state into short, URL-safe paths and restores
//! them exactly. Decoding accepts arbitrary text and never panics; anything
//! malformed is rejected as a whole so the page falls back to its defaults.

mod alphabet;
mod columns;
mod config;
mod error;
mod fields;
mod modes;
mod schema;
mod sequence;
mod state;
mod traits;

use std::sync::OnceLock;

pub use alphabet::{KmerTable, BASES, KMER_LEN, SYMBOLS, TABLE_SIZE, TRIPLET_LEN};
pub use columns::{ColumnCatalog, ColumnUniverse, ADVANCED_COLUMNS};
pub use config::{LinkConfig, DEFAULT_BASE_URL};
pub use error::{ConfigError, DecodeError, EncodeError};
pub use fields::{CellType, GeneSymbol, Pam, SortDirection, MAX_GENE_SYMBOL_LEN, PAM_LEN};
pub use modes::{BatchCodec, GeneCodec, SingleCodec};
pub use schema::{FieldKind, FieldSpec, Mode, Schema, BATCH_SCHEMA, DELIMITER, GENE_SCHEMA, SINGLE_SCHEMA};
pub use sequence::{
    decode_sequence, decode_sequence_with, encode_sequence, encode_sequence_with,
    EncodedSequence, SENTINEL,
};
pub use state::{AdvancedOptions, BatchState, GeneState, ShareState, SingleState, TableView};
pub use traits::PathCodec;

/// Encodes and decodes links for every view.
///
/// Holds a reference to an immutable [`KmerTable`] and the column
/// configuration; it is `Send + Sync` and can be shared freely between
/// request handlers.
#[derive(Debug, Clone)]
pub struct LinkCodec<'t> {
    table: &'t KmerTable,
    config: LinkConfig,
}

impl LinkCodec<'static> {
    /// Codec backed by the process-wide table.
    pub fn new(config: LinkConfig) -> Self {
        Self::with_table(KmerTable::global(), config)
    }
}

impl Default for LinkCodec<'static> {
    fn default() -> Self {
        Self::new(LinkConfig::default())
    }
}

impl<'t> LinkCodec<'t> {
    pub fn with_table(table: &'t KmerTable, config: LinkConfig) -> Self {
        Self { table, config }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn single(&self) -> SingleCodec<'_> {
        SingleCodec::new(self.table)
    }

    pub fn batch(&self) -> BatchCodec<'_> {
        BatchCodec::new(self.table, &self.config.batch_columns)
    }

    pub fn gene(&self) -> GeneCodec<'_> {
        GeneCodec::new(self.table, &self.config.gene_columns)
    }

    /// Path for any view's state.
    pub fn encode(&self, state: &ShareState) -> Result<String, EncodeError> {
        let path = match state {
            ShareState::Single(s) => self.single().encode(s),
            ShareState::Batch(s) => self.batch().encode(s),
            ShareState::Gene(s) => self.gene().encode(s),
        }?;
        log::trace!("Encoded {} link ({} chars)", state.mode(), path.len());
        Ok(path)
    }

    pub fn encode_single(&self, state: &SingleState) -> Result<String, EncodeError> {
        self.single().encode(state)
    }

    pub fn encode_batch(&self, state: &BatchState) -> Result<String, EncodeError> {
        self.batch().encode(state)
    }

    pub fn encode_gene(&self, state: &GeneState) -> Result<String, EncodeError> {
        self.gene().encode(state)
    }

    /// Full shareable URL: configured base URL followed by the path.
    pub fn share_url(&self, state: &ShareState) -> Result<String, EncodeError> {
        Ok(format!("{}{}", self.config.base_url, self.encode(state)?))
    }

    /// Removes the configured base URL from a full link, if present.
    pub fn strip_base_url<'a>(&self, link: &'a str) -> &'a str {
        link.strip_prefix(self.config.base_url.as_str())
            .unwrap_or(link)
    }

    /// Decodes `path` as a link to `mode`, reporting why it was rejected.
    pub fn decode_detailed(&self, mode: Mode, path: &str) -> Result<ShareState, DecodeError> {
        match mode {
            Mode::Single => self.single().decode(path).map(ShareState::Single),
            Mode::Batch => self.batch().decode(path).map(ShareState::Batch),
            Mode::Gene => self.gene().decode(path).map(ShareState::Gene),
        }
    }

    /// Decodes `path` as a link to `mode`. `None` means the page should keep
    /// its default state.
    pub fn decode(&self, mode: Mode, path: &str) -> Option<ShareState> {
        accept(mode, self.decode_detailed(mode, path))
    }

    pub fn is_valid(&self, mode: Mode, path: &str) -> bool {
        self.decode(mode, path).is_some()
    }

    /// Decodes a path for whichever view its prefix names.
    pub fn decode_any(&self, path: &str) -> Option<ShareState> {
        self.decode(Mode::from_path(path)?, path)
    }

    pub fn decode_single(&self, path: &str) -> Option<SingleState> {
        accept(Mode::Single, self.single().decode(path))
    }

    pub fn decode_batch(&self, path: &str) -> Option<BatchState> {
        accept(Mode::Batch, self.batch().decode(path))
    }

    pub fn decode_gene(&self, path: &str) -> Option<GeneState> {
        accept(Mode::Gene, self.gene().decode(path))
    }
}

fn accept<T>(mode: Mode, result: Result<T, DecodeError>) -> Option<T> {
    match result {
        Ok(state) => Some(state),
        Err(e) => {
            log::debug!("Rejected {mode} link: {e}");
            None
        }
    }
}

static DEFAULT_CODEC: OnceLock<LinkCodec<'static>> = OnceLock::new();

/// Codec with the default configuration, built on first use.
pub fn default_codec() -> &'static LinkCodec<'static> {
    DEFAULT_CODEC.get_or_init(LinkCodec::default)
}

pub fn encode_single(state: &SingleState) -> Result<String, EncodeError> {
    default_codec().encode_single(state)
}

pub fn encode_batch(state: &BatchState) -> Result<String, EncodeError> {
    default_codec().encode_batch(state)
}

pub fn encode_gene(state: &GeneState) -> Result<String, EncodeError> {
    default_codec().encode_gene(state)
}

pub fn decode_single(path: &str) -> Option<SingleState> {
    default_codec().decode_single(path)
}

pub fn decode_batch(path: &str) -> Option<BatchState> {
    default_codec().decode_batch(path)
}

pub fn decode_gene(path: &str) -> Option<GeneState> {
    default_codec().decode_gene(path)
}
