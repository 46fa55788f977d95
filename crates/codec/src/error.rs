use thiserror::Error;

/// Why a link path was rejected.
///
/// Link decoding is all-or-nothing: the first failing check aborts the whole
/// decode, so an error never comes with a partially recovered record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Path does not start with '{expected}'")]
    InvalidPrefix { expected: String },

    #[error("Expected {expected} fields, found {found}")]
    InvalidFieldCount { expected: usize, found: usize },

    #[error("Invalid sequence encoding: {0}")]
    InvalidSequenceEncoding(String),

    #[error("Invalid value for '{field}': {value:?}")]
    InvalidScalarField { field: &'static str, value: String },

    #[error("Invalid bitmask for '{field}': expected {expected} binary digits, got {found:?}")]
    InvalidBitmask {
        field: &'static str,
        expected: usize,
        found: String,
    },

    #[error("Invalid literal for '{field}': {value:?}")]
    InvalidLiteral { field: &'static str, value: String },
}

/// Error raised when encoding state that the caller should never have built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("Invalid base {base:?} at position {position} (only A, C, G, T can be encoded)")]
    InvalidBase { base: char, position: usize },

    #[error("Invalid literal for '{field}': {value:?}")]
    InvalidLiteral { field: &'static str, value: String },

    #[error("Column {0:?} is not part of the column universe")]
    UnknownColumn(String),

    #[error("Cutsite {cutsite} lies outside a sequence of length {len}")]
    CutsiteOutOfRange { cutsite: usize, len: usize },
}

/// Error loading a [`LinkConfig`](crate::LinkConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
