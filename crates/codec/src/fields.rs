//! Typed literals and scalar grammars used inside link paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};
use crate::sequence::SENTINEL;

/// Cell line the prediction model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    #[serde(rename = "mESC")]
    Mesc,
    #[serde(rename = "U2OS")]
    U2os,
    #[serde(rename = "HEK293")]
    Hek293,
    #[serde(rename = "HCT116")]
    Hct116,
    #[serde(rename = "K562")]
    K562,
}

impl CellType {
    pub const ALL: [CellType; 5] = [
        CellType::Mesc,
        CellType::U2os,
        CellType::Hek293,
        CellType::Hct116,
        CellType::K562,
    ];

    /// Path literal for this cell type.
    pub const fn literal(self) -> &'static str {
        match self {
            Self::Mesc => "mESC",
            Self::U2os => "U2OS",
            Self::Hek293 => "HEK293",
            Self::Hct116 => "HCT116",
            Self::K562 => "K562",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl FromStr for CellType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellType::ALL
            .into_iter()
            .find(|c| c.literal() == s)
            .ok_or_else(|| {
                format!("Unknown cell type: {s}. Available: mESC, U2OS, HEK293, HCT116, K562")
            })
    }
}

/// Row ordering of the statistics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }

    pub const fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

/// IUPAC codes allowed in a PAM.
const PAM_CODES: &[u8] = b"ACGTRYSWKMBDHVN";

/// Minimum and maximum PAM length accepted by the batch views.
pub const PAM_LEN: std::ops::RangeInclusive<usize> = 2..=6;

/// Protospacer-adjacent motif, written in upper-case IUPAC DNA codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pam(String);

impl Pam {
    pub fn new(pam: impl Into<String>) -> Result<Self, EncodeError> {
        let pam = pam.into();
        if is_valid_pam(&pam) {
            Ok(Self(pam))
        } else {
            Err(EncodeError::InvalidLiteral {
                field: "pam",
                value: pam,
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_pam(pam: &str) -> bool {
    PAM_LEN.contains(&pam.len())
        && pam.bytes().all(|b| PAM_CODES.contains(&b))
        && pam.bytes().any(|b| b != b'N')
}

impl Default for Pam {
    fn default() -> Self {
        Self("NGG".to_string())
    }
}

impl fmt::Display for Pam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Pam {
    type Error = EncodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Pam::new(value)
    }
}

impl From<Pam> for String {
    fn from(pam: Pam) -> Self {
        pam.0
    }
}

/// Longest gene symbol accepted in a link.
pub const MAX_GENE_SYMBOL_LEN: usize = 32;

/// HGNC/MGI-style gene symbol, e.g. `BRCA1` or `HLA-A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GeneSymbol(String);

impl GeneSymbol {
    pub fn new(symbol: impl Into<String>) -> Result<Self, EncodeError> {
        let symbol = symbol.into();
        if is_valid_gene_symbol(&symbol) {
            Ok(Self(symbol))
        } else {
            Err(EncodeError::InvalidLiteral {
                field: "gene",
                value: symbol,
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_gene_symbol(symbol: &str) -> bool {
    (1..=MAX_GENE_SYMBOL_LEN).contains(&symbol.len())
        && symbol != SENTINEL
        && symbol
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
}

impl fmt::Display for GeneSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GeneSymbol {
    type Error = EncodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GeneSymbol::new(value)
    }
}

impl From<GeneSymbol> for String {
    fn from(symbol: GeneSymbol) -> Self {
        symbol.0
    }
}

pub(crate) fn render_flag(flag: bool) -> &'static str {
    if flag {
        "1"
    } else {
        "0"
    }
}

pub(crate) fn parse_flag(field: &'static str, raw: &str) -> Result<bool, DecodeError> {
    match raw {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => Err(DecodeError::InvalidScalarField {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Parses a canonical decimal: digits only, no sign, no leading zeros.
pub(crate) fn parse_index(field: &'static str, raw: &str) -> Result<usize, DecodeError> {
    let invalid = || DecodeError::InvalidScalarField {
        field,
        value: raw.to_string(),
    };
    let canonical = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));
    if !canonical {
        return Err(invalid());
    }
    raw.parse::<usize>().map_err(|_| invalid())
}

pub(crate) fn render_optional_index(value: Option<usize>) -> String {
    value.map_or_else(|| SENTINEL.to_string(), |v| v.to_string())
}

pub(crate) fn parse_optional_index(
    field: &'static str,
    raw: &str,
) -> Result<Option<usize>, DecodeError> {
    if raw == SENTINEL {
        Ok(None)
    } else {
        parse_index(field, raw).map(Some)
    }
}

pub(crate) fn render_mask(mask: &[bool]) -> String {
    mask.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}

/// Parses a string of binary digits. Width is checked by the caller, which
/// knows the column universe.
pub(crate) fn parse_mask(field: &'static str, raw: &str) -> Result<Vec<bool>, DecodeError> {
    raw.bytes()
        .map(|b| match b {
            b'1' => Ok(true),
            b'0' => Ok(false),
            _ => Err(DecodeError::InvalidBitmask {
                field,
                expected: raw.len(),
                found: raw.to_string(),
            }),
        })
        .collect()
}

pub(crate) fn parse_celltype(field: &'static str, raw: &str) -> Result<CellType, DecodeError> {
    raw.parse().map_err(|_| DecodeError::InvalidLiteral {
        field,
        value: raw.to_string(),
    })
}

pub(crate) fn parse_pam(field: &'static str, raw: &str) -> Result<Pam, DecodeError> {
    Pam::new(raw).map_err(|_| DecodeError::InvalidLiteral {
        field,
        value: raw.to_string(),
    })
}

pub(crate) fn parse_gene(field: &'static str, raw: &str) -> Result<GeneSymbol, DecodeError> {
    GeneSymbol::new(raw).map_err(|_| DecodeError::InvalidLiteral {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celltype_literals_round_trip() {
        for cell in CellType::ALL {
            assert_eq!(cell.literal().parse::<CellType>(), Ok(cell));
            assert!(!cell.literal().contains('_'));
        }
        assert!("mesc".parse::<CellType>().is_err());
    }

    #[test]
    fn test_celltype_serde_uses_literal() {
        let json = serde_json::to_string(&CellType::Hek293).unwrap();
        assert_eq!(json, "\"HEK293\"");
    }

    #[test]
    fn test_pam_validation() {
        assert!(Pam::new("NGG").is_ok());
        assert!(Pam::new("NNNRRT").is_ok());
        assert!(Pam::new("TTTV").is_ok());
        assert!(Pam::new("N").is_err());
        assert!(Pam::new("NN").is_err());
        assert!(Pam::new("NGGNGGN").is_err());
        assert!(Pam::new("ngg").is_err());
        assert!(Pam::new("NG_").is_err());
        assert_eq!(Pam::default().as_str(), "NGG");
    }

    #[test]
    fn test_pam_deserialize_validates() {
        assert!(serde_json::from_str::<Pam>("\"NGG\"").is_ok());
        assert!(serde_json::from_str::<Pam>("\"XYZ\"").is_err());
    }

    #[test]
    fn test_gene_symbol_validation() {
        assert!(GeneSymbol::new("BRCA1").is_ok());
        assert!(GeneSymbol::new("HLA-A").is_ok());
        assert!(GeneSymbol::new("C9orf72").is_ok());
        assert!(GeneSymbol::new("").is_err());
        assert!(GeneSymbol::new("-").is_err());
        assert!(GeneSymbol::new("BAD_GENE").is_err());
        assert!(GeneSymbol::new("A".repeat(33)).is_err());
    }

    #[test]
    fn test_parse_index_is_canonical() {
        assert_eq!(parse_index("x", "0"), Ok(0));
        assert_eq!(parse_index("x", "120"), Ok(120));
        assert!(parse_index("x", "").is_err());
        assert!(parse_index("x", "007").is_err());
        assert!(parse_index("x", "+5").is_err());
        assert!(parse_index("x", "-5").is_err());
        assert!(parse_index("x", "1e3").is_err());
        assert!(parse_index("x", "99999999999999999999999999").is_err());
    }

    #[test]
    fn test_optional_index() {
        assert_eq!(parse_optional_index("poi", "-"), Ok(None));
        assert_eq!(parse_optional_index("poi", "42"), Ok(Some(42)));
        assert_eq!(render_optional_index(None), "-");
        assert_eq!(render_optional_index(Some(42)), "42");
        let err = parse_optional_index("poi", "--").unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidScalarField {
                field: "poi",
                value: "--".to_string()
            }
        );
    }

    #[test]
    fn test_flag() {
        assert_eq!(parse_flag("adv", "1"), Ok(true));
        assert_eq!(parse_flag("adv", "0"), Ok(false));
        assert!(parse_flag("adv", "true").is_err());
        assert_eq!(render_flag(false), "0");
    }

    #[test]
    fn test_mask() {
        assert_eq!(parse_mask("cols", "101"), Ok(vec![true, false, true]));
        assert!(parse_mask("cols", "10a").is_err());
        assert_eq!(render_mask(&[false, true]), "01");
    }
}
