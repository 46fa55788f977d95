//! Column sets for the statistics table of the batch and gene views.
//!
//! Chosen columns travel as a bitmask and the sort column as an ordinal.
//! Both index into the alphabetically sorted column universe, never into the
//! order the columns happen to be declared or displayed in, because the set
//! of available columns depends on which options produced the predictions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};

/// Columns only present when advanced options were enabled.
pub const ADVANCED_COLUMNS: [&str; 3] = ["Repairs to spec.", "Deletes spec.", "Dist. to POI"];

/// A sorted, duplicate-free set of selectable column names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnUniverse {
    names: Vec<String>,
}

impl ColumnUniverse {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        Self {
            names: sorted.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in canonical (alphabetical) order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Canonical ordinal of a column.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names
            .binary_search_by(|probe| probe.as_str().cmp(name))
            .ok()
    }

    pub fn get(&self, ordinal: usize) -> Option<&str> {
        self.names.get(ordinal).map(String::as_str)
    }

    /// One bit per column of the universe, set for each chosen column.
    pub fn to_mask(&self, chosen: &BTreeSet<String>) -> Result<Vec<bool>, EncodeError> {
        if let Some(unknown) = chosen.iter().find(|c| !self.contains(c)) {
            return Err(EncodeError::UnknownColumn(unknown.clone()));
        }
        Ok(self.names.iter().map(|name| chosen.contains(name)).collect())
    }

    /// Inverse of [`to_mask`](Self::to_mask). The mask must be exactly as
    /// wide as the universe.
    pub fn from_mask(
        &self,
        field: &'static str,
        mask: &[bool],
    ) -> Result<BTreeSet<String>, DecodeError> {
        if mask.len() != self.len() {
            return Err(DecodeError::InvalidBitmask {
                field,
                expected: self.len(),
                found: crate::fields::render_mask(mask),
            });
        }
        Ok(self
            .names
            .iter()
            .zip(mask)
            .filter(|(_, bit)| **bit)
            .map(|(name, _)| name.clone())
            .collect())
    }
}

/// Column configuration of one table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCatalog {
    /// Columns always offered.
    pub base: Vec<String>,
    /// Columns offered only when advanced options are enabled.
    #[serde(default)]
    pub advanced: Vec<String>,
    /// Columns shown before the user picks any.
    #[serde(default)]
    pub default_chosen: Vec<String>,
}

impl ColumnCatalog {
    /// Columns of the batch (sequence scan) view.
    pub fn batch() -> Self {
        Self::with_mh_column(
            "Log phi",
            &["Cutsite", "Precision", "Frameshift (%)", "Log phi", "M.F. gt (%)"],
        )
    }

    /// Columns of the gene scan view.
    pub fn gene() -> Self {
        Self::with_mh_column(
            "MH strength",
            &["Precision", "Frameshift (%)", "MH strength", "M.F. gt (%)"],
        )
    }

    fn with_mh_column(mh_column: &str, default_chosen: &[&str]) -> Self {
        let base = [
            "Cutsite",
            "Precision",
            "Frameshift (%)",
            "Frame +0 (%)",
            "Frame +1 (%)",
            "Frame +2 (%)",
            mh_column,
            "M.F. gt (%)",
            "M.F. del (%)",
            "M.F. ins (%)",
            "Exp. indel len",
        ];
        Self {
            base: base.iter().map(|s| s.to_string()).collect(),
            advanced: ADVANCED_COLUMNS.iter().map(|s| s.to_string()).collect(),
            default_chosen: default_chosen.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Universe offered for the given state of the advanced options flag.
    pub fn universe(&self, advanced: bool) -> ColumnUniverse {
        let extra = if advanced { self.advanced.as_slice() } else { &[] };
        ColumnUniverse::new(self.base.iter().chain(extra).cloned())
    }

    pub(crate) fn validate(&self, name: &str) -> Result<(), String> {
        if self.base.is_empty() {
            return Err(format!("{name}: base column list is empty"));
        }
        let universe = self.universe(true);
        if let Some(bad) = self.base.iter().chain(&self.advanced).find(|c| c.is_empty()) {
            return Err(format!("{name}: empty column name {bad:?}"));
        }
        if let Some(missing) = self.default_chosen.iter().find(|c| !universe.contains(c)) {
            return Err(format!("{name}: default column {missing:?} is not offered"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_universe_is_sorted_and_deduplicated() {
        let universe = ColumnUniverse::new(["b", "a", "c", "a"]);
        assert_eq!(universe.names(), &["a", "b", "c"]);
        assert_eq!(universe.position("c"), Some(2));
        assert_eq!(universe.position("z"), None);
        assert_eq!(universe.get(1), Some("b"));
        assert_eq!(universe.get(3), None);
    }

    #[test]
    fn test_mask_ignores_declaration_order() {
        let declared = ColumnUniverse::new(["Precision", "Cutsite", "Log phi"]);
        let reordered = ColumnUniverse::new(["Log phi", "Precision", "Cutsite"]);
        let chosen = set(&["Precision", "Cutsite"]);
        assert_eq!(declared.to_mask(&chosen), reordered.to_mask(&chosen));
        // Alphabetical: Cutsite, Log phi, Precision
        assert_eq!(declared.to_mask(&chosen).unwrap(), vec![true, false, true]);
    }

    #[test]
    fn test_mask_round_trip() {
        let universe = ColumnCatalog::batch().universe(false);
        let chosen = set(&["Exp. indel len", "M.F. gt (%)", "Precision"]);
        let mask = universe.to_mask(&chosen).unwrap();
        assert_eq!(mask.len(), 11);
        assert_eq!(universe.from_mask("cols", &mask).unwrap(), chosen);
    }

    #[test]
    fn test_unknown_column_rejected() {
        let universe = ColumnCatalog::batch().universe(false);
        let err = universe.to_mask(&set(&["Dist. to POI"])).unwrap_err();
        assert_eq!(err, EncodeError::UnknownColumn("Dist. to POI".to_string()));
    }

    #[test]
    fn test_mask_width_checked() {
        let universe = ColumnUniverse::new(["a", "b"]);
        let err = universe.from_mask("cols", &[true]).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidBitmask { expected: 2, .. }));
    }

    #[test]
    fn test_advanced_universe_is_wider() {
        let catalog = ColumnCatalog::gene();
        assert_eq!(catalog.universe(false).len(), 11);
        assert_eq!(catalog.universe(true).len(), 14);
        assert!(catalog.universe(true).contains("Dist. to POI"));
        assert!(catalog.universe(false).contains("MH strength"));
    }

    #[test]
    fn test_default_catalogs_validate() {
        assert!(ColumnCatalog::batch().validate("batch").is_ok());
        assert!(ColumnCatalog::gene().validate("gene").is_ok());

        let mut broken = ColumnCatalog::batch();
        broken.default_chosen.push("Nope".to_string());
        assert!(broken.validate("batch").is_err());
    }
}
