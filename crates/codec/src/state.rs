//! View state carried by shareable links.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::columns::ColumnCatalog;
use crate::fields::{CellType, GeneSymbol, Pam, SortDirection};
use crate::schema::Mode;

/// Inputs of the single-target view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleState {
    pub celltype: CellType,
    /// Target sequence over `ACGT`.
    pub sequence: String,
    /// Position of the double-strand break, between `sequence[cutsite - 1]`
    /// and `sequence[cutsite]`.
    pub cutsite: usize,
}

/// Options that restrict predictions to a region or a desired repair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedOptions {
    pub enabled: bool,
    /// Desired repair product; empty when unused.
    #[serde(default)]
    pub match_sequence: String,
    #[serde(default)]
    pub point_of_interest: Option<usize>,
    #[serde(default)]
    pub deletion_start: Option<usize>,
    #[serde(default)]
    pub deletion_end: Option<usize>,
}

/// Layout of the statistics table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    #[serde(default)]
    pub chosen_columns: BTreeSet<String>,
    #[serde(default)]
    pub sort_column: Option<String>,
    #[serde(default)]
    pub sort_direction: SortDirection,
    #[serde(default)]
    pub selected_row: Option<usize>,
}

impl TableView {
    /// Table as first shown, before any user interaction.
    pub fn initial(catalog: &ColumnCatalog) -> Self {
        Self {
            chosen_columns: catalog.default_chosen.iter().cloned().collect(),
            ..Self::default()
        }
    }
}

/// Inputs of the batch view: scan one pasted sequence for PAM matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchState {
    pub sequence: String,
    #[serde(default)]
    pub pam: Pam,
    #[serde(default)]
    pub advanced: AdvancedOptions,
    #[serde(default)]
    pub table: TableView,
}

/// Inputs of the gene view: scan a gene for PAM matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneState {
    pub celltype: CellType,
    pub gene: GeneSymbol,
    #[serde(default)]
    pub pam: Pam,
    #[serde(default)]
    pub advanced: AdvancedOptions,
    #[serde(default)]
    pub table: TableView,
}

/// State of any view, tagged with its mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ShareState {
    Single(SingleState),
    Batch(BatchState),
    Gene(GeneState),
}

impl ShareState {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Single(_) => Mode::Single,
            Self::Batch(_) => Mode::Batch,
            Self::Gene(_) => Mode::Gene,
        }
    }
}

impl From<SingleState> for ShareState {
    fn from(state: SingleState) -> Self {
        Self::Single(state)
    }
}

impl From<BatchState> for ShareState {
    fn from(state: BatchState) -> Self {
        Self::Batch(state)
    }
}

impl From<GeneState> for ShareState {
    fn from(state: GeneState) -> Self {
        Self::Gene(state)
    }
}
