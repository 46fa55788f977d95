use super::{read_advanced, read_table_view, write_advanced, write_table_view};
use crate::alphabet::KmerTable;
use crate::columns::ColumnCatalog;
use crate::error::{DecodeError, EncodeError};
use crate::schema::{Schema, BATCH_SCHEMA};
use crate::state::BatchState;
use crate::traits::PathCodec;

/// Links to the batch view.
///
/// The column bitmask and sort ordinal refer to the catalog's universe for
/// the link's own advanced-options flag, so the flag is read before the
/// table fields.
#[derive(Debug, Clone, Copy)]
pub struct BatchCodec<'t> {
    table: &'t KmerTable,
    columns: &'t ColumnCatalog,
}

impl<'t> BatchCodec<'t> {
    pub fn new(table: &'t KmerTable, columns: &'t ColumnCatalog) -> Self {
        Self { table, columns }
    }
}

impl PathCodec for BatchCodec<'_> {
    type State = BatchState;

    fn schema(&self) -> &'static Schema {
        &BATCH_SCHEMA
    }

    fn encode(&self, state: &BatchState) -> Result<String, EncodeError> {
        let universe = self.columns.universe(state.advanced.enabled);
        let mut writer = BATCH_SCHEMA.writer();
        writer.sequence(self.table, &state.sequence)?;
        writer.pam(&state.pam);
        write_advanced(&mut writer, self.table, &state.advanced)?;
        write_table_view(&mut writer, &universe, &state.table)?;
        Ok(writer.finish())
    }

    fn decode(&self, path: &str) -> Result<BatchState, DecodeError> {
        let mut reader = BATCH_SCHEMA.reader(path)?;
        let sequence = reader.sequence(self.table)?;
        let pam = reader.pam()?;
        let advanced = read_advanced(&mut reader, self.table)?;
        let universe = self.columns.universe(advanced.enabled);
        let table = read_table_view(&mut reader, &universe)?;
        reader.finish()?;

        Ok(BatchState {
            sequence,
            pam,
            advanced,
            table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Pam, SortDirection};
    use crate::state::{AdvancedOptions, TableView};
    use std::collections::BTreeSet;

    fn columns(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn decode(path: &str) -> Result<BatchState, DecodeError> {
        let catalog = ColumnCatalog::batch();
        BatchCodec::new(KmerTable::global(), &catalog).decode(path)
    }

    fn encode(state: &BatchState) -> Result<String, EncodeError> {
        let catalog = ColumnCatalog::batch();
        BatchCodec::new(KmerTable::global(), &catalog).encode(state)
    }

    fn basic_state() -> BatchState {
        BatchState {
            sequence: "ACGT".to_string(),
            pam: Pam::default(),
            advanced: AdvancedOptions::default(),
            table: TableView::initial(&ColumnCatalog::batch()),
        }
    }

    #[test]
    fn test_unset_fields_use_sentinels() {
        let path = encode(&basic_state()).unwrap();
        assert_eq!(path, "/batch_-_ACGT_NGG_0_-_-_-_-_-_10000110101_-_0_-");

        let decoded = decode(&path).unwrap();
        assert!(!decoded.advanced.enabled);
        assert_eq!(decoded.advanced.point_of_interest, None);
        assert_eq!(decoded.table.selected_row, None);
        assert_eq!(decoded, basic_state());
    }

    #[test]
    fn test_round_trip_with_advanced_options() {
        let state = BatchState {
            sequence: "TTGACCATGCATGGCAAGTCTAGGACTTGGCATCGGATCAGGTTCCAA".to_string(),
            pam: Pam::new("NNNRRT").unwrap(),
            advanced: AdvancedOptions {
                enabled: true,
                match_sequence: "GCATGGCAAGTCTAG".to_string(),
                point_of_interest: Some(21),
                deletion_start: Some(10),
                deletion_end: Some(30),
            },
            table: TableView {
                chosen_columns: columns(&["Dist. to POI", "Precision", "Repairs to spec."]),
                sort_column: Some("Dist. to POI".to_string()),
                sort_direction: SortDirection::Ascending,
                selected_row: Some(0),
            },
        };
        let path = encode(&state).unwrap();
        assert_eq!(path.split('_').count(), 14);
        assert_eq!(decode(&path).unwrap(), state);
    }

    #[test]
    fn test_advanced_columns_need_advanced_flag() {
        let mut state = basic_state();
        state.table.chosen_columns = columns(&["Deletes spec."]);
        assert_eq!(
            encode(&state),
            Err(EncodeError::UnknownColumn("Deletes spec.".to_string()))
        );
    }

    #[test]
    fn test_extra_field_rejected() {
        let path = encode(&basic_state()).unwrap();
        assert!(matches!(
            decode(&format!("{path}_-")),
            Err(DecodeError::InvalidFieldCount {
                expected: 13,
                found: 14
            })
        ));
    }

    #[test]
    fn test_foreign_chunk_symbol_rejected() {
        assert!(matches!(
            decode("/batch_0!0_-_NGG_0_-_-_-_-_-_10000110101_-_0_-"),
            Err(DecodeError::InvalidSequenceEncoding(_))
        ));
    }

    #[test]
    fn test_mask_width_follows_advanced_flag() {
        // 11 bits are right without advanced options, wrong with them.
        assert!(decode("/batch_-_ACGT_NGG_0_-_-_-_-_-_10000110101_-_0_-").is_ok());
        assert!(matches!(
            decode("/batch_-_ACGT_NGG_1_-_-_-_-_-_10000110101_-_0_-"),
            Err(DecodeError::InvalidBitmask { expected: 14, .. })
        ));
    }

    #[test]
    fn test_sort_ordinal_out_of_range() {
        assert!(decode("/batch_-_ACGT_NGG_0_-_-_-_-_-_10000110101_10_0_-").is_ok());
        assert!(matches!(
            decode("/batch_-_ACGT_NGG_0_-_-_-_-_-_10000110101_11_0_-"),
            Err(DecodeError::InvalidScalarField { field: "sort_column", .. })
        ));
    }

    #[test]
    fn test_sort_ordinal_resolves_alphabetically() {
        let decoded = decode("/batch_-_ACGT_NGG_0_-_-_-_-_-_10000110101_0_1_-").unwrap();
        assert_eq!(decoded.table.sort_column.as_deref(), Some("Cutsite"));
        assert_eq!(decoded.table.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_bad_pam_rejected() {
        assert!(matches!(
            decode("/batch_-_ACGT_NN_0_-_-_-_-_-_10000110101_-_0_-"),
            Err(DecodeError::InvalidLiteral { field: "pam", .. })
        ));
    }
}
