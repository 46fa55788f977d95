use super::{read_advanced, read_table_view, write_advanced, write_table_view};
use crate::alphabet::KmerTable;
use crate::columns::ColumnCatalog;
use crate::error::{DecodeError, EncodeError};
use crate::schema::{Schema, GENE_SCHEMA};
use crate::state::GeneState;
use crate::traits::PathCodec;

/// Links to the gene view. Same layout as the batch view, with the cell type
/// and gene symbol in place of the pasted sequence.
#[derive(Debug, Clone, Copy)]
pub struct GeneCodec<'t> {
    table: &'t KmerTable,
    columns: &'t ColumnCatalog,
}

impl<'t> GeneCodec<'t> {
    pub fn new(table: &'t KmerTable, columns: &'t ColumnCatalog) -> Self {
        Self { table, columns }
    }
}

impl PathCodec for GeneCodec<'_> {
    type State = GeneState;

    fn schema(&self) -> &'static Schema {
        &GENE_SCHEMA
    }

    fn encode(&self, state: &GeneState) -> Result<String, EncodeError> {
        let universe = self.columns.universe(state.advanced.enabled);
        let mut writer = GENE_SCHEMA.writer();
        writer.celltype(state.celltype);
        writer.gene(&state.gene);
        writer.pam(&state.pam);
        write_advanced(&mut writer, self.table, &state.advanced)?;
        write_table_view(&mut writer, &universe, &state.table)?;
        Ok(writer.finish())
    }

    fn decode(&self, path: &str) -> Result<GeneState, DecodeError> {
        let mut reader = GENE_SCHEMA.reader(path)?;
        let celltype = reader.celltype()?;
        let gene = reader.gene()?;
        let pam = reader.pam()?;
        let advanced = read_advanced(&mut reader, self.table)?;
        let universe = self.columns.universe(advanced.enabled);
        let table = read_table_view(&mut reader, &universe)?;
        reader.finish()?;

        Ok(GeneState {
            celltype,
            gene,
            pam,
            advanced,
            table,
        })
    }
}
