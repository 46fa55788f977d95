use crate::alphabet::KmerTable;
use crate::error::{DecodeError, EncodeError};
use crate::schema::{Schema, SINGLE_SCHEMA};
use crate::state::SingleState;
use crate::traits::PathCodec;

/// Links to the single-target view:
/// `/single_<celltype>_<chunks>_<leftover>_<cutsite>`.
#[derive(Debug, Clone, Copy)]
pub struct SingleCodec<'t> {
    table: &'t KmerTable,
}

impl<'t> SingleCodec<'t> {
    pub fn new(table: &'t KmerTable) -> Self {
        Self { table }
    }
}

impl PathCodec for SingleCodec<'_> {
    type State = SingleState;

    fn schema(&self) -> &'static Schema {
        &SINGLE_SCHEMA
    }

    fn encode(&self, state: &SingleState) -> Result<String, EncodeError> {
        let mut writer = SINGLE_SCHEMA.writer();
        writer.celltype(state.celltype);
        writer.sequence(self.table, &state.sequence)?;
        if state.cutsite > state.sequence.len() {
            return Err(EncodeError::CutsiteOutOfRange {
                cutsite: state.cutsite,
                len: state.sequence.len(),
            });
        }
        writer.index(state.cutsite);
        Ok(writer.finish())
    }

    fn decode(&self, path: &str) -> Result<SingleState, DecodeError> {
        let mut reader = SINGLE_SCHEMA.reader(path)?;
        let celltype = reader.celltype()?;
        let sequence = reader.sequence(self.table)?;
        let (field, cutsite) = reader.index()?;
        reader.finish()?;

        if cutsite > sequence.len() {
            return Err(DecodeError::InvalidScalarField {
                field,
                value: cutsite.to_string(),
            });
        }
        Ok(SingleState {
            celltype,
            sequence,
            cutsite,
        })
    }
}
