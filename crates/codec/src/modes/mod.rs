mod batch;
mod gene;
mod single;

pub use batch::BatchCodec;
pub use gene::GeneCodec;
pub use single::SingleCodec;

use crate::alphabet::KmerTable;
use crate::columns::ColumnUniverse;
use crate::error::{DecodeError, EncodeError};
use crate::schema::{FieldReader, FieldWriter};
use crate::state::{AdvancedOptions, TableView};

// Field groups shared by the batch and gene layouts.

fn write_advanced(
    writer: &mut FieldWriter,
    table: &KmerTable,
    advanced: &AdvancedOptions,
) -> Result<(), EncodeError> {
    writer.flag(advanced.enabled);
    writer.sequence(table, &advanced.match_sequence)?;
    writer.optional_index(advanced.point_of_interest);
    writer.optional_index(advanced.deletion_start);
    writer.optional_index(advanced.deletion_end);
    Ok(())
}

fn read_advanced(
    reader: &mut FieldReader<'_>,
    table: &KmerTable,
) -> Result<AdvancedOptions, DecodeError> {
    Ok(AdvancedOptions {
        enabled: reader.flag()?,
        match_sequence: reader.sequence(table)?,
        point_of_interest: reader.optional_index()?,
        deletion_start: reader.optional_index()?,
        deletion_end: reader.optional_index()?,
    })
}

fn write_table_view(
    writer: &mut FieldWriter,
    universe: &ColumnUniverse,
    view: &TableView,
) -> Result<(), EncodeError> {
    writer.columns(universe, &view.chosen_columns)?;
    writer.column_ordinal(universe, view.sort_column.as_deref())?;
    writer.direction(view.sort_direction);
    writer.optional_index(view.selected_row);
    Ok(())
}

fn read_table_view(
    reader: &mut FieldReader<'_>,
    universe: &ColumnUniverse,
) -> Result<TableView, DecodeError> {
    Ok(TableView {
        chosen_columns: reader.columns(universe)?,
        sort_column: reader.column_ordinal(universe)?,
        sort_direction: reader.direction()?,
        selected_row: reader.optional_index()?,
    })
}
