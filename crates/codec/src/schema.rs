//! Path layouts of the three dashboard views.
//!
//! Each view owns one [`Schema`]: its path prefix and the ordered list of
//! fields the path carries. Encoders write through a [`FieldWriter`] and
//! decoders read through a [`FieldReader`], both of which walk the same
//! schema, so field order and field count are defined in exactly one place.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alphabet::KmerTable;
use crate::columns::ColumnUniverse;
use crate::error::{DecodeError, EncodeError};
use crate::fields::{
    parse_celltype, parse_flag, parse_gene, parse_index, parse_mask, parse_optional_index,
    parse_pam, render_flag, render_mask, render_optional_index, CellType, GeneSymbol, Pam,
    SortDirection,
};
use crate::sequence::{decode_sequence_with, encode_sequence_with};

/// Field delimiter inside a path.
pub const DELIMITER: char = '_';

/// Dashboard view a link restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One target site in one sequence.
    Single,
    /// Every PAM match in a pasted sequence.
    Batch,
    /// Every PAM match in a gene.
    Gene,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Single, Mode::Batch, Mode::Gene];

    /// Literal written at the start of the path.
    pub const fn literal(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Batch => "batch",
            Self::Gene => "gene",
        }
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Single => &SINGLE_SCHEMA,
            Self::Batch => &BATCH_SCHEMA,
            Self::Gene => &GENE_SCHEMA,
        }
    }

    /// The view whose prefix `path` starts with.
    pub fn from_path(path: &str) -> Option<Self> {
        Mode::ALL
            .into_iter()
            .find(|mode| path.starts_with(mode.schema().prefix))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "batch" => Ok(Self::Batch),
            "gene" => Ok(Self::Gene),
            _ => Err(format!("Unknown mode: {s}. Available: single, batch, gene")),
        }
    }
}

/// Grammar of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// DNA over `ACGT`; two segments (chunks, leftover).
    Sequence,
    /// `1` or `0`.
    Flag,
    /// `1` ascending, `0` descending.
    Direction,
    /// Canonical decimal.
    Index,
    /// `-` or canonical decimal.
    OptionalIndex,
    /// Binary digits, one per column of the universe.
    Columns,
    CellType,
    Pam,
    Gene,
}

impl FieldKind {
    /// Number of path segments the field occupies.
    pub const fn width(self) -> usize {
        match self {
            Self::Sequence => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// Ordered field layout of one view.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub mode: Mode,
    /// Literal every path of this view starts with, including the first
    /// delimiter.
    pub prefix: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    /// Number of `_`-separated segments after the prefix.
    pub const fn segment_count(&self) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i < self.fields.len() {
            count += self.fields[i].kind.width();
            i += 1;
        }
        count
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }

    /// Checks prefix and segment count and hands out a reader over the
    /// segments.
    pub(crate) fn reader<'p>(&'static self, path: &'p str) -> Result<FieldReader<'p>, DecodeError> {
        let body = path
            .strip_prefix(self.prefix)
            .ok_or_else(|| DecodeError::InvalidPrefix {
                expected: self.prefix.to_string(),
            })?;

        let expected = self.segment_count();
        let segments: Vec<&str> = body.splitn(expected + 1, DELIMITER).collect();
        if segments.len() != expected {
            return Err(DecodeError::InvalidFieldCount {
                expected,
                found: body.split(DELIMITER).count(),
            });
        }

        Ok(FieldReader {
            schema: self,
            segments,
            field: 0,
            segment: 0,
        })
    }

    pub(crate) fn writer(&'static self) -> FieldWriter {
        FieldWriter {
            schema: self,
            path: String::from(self.prefix),
            field: 0,
            segments: 0,
        }
    }
}

pub static SINGLE_SCHEMA: Schema = Schema {
    mode: Mode::Single,
    prefix: "/single_",
    fields: &[
        field("celltype", FieldKind::CellType),
        field("sequence", FieldKind::Sequence),
        field("cutsite", FieldKind::Index),
    ],
};

pub static BATCH_SCHEMA: Schema = Schema {
    mode: Mode::Batch,
    prefix: "/batch_",
    fields: &[
        field("sequence", FieldKind::Sequence),
        field("pam", FieldKind::Pam),
        field("advanced", FieldKind::Flag),
        field("match_sequence", FieldKind::Sequence),
        field("point_of_interest", FieldKind::OptionalIndex),
        field("deletion_start", FieldKind::OptionalIndex),
        field("deletion_end", FieldKind::OptionalIndex),
        field("chosen_columns", FieldKind::Columns),
        field("sort_column", FieldKind::OptionalIndex),
        field("sort_direction", FieldKind::Direction),
        field("selected_row", FieldKind::OptionalIndex),
    ],
};

pub static GENE_SCHEMA: Schema = Schema {
    mode: Mode::Gene,
    prefix: "/gene_",
    fields: &[
        field("celltype", FieldKind::CellType),
        field("gene", FieldKind::Gene),
        field("pam", FieldKind::Pam),
        field("advanced", FieldKind::Flag),
        field("match_sequence", FieldKind::Sequence),
        field("point_of_interest", FieldKind::OptionalIndex),
        field("deletion_start", FieldKind::OptionalIndex),
        field("deletion_end", FieldKind::OptionalIndex),
        field("chosen_columns", FieldKind::Columns),
        field("sort_column", FieldKind::OptionalIndex),
        field("sort_direction", FieldKind::Direction),
        field("selected_row", FieldKind::OptionalIndex),
    ],
};

/// Cursor over the segments of a path whose prefix and segment count have
/// already been checked.
pub(crate) struct FieldReader<'p> {
    schema: &'static Schema,
    segments: Vec<&'p str>,
    field: usize,
    segment: usize,
}

impl<'p> FieldReader<'p> {
    /// Next field's name and raw segments. A kind mismatch means the caller
    /// walked the schema out of order; it is reported as a layout error
    /// rather than a panic.
    fn next(&mut self, kind: FieldKind) -> Result<(&'static str, &[&'p str]), DecodeError> {
        let layout_error = || DecodeError::InvalidFieldCount {
            expected: self.schema.segment_count(),
            found: self.segments.len(),
        };
        let spec = self
            .schema
            .fields
            .get(self.field)
            .filter(|spec| spec.kind == kind)
            .ok_or_else(layout_error)?;
        let end = self.segment + kind.width();
        let raw = self.segments.get(self.segment..end).ok_or_else(layout_error)?;
        self.field += 1;
        self.segment = end;
        Ok((spec.name, raw))
    }

    pub fn sequence(&mut self, table: &KmerTable) -> Result<String, DecodeError> {
        let (_, raw) = self.next(FieldKind::Sequence)?;
        decode_sequence_with(table, raw[0], raw[1])
    }

    pub fn flag(&mut self) -> Result<bool, DecodeError> {
        let (name, raw) = self.next(FieldKind::Flag)?;
        parse_flag(name, raw[0])
    }

    pub fn direction(&mut self) -> Result<SortDirection, DecodeError> {
        let (name, raw) = self.next(FieldKind::Direction)?;
        parse_flag(name, raw[0]).map(SortDirection::from_ascending)
    }

    /// Returns the field name alongside the value for callers that apply
    /// range checks of their own.
    pub fn index(&mut self) -> Result<(&'static str, usize), DecodeError> {
        let (name, raw) = self.next(FieldKind::Index)?;
        parse_index(name, raw[0]).map(|v| (name, v))
    }

    pub fn optional_index(&mut self) -> Result<Option<usize>, DecodeError> {
        let (name, raw) = self.next(FieldKind::OptionalIndex)?;
        parse_optional_index(name, raw[0])
    }

    pub fn columns(&mut self, universe: &ColumnUniverse) -> Result<BTreeSet<String>, DecodeError> {
        let (name, raw) = self.next(FieldKind::Columns)?;
        let mask = parse_mask(name, raw[0]).map_err(|_| DecodeError::InvalidBitmask {
            field: name,
            expected: universe.len(),
            found: raw[0].to_string(),
        })?;
        universe.from_mask(name, &mask)
    }

    /// Optional ordinal into `universe`, resolved to the column name.
    pub fn column_ordinal(&mut self, universe: &ColumnUniverse) -> Result<Option<String>, DecodeError> {
        let (name, raw) = self.next(FieldKind::OptionalIndex)?;
        match parse_optional_index(name, raw[0])? {
            None => Ok(None),
            Some(ordinal) => universe
                .get(ordinal)
                .map(|column| Some(column.to_string()))
                .ok_or_else(|| DecodeError::InvalidScalarField {
                    field: name,
                    value: raw[0].to_string(),
                }),
        }
    }

    pub fn celltype(&mut self) -> Result<CellType, DecodeError> {
        let (name, raw) = self.next(FieldKind::CellType)?;
        parse_celltype(name, raw[0])
    }

    pub fn pam(&mut self) -> Result<Pam, DecodeError> {
        let (name, raw) = self.next(FieldKind::Pam)?;
        parse_pam(name, raw[0])
    }

    pub fn gene(&mut self) -> Result<GeneSymbol, DecodeError> {
        let (name, raw) = self.next(FieldKind::Gene)?;
        parse_gene(name, raw[0])
    }

    /// Confirms every field of the schema was consumed.
    pub fn finish(self) -> Result<(), DecodeError> {
        if self.field == self.schema.fields.len() && self.segment == self.segments.len() {
            Ok(())
        } else {
            Err(DecodeError::InvalidFieldCount {
                expected: self.schema.segment_count(),
                found: self.segments.len(),
            })
        }
    }
}

/// Builds a path field by field, following the schema.
pub(crate) struct FieldWriter {
    schema: &'static Schema,
    path: String,
    field: usize,
    segments: usize,
}

impl FieldWriter {
    fn push(&mut self, kind: FieldKind, segments: &[&str]) {
        debug_assert_eq!(
            self.schema.fields.get(self.field).map(|spec| spec.kind),
            Some(kind),
            "field {} of {} written out of schema order",
            self.field,
            self.schema.mode
        );
        debug_assert_eq!(segments.len(), kind.width());
        for segment in segments {
            if self.segments > 0 {
                self.path.push(DELIMITER);
            }
            self.path.push_str(segment);
            self.segments += 1;
        }
        self.field += 1;
    }

    pub fn sequence(&mut self, table: &KmerTable, seq: &str) -> Result<(), EncodeError> {
        let encoded = encode_sequence_with(table, seq)?;
        self.push(
            FieldKind::Sequence,
            &[encoded.chunks_field(), encoded.leftover_field()],
        );
        Ok(())
    }

    pub fn flag(&mut self, flag: bool) {
        self.push(FieldKind::Flag, &[render_flag(flag)]);
    }

    pub fn direction(&mut self, direction: SortDirection) {
        self.push(FieldKind::Direction, &[render_flag(direction.is_ascending())]);
    }

    pub fn index(&mut self, value: usize) {
        self.push(FieldKind::Index, &[&value.to_string()]);
    }

    pub fn optional_index(&mut self, value: Option<usize>) {
        self.push(FieldKind::OptionalIndex, &[&render_optional_index(value)]);
    }

    pub fn columns(
        &mut self,
        universe: &ColumnUniverse,
        chosen: &BTreeSet<String>,
    ) -> Result<(), EncodeError> {
        let mask = universe.to_mask(chosen)?;
        self.push(FieldKind::Columns, &[&render_mask(&mask)]);
        Ok(())
    }

    pub fn column_ordinal(
        &mut self,
        universe: &ColumnUniverse,
        column: Option<&str>,
    ) -> Result<(), EncodeError> {
        let ordinal = column
            .map(|name| {
                universe
                    .position(name)
                    .ok_or_else(|| EncodeError::UnknownColumn(name.to_string()))
            })
            .transpose()?;
        self.optional_index(ordinal);
        Ok(())
    }

    pub fn celltype(&mut self, celltype: CellType) {
        self.push(FieldKind::CellType, &[celltype.literal()]);
    }

    pub fn pam(&mut self, pam: &Pam) {
        self.push(FieldKind::Pam, &[pam.as_str()]);
    }

    pub fn gene(&mut self, gene: &GeneSymbol) {
        self.push(FieldKind::Gene, &[gene.as_str()]);
    }

    pub fn finish(self) -> String {
        debug_assert_eq!(self.segments, self.schema.segment_count());
        self.path
    }
}
