//! Per-column type inference.
//!
//! Both readers classify every cell into a [`ValueKind`], resolve one
//! [`ColumnType`] for the whole column, then materialize the cells as
//! [`CellValue`]s of that type.

use super::types::ColumnType;
use super::value::CellValue;

/// What a single cell looks like before the column type is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueKind {
    Missing,
    Integer,
    Float,
    Boolean,
    Text,
}

/// A spreadsheet cell as read from the workbook, before inference.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawCell {
    Empty,
    Int(i64),
    Number(f64),
    Bool(bool),
    Text(String),
}

impl RawCell {
    fn kind(&self) -> ValueKind {
        match self {
            RawCell::Empty => ValueKind::Missing,
            RawCell::Int(_) => ValueKind::Integer,
            RawCell::Number(n) if is_whole(*n) => ValueKind::Integer,
            RawCell::Number(_) => ValueKind::Float,
            RawCell::Bool(_) => ValueKind::Boolean,
            RawCell::Text(s) if CellValue::is_missing_marker(s) => ValueKind::Missing,
            RawCell::Text(_) => ValueKind::Text,
        }
    }

    fn display(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Int(i) => i.to_string(),
            RawCell::Number(n) if is_whole(*n) => (*n as i64).to_string(),
            RawCell::Number(n) => n.to_string(),
            RawCell::Bool(b) => b.to_string(),
            RawCell::Text(s) => s.clone(),
        }
    }
}

/// Whole numbers that fit an i64 read back as integers.
fn is_whole(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15
}

/// Classify a raw text field.
pub(crate) fn detect_value_kind(value: &str) -> ValueKind {
    if CellValue::is_missing_marker(value) {
        return ValueKind::Missing;
    }

    let trimmed = value.trim();
    if trimmed.parse::<i64>().is_ok() {
        ValueKind::Integer
    } else if trimmed.parse::<f64>().is_ok() {
        ValueKind::Float
    } else if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        ValueKind::Boolean
    } else {
        ValueKind::Text
    }
}

/// Resolve the column type from the kinds of its cells.
///
/// A column with no values at all is an all-missing numeric column. Integer
/// columns holding a missing cell widen to float.
pub(crate) fn resolve_type(kinds: impl IntoIterator<Item = ValueKind>) -> ColumnType {
    let mut has_missing = false;
    let mut has_integer = false;
    let mut has_float = false;
    let mut has_boolean = false;

    for kind in kinds {
        match kind {
            ValueKind::Missing => has_missing = true,
            ValueKind::Integer => has_integer = true,
            ValueKind::Float => has_float = true,
            ValueKind::Boolean => has_boolean = true,
            ValueKind::Text => return ColumnType::String,
        }
    }

    match (has_integer, has_float, has_boolean) {
        (_, _, true) if has_integer || has_float => ColumnType::String,
        (false, false, true) => ColumnType::Boolean,
        (true, false, false) if !has_missing => ColumnType::Integer,
        _ => ColumnType::Float,
    }
}

/// Infer a column from CSV text fields.
pub(crate) fn infer_text_column(fields: &[String]) -> (ColumnType, Vec<CellValue>) {
    let dtype = resolve_type(fields.iter().map(|f| detect_value_kind(f)));
    let values = fields.iter().map(|f| text_to_cell(f, dtype)).collect();
    (dtype, values)
}

fn text_to_cell(field: &str, dtype: ColumnType) -> CellValue {
    if CellValue::is_missing_marker(field) {
        return CellValue::Missing;
    }

    let trimmed = field.trim();
    match dtype {
        ColumnType::Integer => trimmed
            .parse::<i64>()
            .map(CellValue::Integer)
            .unwrap_or_else(|_| CellValue::Text(field.to_string())),
        ColumnType::Float => trimmed
            .parse::<f64>()
            .map(CellValue::Float)
            .unwrap_or_else(|_| CellValue::Text(field.to_string())),
        ColumnType::Boolean => CellValue::Boolean(trimmed.eq_ignore_ascii_case("true")),
        ColumnType::String => CellValue::Text(field.to_string()),
    }
}

/// Infer a column from typed spreadsheet cells.
pub(crate) fn infer_cell_column(cells: Vec<RawCell>) -> (ColumnType, Vec<CellValue>) {
    let dtype = resolve_type(cells.iter().map(RawCell::kind));
    let values = cells.into_iter().map(|c| raw_to_cell(c, dtype)).collect();
    (dtype, values)
}

fn raw_to_cell(cell: RawCell, dtype: ColumnType) -> CellValue {
    if cell.kind() == ValueKind::Missing {
        return CellValue::Missing;
    }

    match (dtype, cell) {
        (ColumnType::Integer, RawCell::Int(i)) => CellValue::Integer(i),
        (ColumnType::Integer, RawCell::Number(n)) => CellValue::Integer(n as i64),
        (ColumnType::Float, RawCell::Int(i)) => CellValue::Float(i as f64),
        (ColumnType::Float, RawCell::Number(n)) => CellValue::Float(n),
        (ColumnType::Boolean, RawCell::Bool(b)) => CellValue::Boolean(b),
        (_, other) => CellValue::Text(other.display()),
    }
}
