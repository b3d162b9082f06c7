//! CSV and spreadsheet encoders.

use rust_xlsxwriter::Workbook;

use crate::error::{Result, SweepError};
use crate::input::FileFormat;
use crate::schema::{CellValue, Table};

/// Largest sheet the spreadsheet format can hold, header row included.
const XLSX_MAX_ROWS: usize = 1_048_576;
const XLSX_MAX_COLUMNS: usize = 16_384;

/// Encode a table in the given format. No row index column is written.
pub fn encode(table: &Table, format: FileFormat) -> Result<Vec<u8>> {
    match format {
        FileFormat::Csv => encode_csv(table),
        FileFormat::Spreadsheet => encode_xlsx(table),
    }
}

/// Header row followed by one record per row.
///
/// A table without columns encodes to an empty body.
pub fn encode_csv(table: &Table) -> Result<Vec<u8>> {
    if table.column_count() == 0 {
        return Ok(Vec::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_field()))?;
    }

    writer
        .into_inner()
        .map_err(|e| SweepError::Encode(e.to_string()))
}

/// Single `Sheet1` worksheet: header row, then data rows.
///
/// Numbers and booleans are written as typed cells, missing values as blank
/// cells.
pub fn encode_xlsx(table: &Table) -> Result<Vec<u8>> {
    if table.column_count() > XLSX_MAX_COLUMNS {
        return Err(SweepError::Encode(format!(
            "{} columns exceed the spreadsheet limit of {}",
            table.column_count(),
            XLSX_MAX_COLUMNS
        )));
    }
    if table.row_count() + 1 > XLSX_MAX_ROWS {
        return Err(SweepError::Encode(format!(
            "{} rows exceed the spreadsheet limit of {}",
            table.row_count(),
            XLSX_MAX_ROWS - 1
        )));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in table.column_names().into_iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }

    for (index, row) in table.rows().enumerate() {
        let row_num = (index + 1) as u32;
        for (col, cell) in row.into_iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Missing => {}
                CellValue::Integer(i) => {
                    worksheet.write_number(row_num, col, *i as f64)?;
                }
                CellValue::Float(f) => {
                    worksheet.write_number(row_num, col, *f)?;
                }
                CellValue::Boolean(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
