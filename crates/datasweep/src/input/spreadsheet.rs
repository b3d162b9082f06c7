//! Spreadsheet (`.xlsx`) reading.

use std::io::Cursor;

use calamine::{Data, ExcelDateTime, Reader, Xlsx};
use chrono::Timelike;

use super::parser::{build_table, normalize_headers};
use crate::error::{Result, SweepError};
use crate::schema::inference::{infer_cell_column, RawCell};
use crate::schema::Table;

/// Read the first worksheet; its first row is the header.
pub(crate) fn read_first_sheet(bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SweepError::EmptyData("Workbook has no worksheets".to_string()))??;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| SweepError::EmptyData("No columns found".to_string()))?;
    let headers = normalize_headers(header_row.iter().map(header_text).collect());

    let mut cells: Vec<Vec<RawCell>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (column, cell) in cells.iter_mut().zip(row.iter()) {
            column.push(raw_cell(cell));
        }
    }

    build_table(headers, cells.into_iter().map(infer_cell_column))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::DateTime(dt) => datetime_text(dt),
        other => other.to_string(),
    }
}

/// Error cells (`#N/A`, `#DIV/0!`, ...) read as missing.
fn raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::Int(i) => RawCell::Int(*i),
        Data::Float(f) => RawCell::Number(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::DateTime(dt) => RawCell::Text(datetime_text(dt)),
    }
}

/// ISO 8601 text for a date-formatted cell. Dates at midnight print without a
/// time; durations print as `h:mm:ss`.
fn datetime_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        let total = (dt.as_f64() * 86_400.0).round() as i64;
        let sign = if total < 0 { "-" } else { "" };
        let total = total.abs();
        return format!("{}{}:{:02}:{:02}", sign, total / 3600, total % 3600 / 60, total % 60);
    }

    match dt.as_datetime() {
        Some(value) if value.time().num_seconds_from_midnight() == 0 => {
            value.date().format("%Y-%m-%d").to_string()
        }
        Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        // outside chrono's range
        None => dt.as_f64().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CellValue, ColumnType};
    use rust_xlsxwriter::{Format, Workbook};

    fn dated_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let date = Format::new().set_num_format("yyyy-mm-dd");
        let stamp = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        let day = rust_xlsxwriter::ExcelDateTime::from_ymd(2024, 1, 15).unwrap();

        sheet.write_string(0, 0, "when").unwrap();
        sheet.write_string(0, 1, "n").unwrap();
        sheet.write_datetime_with_format(1, 0, &day, &date).unwrap();
        sheet.write_number(1, 1, 1).unwrap();
        sheet
            .write_datetime_with_format(2, 0, &day.clone().and_hms(10, 30, 0).unwrap(), &stamp)
            .unwrap();
        sheet.write_number(2, 1, 2).unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_date_cells_read_as_iso_text() {
        let table = read_first_sheet(&dated_workbook()).unwrap();

        let when = table.column("when").unwrap();
        assert_eq!(when.dtype, ColumnType::String);
        assert_eq!(
            when.values,
            vec![
                CellValue::Text("2024-01-15".into()),
                CellValue::Text("2024-01-15 10:30:00".into()),
            ]
        );
        assert_eq!(table.column("n").unwrap().dtype, ColumnType::Integer);
    }

    #[test]
    fn test_iso_cells_keep_their_text() {
        assert_eq!(
            raw_cell(&Data::DateTimeIso("2024-01-15T08:00:00".to_string())),
            RawCell::Text("2024-01-15T08:00:00".to_string())
        );
        assert_eq!(
            raw_cell(&Data::DurationIso("PT1H30M".to_string())),
            RawCell::Text("PT1H30M".to_string())
        );
    }

    #[test]
    fn test_garbage_bytes_fail() {
        let err = read_first_sheet(b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, SweepError::Spreadsheet(_)));
    }

    #[test]
    fn test_raw_cell_mapping() {
        assert_eq!(raw_cell(&Data::Empty), RawCell::Empty);
        assert_eq!(raw_cell(&Data::Float(2.5)), RawCell::Number(2.5));
        assert_eq!(raw_cell(&Data::Bool(true)), RawCell::Bool(true));
        assert_eq!(
            raw_cell(&Data::String("x".to_string())),
            RawCell::Text("x".to_string())
        );
    }
}
