//! Worksheet readers: workbook and CSV bytes to a row-major cell list

use crate::cell::CellValue;
use crate::error::Result;
use crate::options::ConvertOptions;
use calamine::{open_workbook_auto_from_rs, Reader};
use std::io::Cursor;

/// Substring that marks the worksheet holding the export
pub const SHEET_MARKER: &str = "Programming Details";

/// Read the programming-details worksheet of a workbook
///
/// Every sheet whose name contains [`SHEET_MARKER`] is eligible; the last one
/// in workbook order is used. Returns None when no sheet is eligible.
pub fn read_workbook(bytes: &[u8], options: &ConvertOptions) -> Result<Option<Vec<CellValue>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let Some(sheet_name) = workbook
        .sheet_names()
        .into_iter()
        .filter(|name| name.contains(SHEET_MARKER))
        .last()
    else {
        return Ok(None);
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let skip = usize::from(options.skip_header_row);

    let cells: Vec<CellValue> = range
        .rows()
        .skip(skip)
        .flat_map(|row| row.iter().map(CellValue::from))
        .collect();

    tracing::info!(sheet = %sheet_name, cells = cells.len(), "read worksheet");
    Ok(Some(cells))
}

/// Read a worksheet exported as CSV
pub fn read_csv_grid(bytes: &[u8], options: &ConvertOptions) -> Result<Vec<CellValue>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(options.skip_header_row)
        .flexible(true) // Rows carry varying numbers of fields
        .from_reader(bytes);

    let mut cells = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        cells.extend(record.iter().map(CellValue::from_text));
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_grid_row_major() {
        let csv = "Header A,Header B\nKASTA DEVICE,\n\"NAME:D300IB\nQTY:2\",Kitchen\n";
        let cells = read_csv_grid(csv.as_bytes(), &ConvertOptions::default()).unwrap();

        assert_eq!(
            cells,
            vec![
                CellValue::String("KASTA DEVICE".to_string()),
                CellValue::Empty,
                CellValue::String("NAME:D300IB\nQTY:2".to_string()),
                CellValue::String("Kitchen".to_string()),
            ]
        );
    }

    #[test]
    fn test_read_csv_grid_without_header() {
        let options = ConvertOptions {
            skip_header_row: false,
            ..ConvertOptions::default()
        };
        let cells = read_csv_grid(b"KASTA DEVICE\nNAME:Z2\n", &options).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].as_text(), Some("KASTA DEVICE"));
    }

    #[test]
    fn test_read_workbook_rejects_garbage() {
        assert!(read_workbook(b"not a workbook", &ConvertOptions::default()).is_err());
    }
}
