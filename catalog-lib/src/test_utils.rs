// Test utilities available to both unit and integration tests
// Only compiled when testing

use rust_xlsxwriter::Workbook;
use std::path::Path;

use crate::table::{CellValue, SourceTable};

/// Text cells for one row
#[allow(dead_code)]
pub fn text_row(values: &[&str]) -> Vec<CellValue> {
    values
        .iter()
        .map(|value| CellValue::Text(value.to_string()))
        .collect()
}

/// Source table whose cells are all text
#[allow(dead_code)]
pub fn source_table(headers: &[&str], rows: &[&[&str]]) -> SourceTable {
    SourceTable::from_rows(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter().map(|row| text_row(row)).collect(),
    )
}

/// Build an .xlsx workbook in memory with a single sheet of text cells
#[allow(dead_code)]
pub fn xlsx_bytes(headers: &[&str], rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32 + 1, col as u16, *value)
                .unwrap();
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// Write an .xlsx workbook with a single sheet of text cells to `path`
#[allow(dead_code)]
pub fn write_xlsx(path: &Path, headers: &[&str], rows: &[&[&str]]) {
    std::fs::write(path, xlsx_bytes(headers, rows)).unwrap();
}
