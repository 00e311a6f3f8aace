use catalog_lib::{ALIAS_TABLE, DecoderChain, OutputTable, process_spreadsheet, to_csv_bytes};
use std::path::Path;

// Re-export shared test utilities from src/test_utils.rs
pub use catalog_lib::test_utils::{source_table, text_row, write_xlsx};

/// Run the full decode, map and build pipeline with the default decoders
#[allow(dead_code)]
pub fn process_file(path: &Path) -> OutputTable {
    process_spreadsheet(path, None, &DecoderChain::default(), &ALIAS_TABLE).unwrap()
}

/// Export table rendered as CSV text
#[allow(dead_code)]
pub fn csv_text(table: &OutputTable) -> String {
    String::from_utf8(to_csv_bytes(table).unwrap()).unwrap()
}

/// Write a workbook into a fresh temp dir and process it
#[allow(dead_code)]
pub fn process_workbook(headers: &[&str], rows: &[&[&str]]) -> String {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.xlsx");
    write_xlsx(&path, headers, rows);
    csv_text(&process_file(&path))
}
