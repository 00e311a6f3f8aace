use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::table::OutputTable;
use crate::utils::strip_extension;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error while writing CSV: {0}")]
    Io(#[from] std::io::Error),
}

/// Name of the download produced for an uploaded file
/// "Stock List.xlsx" -> "processed_Stock List.csv"
pub fn output_filename(uploaded_name: &str) -> String {
    format!("processed_{}.csv", strip_extension(uploaded_name))
}

/// Serialize the export table as CSV: a header row of field names, then one record per row
pub fn write_csv<W: Write>(table: &OutputTable, writer: W) -> Result<(), ExportError> {
    // Quote fields only when necessary (e.g., when they contain commas)
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record(table.headers())?;

    for row in table.rows() {
        let record: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Serialize the export table into an in-memory buffer
pub fn to_csv_bytes(table: &OutputTable) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    Ok(buffer)
}

/// Serialize the export table to `csv_path`, replacing any existing file
pub fn write_csv_file(table: &OutputTable, csv_path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(csv_path)?;
    write_csv(table, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::ALIAS_TABLE;
    use crate::column_mapper::map_columns;
    use crate::table::{CellValue, SourceTable, build_output_table};
    use crate::test_utils::source_table;

    fn export(source: &SourceTable) -> String {
        let column_map = map_columns(source.headers(), &ALIAS_TABLE);
        let output = build_output_table(source, &column_map, &ALIAS_TABLE);
        String::from_utf8(to_csv_bytes(&output).unwrap()).unwrap()
    }

    #[test]
    fn test_output_filename() {
        assert_eq!(output_filename("stock.xlsx"), "processed_stock.csv");
        assert_eq!(output_filename("Stock List.v2.xls"), "processed_Stock List.v2.csv");
        assert_eq!(output_filename("uploads/nested/prices.xlsx"), "processed_prices.csv");
        assert_eq!(output_filename("noext"), "processed_noext.csv");
    }

    #[test]
    fn test_csv_layout() {
        let source = source_table(&["UPC", "Product Name", "Cost (GBP)"], &[&["123456", "Widget", "9.99"]]);
        assert_eq!(
            export(&source),
            "ean,title,cost_gbp,family,subgroup\n123456,Widget,9.99,,\n"
        );
    }

    #[test]
    fn test_csv_quotes_only_when_needed() {
        let source = source_table(&["Title", "Category"], &[&["Bolt, M8", "Hardware"]]);
        assert_eq!(
            export(&source),
            "ean,title,cost_gbp,family,subgroup\n,\"Bolt, M8\",,Hardware,\n"
        );
    }

    #[test]
    fn test_csv_renders_typed_cells() {
        let source = SourceTable::from_rows(
            vec!["EAN".to_string(), "Price".to_string()],
            vec![vec![CellValue::Float(5012345678900.0), CellValue::Float(12.5)]],
        );
        assert_eq!(
            export(&source),
            "ean,title,cost_gbp,family,subgroup\n5012345678900,,12.5,,\n"
        );
    }

    #[test]
    fn test_csv_with_no_rows_has_only_header() {
        assert_eq!(
            export(&SourceTable::default()),
            "ean,title,cost_gbp,family,subgroup\n"
        );
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed_stock.csv");
        let source = source_table(&["Barcode"], &[&["1"], &["2"]]);
        let column_map = map_columns(source.headers(), &ALIAS_TABLE);
        let output = build_output_table(&source, &column_map, &ALIAS_TABLE);

        write_csv_file(&output, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "ean,title,cost_gbp,family,subgroup\n1,,,,\n2,,,,\n");
    }
}
