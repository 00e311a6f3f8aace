#![allow(clippy::needless_return)]

pub mod aliases;
pub mod column_mapper;
pub mod decoder;
pub mod export;
mod process;
pub mod table;
pub mod utils;

// Test utilities - only compiled when testing or with test feature
// #[cfg(test)] alone doesn't work for integration tests (they're external crates)
// The feature flag makes it available to integration tests via dev-dependencies
#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use aliases::{ALIAS_TABLE, AliasTable, TargetField};
pub use column_mapper::{ColumnMap, find_matching_column, map_columns};
pub use decoder::{DecodeError, DecoderChain, SheetDecoder, XlsDecoder, XlsxDecoder};
pub use export::{ExportError, output_filename, to_csv_bytes, write_csv, write_csv_file};
pub use process::process_spreadsheet;
pub use table::{CellValue, OutputTable, SourceTable, build_output_table};

pub const ERRORS_LOG_FILE: &str = "errors.log";
