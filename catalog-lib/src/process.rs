use std::path::Path;

use crate::aliases::AliasTable;
use crate::column_mapper::map_columns;
use crate::decoder::{DecodeError, DecoderChain};
use crate::table::{OutputTable, build_output_table};

/// Decode a spreadsheet, map its columns onto the target fields and build the export table
pub fn process_spreadsheet(
    path: &Path,
    sheet_name: Option<&str>,
    decoders: &DecoderChain,
    alias_table: &AliasTable,
) -> Result<OutputTable, DecodeError> {
    let source = decoders.decode(path, sheet_name)?;
    let column_map = map_columns(source.headers(), alias_table);

    let unmatched = column_map.unmatched();
    if !unmatched.is_empty() {
        tracing::info!(
            "{}: {} of {} fields left empty: {:?}",
            path.display(),
            unmatched.len(),
            alias_table.fields().count(),
            unmatched.iter().map(|f| f.name()).collect::<Vec<_>>()
        );
    }

    Ok(build_output_table(&source, &column_map, alias_table))
}
