use anyhow::Context;
use catalog_lib::{ALIAS_TABLE, DecoderChain, output_filename, process_spreadsheet, write_csv_file};
use std::path::PathBuf;

use crate::config::ConvertArgs;

/// Convert a local spreadsheet and return the path of the written CSV
pub fn run_convert(args: &ConvertArgs) -> anyhow::Result<PathBuf> {
    let excel_name = args
        .excel_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file path: {}", args.excel_file.display()))?;

    let table = process_spreadsheet(
        &args.excel_file,
        args.sheet_name.as_deref(),
        &DecoderChain::default(),
        &ALIAS_TABLE,
    )?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Could not create {}", args.output_dir.display()))?;
    let csv_path = args.output_dir.join(output_filename(&excel_name));
    write_csv_file(&table, &csv_path)?;

    tracing::info!("Wrote {} rows to {}", table.row_count(), csv_path.display());
    Ok(csv_path)
}
