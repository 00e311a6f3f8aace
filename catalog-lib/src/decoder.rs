//! Spreadsheet decoding on top of calamine.
//!
//! Each format is a [`SheetDecoder`] strategy; [`DecoderChain`] tries them in
//! order and keeps the first table that decodes.

use calamine::{Data, Reader, Xls, Xlsx, open_workbook};
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

use crate::table::{CellValue, SourceTable};
use crate::utils::excel_serial_to_datetime;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Error reading file: {message}")]
    Failed {
        decoder: &'static str,
        message: String,
    },

    #[error("Error reading file: no spreadsheet decoders configured")]
    NoDecoders,
}

/// A strategy able to turn a spreadsheet file into a [`SourceTable`]
pub trait SheetDecoder: Send + Sync {
    /// Short format name used in logs
    fn name(&self) -> &'static str;

    /// Decode `sheet_name`, or the first worksheet when `None`
    fn decode(&self, path: &Path, sheet_name: Option<&str>) -> Result<SourceTable, DecodeError>;
}

/// Office Open XML workbooks (.xlsx, .xlsm)
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxDecoder;

impl SheetDecoder for XlsxDecoder {
    fn name(&self) -> &'static str {
        "xlsx"
    }

    fn decode(&self, path: &Path, sheet_name: Option<&str>) -> Result<SourceTable, DecodeError> {
        decode_workbook::<Xlsx<_>>(path, sheet_name).map_err(|message| DecodeError::Failed {
            decoder: self.name(),
            message,
        })
    }
}

/// Legacy BIFF workbooks (.xls)
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsDecoder;

impl SheetDecoder for XlsDecoder {
    fn name(&self) -> &'static str {
        "xls"
    }

    fn decode(&self, path: &Path, sheet_name: Option<&str>) -> Result<SourceTable, DecodeError> {
        decode_workbook::<Xls<_>>(path, sheet_name).map_err(|message| DecodeError::Failed {
            decoder: self.name(),
            message,
        })
    }
}

/// Ordered list of decoders; the first success wins
pub struct DecoderChain {
    decoders: Vec<Box<dyn SheetDecoder>>,
}

impl Default for DecoderChain {
    /// xlsx first, then the legacy xls reader
    fn default() -> Self {
        DecoderChain::empty()
            .with_decoder(XlsxDecoder)
            .with_decoder(XlsDecoder)
    }
}

impl DecoderChain {
    pub fn empty() -> Self {
        DecoderChain {
            decoders: Vec::new(),
        }
    }

    pub fn with_decoder<D: SheetDecoder + 'static>(mut self, decoder: D) -> Self {
        self.decoders.push(Box::new(decoder));
        self
    }

    pub fn decoder_names(&self) -> Vec<&'static str> {
        self.decoders.iter().map(|d| d.name()).collect()
    }

    /// Try every decoder in turn. If all of them fail, the last failure is returned.
    pub fn decode(&self, path: &Path, sheet_name: Option<&str>) -> Result<SourceTable, DecodeError> {
        let mut last_error = DecodeError::NoDecoders;

        for decoder in &self.decoders {
            match decoder.decode(path, sheet_name) {
                Ok(table) => {
                    tracing::debug!(
                        "Decoded {} with {} decoder: {} columns, {} rows",
                        path.display(),
                        decoder.name(),
                        table.headers().len(),
                        table.row_count()
                    );
                    return Ok(table);
                }
                Err(e) => {
                    tracing::warn!("{} decoder could not read {}: {}", decoder.name(), path.display(), e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

fn decode_workbook<R>(path: &Path, sheet_name: Option<&str>) -> Result<SourceTable, String>
where
    R: Reader<BufReader<File>>,
    R::Error: Display,
{
    let mut workbook = open_workbook::<R, _>(path).map_err(|e| e.to_string())?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| "Workbook contains no worksheets".to_string())?,
    };

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| format!("Error reading sheet '{sheet}': {e}"))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(index, cell)| header_text(index, cell))
            .collect(),
        None => return Ok(SourceTable::default()),
    };

    let data_rows: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Ok(SourceTable::from_rows(headers, data_rows))
}

/// Header cell as text; blank headers become `Unnamed: <index>`
pub fn header_text(index: usize, cell: &Data) -> String {
    match cell_value(cell) {
        CellValue::Missing => format!("Unnamed: {index}"),
        CellValue::Text(s) if s.trim().is_empty() => format!("Unnamed: {index}"),
        value => value.to_string(),
    }
}

/// Map a calamine cell onto [`CellValue`] without reinterpreting its content
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match excel_serial_to_datetime(dt.as_f64()) {
            Some(value) => CellValue::DateTime(value),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
