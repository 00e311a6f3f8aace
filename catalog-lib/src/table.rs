use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::aliases::{AliasTable, TargetField};
use crate::column_mapper::ColumnMap;
use crate::utils::format_datetime;

/// A decoded spreadsheet cell, carried into the export without coercion
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Missing,
}

/// Renders the value the way it is written to the CSV export
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(n) => {
                // Integers stored as floats lose the fraction
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
            CellValue::DateTime(dt) => f.write_str(&format_datetime(dt)),
            CellValue::Missing => Ok(()),
        }
    }
}

/// Ordered, uniquely named columns decoded from one worksheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTable {
    headers: Vec<String>,
    columns: Vec<Vec<CellValue>>,
    row_count: usize,
}

impl SourceTable {
    /// Build a table from a header row and data rows.
    ///
    /// Header names are de-duplicated by suffixing `.1`, `.2`, ... on later
    /// occurrences. Short rows are padded with `Missing`; cells beyond the
    /// header width are dropped.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let headers = dedupe_headers(headers);
        let width = headers.len();
        let row_count = rows.len();
        let mut columns: Vec<Vec<CellValue>> = vec![Vec::with_capacity(row_count); width];

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.push(cells.next().unwrap_or(CellValue::Missing));
            }
        }

        SourceTable {
            headers,
            columns,
            row_count,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Values of the column named `header`, if present
    pub fn column(&self, header: &str) -> Option<&[CellValue]> {
        self.headers
            .iter()
            .position(|h| h == header)
            .map(|idx| self.columns[idx].as_slice())
    }
}

fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    // Next suffix to try for each base name
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut unique = Vec::with_capacity(headers.len());

    for header in headers {
        let candidate = if seen.contains(&header) {
            let suffix = next_suffix.entry(header.clone()).or_insert(1);
            let mut candidate = format!("{header}.{suffix}");
            while seen.contains(&candidate) {
                *suffix += 1;
                candidate = format!("{header}.{suffix}");
            }
            *suffix += 1;
            candidate
        } else {
            header
        };
        seen.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}

/// The normalized five-column export table
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    columns: Vec<(TargetField, Vec<CellValue>)>,
    row_count: usize,
}

impl OutputTable {
    /// Column names in export order
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(field, _)| field.name()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, field: TargetField) -> Option<&[CellValue]> {
        self.columns
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, values)| values.as_slice())
    }

    /// Row `index` across all columns, in export order
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|(_, values)| &values[index]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.row_count).filter_map(|index| self.row(index))
    }
}

/// Build the export table: matched fields copy their source column verbatim,
/// unmatched fields are `Missing` on every row.
pub fn build_output_table(
    source: &SourceTable,
    column_map: &ColumnMap,
    alias_table: &AliasTable,
) -> OutputTable {
    let row_count = source.row_count();
    let columns = alias_table
        .fields()
        .map(|field| {
            let values = column_map
                .get(field)
                .and_then(|header| source.column(header))
                .map(|values| values.to_vec())
                .unwrap_or_else(|| vec![CellValue::Missing; row_count]);
            (field, values)
        })
        .collect();

    OutputTable { columns, row_count }
}
