use std::collections::BTreeMap;

use crate::aliases::{AliasTable, TargetField};
use crate::utils::normalize_header;

/// Result of matching every target field against the source headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    matches: BTreeMap<TargetField, Option<String>>,
}

impl ColumnMap {
    /// Source header matched to `field`, or `None` when nothing matched
    pub fn get(&self, field: TargetField) -> Option<&str> {
        self.matches.get(&field).and_then(|m| m.as_deref())
    }

    pub fn insert(&mut self, field: TargetField, header: Option<String>) {
        self.matches.insert(field, header);
    }

    /// Fields that found no source column
    pub fn unmatched(&self) -> Vec<TargetField> {
        self.matches
            .iter()
            .filter(|(_, header)| header.is_none())
            .map(|(field, _)| *field)
            .collect()
    }
}

/// Find the first header, in column order, whose normalized text contains any alias.
///
/// Columns are the outer loop and aliases the inner one, so an earlier column
/// that matches a low-priority alias beats a later column matching the first alias.
/// `aliases` must already be normalized.
pub fn find_matching_column<'a, H, A>(headers: &'a [H], aliases: &[A]) -> Option<&'a str>
where
    H: AsRef<str>,
    A: AsRef<str>,
{
    for header in headers {
        let normalized = normalize_header(header.as_ref());
        for alias in aliases {
            if normalized.contains(alias.as_ref()) {
                return Some(header.as_ref());
            }
        }
    }
    return None;
}

/// Run the matcher once per target field. A column may be picked by several fields.
pub fn map_columns<H: AsRef<str>>(headers: &[H], alias_table: &AliasTable) -> ColumnMap {
    let mut column_map = ColumnMap::default();

    for (field, aliases) in alias_table.iter() {
        let matched = find_matching_column(headers, aliases);
        match matched {
            Some(header) => tracing::debug!("Mapped column '{}' to field {}", header, field),
            None => tracing::warn!("No column found for field {}", field),
        }
        column_map.insert(field, matched.map(str::to_string));
    }

    column_map
}
