//! Target fields of the catalog export and the header aliases that identify them.

use once_cell::sync::Lazy;
use std::fmt;

use crate::utils::normalize_header;

/// One of the five canonical output columns, in export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetField {
    Ean,
    Title,
    CostGbp,
    Family,
    Subgroup,
}

impl TargetField {
    /// All target fields in output column order
    pub const ALL: [TargetField; 5] = [
        TargetField::Ean,
        TargetField::Title,
        TargetField::CostGbp,
        TargetField::Family,
        TargetField::Subgroup,
    ];

    /// Column name used in the CSV header
    pub fn name(&self) -> &'static str {
        match self {
            TargetField::Ean => "ean",
            TargetField::Title => "title",
            TargetField::CostGbp => "cost_gbp",
            TargetField::Family => "family",
            TargetField::Subgroup => "subgroup",
        }
    }

    /// Aliases as they are written by hand, before normalization
    fn raw_aliases(&self) -> &'static [&'static str] {
        match self {
            TargetField::Ean => &["ean", "barcode", "product code", "upc", "code"],
            TargetField::Title => &["title", "product", "product name", "name", "description"],
            TargetField::CostGbp => &[
                "cost",
                "cost (gbp)",
                "price",
                "unit cost",
                "cost_gbp",
                "cost gbp",
                "cost£",
            ],
            TargetField::Family => &["family", "category", "main category", "product family"],
            TargetField::Subgroup => &["subgroup", "sub category", "sub family", "product subgroup"],
        }
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered mapping from target field to its normalized aliases
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: Vec<(TargetField, Vec<String>)>,
}

impl AliasTable {
    /// Build a table from raw aliases, normalizing each one the same way headers are.
    /// Entry order is the output column order.
    pub fn new<I, A, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (TargetField, A)>,
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(field, aliases)| {
                let normalized = aliases
                    .into_iter()
                    .map(|alias| normalize_header(alias.as_ref()))
                    .collect();
                (field, normalized)
            })
            .collect();

        AliasTable { entries }
    }

    /// The built-in catalog aliases
    pub fn catalog() -> Self {
        Self::new(
            TargetField::ALL
                .iter()
                .map(|field| (*field, field.raw_aliases().iter().copied())),
        )
    }

    /// Normalized aliases for `field`, empty if the table does not know it
    pub fn aliases(&self, field: TargetField) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, aliases)| aliases.as_slice())
            .unwrap_or(&[])
    }

    /// Target fields in table order
    pub fn fields(&self) -> impl Iterator<Item = TargetField> + '_ {
        self.entries.iter().map(|(field, _)| *field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TargetField, &[String])> {
        self.entries
            .iter()
            .map(|(field, aliases)| (*field, aliases.as_slice()))
    }
}

/// Process-wide alias table, built on first use and never mutated
pub static ALIAS_TABLE: Lazy<AliasTable> = Lazy::new(AliasTable::catalog);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_field_order() {
        let names: Vec<&str> = ALIAS_TABLE.fields().map(|f| f.name()).collect();
        assert_eq!(names, vec!["ean", "title", "cost_gbp", "family", "subgroup"]);
    }

    #[test]
    fn test_catalog_aliases_are_normalized() {
        assert_eq!(
            ALIAS_TABLE.aliases(TargetField::CostGbp),
            &["cost", "costgbp", "price", "unitcost", "costgbp", "costgbp", "cost£"]
        );
        assert_eq!(
            ALIAS_TABLE.aliases(TargetField::Subgroup),
            &["subgroup", "subcategory", "subfamily", "productsubgroup"]
        );
    }

    #[test]
    fn test_alias_order_is_preserved() {
        assert_eq!(
            ALIAS_TABLE.aliases(TargetField::Ean),
            &["ean", "barcode", "productcode", "upc", "code"]
        );
    }

    #[test]
    fn test_unknown_field_has_no_aliases() {
        let table = AliasTable::new(vec![(TargetField::Ean, vec!["EAN"])]);
        assert_eq!(table.aliases(TargetField::Ean), &["ean"]);
        assert!(table.aliases(TargetField::Title).is_empty());
    }
}
