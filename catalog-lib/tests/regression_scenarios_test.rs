//! Catalog uploads seen in practice, run through the whole pipeline

use catalog_lib::{ALIAS_TABLE, TargetField, find_matching_column};

mod common;

#[test]
fn test_upc_product_name_cost_sheet() {
    let csv = common::process_workbook(
        &["UPC", "Product Name", "Cost (GBP)"],
        &[&["123456", "Widget", "9.99"]],
    );
    assert_eq!(csv, "ean,title,cost_gbp,family,subgroup\n123456,Widget,9.99,,\n");
}

#[test]
fn test_sheet_without_any_known_headers() {
    let csv = common::process_workbook(&["Colour", "Size"], &[&["Red", "L"], &["Blue", "M"]]);
    assert_eq!(csv, "ean,title,cost_gbp,family,subgroup\n,,,,\n,,,,\n");
}

#[test]
fn test_header_only_sheet() {
    let csv = common::process_workbook(&["EAN", "Title", "Price"], &[]);
    assert_eq!(csv, "ean,title,cost_gbp,family,subgroup\n");
}

#[test]
fn test_full_catalog_sheet_with_reordered_columns() {
    let csv = common::process_workbook(
        &["Product Subgroup", "Product Family", "Price", "Title", "EAN"],
        &[&["Screws", "Hardware", "0.10", "Wood screw 4x40", "5000000000017"]],
    );
    // "productsubgroup" contains "product", so it is also the first title candidate
    assert_eq!(
        csv,
        "ean,title,cost_gbp,family,subgroup\n5000000000017,Screws,0.10,Hardware,Screws\n"
    );
}

#[test]
fn test_barcode_before_product_code() {
    let headers = ["Barcode", "Product Code"];
    assert_eq!(
        find_matching_column(&headers, &["code", "barcode"]),
        Some("Barcode")
    );
    assert_eq!(
        find_matching_column(&headers, ALIAS_TABLE.aliases(TargetField::Ean)),
        Some("Barcode")
    );
}

#[test]
fn test_duplicate_headers_map_to_first_occurrence() {
    let csv = common::process_workbook(&["Name", "Name"], &[&["First", "Second"]]);
    assert_eq!(csv, "ean,title,cost_gbp,family,subgroup\n,First,,,\n");
}
