use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use sortiment_catalog::{CatalogSchema, negative_list};
use sortiment_core::{ArticleId, CellValue};
use sortiment_infra::{LoadError, SpreadsheetBytes, SpreadsheetFile, TableSource, load_catalog};

fn master_workbook() -> Workbook {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "GTIN").unwrap();
    sheet.write_string(0, 1, "Bezeichnung").unwrap();
    sheet.write_string(0, 2, "Hersteller").unwrap();

    // Numeric GTINs come back from the reader as floats.
    sheet.write_number(1, 0, 1111111111111.0).unwrap();
    sheet.write_string(1, 1, "Apfelsaft").unwrap();
    sheet.write_string(1, 2, "Acme").unwrap();
    sheet.write_string(2, 0, "2222222222222").unwrap();
    sheet.write_string(2, 1, "Birnensaft").unwrap();
    // Row 3 left blank on purpose.
    sheet.write_string(4, 0, "0333333333333").unwrap();
    sheet.write_string(4, 1, "Cola").unwrap();
    workbook
}

fn positive_bytes(ids: &[&str]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "GTIN").unwrap();
    for (i, id) in ids.iter().enumerate() {
        sheet.write_string(i as u32 + 1, 0, *id).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

#[test]
fn reads_master_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Herzstuecke-Mutter-Liste.xlsx");
    master_workbook().save(&path).unwrap();

    let source = SpreadsheetFile::new(&path);
    let table = source.read_table().unwrap();
    assert_eq!(table.columns(), ["GTIN", "Bezeichnung", "Hersteller"]);
    assert_eq!(table.len(), 3, "blank rows are skipped");

    let catalog = load_catalog(&source, &CatalogSchema::default()).unwrap();
    let ids: Vec<&str> = catalog.records().iter().map(|r| r.identifier().as_str()).collect();
    assert_eq!(ids, ["1111111111111", "2222222222222", "0333333333333"]);
    assert_eq!(
        catalog.records()[0].attribute("Hersteller"),
        Some(&CellValue::text("Acme"))
    );
}

#[test]
fn uploaded_positive_list_drives_the_comparison() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("master.xlsx");
    master_workbook().save(&path).unwrap();
    let schema = CatalogSchema::default();

    let master = load_catalog(&SpreadsheetFile::new(&path), &schema).unwrap();
    let positive = load_catalog(
        &SpreadsheetBytes::new(positive_bytes(&["2222222222222", "9999999999999"])),
        &schema,
    )
    .unwrap();

    let list = negative_list(&master, &positive);
    let expected: Vec<ArticleId> = ["0333333333333", "1111111111111"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    assert_eq!(list.identifiers().cloned().collect::<Vec<_>>(), expected);
}

#[test]
fn missing_identifier_column_is_a_schema_error() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "EAN").unwrap();
    sheet.write_string(1, 0, "1").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let err = load_catalog(&SpreadsheetBytes::new(bytes), &CatalogSchema::default()).unwrap_err();
    match err {
        LoadError::Domain(e) => assert!(e.is_schema()),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn missing_master_file_reports_the_path() {
    let err = load_catalog(
        &SpreadsheetFile::new("does-not-exist.xlsx"),
        &CatalogSchema::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("does-not-exist.xlsx"));
}
