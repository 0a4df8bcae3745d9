use std::fs;
use tempfile::TempDir;

use twskill_core::{Catalog, CsvDirectory, Error, Package, TableSource};

#[test]
fn csv_directory_loads_rows_in_header_order() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("error-codes.csv"),
        "provider,code,message_zh\nECPay,10000016,金額錯誤\nAmego,2001,\"發票號碼, 重複\"\n",
    )
    .unwrap();

    let source = CsvDirectory::new(tmp.path());
    let rows = source.load("error-codes.csv").expect("load");

    assert_eq!(rows.len(), 2);
    let columns: Vec<&str> = rows[0].keys().map(String::as_str).collect();
    assert_eq!(columns, vec!["provider", "code", "message_zh"]);
    assert_eq!(rows[1]["message_zh"], "發票號碼, 重複");
}

#[test]
fn csv_directory_missing_file_is_empty_table() {
    let tmp = TempDir::new().unwrap();
    let source = CsvDirectory::new(tmp.path());
    assert!(source.load("providers.csv").expect("load").is_empty());
    assert!(source.modified("providers.csv").is_none());
}

#[test]
fn csv_directory_reports_modification_time() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tax-rules.csv"), "invoice_type\nB2C\n").unwrap();
    let source = CsvDirectory::new(tmp.path());
    assert!(source.modified("tax-rules.csv").is_some());
}

#[test]
fn csv_directory_surfaces_unreadable_table() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bad.csv"), b"name\n\xff\xfe\n").unwrap();
    let source = CsvDirectory::new(tmp.path());
    match source.load("bad.csv") {
        Err(Error::Csv { path, .. }) => assert!(path.ends_with("bad.csv")),
        other => panic!("expected csv error, got {other:?}"),
    }
}

#[test]
fn catalog_file_on_disk_is_loaded() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
package = "einvoice"
title = "E-Invoice Notes"
default_domain = "notes"

[[domains]]
name = "notes"
file = "notes.csv"
search_cols = ["title", "body"]
output_cols = ["title"]
keywords = ["note"]
"#,
    )
    .unwrap();

    let catalog = Catalog::from_toml_file(&path).expect("catalog");
    assert_eq!(catalog.package, "einvoice");
    assert_eq!(catalog.domain("notes").map(|d| d.file.as_str()), Some("notes.csv"));
}

#[test]
fn missing_catalog_file_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = Catalog::from_toml_file(&tmp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn every_builtin_domain_outputs_columns() {
    for package in Package::ALL {
        for domain in Catalog::builtin(package).domains {
            assert!(!domain.output_cols.is_empty(), "{package}/{}", domain.name);
        }
    }
}
