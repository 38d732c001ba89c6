//! Integration tests for the feed pipeline.

use std::fs;

use tempfile::TempDir;

use feed_cli::pipeline::{ingest, render, transform};
use feed_ingest::{CsvDirSource, MemorySource};
use feed_model::{FeedConfig, RowSchema};

const TIMESTAMP: &str = "2024-06-15T08:30:00.000Z";

fn config() -> FeedConfig {
    FeedConfig {
        sheets: vec!["Products".to_string()],
        category_sheet: "Bindings".to_string(),
        only_available: false,
        schema: RowSchema::default(),
    }
}

fn source_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("write sheet");
    }
    dir
}

fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter()
        .map(|row| row.iter().copied().map(String::from).collect())
        .collect()
}

#[test]
fn csv_exports_generate_the_expected_document() {
    let dir = source_dir(&[
        (
            "Products.csv",
            "id,stock,name,name_ua,price,category,pictures,vendor,description,description_ua,params\n\
             101,yes,Chair,Крісло,500,12,\"img1.jpg,img2.jpg\",AcmeCo,Desc &reg; text,Опис,Color - Black\n",
        ),
        ("Bindings.csv", "id,name\n12,Furniture\n"),
    ]);
    let source = CsvDirSource::new(dir.path());

    let ingested = ingest(&source, &config()).expect("ingest");
    let transformed = transform(&ingested, &config());
    assert_eq!(transformed.offers.len(), 1);
    assert_eq!(transformed.categories.len(), 1);
    assert_eq!(transformed.dropped_bindings, 0);
    assert!(transformed.duplicate_ids.is_empty());

    let rendered = render(transformed.offers, transformed.categories, TIMESTAMP).expect("render");
    assert!(rendered.corrections.is_empty());
    insta::assert_snapshot!(rendered.xml);
}

#[test]
fn availability_filter_drops_unavailable_offers() {
    let source = MemorySource::new()
        .with_sheet(
            "Products",
            rows(&[
                &["id", "stock", "name"],
                &["1", "yes", "Chair"],
                &["2", "", "Table"],
            ]),
        )
        .with_sheet("Bindings", rows(&[&["id", "name"]]));
    let mut config = config();
    config.only_available = true;

    let ingested = ingest(&source, &config).expect("ingest");
    let transformed = transform(&ingested, &config);

    assert_eq!(transformed.offers.len(), 1);
    assert_eq!(transformed.offers[0].id, "1");
    let summary = &transformed.sheets[0];
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.offers, 1);
    assert_eq!(summary.available, 1);
    assert_eq!(summary.filtered, 1);
}

#[test]
fn unavailable_offers_are_kept_by_default() {
    let source = MemorySource::new()
        .with_sheet(
            "Products",
            rows(&[
                &["id", "stock", "name"],
                &["1", "yes", "Chair"],
                &["2", "", "Table"],
            ]),
        )
        .with_sheet("Bindings", rows(&[&["id", "name"]]));

    let ingested = ingest(&source, &config()).expect("ingest");
    let transformed = transform(&ingested, &config());

    assert_eq!(transformed.offers.len(), 2);
    assert!(!transformed.offers[1].available);
    assert_eq!(transformed.offers[1].stock_quantity, 0);
    assert_eq!(transformed.sheets[0].filtered, 0);
}

#[test]
fn duplicate_offer_ids_are_reported() {
    let source = MemorySource::new()
        .with_sheet(
            "Products",
            rows(&[
                &["id", "stock", "name"],
                &["7", "yes", "Chair"],
                &["7", "yes", "Stool"],
                &["8", "yes", "Table"],
            ]),
        )
        .with_sheet("Bindings", rows(&[&["id", "name"]]));

    let ingested = ingest(&source, &config()).expect("ingest");
    let transformed = transform(&ingested, &config());

    assert_eq!(transformed.offers.len(), 3);
    assert_eq!(transformed.duplicate_ids, vec!["7".to_string()]);
}

#[test]
fn missing_sheet_fails_ingest() {
    let source = MemorySource::new().with_sheet("Bindings", rows(&[&["id", "name"]]));

    let error = ingest(&source, &config()).expect_err("missing product sheet");
    let message = format!("{error:#}");
    assert!(message.contains("fetch product sheet 'Products'"), "{message}");
    assert!(message.contains("'Products' not found"), "{message}");
}

#[test]
fn header_only_sheets_contribute_nothing() {
    let source = MemorySource::new()
        .with_sheet("Products", rows(&[&["id", "stock", "name"]]))
        .with_sheet("Bindings", rows(&[&["id", "name"]]));

    let ingested = ingest(&source, &config()).expect("ingest");
    let transformed = transform(&ingested, &config());

    assert!(transformed.offers.is_empty());
    assert!(transformed.categories.is_empty());
    assert_eq!(transformed.sheets[0].rows, 0);
}

#[test]
fn binding_rows_missing_cells_are_dropped() {
    let source = MemorySource::new()
        .with_sheet("Products", rows(&[&["id", "stock", "name"]]))
        .with_sheet(
            "Bindings",
            rows(&[
                &["id", "name"],
                &["5", "Chairs"],
                &["6"],
                &["", "Tables"],
            ]),
        );

    let ingested = ingest(&source, &config()).expect("ingest");
    let transformed = transform(&ingested, &config());

    assert_eq!(transformed.categories.len(), 1);
    assert_eq!(transformed.categories[0].id, "5");
    assert_eq!(transformed.dropped_bindings, 2);
}

#[test]
fn offers_follow_configured_sheet_order() {
    let source = MemorySource::new()
        .with_sheet(
            "Chairs",
            rows(&[&["id", "stock", "name"], &["1", "yes", "Chair"]]),
        )
        .with_sheet(
            "Tables",
            rows(&[&["id", "stock", "name"], &["2", "yes", "Table"]]),
        )
        .with_sheet("Bindings", rows(&[&["id", "name"]]));
    let mut config = config();
    config.sheets = vec!["Tables".to_string(), "Chairs".to_string()];

    let ingested = ingest(&source, &config).expect("ingest");
    let transformed = transform(&ingested, &config);

    let ids: Vec<&str> = transformed
        .offers
        .iter()
        .map(|offer| offer.id.as_str())
        .collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(transformed.sheets[0].sheet, "Tables");
    assert_eq!(transformed.sheets[1].sheet, "Chairs");
}
