use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use comfy_table::Table;
use tracing::{info, info_span};

use feed_cli::pipeline::{ingest, render, transform};
use feed_cli::summary::apply_table_style;
use feed_cli::types::RunResult;
use feed_ingest::CsvDirSource;
use feed_model::{FeedConfig, RowSchema};

use crate::cli::GenerateArgs;

pub fn run_generate(args: &GenerateArgs) -> Result<RunResult> {
    let span = info_span!("generate", source = %args.source_dir.display());
    let _span_guard = span.enter();
    let start = Instant::now();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| args.source_dir.join("feed.json"));
    let mut config = FeedConfig::from_path(&config_path)
        .with_context(|| format!("load config {}", config_path.display()))?;
    if args.only_available {
        config.only_available = true;
    }
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.source_dir.join("feed.xml"));

    let source = CsvDirSource::new(&args.source_dir);
    let ingested = ingest(&source, &config)?;
    let transformed = transform(&ingested, &config);
    let offers = transformed.offers.len();
    let categories = transformed.categories.len();
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let rendered = render(transformed.offers, transformed.categories, &timestamp)?;

    let bytes = rendered.xml.len();
    if args.dry_run {
        info!(bytes, "dry run, feed not written");
    } else {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create output directory {}", parent.display()))?;
            }
        }
        fs::write(&output_path, &rendered.xml)
            .with_context(|| format!("write feed {}", output_path.display()))?;
        info!(path = %output_path.display(), bytes, "feed written");
    }

    info!(duration_ms = start.elapsed().as_millis(), "generate complete");
    Ok(RunResult {
        output: output_path,
        written: !args.dry_run,
        bytes,
        sheets: transformed.sheets,
        offers,
        categories,
        dropped_bindings: transformed.dropped_bindings,
        duplicate_ids: transformed.duplicate_ids,
        corrections: rendered.corrections,
    })
}

pub fn run_columns() {
    let schema = RowSchema::default();
    let mut table = Table::new();
    table.set_header(vec!["Column", "Field", "Description"]);
    apply_table_style(&mut table);
    for (name, index) in schema.columns() {
        table.add_row(vec![
            index.to_string(),
            name.to_string(),
            column_description(name).to_string(),
        ]);
    }
    println!("{table}");
}

fn column_description(field: &str) -> &'static str {
    match field {
        "id" => "Offer identifier, emitted as an attribute",
        "stock" => "Availability marker; any non-empty value means available",
        "name" => "Product name",
        "name_ua" => "Localized product name",
        "price" => "Price in UAH",
        "category_id" => "Category the offer belongs to",
        "pictures" => "Comma-separated picture URLs",
        "vendor" => "Vendor name, omitted when empty",
        "description" => "Product description (CDATA)",
        "description_ua" => "Localized description (CDATA)",
        "params" => "One 'name - value' characteristic per line",
        _ => "",
    }
}
