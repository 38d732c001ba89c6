//! Feed generation pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Fetch product and category-binding sheets from the source
//! 2. **Transform**: Map sheet rows to offers and bindings to categories
//! 3. **Render**: Assemble the catalog, serialize it, run the entity guard
//!
//! Each stage takes the output of the previous stage and returns typed
//! results. Ingest failures are fatal; data problems inside rows degrade
//! fields and are reported, never escalated.

use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use feed_ingest::{SheetGrid, SheetSource};
use feed_model::{CategoryBinding, FeedConfig, Offer, ProductRow};
use feed_output::{assemble, guard, write_feed};
use feed_transform::{map_binding, map_row};

use crate::types::SheetSummary;

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Result of the ingest stage.
#[derive(Debug)]
pub struct IngestResult {
    /// Product sheets in configured order.
    pub product_sheets: Vec<SheetGrid>,
    /// The category-binding sheet.
    pub binding_sheet: SheetGrid,
}

/// Fetch every configured sheet from the source.
///
/// Any missing or unreadable sheet aborts the run: a feed built from a
/// partial source would silently drop products.
pub fn ingest(source: &dyn SheetSource, config: &FeedConfig) -> Result<IngestResult> {
    let span = info_span!("ingest");
    let _guard = span.enter();
    let start = Instant::now();

    let mut product_sheets = Vec::with_capacity(config.sheets.len());
    for name in &config.sheets {
        let grid = source
            .fetch_grid(name)
            .with_context(|| format!("fetch product sheet '{name}'"))?;
        product_sheets.push(grid);
    }
    let binding_sheet = source
        .fetch_grid(&config.category_sheet)
        .with_context(|| format!("fetch category sheet '{}'", config.category_sheet))?;

    let row_count: usize = product_sheets.iter().map(|grid| grid.rows.len()).sum();
    info!(
        sheets = product_sheets.len(),
        rows = row_count,
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(IngestResult {
        product_sheets,
        binding_sheet,
    })
}

// ============================================================================
// Stage 2: Transform
// ============================================================================

/// Result of the transform stage.
#[derive(Debug)]
pub struct TransformResult {
    /// Offers in sheet order, post availability filter.
    pub offers: Vec<Offer>,
    /// Categories in binding-sheet order.
    pub categories: Vec<CategoryBinding>,
    /// Per-sheet row accounting for the summary.
    pub sheets: Vec<SheetSummary>,
    /// Binding rows dropped for a missing id or name.
    pub dropped_bindings: usize,
    /// Offer ids that appear more than once in the final feed.
    pub duplicate_ids: Vec<String>,
}

/// Map every data row to an offer and every binding row to a category.
///
/// Mapping is total, so this stage cannot fail; it only counts what it
/// degraded or filtered along the way.
pub fn transform(ingested: &IngestResult, config: &FeedConfig) -> TransformResult {
    let span = info_span!("transform");
    let _guard = span.enter();
    let start = Instant::now();

    let mut offers = Vec::new();
    let mut sheets = Vec::with_capacity(ingested.product_sheets.len());
    for grid in &ingested.product_sheets {
        let rows = grid.data_rows();
        let mut kept = 0usize;
        let mut available = 0usize;
        let mut filtered = 0usize;
        for cells in rows {
            let offer = map_row(&ProductRow::from_cells(cells, &config.schema));
            if offer.available {
                available += 1;
            }
            if config.only_available && !offer.available {
                filtered += 1;
                continue;
            }
            kept += 1;
            offers.push(offer);
        }
        debug!(sheet = %grid.name, rows = rows.len(), offers = kept, "sheet transformed");
        sheets.push(SheetSummary {
            sheet: grid.name.clone(),
            rows: rows.len(),
            offers: kept,
            available,
            filtered,
        });
    }

    let mut categories = Vec::new();
    let mut dropped_bindings = 0usize;
    for cells in ingested.binding_sheet.data_rows() {
        match map_binding(cells) {
            Some(binding) => categories.push(binding),
            None => {
                dropped_bindings += 1;
                debug!(sheet = %ingested.binding_sheet.name, "category binding dropped");
            }
        }
    }

    let duplicate_ids = find_duplicate_ids(&offers);
    for id in &duplicate_ids {
        warn!(offer_id = %id, "duplicate offer id in feed");
    }

    info!(
        offers = offers.len(),
        categories = categories.len(),
        dropped_bindings,
        duration_ms = start.elapsed().as_millis(),
        "transform complete"
    );
    TransformResult {
        offers,
        categories,
        sheets,
        dropped_bindings,
        duplicate_ids,
    }
}

fn find_duplicate_ids(offers: &[Offer]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for offer in offers {
        *counts.entry(offer.id.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        // Blank ids come from degraded rows, not id collisions.
        .filter(|(id, count)| *count > 1 && !id.is_empty())
        .map(|(id, _)| id.to_string())
        .collect()
}

// ============================================================================
// Stage 3: Render
// ============================================================================

/// Result of the render stage.
#[derive(Debug)]
pub struct RenderResult {
    /// The final document text, guard already applied.
    pub xml: String,
    /// Residual entities the guard had to escape.
    pub corrections: BTreeMap<String, usize>,
}

/// Assemble the catalog, serialize it, and run the whole-document guard.
pub fn render(
    offers: Vec<Offer>,
    categories: Vec<CategoryBinding>,
    timestamp: &str,
) -> Result<RenderResult> {
    let span = info_span!("render");
    let _span_guard = span.enter();
    let start = Instant::now();

    let offer_count = offers.len();
    let catalog = assemble(offers, categories, timestamp);
    let serialized = write_feed(&catalog).context("serialize feed")?;
    let outcome = guard(&serialized);
    for (entity, count) in &outcome.corrections {
        warn!(entity = %entity, count, "escaped residual entity after serialization");
    }

    info!(
        offers = offer_count,
        bytes = outcome.text.len(),
        corrected = outcome.corrected(),
        duration_ms = start.elapsed().as_millis(),
        "render complete"
    );
    Ok(RenderResult {
        xml: outcome.text,
        corrections: outcome.corrections,
    })
}
