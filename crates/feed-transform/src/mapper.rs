//! Row-to-record mapping.

use feed_model::{AVAILABLE_STOCK_QUANTITY, CategoryBinding, Offer, Param, ProductRow};
use tracing::debug;

use crate::sanitize::{sanitize_cdata, sanitize_text};

/// Delimiter between a parameter name and its value within one line.
const PARAM_SEPARATOR: &str = " - ";

/// Map one resolved product row to an offer.
///
/// Total by construction: malformed cells degrade field-by-field, never the
/// whole row. Availability is plain cell truthiness (any non-empty stock
/// cell, whitespace included, counts as available) and drives the published
/// stock figure. The id passes through verbatim; it only ever lands in an
/// attribute, which the serializer escapes itself.
pub fn map_row(row: &ProductRow) -> Offer {
    let available = !row.stock.as_str().is_empty();
    let (params, dropped) = parse_params(row.params.as_str());
    if dropped > 0 {
        debug!(offer_id = %row.id.as_str(), dropped, "parameter lines dropped");
    }
    Offer {
        id: row.id.as_str().to_string(),
        available,
        stock_quantity: if available { AVAILABLE_STOCK_QUANTITY } else { 0 },
        name: sanitize_text(row.name.as_str()),
        name_ua: sanitize_text(row.name_ua.as_str()),
        price: sanitize_text(row.price.as_str()),
        category_id: sanitize_text(row.category_id.as_str()),
        pictures: parse_pictures(row.pictures.as_str()),
        vendor: parse_vendor(row.vendor.as_str()),
        description: sanitize_cdata(row.description.as_str().trim()),
        description_ua: sanitize_cdata(row.description_ua.as_str().trim()),
        params,
    }
}

/// Map one category-binding row: cell 0 is the id, cell 1 the display name.
/// Rows missing either cell are dropped.
pub fn map_binding(cells: &[String]) -> Option<CategoryBinding> {
    let id = cells.first().map_or("", String::as_str);
    let name = cells.get(1).map_or("", String::as_str);
    if id.is_empty() || name.is_empty() {
        return None;
    }
    Some(CategoryBinding {
        id: sanitize_text(id),
        name: sanitize_text(name),
    })
}

/// Split the pictures cell on commas into trimmed URLs, dropping empties.
fn parse_pictures(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(sanitize_text)
        .collect()
}

/// An empty vendor cell means the element is omitted from the output.
fn parse_vendor(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(sanitize_text(cell))
    }
}

/// Parse the parameter blob: one `name - value` pair per line.
///
/// Lines without the separator or with an empty side are dropped and
/// counted; a second separator on the same line ends the value.
fn parse_params(cell: &str) -> (Vec<Param>, usize) {
    let mut params = Vec::new();
    let mut dropped = 0;
    for line in cell.split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        let mut segments = line.split(PARAM_SEPARATOR);
        let name = segments.next().unwrap_or("").trim();
        let value = segments.next().unwrap_or("").trim();
        if name.is_empty() || value.is_empty() {
            dropped += 1;
            continue;
        }
        params.push(Param {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    (params, dropped)
}
