/// Stock figure reported for any available offer. The source sheets carry an
/// availability marker, not real inventory counts, so the exporter publishes
/// a fixed quantity that downstream marketplaces accept as "in stock".
pub const AVAILABLE_STOCK_QUANTITY: u32 = 30;

/// One sellable product entry, fully sanitized and ready for serialization.
///
/// Text fields other than `id` and `params` have been through entity
/// normalization and ampersand escaping; `description` fields additionally
/// carry CDATA section splits where the raw text contained a terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// Offer identifier, emitted verbatim as an attribute.
    pub id: String,
    pub available: bool,
    pub stock_quantity: u32,
    pub name: String,
    pub name_ua: String,
    pub price: String,
    pub category_id: String,
    pub pictures: Vec<String>,
    /// Omitted from the output entirely when the source cell was empty.
    pub vendor: Option<String>,
    pub description: String,
    pub description_ua: String,
    pub params: Vec<Param>,
}

/// A named product characteristic, parsed from one `name - value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub value: String,
}
