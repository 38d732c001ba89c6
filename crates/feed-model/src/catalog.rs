use crate::offer::Offer;

/// Currency code every offer is priced in. The feed is single-currency.
pub const CURRENCY_ID: &str = "UAH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub id: String,
    pub rate: String,
}

impl Default for Currency {
    fn default() -> Self {
        Currency {
            id: CURRENCY_ID.to_string(),
            rate: "1".to_string(),
        }
    }
}

/// Mapping from a category identifier to its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBinding {
    pub id: String,
    pub name: String,
}

/// Fully assembled feed document, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Generation timestamp, emitted on the document root.
    pub date: String,
    pub currency: Currency,
    pub categories: Vec<CategoryBinding>,
    pub offers: Vec<Offer>,
}
