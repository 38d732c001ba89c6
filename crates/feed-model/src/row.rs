use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of cells a fully populated product row carries.
pub const ROW_WIDTH: usize = 11;

/// Column positions of the product fields within a sheet row.
///
/// The exporter's canonical layout is purely positional (columns `0..=10`);
/// alternate layouts can be supplied through run configuration without
/// touching the mapping logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RowSchema {
    pub id: usize,
    pub stock: usize,
    pub name: usize,
    pub name_ua: usize,
    pub price: usize,
    pub category_id: usize,
    pub pictures: usize,
    pub vendor: usize,
    pub description: usize,
    pub description_ua: usize,
    pub params: usize,
}

impl Default for RowSchema {
    fn default() -> Self {
        RowSchema {
            id: 0,
            stock: 1,
            name: 2,
            name_ua: 3,
            price: 4,
            category_id: 5,
            pictures: 6,
            vendor: 7,
            description: 8,
            description_ua: 9,
            params: 10,
        }
    }
}

impl RowSchema {
    /// Field names with their configured positions, in canonical order.
    pub fn columns(&self) -> [(&'static str, usize); ROW_WIDTH] {
        [
            ("id", self.id),
            ("stock", self.stock),
            ("name", self.name),
            ("name_ua", self.name_ua),
            ("price", self.price),
            ("category_id", self.category_id),
            ("pictures", self.pictures),
            ("vendor", self.vendor),
            ("description", self.description),
            ("description_ua", self.description_ua),
            ("params", self.params),
        ]
    }

    /// Rejects layouts that read two fields from the same cell.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let columns = self.columns();
        for (position, (name, index)) in columns.iter().enumerate() {
            for (other_name, other_index) in &columns[position + 1..] {
                if index == other_index {
                    return Err(ConfigError::Invalid(format!(
                        "schema maps '{name}' and '{other_name}' to the same column {index}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A field value together with where it came from.
///
/// Rows shorter than the schema still resolve every field; this keeps "cell
/// present but empty" distinguishable from "cell absent" for callers that
/// care, while both read as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sourced<T> {
    /// The row contained the cell; the value may still be empty.
    Cell(T),
    /// The cell was beyond the end of the row; the default stands in.
    Default(T),
}

impl<T> Sourced<T> {
    pub fn value(&self) -> &T {
        match self {
            Sourced::Cell(value) | Sourced::Default(value) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Sourced::Cell(value) | Sourced::Default(value) => value,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Sourced::Default(_))
    }
}

impl Sourced<String> {
    pub fn as_str(&self) -> &str {
        self.value()
    }
}

/// One product row with every field resolved against a [`RowSchema`].
///
/// Construction is total: missing cells resolve to defaulted empty strings
/// and excess cells are ignored, so any grid row yields a `ProductRow`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: Sourced<String>,
    pub stock: Sourced<String>,
    pub name: Sourced<String>,
    pub name_ua: Sourced<String>,
    pub price: Sourced<String>,
    pub category_id: Sourced<String>,
    pub pictures: Sourced<String>,
    pub vendor: Sourced<String>,
    pub description: Sourced<String>,
    pub description_ua: Sourced<String>,
    pub params: Sourced<String>,
}

impl ProductRow {
    pub fn from_cells(cells: &[String], schema: &RowSchema) -> Self {
        let cell = |index: usize| match cells.get(index) {
            Some(value) => Sourced::Cell(value.clone()),
            None => Sourced::Default(String::new()),
        };
        ProductRow {
            id: cell(schema.id),
            stock: cell(schema.stock),
            name: cell(schema.name),
            name_ua: cell(schema.name_ua),
            price: cell(schema.price),
            category_id: cell(schema.category_id),
            pictures: cell(schema.pictures),
            vendor: cell(schema.vendor),
            description: cell(schema.description),
            description_ua: cell(schema.description_ua),
            params: cell(schema.params),
        }
    }
}
