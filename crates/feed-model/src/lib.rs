pub mod catalog;
pub mod config;
pub mod error;
pub mod offer;
pub mod row;

pub use catalog::{CURRENCY_ID, Catalog, CategoryBinding, Currency};
pub use config::FeedConfig;
pub use error::ConfigError;
pub use offer::{AVAILABLE_STOCK_QUANTITY, Offer, Param};
pub use row::{ProductRow, ROW_WIDTH, RowSchema, Sourced};
