//! Feed transformation logic.
//!
//! Two concerns live here:
//!
//! - **sanitize**: entity normalization and selective ampersand escaping for
//!   sheet text, plus the CDATA-safe variant for descriptions
//! - **mapper**: positional row to [`feed_model::Offer`] mapping and
//!   category-binding rows to [`feed_model::CategoryBinding`]
//!
//! Mapping never fails: whatever a sheet row looks like, it produces an
//! offer. Data quality problems surface as debug logs and degraded fields,
//! not errors.

pub mod mapper;
pub mod sanitize;

pub use mapper::{map_binding, map_row};
pub use sanitize::{CANONICAL_ENTITIES, sanitize_cdata, sanitize_text};
