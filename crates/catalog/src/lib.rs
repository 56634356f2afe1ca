//! Catalog domain module.
//!
//! This crate contains the article catalogs and the negative-list computation,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).
//! Spreadsheet readers live in `sortiment-infra`; they hand over a [`Table`].

pub mod negative_list;
pub mod record;
pub mod schema;
pub mod table;

pub use negative_list::{NegativeList, NegativeListEntry, negative_list, negative_list_from_table, set_difference};
pub use record::{ArticleRecord, Attribute, Catalog};
pub use schema::{CatalogSchema, DEFAULT_IDENTIFIER_COLUMN, DEFAULT_LABEL_COLUMN};
pub use table::Table;
