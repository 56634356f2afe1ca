//! `sortiment-document`
//!
//! Output artifacts for a negative list:
//! - [`pdf`]: paginated barcode document (three-column grid, repeated header),
//!   laid out by [`layout`] and typeset with the tiers in [`typography`].
//! - [`export`]: the same entries as a plain spreadsheet, without barcodes.

pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod pdf;
pub mod typography;

pub use config::DocumentConfig;
pub use error::DocumentError;
pub use export::{NEGATIVE_LIST_SHEET, negative_list_xlsx};
pub use layout::{CellContent, GridLayout, LayoutConfig, PagePlan, Placement, Rect};
pub use pdf::{AssembledDocument, DocumentSummary, Placeholder, assemble};
