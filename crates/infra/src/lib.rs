//! Infrastructure layer: spreadsheet sources for catalogs.
//!
//! Everything here is IO; the comparison logic lives in `sortiment-catalog`.

pub mod source;

pub use source::{
    InMemoryTable, LoadError, SpreadsheetBytes, SpreadsheetFile, TableSource, load_catalog,
};
