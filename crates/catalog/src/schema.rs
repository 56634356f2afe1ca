//! Column names a catalog table must provide.

use serde::{Deserialize, Serialize};

/// Column holding the article identifier in both catalogs.
pub const DEFAULT_IDENTIFIER_COLUMN: &str = "GTIN";

/// Column holding the human-readable article name.
pub const DEFAULT_LABEL_COLUMN: &str = "Bezeichnung";

/// Which table columns carry the identifier and the label.
///
/// Column names are matched exactly (case-sensitive, no trimming). Only the
/// identifier column is required; a missing label column yields empty labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSchema {
    pub identifier_column: String,
    pub label_column: String,
}

impl Default for CatalogSchema {
    fn default() -> Self {
        Self {
            identifier_column: DEFAULT_IDENTIFIER_COLUMN.to_string(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
        }
    }
}
