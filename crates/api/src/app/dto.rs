use serde::Serialize;

use sortiment_catalog::{Catalog, NegativeList, NegativeListEntry};

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct MasterSummaryResponse {
    pub articles: usize,
    pub columns: Vec<String>,
    pub dropped_rows: usize,
    pub duplicate_ids: usize,
}

impl From<&Catalog> for MasterSummaryResponse {
    fn from(catalog: &Catalog) -> Self {
        Self {
            articles: catalog.len(),
            columns: catalog.columns().to_vec(),
            dropped_rows: catalog.dropped_rows(),
            duplicate_ids: catalog.duplicate_ids(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NegativeListResponse {
    pub missing: usize,
    pub message: String,
    pub entries: Vec<NegativeListEntry>,
}

impl From<NegativeList> for NegativeListResponse {
    fn from(list: NegativeList) -> Self {
        Self {
            missing: list.len(),
            message: list.message(),
            entries: list.into_entries(),
        }
    }
}
