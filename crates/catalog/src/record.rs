//! Article records and catalogs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use sortiment_core::{ArticleId, CellValue, DomainResult, Entity, normalize};

use crate::schema::CatalogSchema;
use crate::table::Table;

/// A pass-through column of the source row (neither identifier nor label).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub column: String,
    pub value: CellValue,
}

/// One article of a catalog. Identity is the normalized identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "identifier")]
    id: ArticleId,
    label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<Attribute>,
}

impl ArticleRecord {
    pub fn new(id: ArticleId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn identifier(&self) -> &ArticleId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, column: &str) -> Option<&CellValue> {
        self.attributes
            .iter()
            .find(|a| a.column == column)
            .map(|a| &a.value)
    }
}

impl Entity for ArticleRecord {
    type Id = ArticleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Ordered, immutable sequence of articles.
///
/// A catalog is built once (from a [`Table`] or from records) and only read
/// afterwards; the master catalog is shared across requests behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    columns: Vec<String>,
    records: Vec<ArticleRecord>,
    /// Rows skipped because their identifier cell was empty.
    dropped_rows: usize,
    /// Rows whose identifier already appeared earlier in the catalog.
    duplicate_ids: usize,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from a raw table.
    ///
    /// Fails with a schema error when the identifier column is missing; rows
    /// without an identifier are dropped and counted.
    pub fn from_table(table: &Table, schema: &CatalogSchema) -> DomainResult<Self> {
        let id_col = table.require_column(&schema.identifier_column)?;
        let label_col = table.column_index(&schema.label_column);

        let mut records = Vec::with_capacity(table.len());
        let mut dropped_rows = 0;

        for (row_idx, row) in table.rows().iter().enumerate() {
            let Some(id) = normalize(table.cell(row_idx, id_col)) else {
                dropped_rows += 1;
                continue;
            };

            let label = label_col
                .map(|c| table.cell(row_idx, c).to_plain_string().trim().to_string())
                .unwrap_or_default();

            let attributes = table
                .columns()
                .iter()
                .enumerate()
                .filter(|(c, _)| *c != id_col && Some(*c) != label_col)
                .map(|(c, column)| Attribute {
                    column: column.clone(),
                    value: row.get(c).cloned().unwrap_or_default(),
                })
                .collect();

            records.push(ArticleRecord::new(id, label).with_attributes(attributes));
        }

        if dropped_rows > 0 {
            tracing::debug!(dropped_rows, "rows without identifier skipped");
        }

        let mut catalog = Self::from_records(records);
        catalog.columns = table.columns().to_vec();
        catalog.dropped_rows = dropped_rows;
        Ok(catalog)
    }

    pub fn from_records(records: Vec<ArticleRecord>) -> Self {
        let duplicate_ids = {
            let mut seen = HashSet::with_capacity(records.len());
            records.iter().filter(|r| !seen.insert(r.id())).count()
        };

        Self {
            columns: Vec::new(),
            records,
            dropped_rows: 0,
            duplicate_ids,
        }
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    /// Source column order (empty for catalogs built from records).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn duplicate_ids(&self) -> usize {
        self.duplicate_ids
    }
}
