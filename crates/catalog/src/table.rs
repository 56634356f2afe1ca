//! Raw tabular input (header row + cell rows).

use serde::{Deserialize, Serialize};

use sortiment_core::{CellValue, DomainError, DomainResult};

/// A sheet of cells with a header row.
///
/// Rows may be shorter than the header; missing trailing cells read as
/// [`CellValue::Empty`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Vec<CellValue>>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like [`Table::column_index`], but a missing column is a schema error.
    pub fn require_column(&self, name: &str) -> DomainResult<usize> {
        self.column_index(name).ok_or_else(|| DomainError::schema(name))
    }

    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup_is_case_sensitive() {
        let table = Table::new(["GTIN", "Bezeichnung"]);
        assert_eq!(table.column_index("GTIN"), Some(0));
        assert_eq!(table.column_index("gtin"), None);
        assert_eq!(table.column_index(" GTIN"), None);
        assert_eq!(
            table.require_column("Gtin").unwrap_err(),
            DomainError::schema("Gtin")
        );
    }

    #[test]
    fn short_rows_read_as_empty() {
        let table = Table::new(["GTIN", "Bezeichnung"]).with_rows([vec![CellValue::text("1")]]);
        assert_eq!(table.cell(0, 0), &CellValue::text("1"));
        assert_eq!(table.cell(0, 1), &CellValue::Empty);
        assert_eq!(table.cell(7, 0), &CellValue::Empty);
    }
}
