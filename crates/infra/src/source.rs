use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use calamine::{Data, Range, Reader, Xlsx, open_workbook_auto};
use thiserror::Error;

use sortiment_catalog::{Catalog, CatalogSchema, Table};
use sortiment_core::{CellValue, DomainError};

/// Failure to obtain a catalog table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unreadable workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("unreadable xlsx data: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("workbook contains no worksheet")]
    EmptyWorkbook,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Something that yields one catalog table (header row + data rows).
pub trait TableSource: Send + Sync {
    fn read_table(&self) -> Result<Table, LoadError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

impl<S> TableSource for Arc<S>
where
    S: TableSource + ?Sized,
{
    fn read_table(&self) -> Result<Table, LoadError> {
        (**self).read_table()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Spreadsheet on disk (xlsx, xlsm, xls, ods); the first worksheet is read.
#[derive(Debug, Clone)]
pub struct SpreadsheetFile {
    path: PathBuf,
}

impl SpreadsheetFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for SpreadsheetFile {
    fn read_table(&self) -> Result<Table, LoadError> {
        std::fs::metadata(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;

        let mut workbook = open_workbook_auto(&self.path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::EmptyWorkbook)??;
        Ok(table_from_range(&range))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory xlsx document, e.g. an uploaded positive list.
#[derive(Debug, Clone)]
pub struct SpreadsheetBytes {
    bytes: Vec<u8>,
}

impl SpreadsheetBytes {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl TableSource for SpreadsheetBytes {
    fn read_table(&self) -> Result<Table, LoadError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(self.bytes.as_slice()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::EmptyWorkbook)??;
        Ok(table_from_range(&range))
    }

    fn describe(&self) -> String {
        format!("xlsx upload ({} bytes)", self.bytes.len())
    }
}

/// Ready-made table, for tests and dev wiring.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTable {
    table: Table,
}

impl InMemoryTable {
    pub fn new(table: Table) -> Self {
        Self { table }
    }
}

impl TableSource for InMemoryTable {
    fn read_table(&self) -> Result<Table, LoadError> {
        Ok(self.table.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory table ({} rows)", self.table.len())
    }
}

/// Read a source and build a catalog from it.
pub fn load_catalog(source: &dyn TableSource, schema: &CatalogSchema) -> Result<Catalog, LoadError> {
    let table = source.read_table()?;
    let catalog = Catalog::from_table(&table, schema)?;

    tracing::info!(
        source = %source.describe(),
        articles = catalog.len(),
        dropped_rows = catalog.dropped_rows(),
        duplicate_ids = catalog.duplicate_ids(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// First row is the header; fully empty rows are skipped.
fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::default();
    };

    let mut table = Table::new(header.iter().map(|c| cell_value(c).to_plain_string()));
    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(cell_value).collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        table.push_row(cells);
    }
    table
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_calamine_cells() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_value(&Data::Float(4.0)), CellValue::Float(4.0));
        assert_eq!(cell_value(&Data::Int(7)), CellValue::Int(7));
        assert_eq!(cell_value(&Data::String("x".into())), CellValue::text("x"));
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SpreadsheetFile::new("/nonexistent/Herzstuecke-Mutter-Liste.xlsx")
            .read_table()
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = SpreadsheetBytes::new(b"not a workbook".to_vec()).read_table().unwrap_err();
        assert!(matches!(err, LoadError::Xlsx(_)));
    }

    #[test]
    fn in_memory_source_feeds_the_catalog() {
        let table = Table::new(["GTIN", "Bezeichnung"]).with_rows([vec!["1".into(), "A".into()]]);
        let catalog = load_catalog(&InMemoryTable::new(table), &CatalogSchema::default()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn schema_errors_surface_from_load() {
        let table = Table::new(["EAN"]).with_rows([vec!["1".into()]]);
        let err = load_catalog(&InMemoryTable::new(table), &CatalogSchema::default()).unwrap_err();
        assert!(matches!(err, LoadError::Domain(DomainError::Schema { .. })));
    }
}
