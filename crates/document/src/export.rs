//! Spreadsheet export of the negative list (no barcodes).

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use sortiment_catalog::{CatalogSchema, NegativeListEntry};
use sortiment_core::CellValue;

use crate::error::DocumentError;

/// Worksheet name of the export.
pub const NEGATIVE_LIST_SHEET: &str = "Negativliste";

/// One output column of the export.
#[derive(Debug, Clone, PartialEq)]
enum Column<'a> {
    Identifier(&'a str),
    Label(&'a str),
    Attribute(&'a str),
}

impl Column<'_> {
    fn header(&self) -> &str {
        match self {
            Column::Identifier(name) | Column::Label(name) | Column::Attribute(name) => name,
        }
    }
}

/// Write the entries as an XLSX workbook.
///
/// `source_columns` is the master table's header; the export keeps that order
/// so the sheet looks like the master rows it came from. Without a header
/// (catalogs built from records) the columns are identifier, label, then
/// every attribute column in the order it first appears. Identifiers are
/// written as text so leading zeros survive.
pub fn negative_list_xlsx(
    entries: &[NegativeListEntry],
    source_columns: &[String],
    schema: &CatalogSchema,
) -> Result<Vec<u8>, DocumentError> {
    let columns = output_columns(entries, source_columns, schema);

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(NEGATIVE_LIST_SHEET)?;

        for (col, column) in columns.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, column.header(), &header_format)?;
        }

        for (i, entry) in entries.iter().enumerate() {
            let row = (i + 1) as u32;
            for (col, column) in columns.iter().enumerate() {
                let col = col as u16;
                match column {
                    Column::Identifier(_) => {
                        sheet.write_string(row, col, entry.identifier().as_str())?;
                    }
                    Column::Label(_) => {
                        sheet.write_string(row, col, entry.label())?;
                    }
                    Column::Attribute(name) => {
                        if let Some(value) = entry.attribute(name) {
                            write_cell(sheet, row, col, value)?;
                        }
                    }
                }
            }
        }

        sheet.autofit();
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(entries = entries.len(), bytes = bytes.len(), "negative list exported");
    Ok(bytes)
}

fn output_columns<'a>(
    entries: &'a [NegativeListEntry],
    source_columns: &'a [String],
    schema: &'a CatalogSchema,
) -> Vec<Column<'a>> {
    let classify = |name: &'a str| {
        if name == schema.identifier_column {
            Column::Identifier(name)
        } else if name == schema.label_column {
            Column::Label(name)
        } else {
            Column::Attribute(name)
        }
    };

    if !source_columns.is_empty() {
        return source_columns.iter().map(|c| classify(c.as_str())).collect();
    }

    let mut columns = vec![
        Column::Identifier(schema.identifier_column.as_str()),
        Column::Label(schema.label_column.as_str()),
    ];
    for entry in entries {
        for attribute in entry.attributes() {
            let column = Column::Attribute(attribute.column.as_str());
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }
    columns
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &CellValue) -> Result<(), XlsxError> {
    match value {
        CellValue::Empty => {}
        CellValue::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        CellValue::Int(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Float(f) if f.is_finite() => {
            sheet.write_number(row, col, *f)?;
        }
        other => {
            sheet.write_string(row, col, other.to_plain_string())?;
        }
    }
    Ok(())
}
