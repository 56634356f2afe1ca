use thiserror::Error;

use sortiment_barcode::RenderError;
use sortiment_core::DomainError;

/// Failure to produce an output artifact.
///
/// Per-entry barcode failures are not errors here; they become placeholder
/// cells and are listed in the [`crate::DocumentSummary`].
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Barcode parameters are unusable for every entry.
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("pdf error: {0}")]
    Pdf(String),

    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
