//! Document assembly: negative list → barcode PDF.

use image::{DynamicImage, GrayImage};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};
use serde::Serialize;

use sortiment_barcode::{RenderOutcome, render_batch};
use sortiment_catalog::NegativeListEntry;
use sortiment_core::ArticleId;

use crate::config::DocumentConfig;
use crate::error::DocumentError;
use crate::layout::{CellContent, GridLayout, Placement, Rect};
use crate::typography::{
    HEADER_FONT_PT, IDENTIFIER_FONT_PT, PAGE_COUNTER_FONT_PT, fit_label, fit_line, pdf_safe,
    text_width_mm,
};

/// A cell that was laid out without a barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub identifier: String,
    pub reason: String,
}

/// What went into the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    /// Negative-list entries handed in.
    pub entries: usize,
    /// Grid cells drawn (always equal to `entries`).
    pub cells: usize,
    /// Cells with a barcode.
    pub rendered: usize,
    /// Cells whose barcode could not be rendered.
    pub placeholders: Vec<Placeholder>,
    pub pages: usize,
}

/// Finished PDF plus its summary.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    pub bytes: Vec<u8>,
    pub summary: DocumentSummary,
}

struct Cell<'a> {
    entry: &'a NegativeListEntry,
    barcode: RenderOutcome,
}

/// Render, lay out and serialize the negative list.
///
/// A barcode that cannot be rendered yields a placeholder cell (label and
/// identifier line, blank image area); it does not abort the document. Only
/// invalid configuration or a PDF serialization failure is an error.
pub fn assemble(
    entries: &[NegativeListEntry],
    config: &DocumentConfig,
) -> Result<AssembledDocument, DocumentError> {
    let layout = GridLayout::new(config.layout.clone())?;
    config.barcode.validate()?;

    let identifiers: Vec<ArticleId> = entries.iter().map(|e| e.identifier().clone()).collect();
    let outcomes = render_batch(&identifiers, &config.barcode);

    let plan = layout.plan(
        entries
            .iter()
            .zip(outcomes)
            .map(|(entry, barcode)| Cell { entry, barcode }),
    );

    let mut summary = DocumentSummary {
        entries: entries.len(),
        pages: plan.page_count(),
        ..DocumentSummary::default()
    };

    let canvas = Canvas::new(config, &layout, plan.page_count())?;
    for placement in plan.into_placements() {
        canvas.draw_cell(placement, &mut summary);
    }
    let bytes = canvas.finish()?;

    tracing::info!(
        entries = summary.entries,
        rendered = summary.rendered,
        placeholders = summary.placeholders.len(),
        pages = summary.pages,
        bytes = bytes.len(),
        "negative list document assembled"
    );

    Ok(AssembledDocument { bytes, summary })
}

fn pdf_error(err: printpdf::Error) -> DocumentError {
    DocumentError::Pdf(format!("{err:?}"))
}

/// One line of text inside a cell, in layout coordinates.
#[derive(Debug, Clone, PartialEq)]
struct TextLine {
    text: String,
    size_pt: f32,
    x: f32,
    baseline: f32,
    bold: bool,
}

impl TextLine {
    fn width_mm(&self) -> f32 {
        text_width_mm(&self.text, self.size_pt)
    }
}

/// Text lines of one cell: label, identifier line and, when the barcode was
/// rendered, the caption under the bars. Every line is fitted to the cell's
/// inner width, so nothing reaches into the neighbouring column.
fn cell_lines(
    config: &DocumentConfig,
    content: &CellContent,
    label: &str,
    identifier: &str,
    caption_pt: Option<f32>,
) -> Vec<TextLine> {
    let mut lines = Vec::with_capacity(3);

    let label = fit_label(&pdf_safe(label), content.text_width);
    lines.push(TextLine {
        size_pt: label.size_pt(),
        text: label.text,
        x: content.text_x,
        baseline: content.label_baseline,
        bold: true,
    });

    let id_line = fit_line(
        &pdf_safe(&config.identifier_line(identifier)),
        content.text_width,
        IDENTIFIER_FONT_PT,
    );
    lines.push(TextLine {
        text: id_line.text,
        size_pt: id_line.size_pt,
        x: content.text_x,
        baseline: content.identifier_baseline,
        bold: false,
    });

    if let Some(preferred_pt) = caption_pt {
        let caption = fit_line(&pdf_safe(identifier), content.text_width, preferred_pt);
        let width = caption.width_mm();
        let centred = content.image.x + (content.image.width - width) / 2.0;
        let max_x = content.text_x + content.text_width - width;
        lines.push(TextLine {
            text: caption.text,
            size_pt: caption.size_pt,
            x: centred.min(max_x).max(content.text_x),
            baseline: content.caption_baseline,
            bold: false,
        });
    }

    lines
}

/// Open PDF with one layer per page; pages are created up front because the
/// plan already knows how many there are.
struct Canvas<'a> {
    config: &'a DocumentConfig,
    layout: &'a GridLayout,
    doc: PdfDocumentReference,
    pages: Vec<PdfLayerReference>,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl<'a> Canvas<'a> {
    fn new(
        config: &'a DocumentConfig,
        layout: &'a GridLayout,
        page_count: usize,
    ) -> Result<Self, DocumentError> {
        let geometry = layout.config();
        let width = Mm(geometry.page_width_mm);
        let height = Mm(geometry.page_height_mm);

        let (doc, first_page, first_layer) =
            PdfDocument::new(config.title.as_str(), width, height, "Seite 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;

        let mut pages = vec![doc.get_page(first_page).get_layer(first_layer)];
        for number in 2..=page_count {
            let (page, layer) = doc.add_page(width, height, format!("Seite {number}"));
            pages.push(doc.get_page(page).get_layer(layer));
        }

        let canvas = Self {
            config,
            layout,
            doc,
            pages,
            regular,
            bold,
        };
        for index in 0..canvas.pages.len() {
            canvas.draw_header(index);
        }
        Ok(canvas)
    }

    // Layout coordinates grow downwards, PDF coordinates upwards.
    fn pdf_y(&self, y: f32) -> Mm {
        Mm(self.layout.config().page_height_mm - y)
    }

    fn draw_header(&self, index: usize) {
        let layer = &self.pages[index];
        let header = self.layout.config().header_rect();
        let baseline = header.y + header.height * 0.6;

        layer.use_text(
            pdf_safe(&self.config.header_text()),
            HEADER_FONT_PT,
            Mm(header.x),
            self.pdf_y(baseline),
            &self.bold,
        );

        let counter = format!("Seite {}/{}", index + 1, self.pages.len());
        let counter_x = header.right() - text_width_mm(&counter, PAGE_COUNTER_FONT_PT);
        layer.use_text(
            counter,
            PAGE_COUNTER_FONT_PT,
            Mm(counter_x),
            self.pdf_y(baseline),
            &self.regular,
        );
    }

    fn draw_cell(&self, placement: Placement<Cell<'_>>, summary: &mut DocumentSummary) {
        let Placement {
            page, rect, item, ..
        } = placement;
        let layer = self.pages[page].clone();
        let content = self.layout.cell_content(&rect);
        let identifier = item.entry.identifier().as_str();

        let caption_pt = item.barcode.as_ref().ok().map(|b| b.font_size_pt());
        for line in cell_lines(self.config, &content, item.entry.label(), identifier, caption_pt) {
            let font = if line.bold { &self.bold } else { &self.regular };
            layer.use_text(
                line.text.as_str(),
                line.size_pt,
                Mm(line.x),
                self.pdf_y(line.baseline),
                font,
            );
        }

        match item.barcode {
            Ok(barcode) => {
                self.embed_raster(&layer, barcode.into_raster(), &content.image);
                summary.rendered += 1;
            }
            Err(err) => {
                tracing::warn!(identifier, reason = err.reason(), "barcode placeholder emitted");
                summary.placeholders.push(Placeholder {
                    identifier: identifier.to_string(),
                    reason: err.reason().to_string(),
                });
            }
        }
        summary.cells += 1;
    }

    /// Scale the raster into `target`. The pixel buffer is consumed here and
    /// released once the page holds its own copy.
    fn embed_raster(&self, layer: &PdfLayerReference, raster: GrayImage, target: &Rect) {
        let (px_width, px_height) = raster.dimensions();
        let rgb = DynamicImage::ImageRgb8(DynamicImage::ImageLuma8(raster).to_rgb8());

        let dpi = px_width as f32 * 25.4 / target.width;
        let natural_height_mm = px_height as f32 * 25.4 / dpi;

        Image::from_dynamic_image(&rgb).add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(target.x)),
                translate_y: Some(self.pdf_y(target.bottom())),
                dpi: Some(dpi),
                scale_y: Some(target.height / natural_height_mm),
                ..ImageTransform::default()
            },
        );
    }

    fn finish(self) -> Result<Vec<u8>, DocumentError> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortiment_barcode::{MAX_SYMBOL_LEN, render};
    use sortiment_catalog::ArticleRecord;

    fn entry(id: &str, label: &str) -> NegativeListEntry {
        ArticleRecord::new(id.parse().unwrap(), label)
    }

    #[test]
    fn reference_example_fits_one_page() {
        let entries = vec![entry("1111111111111", "A"), entry("3333333333333", "C")];
        let doc = assemble(&entries, &DocumentConfig::default()).unwrap();

        assert!(doc.bytes.starts_with(b"%PDF"));
        assert_eq!(doc.summary.cells, 2);
        assert_eq!(doc.summary.rendered, 2);
        assert!(doc.summary.placeholders.is_empty());
        assert_eq!(doc.summary.pages, 1);
    }

    #[test]
    fn invalid_identifier_becomes_placeholder() {
        let entries = vec![
            entry("1111111111111", "A"),
            entry("Käse-01", "Käse"),
            entry("3333333333333", "C"),
        ];
        let doc = assemble(&entries, &DocumentConfig::default()).unwrap();

        assert_eq!(doc.summary.cells, 3);
        assert_eq!(doc.summary.rendered, 2);
        assert_eq!(doc.summary.placeholders.len(), 1);
        assert_eq!(doc.summary.placeholders[0].identifier, "Käse-01");
    }

    #[test]
    fn empty_list_still_produces_a_header_page() {
        let doc = assemble(&[], &DocumentConfig::default()).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF"));
        assert_eq!(doc.summary.pages, 1);
        assert_eq!(doc.summary.cells, 0);
    }

    #[test]
    fn text_lines_stay_inside_the_cell() {
        let config = DocumentConfig::default();
        let layout = GridLayout::new(config.layout.clone()).unwrap();
        let plan = layout.plan(0..config.layout.columns);

        let identifiers = [
            "4006381333931".to_string(),
            "1".repeat(40),
            "A".repeat(MAX_SYMBOL_LEN),
            "7".repeat(MAX_SYMBOL_LEN + 1),
            "Ä".repeat(200),
        ];

        for placement in plan.placements() {
            let content = layout.cell_content(&placement.rect);
            let left = content.text_x;
            let right = content.text_x + content.text_width;
            assert!(right <= placement.rect.right() + 1e-3);

            for identifier in &identifiers {
                let id: ArticleId = identifier.parse().unwrap();
                let caption_pt = render(&id, &config.barcode).ok().map(|b| b.font_size_pt());
                let label = format!("Artikel {}", "X".repeat(80));

                let lines = cell_lines(&config, &content, &label, identifier, caption_pt);
                assert_eq!(lines.len(), if caption_pt.is_some() { 3 } else { 2 });
                for line in &lines {
                    assert!(line.x >= left - 1e-3, "{identifier}: {line:?} starts left of the cell");
                    assert!(
                        line.x + line.width_mm() <= right + 1e-3,
                        "{identifier}: {line:?} is {}mm wide, cell text width {}mm",
                        line.width_mm(),
                        content.text_width
                    );
                }
            }
        }
    }

    #[test]
    fn short_caption_is_centred_under_the_bars() {
        let config = DocumentConfig::default();
        let layout = GridLayout::new(config.layout.clone()).unwrap();
        let content = layout.cell_content(&layout.plan([()]).placements()[0].rect);

        let lines = cell_lines(&config, &content, "Apfel", "4006381333931", Some(8.0));
        let caption = &lines[2];
        let centre = caption.x + caption.width_mm() / 2.0;
        let image_centre = content.image.x + content.image.width / 2.0;
        assert!((centre - image_centre).abs() < 1e-3);
        assert_eq!(caption.size_pt, 8.0);
    }

    #[test]
    fn invalid_configuration_is_an_error() {
        let mut config = DocumentConfig::default();
        config.layout.columns = 0;
        assert!(matches!(
            assemble(&[entry("1", "A")], &config),
            Err(DocumentError::Domain(_))
        ));

        let mut config = DocumentConfig::default();
        config.barcode.module_width_px = 0;
        assert!(matches!(
            assemble(&[entry("1", "A")], &config),
            Err(DocumentError::Render(_))
        ));
    }
}
