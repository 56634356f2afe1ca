//! Grid pagination layout.
//!
//! Entries are placed into a fixed N-column grid, left to right and top to
//! bottom, on fixed-size pages. The layout is a pure fold over the entries: it
//! produces [`Placement`]s (page, row, column, rectangle) and never touches the
//! output format. [`crate::pdf`] turns the plan into pages afterwards.
//!
//! All lengths are millimetres; `y` grows downwards from the top edge of the
//! page.

use serde::{Deserialize, Serialize};

use sortiment_core::{DomainError, DomainResult};

// Float slack for comparisons against the usable page extent.
const EPSILON: f32 = 1e-3;

/// Vertical space reserved for the bold label line.
pub const LABEL_LINE_MM: f32 = 4.5;
/// Vertical space reserved for the `"<prefix>: <identifier>"` line.
pub const IDENTIFIER_LINE_MM: f32 = 4.0;
/// Vertical space reserved for the human-readable line under the bars.
pub const CAPTION_LINE_MM: f32 = 4.0;

/// Axis-aligned rectangle, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the interiors overlap (shared edges do not count).
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() - EPSILON
            && other.x < self.right() - EPSILON
            && self.y < other.bottom() - EPSILON
            && other.y < self.bottom() - EPSILON
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }
}

/// Page geometry and grid shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    /// Header band drawn at the top of every page.
    pub header_height_mm: f32,
    pub columns: usize,
    pub row_height_mm: f32,
    /// Barcode width as a fraction of the column width.
    pub image_width_ratio: f32,
    pub image_height_mm: f32,
    pub cell_padding_mm: f32,
}

impl Default for LayoutConfig {
    /// A4 portrait, three columns, six rows per page.
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_top_mm: 15.0,
            margin_bottom_mm: 15.0,
            margin_left_mm: 15.0,
            margin_right_mm: 15.0,
            header_height_mm: 15.0,
            columns: 3,
            row_height_mm: 42.0,
            image_width_ratio: 0.85,
            image_height_mm: 18.0,
            cell_padding_mm: 2.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> DomainResult<()> {
        let positive = [
            ("page_width_mm", self.page_width_mm),
            ("page_height_mm", self.page_height_mm),
            ("row_height_mm", self.row_height_mm),
            ("image_height_mm", self.image_height_mm),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(DomainError::validation(format!("{name} must be > 0")));
            }
        }

        let non_negative = [
            ("margin_top_mm", self.margin_top_mm),
            ("margin_bottom_mm", self.margin_bottom_mm),
            ("margin_left_mm", self.margin_left_mm),
            ("margin_right_mm", self.margin_right_mm),
            ("header_height_mm", self.header_height_mm),
            ("cell_padding_mm", self.cell_padding_mm),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DomainError::validation(format!("{name} must be >= 0")));
            }
        }

        if self.columns == 0 {
            return Err(DomainError::validation("columns must be >= 1"));
        }
        if !(self.image_width_ratio > 0.0 && self.image_width_ratio <= 1.0) {
            return Err(DomainError::validation("image_width_ratio must be in (0, 1]"));
        }
        if self.column_width() <= 2.0 * self.cell_padding_mm {
            return Err(DomainError::validation("columns are narrower than the cell padding"));
        }
        if self.rows_per_page() == 0 {
            return Err(DomainError::validation(
                "no row fits between the header and the bottom margin",
            ));
        }

        let content = 2.0 * self.cell_padding_mm
            + LABEL_LINE_MM
            + IDENTIFIER_LINE_MM
            + self.image_height_mm
            + CAPTION_LINE_MM;
        if content > self.row_height_mm + EPSILON {
            return Err(DomainError::validation(format!(
                "cell content needs {content}mm but rows are {}mm high",
                self.row_height_mm
            )));
        }
        Ok(())
    }

    pub fn column_width(&self) -> f32 {
        (self.page_width_mm - self.margin_left_mm - self.margin_right_mm) / self.columns as f32
    }

    /// Baseline of the first row on every page.
    pub fn post_header_offset(&self) -> f32 {
        self.margin_top_mm + self.header_height_mm
    }

    /// Lowest `y` a row may reach.
    pub fn usable_limit(&self) -> f32 {
        self.page_height_mm - self.margin_bottom_mm
    }

    /// Vertical extent available to rows on one page.
    pub fn body_height(&self) -> f32 {
        self.usable_limit() - self.post_header_offset()
    }

    pub fn rows_per_page(&self) -> usize {
        let rows = (self.body_height() + EPSILON) / self.row_height_mm;
        if rows.is_finite() && rows > 0.0 {
            rows.floor() as usize
        } else {
            0
        }
    }

    pub fn image_width(&self) -> f32 {
        self.column_width() * self.image_width_ratio
    }

    pub fn header_rect(&self) -> Rect {
        Rect::new(
            self.margin_left_mm,
            self.margin_top_mm,
            self.page_width_mm - self.margin_left_mm - self.margin_right_mm,
            self.header_height_mm,
        )
    }
}

/// Transient pagination state: current page, column, and row baseline.
///
/// Created at document start, advanced once per placed entry, dropped at the
/// end. Only [`GridLayout::plan`] owns one.
#[derive(Debug, Clone, PartialEq)]
struct LayoutCursor {
    page: usize,
    column: usize,
    baseline_y: f32,
}

/// Where the cursor put one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    page: usize,
    column: usize,
    baseline_y: f32,
}

impl LayoutCursor {
    fn start(config: &LayoutConfig) -> Self {
        Self {
            page: 0,
            column: 0,
            baseline_y: config.post_header_offset(),
        }
    }

    fn advance(&mut self, config: &LayoutConfig) -> Slot {
        // Page-break guard: only checked before the first cell of a row.
        if self.column == 0 && self.baseline_y + config.row_height_mm > config.usable_limit() + EPSILON {
            self.page += 1;
            self.baseline_y = config.post_header_offset();
        }

        let slot = Slot {
            page: self.page,
            column: self.column,
            baseline_y: self.baseline_y,
        };

        self.column = (self.column + 1) % config.columns;
        if self.column == 0 {
            self.baseline_y += config.row_height_mm;
        }
        slot
    }
}

/// One placed grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<T> {
    /// Zero-based page index.
    pub page: usize,
    /// Zero-based row index on its page.
    pub row: usize,
    pub column: usize,
    pub rect: Rect,
    pub item: T,
}

/// Positions inside a cell, derived from the cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellContent {
    pub text_x: f32,
    /// Horizontal room for any text line: the cell minus its padding.
    pub text_width: f32,
    pub label_baseline: f32,
    pub identifier_baseline: f32,
    pub image: Rect,
    pub caption_baseline: f32,
}

/// Result of laying out a sequence of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan<T> {
    page_count: usize,
    placements: Vec<Placement<T>>,
}

impl<T> PagePlan<T> {
    /// Number of pages; at least one, even for an empty plan.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn placements(&self) -> &[Placement<T>] {
        &self.placements
    }

    pub fn into_placements(self) -> Vec<Placement<T>> {
        self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of grid rows used across all pages (partial rows included).
    pub fn row_count(&self) -> usize {
        let mut rows = 0;
        let mut last = None;
        for p in &self.placements {
            if last != Some((p.page, p.row)) {
                rows += 1;
                last = Some((p.page, p.row));
            }
        }
        rows
    }

}

/// Validated grid layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    config: LayoutConfig,
}

impl GridLayout {
    pub fn new(config: LayoutConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Place every item, in order. A partially filled last row is not padded.
    pub fn plan<T>(&self, items: impl IntoIterator<Item = T>) -> PagePlan<T> {
        let config = &self.config;
        let mut cursor = LayoutCursor::start(config);
        let column_width = config.column_width();

        let placements: Vec<Placement<T>> = items
            .into_iter()
            .map(|item| {
                let slot = cursor.advance(config);
                let row = ((slot.baseline_y - config.post_header_offset()) / config.row_height_mm)
                    .round() as usize;
                Placement {
                    page: slot.page,
                    row,
                    column: slot.column,
                    rect: Rect::new(
                        config.margin_left_mm + slot.column as f32 * column_width,
                        slot.baseline_y,
                        column_width,
                        config.row_height_mm,
                    ),
                    item,
                }
            })
            .collect();

        PagePlan {
            page_count: cursor.page + 1,
            placements,
        }
    }

    /// Label, identifier line, barcode and caption positions within a cell.
    ///
    /// The image is centred horizontally and has the same size in every cell.
    pub fn cell_content(&self, cell: &Rect) -> CellContent {
        let pad = self.config.cell_padding_mm;
        let image_width = self.config.image_width();
        let image_top = cell.y + pad + LABEL_LINE_MM + IDENTIFIER_LINE_MM;
        let image = Rect::new(
            cell.x + (cell.width - image_width) / 2.0,
            image_top,
            image_width,
            self.config.image_height_mm,
        );

        CellContent {
            text_x: cell.x + pad,
            text_width: cell.width - 2.0 * pad,
            label_baseline: cell.y + pad + LABEL_LINE_MM * 0.8,
            identifier_baseline: cell.y + pad + LABEL_LINE_MM + IDENTIFIER_LINE_MM * 0.8,
            image,
            caption_baseline: image.bottom() + CAPTION_LINE_MM * 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        GridLayout::new(LayoutConfig::default()).unwrap()
    }

    fn positions(plan: &PagePlan<usize>) -> Vec<(usize, usize, usize)> {
        plan.placements()
            .iter()
            .map(|p| (p.page, p.row, p.column))
            .collect()
    }

    #[test]
    fn default_geometry_holds_six_rows() {
        let config = LayoutConfig::default();
        assert_eq!(config.post_header_offset(), 30.0);
        assert_eq!(config.usable_limit(), 282.0);
        assert_eq!(config.column_width(), 60.0);
        assert_eq!(config.rows_per_page(), 6);
    }

    #[test]
    fn fills_columns_then_rows() {
        let plan = layout().plan(0..5);
        assert_eq!(
            positions(&plan),
            vec![(0, 0, 0), (0, 0, 1), (0, 0, 2), (0, 1, 0), (0, 1, 1)]
        );
        assert_eq!(plan.row_count(), 2);
        assert_eq!(plan.page_count(), 1);

        let first = plan.placements()[0].rect;
        assert_eq!(first, Rect::new(15.0, 30.0, 60.0, 42.0));
        let fourth = plan.placements()[3].rect;
        assert_eq!(fourth, Rect::new(15.0, 72.0, 60.0, 42.0));
    }

    #[test]
    fn breaks_page_when_next_row_does_not_fit() {
        // 6 rows * 3 columns fit on the first page.
        let plan = layout().plan(0..19);
        assert_eq!(plan.page_count(), 2);

        let last_on_first = &plan.placements()[17];
        assert_eq!((last_on_first.page, last_on_first.row, last_on_first.column), (0, 5, 2));
        assert_eq!(last_on_first.rect.bottom(), 282.0);

        let first_on_second = &plan.placements()[18];
        assert_eq!((first_on_second.page, first_on_second.row, first_on_second.column), (1, 0, 0));
        assert_eq!(first_on_second.rect.y, 30.0);
    }

    #[test]
    fn exactly_full_page_does_not_open_a_new_one() {
        let plan = layout().plan(0..18);
        assert_eq!(plan.page_count(), 1);
    }

    #[test]
    fn empty_input_keeps_a_header_page() {
        let plan = layout().plan(std::iter::empty::<usize>());
        assert!(plan.is_empty());
        assert_eq!(plan.page_count(), 1);
        assert_eq!(plan.row_count(), 0);
    }

    #[test]
    fn reference_example_uses_one_row_on_one_page() {
        let plan = layout().plan(["1111111111111", "3333333333333"]);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.row_count(), 1);
        assert_eq!(plan.page_count(), 1);
    }

    #[test]
    fn cell_content_stays_inside_the_cell() {
        let layout = layout();
        let plan = layout.plan(0..3);
        for p in plan.placements() {
            let content = layout.cell_content(&p.rect);
            assert!(p.rect.contains(&content.image));
            assert!(content.label_baseline < content.identifier_baseline);
            assert!(content.identifier_baseline < content.image.y);
            assert!(content.caption_baseline < p.rect.bottom());
            assert!((content.image.width - 51.0).abs() < 1e-3);
        }
    }

    #[test]
    fn rejects_geometry_without_room_for_a_row() {
        let config = LayoutConfig {
            row_height_mm: 300.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(GridLayout::new(config), Err(DomainError::Validation(_))));

        let config = LayoutConfig {
            columns: 0,
            ..LayoutConfig::default()
        };
        assert!(GridLayout::new(config).is_err());

        let config = LayoutConfig {
            image_height_mm: 40.0,
            ..LayoutConfig::default()
        };
        assert!(GridLayout::new(config).is_err());
    }

    #[test]
    fn other_column_counts_wrap_accordingly() {
        let layout = GridLayout::new(LayoutConfig {
            columns: 2,
            ..LayoutConfig::default()
        })
        .unwrap();
        let plan = layout.plan(0..3);
        assert_eq!(positions(&plan), vec![(0, 0, 0), (0, 0, 1), (0, 1, 0)]);
        assert_eq!(plan.placements()[1].rect.x, 105.0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 300,
                ..ProptestConfig::default()
            })]

            /// Property: K entries use ceil(K/N) rows and ceil(rows*rowHeight/body) pages.
            #[test]
            fn rows_and_pages_follow_the_grid(k in 1usize..200, columns in 1usize..5) {
                let config = LayoutConfig { columns, ..LayoutConfig::default() };
                let layout = GridLayout::new(config.clone()).unwrap();
                let plan = layout.plan(0..k);

                let rows = k.div_ceil(columns);
                prop_assert_eq!(plan.len(), k);
                prop_assert_eq!(plan.row_count(), rows);

                let expected_pages =
                    ((rows as f32 * config.row_height_mm) / config.body_height()).ceil() as usize;
                prop_assert_eq!(plan.page_count(), expected_pages);
            }

            /// Property: no two cells on a page overlap, and all stay within the body.
            #[test]
            fn cells_never_overlap(k in 0usize..120) {
                let layout = GridLayout::new(LayoutConfig::default()).unwrap();
                let config = layout.config().clone();
                let plan = layout.plan(0..k);
                let body = Rect::new(
                    config.margin_left_mm,
                    config.post_header_offset(),
                    config.page_width_mm - config.margin_left_mm - config.margin_right_mm,
                    config.body_height(),
                );

                for (i, a) in plan.placements().iter().enumerate() {
                    prop_assert!(body.contains(&a.rect));
                    prop_assert!(!a.rect.overlaps(&config.header_rect()));
                    for b in &plan.placements()[i + 1..] {
                        if a.page == b.page {
                            prop_assert!(!a.rect.overlaps(&b.rect));
                        }
                    }
                }
            }

            /// Property: placement order is page, then row, then column.
            #[test]
            fn placements_are_in_reading_order(k in 0usize..120) {
                let plan = GridLayout::new(LayoutConfig::default()).unwrap().plan(0..k);
                let keys: Vec<(usize, usize, usize)> =
                    plan.placements().iter().map(|p| (p.page, p.row, p.column)).collect();
                let mut sorted = keys.clone();
                sorted.sort();
                prop_assert_eq!(keys, sorted);
                for (i, p) in plan.placements().iter().enumerate() {
                    prop_assert_eq!(p.item, i);
                }
            }
        }
    }
}
