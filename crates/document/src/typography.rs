//! Font size tiers and text fitting for grid cells.
//!
//! The document uses the PDF base-14 Helvetica fonts, so widths are estimated
//! from an average glyph advance instead of measured from font metrics.

use std::borrow::Cow;

const PT_TO_MM: f32 = 25.4 / 72.0;
// Average Helvetica advance width, in em.
const AVG_ADVANCE_EM: f32 = 0.55;
const ELLIPSIS: &str = "...";

/// Font size for the identifier line.
pub const IDENTIFIER_FONT_PT: f32 = 7.0;
/// Font size for the page header title.
pub const HEADER_FONT_PT: f32 = 14.0;
/// Font size for the page counter in the header.
pub const PAGE_COUNTER_FONT_PT: f32 = 9.0;

/// Label font tiers, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontTier {
    Regular,
    Compact,
    Small,
}

impl FontTier {
    pub const ALL: [FontTier; 3] = [FontTier::Regular, FontTier::Compact, FontTier::Small];

    pub fn size_pt(self) -> f32 {
        match self {
            FontTier::Regular => 8.0,
            FontTier::Compact => 7.0,
            FontTier::Small => 6.0,
        }
    }
}

/// A label prepared for a cell of known width.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLabel {
    pub text: String,
    pub tier: FontTier,
    pub truncated: bool,
}

impl FittedLabel {
    pub fn size_pt(&self) -> f32 {
        self.tier.size_pt()
    }
}

/// Estimated rendered width of `text` at `size_pt`.
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * AVG_ADVANCE_EM * size_pt * PT_TO_MM
}

fn max_chars(width_mm: f32, size_pt: f32) -> usize {
    (width_mm / (AVG_ADVANCE_EM * size_pt * PT_TO_MM)).floor().max(0.0) as usize
}

/// Pick the largest tier at which `label` fits `width_mm`.
///
/// Labels too long even for the smallest tier are cut and end in `...`, so a
/// label never runs into the neighbouring column.
pub fn fit_label(label: &str, width_mm: f32) -> FittedLabel {
    let label = label.trim();

    for tier in FontTier::ALL {
        if text_width_mm(label, tier.size_pt()) <= width_mm {
            return FittedLabel {
                text: label.to_string(),
                tier,
                truncated: false,
            };
        }
    }

    FittedLabel {
        text: truncate(label, width_mm, FontTier::Small.size_pt()),
        tier: FontTier::Small,
        truncated: true,
    }
}

/// A single text line prepared for a cell of known width.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLine {
    pub text: String,
    pub size_pt: f32,
    pub truncated: bool,
}

impl FittedLine {
    pub fn width_mm(&self) -> f32 {
        text_width_mm(&self.text, self.size_pt)
    }
}

/// Fit a line that prefers `preferred_pt` (identifier line, barcode caption).
///
/// Steps down through the smaller tiers first; a line that is still too wide
/// at the smallest size is cut and ends in `...`.
pub fn fit_line(text: &str, width_mm: f32, preferred_pt: f32) -> FittedLine {
    let text = text.trim();
    let smaller = FontTier::ALL
        .into_iter()
        .map(FontTier::size_pt)
        .filter(|size| *size < preferred_pt);

    let mut smallest = preferred_pt;
    for size_pt in std::iter::once(preferred_pt).chain(smaller) {
        smallest = size_pt;
        if text_width_mm(text, size_pt) <= width_mm {
            return FittedLine {
                text: text.to_string(),
                size_pt,
                truncated: false,
            };
        }
    }

    FittedLine {
        text: truncate(text, width_mm, smallest),
        size_pt: smallest,
        truncated: true,
    }
}

fn truncate(text: &str, width_mm: f32, size_pt: f32) -> String {
    let keep = max_chars(width_mm, size_pt).saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect::<String>().trim_end().to_string();
    out.push_str(ELLIPSIS);
    out
}

/// Map text onto the character range the base-14 fonts render reliably.
///
/// German umlauts and ß are transliterated; anything else outside printable
/// ASCII becomes `?`.
pub fn pdf_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| matches!(c, ' '..='~')) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        match c {
            ' '..='~' => out.push(c),
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            'ß' => out.push_str("ss"),
            '\t' | '\n' | '\r' => out.push(' '),
            _ => out.push('?'),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_labels_use_the_regular_tier() {
        let fitted = fit_label("Zahnpasta", 56.0);
        assert_eq!(fitted.tier, FontTier::Regular);
        assert_eq!(fitted.text, "Zahnpasta");
        assert!(!fitted.truncated);
    }

    #[test]
    fn longer_labels_step_down_a_tier() {
        // Too wide at 8pt (about 36 chars fit), fine at 7pt.
        let label = "Bio Vollkornhaferflocken zart 500g Beutel";
        assert_eq!(fit_label(label, 56.0).tier, FontTier::Compact);
    }

    #[test]
    fn overlong_labels_are_truncated_to_fit() {
        let label = "Sehr lange Artikelbezeichnung mit vielen Zusatzangaben zur Packungsgroesse";
        let fitted = fit_label(label, 56.0);
        assert_eq!(fitted.tier, FontTier::Small);
        assert!(fitted.truncated);
        assert!(fitted.text.ends_with("..."));
        assert!(text_width_mm(&fitted.text, fitted.size_pt()) <= 56.0);
    }

    #[test]
    fn lines_step_down_below_the_preferred_size() {
        let line = fit_line("GTIN: 4006381333931", 56.0, IDENTIFIER_FONT_PT);
        assert_eq!(line.size_pt, IDENTIFIER_FONT_PT);
        assert!(!line.truncated);

        // Prefix plus 40 digits: too wide at 7pt, fits at 6pt.
        let long = format!("GTIN: {}", "1".repeat(40));
        let line = fit_line(&long, 56.0, IDENTIFIER_FONT_PT);
        assert_eq!(line.size_pt, 6.0);
        assert_eq!(line.text, long);
        assert!(!line.truncated);
    }

    #[test]
    fn overlong_lines_are_cut_at_the_smallest_size() {
        let text = format!("GTIN: {}", "9".repeat(120));
        let line = fit_line(&text, 56.0, IDENTIFIER_FONT_PT);
        assert!(line.truncated);
        assert_eq!(line.size_pt, 6.0);
        assert!(line.text.ends_with("..."));
        assert!(line.width_mm() <= 56.0);
    }

    #[test]
    fn larger_preferred_size_is_tried_first() {
        let line = fit_line("12", 56.0, 11.0);
        assert_eq!(line.size_pt, 11.0);
    }

    #[test]
    fn pdf_safe_transliterates_umlauts() {
        assert_eq!(pdf_safe("Müsli Größe"), "Muesli Groesse");
        assert_eq!(pdf_safe("plain"), "plain");
        assert!(matches!(pdf_safe("plain"), Cow::Borrowed(_)));
        assert_eq!(pdf_safe("Crème"), "Cr?me");
    }
}
