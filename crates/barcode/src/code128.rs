//! Code 128 rendering.

use barcoders::sym::code128::Code128;
use image::{GrayImage, Luma};
use rayon::prelude::*;

use sortiment_core::ArticleId;

use crate::error::RenderError;
use crate::params::RenderParams;

/// Longest identifier we accept; longer symbols do not fit a grid cell.
pub const MAX_SYMBOL_LEN: usize = 48;

// Code set selectors understood by the encoder.
const CODE_SET_B: char = 'Ɓ';
const CODE_SET_C: char = 'Ć';

const BAR: Luma<u8> = Luma([0]);
const SPACE: Luma<u8> = Luma([255]);

/// Rendered barcode for one identifier.
#[derive(Debug, Clone)]
pub struct BarcodeImage {
    identifier: ArticleId,
    raster: GrayImage,
    modules: u32,
    font_size_pt: f32,
}

impl BarcodeImage {
    pub fn identifier(&self) -> &ArticleId {
        &self.identifier
    }

    pub fn raster(&self) -> &GrayImage {
        &self.raster
    }

    /// Hands the pixel buffer over to the consumer (the document embeds it).
    pub fn into_raster(self) -> GrayImage {
        self.raster
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Number of symbol modules, excluding the quiet zones.
    pub fn modules(&self) -> u32 {
        self.modules
    }

    /// Font size for the human-readable line under the bars.
    pub fn font_size_pt(&self) -> f32 {
        self.font_size_pt
    }
}

/// Success image or failure marker for one identifier.
pub type RenderOutcome = Result<BarcodeImage, RenderError>;

/// Render one identifier as Code 128.
///
/// Even-length all-digit identifiers (GTIN-8/12/14 and friends) use code set C,
/// everything else code set B. Only printable ASCII is encodable.
pub fn render(identifier: &ArticleId, params: &RenderParams) -> RenderOutcome {
    params.validate()?;

    let data = identifier.as_str();
    check_symbol_input(data)?;

    let selector = if data.len() % 2 == 0 && data.bytes().all(|b| b.is_ascii_digit()) {
        CODE_SET_C
    } else {
        CODE_SET_B
    };

    let symbol = Code128::new(format!("{selector}{data}"))
        .map_err(|e| RenderError::invalid_input(data, format!("encoder rejected input: {e:?}")))?;
    let encoded = symbol.encode();

    let quiet = params.quiet_zone_modules;
    let (modules, width) = u32::try_from(encoded.len())
        .ok()
        .and_then(|modules| {
            let total = quiet.checked_mul(2)?.checked_add(modules)?;
            Some((modules, total.checked_mul(params.module_width_px)?))
        })
        .ok_or_else(|| RenderError::InvalidParams("barcode raster too wide".into()))?;
    let height = params.module_height_px;

    let mut raster = GrayImage::from_pixel(width, height, SPACE);
    for (module, bit) in encoded.iter().enumerate() {
        if *bit == 0 {
            continue;
        }
        let x0 = (quiet + module as u32) * params.module_width_px;
        for x in x0..x0 + params.module_width_px {
            for y in 0..height {
                raster.put_pixel(x, y, BAR);
            }
        }
    }

    Ok(BarcodeImage {
        identifier: identifier.clone(),
        raster,
        modules,
        font_size_pt: params.font_size_pt,
    })
}

fn check_symbol_input(data: &str) -> Result<(), RenderError> {
    let len = data.chars().count();
    if len == 0 || len > MAX_SYMBOL_LEN {
        return Err(RenderError::invalid_input(
            data,
            format!("length {len} outside 1..={MAX_SYMBOL_LEN}"),
        ));
    }
    if let Some(bad) = data.chars().find(|c| !matches!(c, ' '..='~')) {
        return Err(RenderError::invalid_input(
            data,
            format!("character {bad:?} is not printable ASCII"),
        ));
    }
    Ok(())
}

/// Render many identifiers in parallel.
///
/// Outcomes come back in input order, one per identifier.
pub fn render_batch(identifiers: &[ArticleId], params: &RenderParams) -> Vec<RenderOutcome> {
    let outcomes: Vec<RenderOutcome> = identifiers
        .par_iter()
        .map(|id| render(id, params))
        .collect();

    let failed = outcomes.iter().filter(|o| o.is_err()).count();
    tracing::debug!(total = outcomes.len(), failed, "barcodes rendered");

    outcomes
}
