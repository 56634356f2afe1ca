use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Upper bounds for the raster settings; larger values do not improve print
/// quality and would overflow the raster dimensions.
pub const MAX_MODULE_WIDTH_PX: u32 = 32;
pub const MAX_MODULE_HEIGHT_PX: u32 = 2_000;
pub const MAX_QUIET_ZONE_MODULES: u32 = 100;

/// Raster parameters for one barcode.
///
/// Sizes are in raster pixels; the document scales the raster into its cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Width of the narrowest bar.
    pub module_width_px: u32,
    /// Bar height.
    pub module_height_px: u32,
    /// Size of the human-readable line printed under the bars.
    pub font_size_pt: f32,
    /// Blank margin left and right of the bars, in modules.
    pub quiet_zone_modules: u32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            module_width_px: 2,
            module_height_px: 80,
            font_size_pt: 8.0,
            quiet_zone_modules: 10,
        }
    }
}

impl RenderParams {
    pub fn validate(&self) -> Result<(), RenderError> {
        check_range("module_width_px", self.module_width_px, MAX_MODULE_WIDTH_PX)?;
        check_range("module_height_px", self.module_height_px, MAX_MODULE_HEIGHT_PX)?;
        check_range("quiet_zone_modules", self.quiet_zone_modules, MAX_QUIET_ZONE_MODULES)?;
        if !(self.font_size_pt.is_finite() && self.font_size_pt > 0.0) {
            return Err(RenderError::InvalidParams("font_size_pt must be > 0".into()));
        }
        Ok(())
    }
}

fn check_range(name: &str, value: u32, max: u32) -> Result<(), RenderError> {
    if value == 0 || value > max {
        return Err(RenderError::InvalidParams(format!(
            "{name} must be in 1..={max}, got {value}"
        )));
    }
    Ok(())
}
