//! `sortiment-barcode`
//!
//! **Responsibility:** turn one article identifier into a scannable Code 128
//! raster.
//!
//! Rendering is a pure function of `(identifier, RenderParams)`: no shared
//! state, so identifiers can be rendered in any order or in parallel
//! ([`render_batch`]). A failure for one identifier is a typed value the caller
//! recovers from locally; it never poisons other renders.

pub mod code128;
pub mod error;
pub mod params;

pub use code128::{BarcodeImage, MAX_SYMBOL_LEN, RenderOutcome, render, render_batch};
pub use error::RenderError;
pub use params::{MAX_MODULE_HEIGHT_PX, MAX_MODULE_WIDTH_PX, MAX_QUIET_ZONE_MODULES, RenderParams};
