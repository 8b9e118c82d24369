//! Extract a representative color palette from an image by clustering a
//! seeded sample of its pixels.
//!
//! ```no_run
//! use palette_extract::{ExtractConfig, ModelKind, extract, pixels_from_bytes};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let pixels = pixels_from_bytes(&bytes).unwrap();
//! let config = ExtractConfig::default()
//!     .with_palette_size(8)
//!     .with_model(ModelKind::GaussianMixture);
//! let palette = extract(&pixels, &config).unwrap();
//! ```

use js_sys::Array;
use wasm_bindgen::prelude::*;

pub mod cluster;
pub mod color;
pub mod config;
pub mod error;
pub mod extract;
pub mod sample;
pub mod source;

pub use cluster::{ClusterModel, Fit, build_model};
pub use color::{Pixel, Point, to_hex};
pub use config::{ColorSpace, ExtractConfig, ModelKind};
pub use error::{PaletteError, PaletteResult};
pub use extract::{extract, extract_palette};
pub use source::{pixels_from_bytes, pixels_from_image};

// ------------------------------------------------------------
// Encoded-image entry points
// ------------------------------------------------------------

/// Decode `input` and extract its palette as upper-case `RRGGBB` strings.
pub fn extract_palette_bytes(input: &[u8], config: &ExtractConfig) -> PaletteResult<Vec<String>> {
    let pixels = pixels_from_bytes(input)?;
    let palette = extract(&pixels, config)?;
    Ok(palette.into_iter().map(to_hex).collect())
}

/// JavaScript entry point.
///
/// `model` is one of `KMeans`, `BisectingKMeans`, `GaussianMixture` or
/// `MiniBatchKMeans`. Returns an array of `RRGGBB` strings; every failure
/// (bad image, bad parameters, fit failure) is thrown as a string.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette_wasm(
    input: Vec<u8>,
    sample_size: usize,
    palette_size: usize,
    model: &str,
    seed: u64,
) -> Result<Array, JsValue> {
    let model: ModelKind = model
        .parse()
        .map_err(|e: PaletteError| JsValue::from_str(&e.to_string()))?;
    let config = ExtractConfig::new(sample_size, palette_size, model, seed);

    let palette_hex = extract_palette_bytes(&input, &config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let palette_js = Array::new();
    for hex in palette_hex {
        palette_js.push(&JsValue::from_str(&hex));
    }
    Ok(palette_js)
}
