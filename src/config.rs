//! Extraction parameters.
//!
//! Every recomputation is driven by an explicit [`ExtractConfig`]; callers
//! build a new one (or tweak a copy) whenever an input changes and call
//! [`crate::extract`] again.

use std::fmt;
use std::str::FromStr;

use crate::{PaletteError, PaletteResult};

pub const DEFAULT_SAMPLE_SIZE: usize = 500;
pub const DEFAULT_PALETTE_SIZE: usize = 5;
pub const DEFAULT_SEED: u64 = 42;

/// Clustering family used to group sampled pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModelKind {
    #[default]
    KMeans,
    BisectingKMeans,
    GaussianMixture,
    MiniBatchKMeans,
}

impl ModelKind {
    /// All models, in the order a model picker lists them.
    pub const ALL: [ModelKind; 4] = [
        ModelKind::KMeans,
        ModelKind::BisectingKMeans,
        ModelKind::GaussianMixture,
        ModelKind::MiniBatchKMeans,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModelKind::KMeans => "KMeans",
            ModelKind::BisectingKMeans => "BisectingKMeans",
            ModelKind::GaussianMixture => "GaussianMixture",
            ModelKind::MiniBatchKMeans => "MiniBatchKMeans",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = PaletteError;

    fn from_str(s: &str) -> PaletteResult<Self> {
        let wanted = s.trim();
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PaletteError::InvalidInput(format!("unknown model: {wanted:?}")))
    }
}

/// Space in which pixel distances are measured while clustering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Raw sRGB channels, each axis spanning 0..=255.
    #[default]
    Rgb,
    /// CIE L*a*b* (D65), closer to perceived color difference.
    Lab,
}

impl FromStr for ColorSpace {
    type Err = PaletteError;

    fn from_str(s: &str) -> PaletteResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(ColorSpace::Rgb),
            "lab" => Ok(ColorSpace::Lab),
            other => Err(PaletteError::InvalidInput(format!(
                "unknown color space: {other:?}"
            ))),
        }
    }
}

/// Everything [`crate::extract`] needs besides the pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Pixels drawn from the image before clustering. Clamped to the image size.
    pub sample_size: usize,
    /// Number of colors requested.
    pub palette_size: usize,
    pub model: ModelKind,
    pub seed: u64,
    pub color_space: ColorSpace,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            palette_size: DEFAULT_PALETTE_SIZE,
            model: ModelKind::default(),
            seed: DEFAULT_SEED,
            color_space: ColorSpace::default(),
        }
    }
}

impl ExtractConfig {
    pub fn new(sample_size: usize, palette_size: usize, model: ModelKind, seed: u64) -> Self {
        Self {
            sample_size,
            palette_size,
            model,
            seed,
            color_space: ColorSpace::default(),
        }
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = palette_size;
        self
    }

    pub fn with_model(mut self, model: ModelKind) -> Self {
        self.model = model;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    /// Reject sizes the engine cannot work with.
    pub fn validate(&self) -> PaletteResult<()> {
        if self.sample_size == 0 {
            return Err(PaletteError::InvalidInput(
                "sample_size must be greater than 0".to_string(),
            ));
        }
        if self.palette_size == 0 {
            return Err(PaletteError::InvalidInput(
                "palette_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
