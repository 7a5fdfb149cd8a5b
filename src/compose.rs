//! Logo-on-square-canvas composition.
//!
//! The logo is scaled by a fill ratio of the canvas side, centered, and pasted
//! onto a transparent canvas using its own alpha as the mask.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{IconError, Result};
use crate::icon::{Canvas, PlacementRect, SizePx, SourceImage};

/// Resampling filter used for every resize in the crate.
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

// ============================================================================
// Parameters
// ============================================================================

/// How a logo taller than it is wide is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Fit within a `fill_ratio` box on both axes. The logo never leaves the canvas.
    #[default]
    Contain,
    /// Size by width only. Tall logos overflow the canvas vertically and are cropped.
    Overflow,
}

/// Parameters for a single composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionParams {
    /// Side length of the square canvas.
    pub canvas_size: u32,

    /// Fraction of the canvas side the logo occupies, in `(0, 1]`.
    pub fill_ratio: f64,

    pub fit: FitMode,
}

impl CompositionParams {
    /// Creates parameters with the default [`FitMode::Contain`].
    pub fn new(canvas_size: u32, fill_ratio: f64) -> Self {
        Self {
            canvas_size,
            fill_ratio,
            fit: FitMode::default(),
        }
    }

    pub fn with_fit(mut self, fit: FitMode) -> Self {
        self.fit = fit;
        self
    }

    /// Checks the canvas size and fill ratio.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_size == 0 {
            return Err(IconError::invalid("canvas size must be positive"));
        }
        if !self.fill_ratio.is_finite() || self.fill_ratio <= 0.0 || self.fill_ratio > 1.0 {
            return Err(IconError::invalid(format!(
                "fill ratio must be in (0, 1], got {}",
                self.fill_ratio
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Placement
// ============================================================================

/// Computes where a logo of size `source` lands on the canvas.
///
/// The width is `floor(canvas_size * fill_ratio)` and the height follows the
/// source aspect ratio, floored. Both are at least one pixel. Offsets center
/// the logo using floor division.
pub fn compute_placement(source: SizePx, params: &CompositionParams) -> Result<PlacementRect> {
    if source.is_empty() {
        return Err(IconError::invalid(format!(
            "source image must have non-zero dimensions, got {}x{}",
            source.width, source.height
        )));
    }
    params.validate()?;

    let bound = ((f64::from(params.canvas_size) * params.fill_ratio).floor() as u32).max(1);
    let (w, h) = (u64::from(source.width), u64::from(source.height));

    let mut width = bound;
    let mut height = scale_floor(bound, h, w);

    if params.fit == FitMode::Contain && height > bound {
        height = bound;
        width = scale_floor(bound, w, h);
    }

    let canvas = i64::from(params.canvas_size);
    let x = (canvas - i64::from(width)).div_euclid(2);
    let y = (canvas - i64::from(height)).div_euclid(2);

    Ok(PlacementRect::new(x, y, width, height))
}

/// `floor(value * num / den)`, at least 1.
fn scale_floor(value: u32, num: u64, den: u64) -> u32 {
    let scaled = u64::from(value) * num / den;
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

// ============================================================================
// Composition
// ============================================================================

/// Composes `source` onto a fresh transparent square canvas.
///
/// The source is resized with [`RESAMPLE_FILTER`] and pasted at the computed
/// placement. The source is never modified.
pub fn compose(source: &SourceImage, params: &CompositionParams) -> Result<Canvas> {
    let placement = compute_placement(source.dimensions(), params)?;
    debug!(
        "placing {}x{} logo at {}x{}+{}+{} on {}px canvas",
        source.width(),
        source.height(),
        placement.width,
        placement.height,
        placement.x,
        placement.y,
        params.canvas_size
    );

    let resized = if placement.size() == source.dimensions() {
        source.pixels().clone()
    } else {
        imageops::resize(
            source.pixels(),
            placement.width,
            placement.height,
            RESAMPLE_FILTER,
        )
    };

    let mut data = RgbaImage::new(params.canvas_size, params.canvas_size);
    paste(&mut data, &resized, &placement);

    Ok(Canvas { data, placement })
}

/// Pastes the resized logo at its placement.
///
/// `overlay` blends source-over and clips at the canvas edges, so fully
/// transparent logo pixels leave the canvas untouched.
fn paste(canvas: &mut RgbaImage, logo: &RgbaImage, placement: &PlacementRect) {
    imageops::overlay(canvas, logo, placement.x, placement.y);
}

// ============================================================================
// Tests
// ============================================================================
