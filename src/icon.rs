//! Pixel buffer types shared by composition and export.
//!
//! A [`SourceImage`] is the decoded logo, a [`Canvas`] is the square buffer the
//! logo is pasted onto, and a [`PlacementRect`] records where it landed.

use image::{DynamicImage, RgbaImage};

use crate::error::{IconError, Result};

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates a square size.
    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where the resized logo sits on the canvas.
///
/// Offsets are signed: a logo that overflows the canvas (see
/// [`FitMode::Overflow`](crate::FitMode::Overflow)) starts above or left of
/// the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementRect {
    /// X offset from the left edge of the canvas
    pub x: i64,
    /// Y offset from the top edge of the canvas
    pub y: i64,
    /// Width of the resized logo
    pub width: u32,
    /// Height of the resized logo
    pub height: u32,
}

impl PlacementRect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> i64 {
        self.x + i64::from(self.width)
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> i64 {
        self.y + i64::from(self.height)
    }

    /// Returns true if the pixel at (`px`, `py`) lies inside the rectangle.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        let (px, py) = (i64::from(px), i64::from(py));
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn size(&self) -> SizePx {
        SizePx::new(self.width, self.height)
    }
}

/// A decoded logo with an alpha channel.
///
/// Both dimensions are guaranteed non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    data: RgbaImage,
}

impl SourceImage {
    /// Wraps an RGBA buffer, rejecting zero-sized images.
    pub fn from_rgba(data: RgbaImage) -> Result<Self> {
        if data.width() == 0 || data.height() == 0 {
            return Err(IconError::invalid(format!(
                "source image must have non-zero dimensions, got {}x{}",
                data.width(),
                data.height()
            )));
        }
        Ok(Self { data })
    }

    /// Converts any decoded image to RGBA.
    ///
    /// Images without an alpha channel become fully opaque.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self> {
        Self::from_rgba(image.into_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.data.width()
    }

    pub fn height(&self) -> u32 {
        self.data.height()
    }

    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Returns the underlying pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.data
    }
}

/// A square, composited icon ready for export.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    /// The composited pixels. Everything outside `placement` is transparent.
    pub data: RgbaImage,

    /// Where the logo was pasted.
    pub placement: PlacementRect,
}

impl Canvas {
    /// Side length of the square canvas.
    pub fn size(&self) -> u32 {
        self.data.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn placement_rect_edges() {
        let rect = PlacementRect::new(90, 214, 332, 83);
        assert_eq!(rect.right(), 422);
        assert_eq!(rect.bottom(), 297);
        assert!(rect.contains(90, 214));
        assert!(rect.contains(421, 296));
        assert!(!rect.contains(422, 296));
        assert!(!rect.contains(89, 250));
    }

    #[test]
    fn placement_rect_negative_offset() {
        let rect = PlacementRect::new(10, -20, 50, 100);
        assert!(rect.contains(10, 0));
        assert!(rect.contains(59, 79));
        assert!(!rect.contains(59, 80));
    }

    #[test]
    fn size_px_helpers() {
        assert!(SizePx::square(16).is_square());
        assert!(!SizePx::new(16, 32).is_square());
        assert!(SizePx::new(0, 32).is_empty());
        assert!(!SizePx::square(1).is_empty());
    }

    #[test]
    fn source_rejects_zero_width() {
        let err = SourceImage::from_rgba(RgbaImage::new(0, 10)).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn source_synthesizes_opaque_alpha() {
        let rgb = RgbImage::from_pixel(4, 2, Rgb([10, 20, 30]));
        let source = SourceImage::from_dynamic(DynamicImage::ImageRgb8(rgb)).unwrap();

        assert_eq!(source.dimensions(), SizePx::new(4, 2));
        assert!(source.pixels().pixels().all(|p| p.0 == [10, 20, 30, 255]));
    }
}
