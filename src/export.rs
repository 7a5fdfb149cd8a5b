//! Writing composited canvases to disk.
//!
//! Outputs are fully encoded in memory, staged in a temporary file next to
//! the destination and renamed over it, so a failed export never leaves a
//! truncated file behind.

use std::fs;
use std::io::{self, Cursor, Write};
use std::path::Path;

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops;
use image::{ExtendedColorType, ImageFormat};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::compose::RESAMPLE_FILTER;
use crate::error::{IconError, Result};
use crate::icon::{Canvas, SizePx};

/// Largest frame side an ICO directory entry can describe.
pub const ICO_MAX_SIZE: u32 = 256;

/// Standard favicon sizes.
pub const FAVICON_SIZES: [u32; 4] = [16, 32, 48, 64];

// ============================================================================
// ExportSpec
// ============================================================================

/// Ordered set of raster sizes embedded in a multi-size container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpec {
    sizes: Vec<SizePx>,
}

impl ExportSpec {
    /// Creates a spec from explicit sizes.
    ///
    /// Every size must be square, non-zero and fit in an ICO entry.
    pub fn new(sizes: Vec<SizePx>) -> Result<Self> {
        if sizes.is_empty() {
            return Err(IconError::invalid("at least one export size is required"));
        }
        for size in &sizes {
            if size.is_empty() || !size.is_square() {
                return Err(IconError::invalid(format!(
                    "export sizes must be positive squares, got {}x{}",
                    size.width, size.height
                )));
            }
            if size.width > ICO_MAX_SIZE {
                return Err(IconError::invalid(format!(
                    "export size {}px exceeds the {ICO_MAX_SIZE}px container limit",
                    size.width
                )));
            }
        }
        Ok(Self { sizes })
    }

    /// Creates a spec of square sizes from their side lengths.
    pub fn squares(sides: &[u32]) -> Result<Self> {
        Self::new(sides.iter().copied().map(SizePx::square).collect())
    }

    /// The 16/32/48/64 favicon set.
    pub fn favicon() -> Self {
        Self {
            sizes: FAVICON_SIZES.iter().copied().map(SizePx::square).collect(),
        }
    }

    pub fn sizes(&self) -> &[SizePx] {
        &self.sizes
    }

    /// Side of the largest requested size.
    pub fn max_side(&self) -> u32 {
        self.sizes.iter().map(|s| s.width).max().unwrap_or(0)
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encodes `canvas` as an ICO container holding one frame per requested size.
///
/// Frames are downsampled from the canvas in the order given. Requesting a
/// size larger than the canvas is an error.
pub fn encode_ico(canvas: &Canvas, sizes: &ExportSpec) -> Result<Vec<u8>> {
    let canvas_size = canvas.size();
    if sizes.max_side() > canvas_size {
        return Err(IconError::invalid(format!(
            "cannot export {}px frames from a {canvas_size}px canvas",
            sizes.max_side()
        )));
    }

    let mut frames = Vec::with_capacity(sizes.sizes().len());
    for size in sizes.sizes() {
        let resized = if size.width == canvas_size {
            canvas.data.clone()
        } else {
            debug!("resampling {canvas_size}px canvas to {}px", size.width);
            imageops::resize(&canvas.data, size.width, size.height, RESAMPLE_FILTER)
        };
        let frame = IcoFrame::as_png(
            resized.as_raw(),
            size.width,
            size.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(IconError::Encode)?;
        frames.push(frame);
    }

    let mut bytes = Vec::new();
    IcoEncoder::new(&mut bytes)
        .encode_images(&frames)
        .map_err(IconError::Encode)?;
    Ok(bytes)
}

/// Encodes `canvas` as a single PNG.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    canvas
        .data
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(IconError::Encode)?;
    Ok(bytes)
}

// ============================================================================
// Writing
// ============================================================================

/// Writes a multi-size ICO container to `output`.
pub fn export_multi_size(canvas: &Canvas, sizes: &ExportSpec, output: &Path) -> Result<()> {
    let bytes = encode_ico(canvas, sizes)?;
    write_file(output, &bytes)?;
    info!(
        "wrote {} ({} sizes: {})",
        output.display(),
        sizes.sizes().len(),
        sizes
            .sizes()
            .iter()
            .map(|s| format!("{}x{}", s.width, s.height))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

/// Writes the canvas as a PNG to `output`.
pub fn export_png(canvas: &Canvas, output: &Path) -> Result<()> {
    let bytes = encode_png(canvas)?;
    write_file(output, &bytes)?;
    info!("wrote {} ({}px)", output.display(), canvas.size());
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let to_err = |source: io::Error| IconError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir).map_err(to_err)?;

    let mut staged = NamedTempFile::new_in(dir).map_err(to_err)?;
    staged.write_all(bytes).map_err(to_err)?;
    staged.persist(path).map_err(|e| to_err(e.error))?;
    Ok(())
}
