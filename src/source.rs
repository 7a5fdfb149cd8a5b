//! Loading logos from disk.
//!
//! Raster formats are decoded by `image`. SVG logos are rasterized with
//! resvg so the rest of the pipeline only ever sees pixels.

use std::fs;
use std::path::Path;

use image::RgbaImage;
use log::debug;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{IconError, Result};
use crate::icon::SourceImage;

/// Longer side, in pixels, an SVG logo is rasterized to before composition.
///
/// Large enough that every preset downsamples rather than upsamples.
pub const SVG_RASTER_SIZE: u32 = 1024;

/// Reads and decodes the logo at `path`.
///
/// Files with an `.svg` extension are rasterized, everything else is handed
/// to `image` with the format guessed from the file contents.
pub fn load_source(path: &Path) -> Result<SourceImage> {
    let bytes = fs::read(path).map_err(|source| IconError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if is_svg(path) {
        let data = rasterize_svg(&bytes, SVG_RASTER_SIZE).map_err(|message| IconError::Svg {
            path: path.to_path_buf(),
            message,
        })?;
        debug!(
            "rasterized {} to {}x{}",
            path.display(),
            data.width(),
            data.height()
        );
        return SourceImage::from_rgba(data);
    }

    let decoded = image::load_from_memory(&bytes).map_err(|source| IconError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        decoded.width(),
        decoded.height(),
        decoded.color()
    );
    SourceImage::from_dynamic(decoded)
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Renders SVG data so its longer side is `size` pixels, preserving aspect ratio.
pub fn rasterize_svg(svg_data: &[u8], size: u32) -> std::result::Result<RgbaImage, String> {
    let tree = Tree::from_data(svg_data, &Options::default()).map_err(|e| e.to_string())?;

    let svg_size = tree.size();
    let scale = size as f32 / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| format!("cannot allocate a {width}x{height} pixmap"))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap_to_rgba_image(&pixmap).ok_or_else(|| "pixmap size mismatch".to_string())
}

/// Converts a tiny_skia Pixmap (premultiplied) to a straight-alpha RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> Option<RgbaImage> {
    let raw = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let c = pixel.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use image::Rgba;

    const WIDE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100"><rect width="200" height="100" fill="#ff0000"/></svg>"##;

    #[test]
    fn load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        RgbaImage::from_pixel(8, 4, Rgba([0, 0, 255, 128]))
            .save(&path)
            .unwrap();

        let source = load_source(&path).unwrap();
        assert_eq!(source.width(), 8);
        assert_eq!(source.height(), 4);
        assert_eq!(source.pixels().get_pixel(0, 0).0, [0, 0, 255, 128]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_source(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, IconError::Read { .. }));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        fs::write(&path, b"definitely not a png").unwrap();

        let err = load_source(&path).unwrap_err();
        assert!(matches!(err, IconError::Decode { .. }));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn svg_is_rasterized_on_longer_side() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.SVG");
        fs::write(&path, WIDE_SVG).unwrap();

        let source = load_source(&path).unwrap();
        assert_eq!(source.width(), SVG_RASTER_SIZE);
        assert_eq!(source.height(), SVG_RASTER_SIZE / 2);

        let center = source.pixels().get_pixel(source.width() / 2, source.height() / 2);
        assert_eq!(center.0, [255, 0, 0, 255]);
    }

    #[test]
    fn broken_svg_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.svg");
        fs::write(&path, "<svg").unwrap();

        let err = load_source(&path).unwrap_err();
        assert!(matches!(err, IconError::Svg { .. }));
    }
}
