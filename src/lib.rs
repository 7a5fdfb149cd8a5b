//! logo-icons: favicon and PWA icon generation from a source logo
//!
//! This crate places a logo of any aspect ratio, centered and proportionally
//! scaled, onto a transparent square canvas, and writes the result as a PNG
//! or as a multi-size ICO container.
//!
//! # Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use logo_icons::{compose, CompositionParams, PlacementRect, SourceImage};
//!
//! let logo = RgbaImage::from_pixel(800, 200, Rgba([0, 0, 0, 255]));
//! let source = SourceImage::from_rgba(logo).unwrap();
//!
//! let canvas = compose(&source, &CompositionParams::new(512, 0.65)).unwrap();
//! assert_eq!(canvas.placement, PlacementRect::new(90, 214, 332, 83));
//! ```
//!
//! # Jobs and Presets
//!
//! Whole runs are described by an [`IconJob`], either one of the presets or
//! one loaded from a JSON profile:
//!
//! ```no_run
//! use logo_icons::{run_all, IconJob};
//!
//! // Pad the logo into the PWA icon, then downsample that into the favicon.
//! run_all([&IconJob::pwa(), &IconJob::favicon()]).unwrap();
//! ```

mod compose;
mod error;
mod export;
mod icon;
mod profile;
mod runner;
mod source;

pub use compose::{
    CompositionParams, FitMode, RESAMPLE_FILTER, compose, compute_placement,
};
pub use error::{ErrorKind, IconError, Result};
pub use export::{
    ExportSpec, FAVICON_SIZES, ICO_MAX_SIZE, encode_ico, encode_png, export_multi_size, export_png,
};
pub use icon::{Canvas, PlacementRect, SizePx, SourceImage};
pub use profile::{DEFAULT_FAVICON, DEFAULT_LOGO, DEFAULT_PWA_ICON, IconJob, OutputFormat};
pub use runner::{run_all, run_job};
pub use source::{SVG_RASTER_SIZE, load_source, rasterize_svg};
