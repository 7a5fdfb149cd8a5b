//! Serializable icon job descriptions and the built-in presets.
//!
//! An [`IconJob`] captures every parameter of one generation run so the same
//! composition code serves the PWA icon and both favicon variants. Jobs can
//! be loaded from JSON profile files.
//!
//! # Example
//!
//! ```
//! use logo_icons::{IconJob, OutputFormat};
//!
//! let job = IconJob::from_json(
//!     r#"{
//!         "source": "assets/logo.png",
//!         "output": "dist/favicon.ico",
//!         "canvasSize": 256,
//!         "fillRatio": 0.95,
//!         "format": { "ico": { "sizes": [16, 32] } }
//!     }"#,
//! )
//! .unwrap();
//!
//! assert!(matches!(job.format, OutputFormat::Ico { .. }));
//! job.validate().unwrap();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compose::{CompositionParams, FitMode};
use crate::error::{IconError, Result};
use crate::export::{ExportSpec, FAVICON_SIZES};

/// Default logo location, relative to the working directory.
pub const DEFAULT_LOGO: &str = "public/logo.png";
/// Default PWA icon location, also the source of the padded favicon.
pub const DEFAULT_PWA_ICON: &str = "public/icon-pwa.png";
/// Default favicon location.
pub const DEFAULT_FAVICON: &str = "app/favicon.ico";

// ============================================================================
// Output Format
// ============================================================================

/// The container an [`IconJob`] writes.
///
/// ```json
/// "png"
/// // or
/// { "ico": { "sizes": [16, 32, 48, 64] } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum OutputFormat {
    /// A single PNG at the canvas size.
    Png,

    /// A multi-size ICO. Sizes are square side lengths, written in order.
    Ico {
        #[serde(default = "default_ico_sizes")]
        sizes: Vec<u32>,
    },
}

impl OutputFormat {
    /// ICO with the standard favicon sizes.
    pub fn favicon() -> Self {
        Self::Ico {
            sizes: default_ico_sizes(),
        }
    }
}

fn default_ico_sizes() -> Vec<u32> {
    FAVICON_SIZES.to_vec()
}

fn default_fill_ratio() -> f64 {
    1.0
}

// ============================================================================
// IconJob
// ============================================================================

/// Everything needed to turn one source image into one output file.
///
/// # JSON Format
///
/// ```json
/// {
///   "source": "public/logo.png",
///   "output": "public/icon-pwa.png",
///   "canvasSize": 512,
///   "fillRatio": 0.65,
///   "fit": "contain",
///   "format": "png"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct IconJob {
    /// Logo to read.
    pub source: PathBuf,

    /// File to write.
    pub output: PathBuf,

    /// Side length of the square canvas.
    pub canvas_size: u32,

    /// Fraction of the canvas the logo occupies, in `(0, 1]`.
    #[serde(default = "default_fill_ratio")]
    pub fill_ratio: f64,

    /// How tall logos are sized.
    #[serde(default)]
    pub fit: FitMode,

    pub format: OutputFormat,
}

impl IconJob {
    /// The PWA icon: logo at 65% of a 512px transparent square, saved as PNG.
    ///
    /// The margin keeps the logo clear of rounded-corner masks.
    pub fn pwa() -> Self {
        Self {
            source: DEFAULT_LOGO.into(),
            output: DEFAULT_PWA_ICON.into(),
            canvas_size: 512,
            fill_ratio: 0.65,
            fit: FitMode::Contain,
            format: OutputFormat::Png,
        }
    }

    /// The favicon built from the already padded PWA icon.
    pub fn favicon() -> Self {
        Self {
            source: DEFAULT_PWA_ICON.into(),
            output: DEFAULT_FAVICON.into(),
            canvas_size: 512,
            fill_ratio: 1.0,
            fit: FitMode::Contain,
            format: OutputFormat::Ico {
                sizes: vec![32, 16, 48, 64],
            },
        }
    }

    /// The favicon built straight from the logo with a thin margin, which
    /// reads better at 16px than the padded PWA icon.
    pub fn favicon_optimized() -> Self {
        Self {
            source: DEFAULT_LOGO.into(),
            output: DEFAULT_FAVICON.into(),
            canvas_size: 256,
            fill_ratio: 0.95,
            fit: FitMode::Contain,
            format: OutputFormat::favicon(),
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_fit(mut self, fit: FitMode) -> Self {
        self.fit = fit;
        self
    }

    /// Composition parameters for this job.
    pub fn params(&self) -> CompositionParams {
        CompositionParams::new(self.canvas_size, self.fill_ratio).with_fit(self.fit)
    }

    /// The export sizes, if this job writes an ICO.
    pub fn export_spec(&self) -> Result<Option<ExportSpec>> {
        match &self.format {
            OutputFormat::Png => Ok(None),
            OutputFormat::Ico { sizes } => ExportSpec::squares(sizes).map(Some),
        }
    }

    /// Checks every parameter without touching the filesystem.
    pub fn validate(&self) -> Result<()> {
        self.params().validate()?;
        if let Some(spec) = self.export_spec()? {
            if spec.max_side() > self.canvas_size {
                return Err(IconError::invalid(format!(
                    "export size {}px is larger than the {}px canvas",
                    spec.max_side(),
                    self.canvas_size
                )));
            }
        }
        Ok(())
    }

    /// Serializes the job to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a job from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| IconError::invalid(format!("malformed icon profile: {e}")))
    }

    /// Reads a job from a JSON profile file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| IconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

// ============================================================================
// Tests
// ============================================================================
