//! Error types for icon generation.

use std::io;
use std::path::PathBuf;

use image::ImageError;
use thiserror::Error;

/// Result type alias for icon operations.
pub type Result<T> = std::result::Result<T, IconError>;

/// Broad classification of an [`IconError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Degenerate geometry or invalid parameters.
    InvalidInput,
    /// A file could not be read, decoded, encoded or written.
    Io,
}

/// Errors that can occur while composing or exporting an icon.
#[derive(Error, Debug)]
pub enum IconError {
    /// Degenerate geometry or parameters that cannot produce an icon.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source file was read but is not a decodable image.
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    /// An SVG source could not be parsed or rasterized.
    #[error("Failed to render SVG {}: {message}", path.display())]
    Svg { path: PathBuf, message: String },

    /// The output image or container could not be encoded.
    #[error("Failed to encode image: {0}")]
    Encode(#[source] ImageError),

    /// The output file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IconError {
    /// Shorthand for [`IconError::InvalidInput`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns which of the two error families this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Read { .. }
            | Self::Decode { .. }
            | Self::Svg { .. }
            | Self::Encode(_)
            | Self::Write { .. } => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(IconError::invalid("zero width").kind(), ErrorKind::InvalidInput);

        let err = IconError::Read {
            path: PathBuf::from("public/logo.png"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "Failed to read public/logo.png: missing");
    }
}
