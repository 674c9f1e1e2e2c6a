// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use core::fmt;
use std::io;

use crate::host::ResourceId;
use crate::style::ScaleType;

/// A configuration the view cannot honor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// Only [`ScaleType::CenterCrop`] is supported.
    UnsupportedScaleType(ScaleType),
    /// Adjusting the view bounds to the image aspect ratio is not supported.
    AdjustViewBoundsUnsupported,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedScaleType(scale_type) => {
                write!(f, "scale type {scale_type:?} not supported")
            }
            Self::AdjustViewBoundsUnsupported => f.write_str("adjustViewBounds not supported"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Failure to produce an offscreen bitmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RasterError {
    /// A bitmap needs at least one pixel on each axis.
    ZeroSize,
    /// The requested bitmap exceeds [`MAX_BITMAP_DIMENSION`](crate::MAX_BITMAP_DIMENSION).
    TooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A pixel buffer does not match its stated dimensions.
    BufferSize {
        /// Bytes required by the dimensions.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
    /// The bitmap is immutable and cannot be drawn into.
    Immutable,
    /// A custom drawable failed to paint itself.
    Paint(String),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => f.write_str("bitmap has zero width or height"),
            Self::TooLarge { width, height } => {
                write!(f, "bitmap of {width}x{height} exceeds the size limit")
            }
            Self::BufferSize { expected, actual } => {
                write!(f, "pixel buffer holds {actual} bytes, expected {expected}")
            }
            Self::Immutable => f.write_str("bitmap is immutable"),
            Self::Paint(message) => write!(f, "drawable failed to paint: {message}"),
        }
    }
}

impl core::error::Error for RasterError {}

/// Failure to resolve an image resource or URI into a drawable.
#[derive(Debug)]
pub enum LoadError {
    /// The host does not know this resource.
    UnknownResource(ResourceId),
    /// The URI scheme cannot be resolved.
    UnsupportedScheme(String),
    /// Reading the image bytes failed.
    Io(io::Error),
    /// The bytes are not a decodable image.
    Decode(String),
    /// The decoded image could not be turned into a bitmap.
    Raster(RasterError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownResource(id) => write!(f, "unknown image resource {}", id.0),
            Self::UnsupportedScheme(uri) => write!(f, "cannot load image uri `{uri}`"),
            Self::Io(err) => write!(f, "failed to read image: {err}"),
            Self::Decode(message) => write!(f, "failed to decode image: {message}"),
            Self::Raster(err) => write!(f, "failed to store image: {err}"),
        }
    }
}

impl core::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Raster(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<RasterError> for LoadError {
    fn from(err: RasterError) -> Self {
        Self::Raster(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::error::Error as _;

    #[test]
    fn config_errors_name_the_setting() {
        let err = ConfigError::UnsupportedScaleType(ScaleType::FitXy);
        assert_eq!(err.to_string(), "scale type FitXy not supported");
        assert_eq!(
            ConfigError::AdjustViewBoundsUnsupported.to_string(),
            "adjustViewBounds not supported"
        );
    }

    #[test]
    fn load_error_exposes_source() {
        let err = LoadError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("gone"));

        let err = LoadError::from(RasterError::ZeroSize);
        assert!(err.source().is_some());
        assert!(LoadError::UnsupportedScheme("http://x".into()).source().is_none());
    }
}
