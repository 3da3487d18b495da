//! Error types for the pick_colors library

use std::num::ParseIntError;
use thiserror::Error;

/// Result type alias for pick_colors operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Coordinate mapping failed because a dimension makes the aspect ratio undefined
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Source image has a zero width or height
    #[error("Degenerate image dimensions: {width}x{height}")]
    DegenerateImage { width: u32, height: u32 },

    /// Container is zero-sized, negative, or not finite
    #[error("Degenerate container dimensions: {width}x{height}")]
    DegenerateContainer { width: f64, height: f64 },
}

/// Region sampling could not produce an average color
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// The sampling window collapsed to zero area after clamping to the image bounds
    #[error("Empty sample window at ({x}, {y}) within {width}x{height} image")]
    EmptyWindow {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// The pixel reader returned a buffer that does not match the requested region
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// The pixel reader could not read the requested region
    #[error("Pixel read failed: {message}")]
    ReadFailed { message: String },
}

/// Hex color string could not be parsed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Must be 3 or 6 hex digits after stripping '#'
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,

    /// A character is not a hexadecimal digit
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Comprehensive error types for color sampling operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Coordinate mapping error
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Region sampling error
    #[error("Sampling error: {0}")]
    Sample(#[from] SampleError),

    /// Hex color parsing error
    #[error("Color parse error: {0}")]
    ParseColor(#[from] ParseColorError),

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Image file exceeds the upload size limit
    #[error("Image file too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    /// File is not an image format the loader understands
    #[error("Unsupported image format: {path}")]
    UnsupportedFormat { path: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Settings could not be read or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// Geometry and sampling failures happen while the pointer moves over a
    /// degenerate layout; the caller skips that update and keeps going.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::Geometry(_) | AnalysisError::Sample(_)
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoadError { .. } | AnalysisError::UnsupportedFormat { .. } => {
                "Please select a valid image file.".to_string()
            }
            AnalysisError::FileTooLarge { limit, .. } => {
                format!(
                    "The file is too large. The maximum size is {}MB.",
                    limit / (1024 * 1024)
                )
            }
            AnalysisError::Geometry(_) => {
                "The image is not displayed yet. Please wait for it to load.".to_string()
            }
            AnalysisError::Sample(_) => {
                "Could not read the color at this position.".to_string()
            }
            AnalysisError::ParseColor(_) => {
                "Colors must be written as #RRGGBB or #RGB.".to_string()
            }
            _ => "Color sampling failed. Please try again.".to_string(),
        }
    }
}
