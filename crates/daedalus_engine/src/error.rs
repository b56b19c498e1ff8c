//! Unified error types for daedalus_engine

use std::path::PathBuf;
use thiserror::Error;

use crate::Color;

/// Main error type for daedalus_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open file '{path}': {message}")]
    OpenFile { path: PathBuf, message: String },

    // === Palette Errors ===
    #[error("Pixel at ({x}, {y}) has color {} which is not in the Daedalus palette", color.to_hex())]
    NonPaletteColor { x: u32, y: u32, color: Color },

    #[error("Invalid palette index: {index} (valid range 0..=15)")]
    InvalidPaletteIndex { index: u8 },

    #[error("Invalid hex color: {value}")]
    InvalidHexColor { value: String },

    // === Literal Errors ===
    #[error("Literal digit {digit} at position {position} is outside 0..=7")]
    InvalidLiteralDigit { position: usize, digit: u8 },

    #[error("Literal has no digits")]
    EmptyLiteral,

    #[error("Literal digits '{digits}' are not in canonical form")]
    NonCanonicalLiteral { digits: String },

    // === Raster Errors ===
    #[error("Program bounds {width}x{height} exceed the maximum image size")]
    ImageTooLarge { width: u64, height: u64 },

    #[error("Raster data length {actual} does not match {width}x{height} RGBA (expected {expected})")]
    InvalidRasterSize { width: u32, height: u32, expected: usize, actual: usize },

    #[error("Invalid PNG data: {message}")]
    InvalidPng { message: String },

    #[error("Unsupported format: {description}")]
    UnsupportedFormat { description: String },

    #[error("Failed to create image buffer")]
    ImageBufferCreationFailed,

    // === External Errors ===
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    PngDecoding(#[from] png::DecodingError),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Parse int error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("{0}")]
    Generic(String),
}

/// Result type alias for daedalus_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    /// Create a generic error from any displayable type
    pub fn generic(msg: impl std::fmt::Display) -> Self {
        Self::Generic(msg.to_string())
    }

    /// Create an open file error
    pub fn open_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::OpenFile {
            path: path.into(),
            message: msg.into(),
        }
    }
}
