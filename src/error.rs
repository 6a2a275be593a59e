//! Error types for the greeting

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The carousel needs at least one item
    #[error("Carousel has no media items")]
    EmptyCarousel,

    /// Lightbox selection outside of its list
    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// A media file could not be read or decoded
    #[error("Media error for {path:?}: {reason}")]
    Media { path: PathBuf, reason: String },

    /// ffmpeg could not be run or returned a failure
    #[error("ffmpeg error: {0}")]
    Ffmpeg(String),

    /// Invalid "#rrggbb" color
    #[error("Invalid color {0:?}, expected #rrggbb")]
    Color(String),

    /// Directory walk error
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Image decoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
