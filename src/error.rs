//! Error types for bhitti-nav

use thiserror::Error;

/// Navigation error type
#[derive(Error, Debug)]
pub enum NavError {
    /// The scanner holds no boundary segments (no successful scan yet, or a
    /// tick where fewer than 2 points were sensed).
    #[error("boundary is empty: no segments extracted")]
    EmptyBoundary,

    /// No indexed point exists at the queried coordinates.
    #[error("no point indexed at ({x}, {y})")]
    PointNotFound { x: f32, y: f32 },

    /// Every indexed point was excluded from a nearest-neighbor query.
    #[error("point index exhausted: all points excluded")]
    IndexExhausted,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

impl From<image::ImageError> for NavError {
    fn from(e: image::ImageError) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
