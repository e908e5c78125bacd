//! Error types for the placegrid engine.

use placegrid_types::position::InvalidPositionCode;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors raised by the engine's fallible constructors and lookups.
///
/// None of these escape [`crate::render::GridRenderer::render`]; a frame that
/// cannot be drawn carries a [`crate::render::FrameStatus`] instead.
#[derive(Debug, Error)]
pub enum GridError {
    /// Non-finite or zero-size viewport, cell or scale dimensions.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A raw position code outside 1..=9.
    #[error("invalid position code {0}, expected 1..=9")]
    InvalidPositionCode(u8),

    /// Input rejected before any computation ran.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<InvalidPositionCode> for GridError {
    fn from(err: InvalidPositionCode) -> Self {
        GridError::InvalidPositionCode(err.0)
    }
}
