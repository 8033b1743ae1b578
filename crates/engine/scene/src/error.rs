//! Error types for the scene crate

use outline::OutlineError;

/// Errors that can occur while interpreting scene data
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The runtime reported a label this crate does not know
    #[error("Unknown scene label: {0}")]
    UnknownLabel(String),

    /// Plane bounds with max below min on some axis
    #[error("Inverted plane bounds: min {min:?}, max {max:?}")]
    InvertedBounds { min: glam::Vec2, max: glam::Vec2 },

    /// Outline generation failed for a plane
    #[error("Outline error: {0}")]
    Outline(#[from] OutlineError),
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, Error>;
