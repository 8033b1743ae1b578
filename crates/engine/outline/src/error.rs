//! Error types for outline generation

use std::fmt;

/// Which precondition a set of plane dimensions violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionFault {
    /// A dimension is NaN or infinite
    NonFinite,
    NonPositiveWidth,
    NonPositiveHeight,
    NonPositiveThickness,
    /// Left/right edges would have a non-positive vertical extent
    ThicknessExceedsHeight,
}

impl fmt::Display for DimensionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DimensionFault::NonFinite => "dimensions must be finite",
            DimensionFault::NonPositiveWidth => "width must be positive",
            DimensionFault::NonPositiveHeight => "height must be positive",
            DimensionFault::NonPositiveThickness => "thickness must be positive",
            DimensionFault::ThicknessExceedsHeight => "thickness must be smaller than height",
        };
        f.write_str(msg)
    }
}

/// Errors that can occur while generating a plane outline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OutlineError {
    /// Width, height or thickness cannot produce four non-degenerate edges
    #[error("Invalid plane dimensions {width}x{height} with thickness {thickness}: {fault}")]
    InvalidPlaneDimensions {
        width: f32,
        height: f32,
        thickness: f32,
        fault: DimensionFault,
    },
}

/// Result type for outline operations
pub type Result<T> = std::result::Result<T, OutlineError>;

impl OutlineError {
    /// The violated precondition
    pub fn fault(&self) -> DimensionFault {
        match self {
            OutlineError::InvalidPlaneDimensions { fault, .. } => *fault,
        }
    }
}
