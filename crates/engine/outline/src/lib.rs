//! Plane outline geometry for Roomframe
//!
//! Given a detected rectangular surface (its center pose, width and height),
//! this crate computes four oriented boxes that frame the surface like a
//! picture frame. The boxes are plain descriptors: spawning meshes for them is
//! left to whichever renderer the caller drives.
//!
//! # Example
//!
//! ```
//! use outline::{generate_outline_edges, EdgeSide, Pose};
//!
//! let edges = generate_outline_edges(Pose::IDENTITY, 2.0, 1.0, 0.1)?;
//! assert_eq!(edges[0].side, EdgeSide::Top);
//! assert!((edges[0].world_pose.position.y - 0.5).abs() < 1e-6);
//! # Ok::<(), outline::OutlineError>(())
//! ```

mod edge;
mod error;
mod pose;

pub use edge::{
    edge_specs, edge_specs_with, generate_outline_edges, generate_outline_edges_with,
    DegeneratePolicy, EdgeBoxInstance, EdgeBoxSpec, EdgeSide, PlaneDescriptor,
};
pub use error::{DimensionFault, OutlineError, Result};
pub use pose::Pose;

// Re-export for convenience
pub use glam;
