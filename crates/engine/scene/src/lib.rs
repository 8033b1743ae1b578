//! Scene model for Roomframe
//!
//! This crate provides:
//! - **Labels**: semantic classes of scene anchors ([`SceneLabel`])
//! - **Anchors**: tracked surfaces with pose and plane bounds ([`Anchor`], [`Room`])
//! - **Events**: room/anchor lifecycle events and a polling queue ([`SceneEvent`])
//! - **Outlines**: edge-box outlines for walls, floor and ceiling ([`RoomOutlines`])
//! - **Procedural meshes**: material plan for furniture ([`ProceduralMeshPlan`])
//!
//! # Example
//!
//! ```rust,ignore
//! use scene::{RoomOutlines, SceneEventQueue};
//!
//! let mut outlines = RoomOutlines::default();
//! let mut queue = SceneEventQueue::new();
//! queue.extend(runtime.poll_events());
//! queue.dispatch_all(&mut outlines.listener(&mut renderer));
//! ```

mod anchor;
mod error;
mod event;
mod label;
pub mod outlines;
pub mod procedural;

pub use anchor::{Anchor, AnchorId, PlaneBounds, Room, RoomId};
pub use error::{Error, Result};
pub use event::{SceneEvent, SceneEventListener, SceneEventQueue};
pub use label::{SceneLabel, ROOM_BOUNDS_LABELS};
pub use outlines::{
    EdgeHandle, EdgeSink, OutlineListener, OutlineOutcome, OutlineStyle, RoomOutlines, SkipReason,
    EDGE_THICKNESS,
};
pub use procedural::{BlendMode, MaterialSpec, ProceduralMeshConfig, ProceduralMeshPlan, ShaderKind};

// Re-export for downstream crates
pub use outline;
