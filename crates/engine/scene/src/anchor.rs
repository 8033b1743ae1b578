//! Anchors and rooms reported by the scene runtime

use crate::error::{Error, Result};
use crate::label::SceneLabel;
use glam::{Vec2, Vec3};
use outline::{PlaneDescriptor, Pose};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime identifier of a tracked anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorId(pub u64);

/// Runtime identifier of a room
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// 2D extents of a plane anchor in its local XY frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl PlaneBounds {
    /// Create bounds, rejecting max < min on either axis
    pub fn new(min: Vec2, max: Vec2) -> Result<Self> {
        if max.x < min.x || max.y < min.y {
            return Err(Error::InvertedBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Bounds of a `width` x `height` rectangle centered on the anchor
    pub fn centered(width: f32, height: f32) -> Self {
        let half = Vec2::new(width, height) / 2.0;
        Self {
            min: -half,
            max: half,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Midpoint of the bounds in plane-local space
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

/// A tracked real-world surface or object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: AnchorId,
    pub room: RoomId,
    #[serde(default)]
    pub labels: Vec<SceneLabel>,
    #[serde(default)]
    pub pose: Pose,
    /// Present for planar anchors (walls, floor, ceiling, table tops)
    #[serde(default)]
    pub plane: Option<PlaneBounds>,
}

impl Anchor {
    pub fn new(id: AnchorId, room: RoomId, labels: Vec<SceneLabel>, pose: Pose) -> Self {
        Self {
            id,
            room,
            labels,
            pose,
            plane: None,
        }
    }

    pub fn with_plane(mut self, plane: PlaneBounds) -> Self {
        self.plane = Some(plane);
        self
    }

    pub fn has_label(&self, label: SceneLabel) -> bool {
        self.labels.contains(&label)
    }

    /// True if any label is a wall face, floor or ceiling
    pub fn has_room_bounds_label(&self) -> bool {
        self.labels.iter().any(SceneLabel::is_room_bounds)
    }

    /// Plane rectangle of this anchor in world space.
    ///
    /// The anchor pose is the plane origin; asymmetric bounds shift the
    /// rectangle center along the plane's local X/Y axes. Using the raw
    /// anchor pose as the center only matches this for symmetric bounds;
    /// for anything else the outline would be offset from the surface.
    pub fn plane_descriptor(&self) -> Option<PlaneDescriptor> {
        let bounds = self.plane?;
        let center = bounds.center();
        let center_pose = Pose::new(
            self.pose.transform_point(Vec3::new(center.x, center.y, 0.0)),
            self.pose.orientation,
        );
        Some(PlaneDescriptor::new(
            center_pose,
            bounds.width(),
            bounds.height(),
        ))
    }
}

/// A room and the anchors detected in it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    #[serde(default)]
    pub anchors: Vec<Anchor>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            anchors: Vec::new(),
        }
    }

    pub fn anchor(&self, id: AnchorId) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.id == id)
    }

    /// Anchors labelled as walls, floor or ceiling
    pub fn room_bounds(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter().filter(|a| a.has_room_bounds_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_plane_bounds_size() {
        let bounds = PlaneBounds::new(Vec2::new(-1.5, -1.0), Vec2::new(1.5, 1.5)).unwrap();
        assert_eq!(bounds.width(), 3.0);
        assert_eq!(bounds.height(), 2.5);
        assert_eq!(bounds.center(), Vec2::new(0.0, 0.25));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let result = PlaneBounds::new(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        assert!(matches!(result, Err(Error::InvertedBounds { .. })));
    }

    #[test]
    fn test_room_bounds_detection() {
        let wall = Anchor::new(
            AnchorId(1),
            RoomId(1),
            vec![SceneLabel::WallFace],
            Pose::IDENTITY,
        );
        let lamp = Anchor::new(AnchorId(2), RoomId(1), vec![SceneLabel::Lamp], Pose::IDENTITY);
        let mixed = Anchor::new(
            AnchorId(3),
            RoomId(1),
            vec![SceneLabel::WallArt, SceneLabel::Ceiling],
            Pose::IDENTITY,
        );

        assert!(wall.has_room_bounds_label());
        assert!(!lamp.has_room_bounds_label());
        assert!(mixed.has_room_bounds_label());
    }

    #[test]
    fn test_symmetric_plane_descriptor_uses_anchor_pose() {
        let pose = Pose::new(Vec3::new(0.0, 1.2, -2.0), Quat::from_rotation_y(0.5));
        let anchor = Anchor::new(AnchorId(7), RoomId(1), vec![SceneLabel::WallFace], pose)
            .with_plane(PlaneBounds::centered(3.0, 2.4));

        let plane = anchor.plane_descriptor().unwrap();
        assert!((plane.center_pose.position - pose.position).length() < 1e-6);
        assert_eq!(plane.center_pose.orientation, pose.orientation);
        assert!((plane.width - 3.0).abs() < 1e-6);
        assert!((plane.height - 2.4).abs() < 1e-6);
    }

    #[test]
    fn test_offset_plane_descriptor_shifts_center() {
        let anchor = Anchor::new(
            AnchorId(8),
            RoomId(1),
            vec![SceneLabel::Floor],
            Pose::from_position(Vec3::new(1.0, 0.0, 0.0)),
        )
        .with_plane(PlaneBounds::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0)).unwrap());

        let plane = anchor.plane_descriptor().unwrap();
        assert_eq!(plane.center_pose.position, Vec3::new(2.0, 0.5, 0.0));
    }

    #[test]
    fn test_anchor_without_plane() {
        let anchor = Anchor::new(AnchorId(9), RoomId(1), vec![SceneLabel::Bed], Pose::IDENTITY);
        assert!(anchor.plane_descriptor().is_none());
    }

    #[test]
    fn test_anchor_deserializes_with_defaults() {
        let json = r#"{ "id": 4, "room": 2, "labels": ["FLOOR"] }"#;
        let anchor: Anchor = serde_json::from_str(json).unwrap();
        assert_eq!(anchor.id, AnchorId(4));
        assert_eq!(anchor.room, RoomId(2));
        assert!(anchor.has_label(SceneLabel::Floor));
        assert_eq!(anchor.pose, Pose::IDENTITY);
        assert!(anchor.plane.is_none());
    }
}
