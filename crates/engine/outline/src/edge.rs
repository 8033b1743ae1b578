//! Picture-frame edge boxes around a rectangular plane
//!
//! A plane is described in its own local frame: X spans the width, Y spans the
//! height and Z is the plane normal. The outline is made of four oriented
//! boxes that share the plane's orientation:
//!
//! ```text
//!   +-------- top --------+
//!   |                     |
//! left                  right
//!   |                     |
//!   +------- bottom ------+
//! ```
//!
//! Top and bottom boxes span the full width. Left and right boxes are
//! shortened by one thickness at each end so they do not overlap the
//! horizontal boxes in the corners.

use crate::error::{DimensionFault, OutlineError, Result};
use crate::pose::Pose;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the four sides of a plane outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl EdgeSide {
    /// All sides in generation order
    pub const ALL: [EdgeSide; 4] = [
        EdgeSide::Top,
        EdgeSide::Bottom,
        EdgeSide::Left,
        EdgeSide::Right,
    ];

    /// Position of this side in generation order
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            EdgeSide::Top => "top",
            EdgeSide::Bottom => "bottom",
            EdgeSide::Left => "left",
            EdgeSide::Right => "right",
        }
    }

    /// Horizontal sides span the full plane width
    pub fn is_horizontal(self) -> bool {
        matches!(self, EdgeSide::Top | EdgeSide::Bottom)
    }
}

/// How to treat a thickness that leaves no room for the vertical edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Return [`OutlineError::InvalidPlaneDimensions`]
    #[default]
    Reject,
    /// Collapse the vertical edges to zero height instead
    Clamp,
}

/// Edge box in plane-local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeBoxSpec {
    pub side: EdgeSide,
    /// Offset from the plane center along the plane's local axes
    pub local_offset: Vec3,
    pub half_extents: Vec3,
}

/// Edge box placed in world space, ready to hand to a renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeBoxInstance {
    pub side: EdgeSide,
    pub world_pose: Pose,
    pub half_extents: Vec3,
}

impl EdgeBoxInstance {
    /// Minimum corner of the box in its own frame
    pub fn local_min(&self) -> Vec3 {
        -self.half_extents
    }

    /// Maximum corner of the box in its own frame
    pub fn local_max(&self) -> Vec3 {
        self.half_extents
    }

    /// Full box size along each local axis
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    /// The eight box vertices in world space
    pub fn corners(&self) -> [Vec3; 8] {
        let h = self.half_extents;
        let mut out = [Vec3::ZERO; 8];
        for (i, corner) in out.iter_mut().enumerate() {
            let sign = Vec3::new(
                if i & 1 == 0 { -1.0 } else { 1.0 },
                if i & 2 == 0 { -1.0 } else { 1.0 },
                if i & 4 == 0 { -1.0 } else { 1.0 },
            );
            *corner = self.world_pose.transform_point(h * sign);
        }
        out
    }
}

/// A detected rectangular surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneDescriptor {
    pub center_pose: Pose,
    /// Extent along local X
    pub width: f32,
    /// Extent along local Y
    pub height: f32,
}

impl PlaneDescriptor {
    pub fn new(center_pose: Pose, width: f32, height: f32) -> Self {
        Self {
            center_pose,
            width,
            height,
        }
    }

    /// Generate the four outline boxes, rejecting degenerate dimensions
    pub fn outline(&self, thickness: f32) -> Result<[EdgeBoxInstance; 4]> {
        self.outline_with(thickness, DegeneratePolicy::Reject)
    }

    pub fn outline_with(
        &self,
        thickness: f32,
        policy: DegeneratePolicy,
    ) -> Result<[EdgeBoxInstance; 4]> {
        generate_outline_edges_with(self.center_pose, self.width, self.height, thickness, policy)
    }
}

fn check_dimensions(
    width: f32,
    height: f32,
    thickness: f32,
    policy: DegeneratePolicy,
) -> Result<()> {
    let fault = if !(width.is_finite() && height.is_finite() && thickness.is_finite()) {
        Some(DimensionFault::NonFinite)
    } else if width <= 0.0 {
        Some(DimensionFault::NonPositiveWidth)
    } else if height <= 0.0 {
        Some(DimensionFault::NonPositiveHeight)
    } else if thickness <= 0.0 {
        Some(DimensionFault::NonPositiveThickness)
    } else if thickness >= height && policy == DegeneratePolicy::Reject {
        Some(DimensionFault::ThicknessExceedsHeight)
    } else {
        None
    };

    match fault {
        Some(fault) => Err(OutlineError::InvalidPlaneDimensions {
            width,
            height,
            thickness,
            fault,
        }),
        None => Ok(()),
    }
}

/// Compute the four edge boxes in plane-local space.
///
/// The vertical half-extent of the left/right boxes is `height / 2 - thickness`,
/// floored at zero so a box is never inverted.
pub fn edge_specs(width: f32, height: f32, thickness: f32) -> Result<[EdgeBoxSpec; 4]> {
    edge_specs_with(width, height, thickness, DegeneratePolicy::Reject)
}

pub fn edge_specs_with(
    width: f32,
    height: f32,
    thickness: f32,
    policy: DegeneratePolicy,
) -> Result<[EdgeBoxSpec; 4]> {
    check_dimensions(width, height, thickness, policy)?;

    let half_width = width / 2.0;
    let half_height = height / 2.0;
    let half_thick = thickness / 2.0;
    let side_half_height = (half_height - thickness).max(0.0);

    let horizontal = Vec3::new(half_width, half_thick, half_thick);
    let vertical = Vec3::new(half_thick, side_half_height, half_thick);

    Ok([
        EdgeBoxSpec {
            side: EdgeSide::Top,
            local_offset: Vec3::new(0.0, half_height, 0.0),
            half_extents: horizontal,
        },
        EdgeBoxSpec {
            side: EdgeSide::Bottom,
            local_offset: Vec3::new(0.0, -half_height, 0.0),
            half_extents: horizontal,
        },
        EdgeBoxSpec {
            side: EdgeSide::Left,
            local_offset: Vec3::new(-half_width, 0.0, 0.0),
            half_extents: vertical,
        },
        EdgeBoxSpec {
            side: EdgeSide::Right,
            local_offset: Vec3::new(half_width, 0.0, 0.0),
            half_extents: vertical,
        },
    ])
}

/// Place the four outline boxes of a plane in world space.
///
/// Returned in the order top, bottom, left, right. Every box carries the
/// plane's own orientation.
pub fn generate_outline_edges(
    center_pose: Pose,
    width: f32,
    height: f32,
    thickness: f32,
) -> Result<[EdgeBoxInstance; 4]> {
    generate_outline_edges_with(center_pose, width, height, thickness, DegeneratePolicy::Reject)
}

pub fn generate_outline_edges_with(
    center_pose: Pose,
    width: f32,
    height: f32,
    thickness: f32,
    policy: DegeneratePolicy,
) -> Result<[EdgeBoxInstance; 4]> {
    let specs = edge_specs_with(width, height, thickness, policy)?;

    Ok(specs.map(|spec| EdgeBoxInstance {
        side: spec.side,
        world_pose: Pose::new(
            center_pose.transform_point(spec.local_offset),
            center_pose.orientation,
        ),
        half_extents: spec.half_extents,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_side_order() {
        for (i, side) in EdgeSide::ALL.iter().enumerate() {
            assert_eq!(side.index(), i);
        }
        assert_eq!(EdgeSide::Left.name(), "left");
        assert!(EdgeSide::Bottom.is_horizontal());
        assert!(!EdgeSide::Right.is_horizontal());
    }

    #[test]
    fn test_specs_for_unit_plane() {
        let specs = edge_specs(2.0, 1.0, 0.1).unwrap();

        assert_eq!(specs[0].side, EdgeSide::Top);
        assert!(approx(specs[0].local_offset, Vec3::new(0.0, 0.5, 0.0)));
        assert!(approx(specs[1].local_offset, Vec3::new(0.0, -0.5, 0.0)));
        assert!(approx(specs[2].local_offset, Vec3::new(-1.0, 0.0, 0.0)));
        assert!(approx(specs[3].local_offset, Vec3::new(1.0, 0.0, 0.0)));

        assert!(approx(specs[0].half_extents, Vec3::new(1.0, 0.05, 0.05)));
        assert!(approx(specs[2].half_extents, Vec3::new(0.05, 0.4, 0.05)));
        assert_eq!(specs[2].half_extents, specs[3].half_extents);
    }

    #[test]
    fn test_instances_share_plane_orientation() {
        let rotation = Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        let pose = Pose::new(Vec3::new(0.0, 0.0, -3.0), rotation);
        let edges = generate_outline_edges(pose, 4.0, 3.0, 0.02).unwrap();

        for edge in &edges {
            assert_eq!(edge.world_pose.orientation, rotation);
        }
    }

    #[test]
    fn test_floor_plane_edges_lie_on_floor() {
        // Floor: plane normal (local Z) points up
        let pose = Pose::new(
            Vec3::new(0.0, 0.0, 0.0),
            Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        );
        let edges = generate_outline_edges(pose, 4.0, 3.0, 0.02).unwrap();

        for edge in &edges {
            assert!(edge.world_pose.position.y.abs() < 1e-5);
        }
        // Local +Y maps to world -Z for this rotation
        assert!(approx(edges[0].world_pose.position, Vec3::new(0.0, 0.0, -1.5)));
    }

    #[test]
    fn test_box_corners() {
        let edge = EdgeBoxInstance {
            side: EdgeSide::Top,
            world_pose: Pose::from_position(Vec3::new(1.0, 0.0, 0.0)),
            half_extents: Vec3::new(0.5, 0.1, 0.1),
        };
        assert_eq!(edge.local_min(), Vec3::new(-0.5, -0.1, -0.1));
        assert_eq!(edge.local_max(), Vec3::new(0.5, 0.1, 0.1));
        assert_eq!(edge.size(), Vec3::new(1.0, 0.2, 0.2));

        let corners = edge.corners();
        assert!(approx(corners[0], Vec3::new(0.5, -0.1, -0.1)));
        assert!(approx(corners[7], Vec3::new(1.5, 0.1, 0.1)));
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let cases = [
            (0.0, 1.0, 0.1, DimensionFault::NonPositiveWidth),
            (1.0, -1.0, 0.1, DimensionFault::NonPositiveHeight),
            (1.0, 1.0, 0.0, DimensionFault::NonPositiveThickness),
            (f32::NAN, 1.0, 0.1, DimensionFault::NonFinite),
            (1.0, 1.0, f32::INFINITY, DimensionFault::NonFinite),
        ];
        for (w, h, t, fault) in cases {
            let err = edge_specs(w, h, t).unwrap_err();
            assert_eq!(err.fault(), fault, "case {}x{} t={}", w, h, t);
        }
    }

    #[test]
    fn test_clamp_does_not_rescue_invalid_width() {
        let err = edge_specs_with(-1.0, 0.1, 0.2, DegeneratePolicy::Clamp).unwrap_err();
        assert_eq!(err.fault(), DimensionFault::NonPositiveWidth);
    }

    #[test]
    fn test_thick_but_valid_plane_floors_side_extent() {
        // Thickness between h/2 and h: sides collapse instead of inverting
        let specs = edge_specs(1.0, 1.0, 0.7).unwrap();
        assert_eq!(specs[2].half_extents.y, 0.0);
        assert_eq!(specs[3].half_extents.y, 0.0);
    }

    #[test]
    fn test_plane_descriptor_outline() {
        let plane = PlaneDescriptor::new(Pose::IDENTITY, 2.0, 1.0);
        let edges = plane.outline(0.1).unwrap();
        assert!(approx(edges[3].world_pose.position, Vec3::new(1.0, 0.0, 0.0)));

        let thin = PlaneDescriptor::new(Pose::IDENTITY, 1.0, 0.1);
        assert!(thin.outline(0.2).is_err());
        assert!(thin.outline_with(0.2, DegeneratePolicy::Clamp).is_ok());
    }
}
