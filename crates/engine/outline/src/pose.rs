//! Rigid transforms in world space

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of an object in world space.
///
/// The orientation is expected to be a unit quaternion. Constructors do not
/// normalize it; use [`Pose::normalized`] when the source is untrusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Pose at the origin with no rotation
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose with the given position and no rotation
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Same pose with a unit-length orientation
    pub fn normalized(self) -> Self {
        Self::new(self.position, self.orientation.normalize())
    }

    /// Rotate a direction from pose-local axes into world axes
    #[inline]
    pub fn rotate(&self, local: Vec3) -> Vec3 {
        self.orientation * local
    }

    /// Map a point from pose-local space into world space
    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.orientation * local
    }

    /// Map a world-space point back into pose-local space
    #[inline]
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.orientation.inverse() * (world - self.position)
    }

    /// Apply `local` as a transform expressed in this pose's frame.
    ///
    /// `a.compose(b).transform_point(p) == a.transform_point(b.transform_point(p))`
    pub fn compose(&self, local: &Pose) -> Pose {
        Pose::new(
            self.transform_point(local.position),
            self.orientation * local.orientation,
        )
    }

    pub fn inverse(&self) -> Pose {
        let orientation = self.orientation.inverse();
        Pose::new(orientation * -self.position, orientation)
    }

    /// Forward direction (local -Z) in world space
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Check that position and orientation contain no NaN or infinity
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.orientation.is_finite()
    }
}
