//! Ball shooting interaction
//!
//! Each trigger press launches a ball from the controller along its forward
//! axis. The physics runtime simulates the ball; this module only decides
//! where it starts, how fast it goes, and when it is removed again.

use crate::config::BallConfig;
use glam::Vec3;
use outline::Pose;
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BallId(pub u64);

/// Everything the physics runtime needs to create a ball
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallSpawn {
    pub id: BallId,
    /// Composition node used as the ball template
    pub mesh: String,
    pub pose: Pose,
    pub linear_velocity: Vec3,
    pub radius: f32,
}

/// A fired ball plus the balls that had to make room for it
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub spawn: BallSpawn,
    pub evicted: Vec<BallId>,
}

/// Spawns balls and keeps the number of live balls bounded
#[derive(Debug)]
pub struct BallShooter {
    mesh: String,
    config: BallConfig,
    next_id: u64,
    live: VecDeque<BallId>,
}

impl BallShooter {
    pub fn new(mesh: impl Into<String>, config: BallConfig) -> Self {
        Self {
            mesh: mesh.into(),
            config,
            next_id: 0,
            live: VecDeque::new(),
        }
    }

    pub fn mesh(&self) -> &str {
        &self.mesh
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Live balls, oldest first
    pub fn live(&self) -> impl Iterator<Item = BallId> + '_ {
        self.live.iter().copied()
    }

    /// Launch a ball from `controller`.
    ///
    /// The ball starts `muzzle_offset` in front of the controller and moves
    /// along the controller's forward axis at the configured speed.
    pub fn fire(&mut self, controller: Pose) -> Shot {
        let forward = controller.forward().normalize_or_zero();
        let id = BallId(self.next_id);
        self.next_id += 1;

        let mut evicted = Vec::new();
        while self.live.len() >= self.config.max_balls.max(1) {
            if let Some(oldest) = self.live.pop_front() {
                evicted.push(oldest);
            }
        }
        self.live.push_back(id);

        Shot {
            spawn: BallSpawn {
                id,
                mesh: self.mesh.clone(),
                pose: Pose::new(
                    controller.position + forward * self.config.muzzle_offset,
                    controller.orientation,
                ),
                linear_velocity: forward * self.config.speed,
                radius: self.config.radius,
            },
            evicted,
        }
    }

    /// Forget a ball the runtime already removed
    pub fn remove(&mut self, id: BallId) -> bool {
        match self.live.iter().position(|b| *b == id) {
            Some(index) => {
                self.live.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop balls whose reported position fell below `min_y`
    pub fn cull_below<I>(&mut self, min_y: f32, positions: I) -> Vec<BallId>
    where
        I: IntoIterator<Item = (BallId, Vec3)>,
    {
        let fallen: Vec<BallId> = positions
            .into_iter()
            .filter(|(_, p)| p.y < min_y)
            .map(|(id, _)| id)
            .collect();
        fallen.into_iter().filter(|id| self.remove(*id)).collect()
    }

    /// Forget every ball, returning their ids
    pub fn clear(&mut self) -> Vec<BallId> {
        self.live.drain(..).collect()
    }
}
