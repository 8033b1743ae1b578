//! Explicit application state

use crate::runtime::LoadDeviceResult;
use scene::RoomId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Progress of the scene-data permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    #[default]
    Unknown,
    /// Dialog shown, waiting for the user's answer
    Requested,
    Granted,
    Denied,
}

/// Progress of loading room data from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneStatus {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed(LoadDeviceResult),
}

/// Mutable state shared by the session's handlers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    /// Physics debug lines shown
    pub debug: bool,
    pub composition_loaded: bool,
    pub permission: PermissionState,
    pub scene: SceneStatus,
    pub default_floor_removed: bool,
    pub rooms: BTreeSet<RoomId>,
}

impl AppState {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            ..Self::default()
        }
    }

    /// Flip the debug flag and return the new value
    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }

    pub fn scene_loaded(&self) -> bool {
        self.scene == SceneStatus::Loaded
    }
}
