//! Interface to the mixed reality runtime
//!
//! Everything the session cannot do itself (tracking rooms, rendering,
//! physics, permission dialogs) goes through [`SceneRuntime`]. A headset
//! build implements it over the device SDK; [`crate::replay::ReplayRuntime`]
//! implements it in memory.

use crate::ball::{BallId, BallSpawn};
use crate::config::{LightingConfig, MarkerConfig, PanelConfig};
use scene::{EdgeSink, ProceduralMeshPlan, SceneEvent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of loading room data from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadDeviceResult {
    Success,
    ErrorPermissionInsufficient,
    ErrorInvalidArgs,
    ErrorInternal,
    ErrorDiscoveryOngoing,
    ErrorInvalidJson,
    ErrorNoRoomsFound,
    ErrorInsufficientResources,
    ErrorStorageAtCapacity,
    ErrorInsufficientView,
}

impl LoadDeviceResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LoadDeviceResult::Success)
    }
}

impl fmt::Display for LoadDeviceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadDeviceResult::Success => "SUCCESS",
            LoadDeviceResult::ErrorPermissionInsufficient => "ERROR_PERMISSION_INSUFFICIENT",
            LoadDeviceResult::ErrorInvalidArgs => "ERROR_INVALID_ARGS",
            LoadDeviceResult::ErrorInternal => "ERROR_INTERNAL",
            LoadDeviceResult::ErrorDiscoveryOngoing => "ERROR_DISCOVERY_ONGOING",
            LoadDeviceResult::ErrorInvalidJson => "ERROR_INVALID_JSON",
            LoadDeviceResult::ErrorNoRoomsFound => "ERROR_NO_ROOMS_FOUND",
            LoadDeviceResult::ErrorInsufficientResources => "ERROR_INSUFFICIENT_RESOURCES",
            LoadDeviceResult::ErrorStorageAtCapacity => "ERROR_STORAGE_AT_CAPACITY",
            LoadDeviceResult::ErrorInsufficientView => "ERROR_INSUFFICIENT_VIEW",
        };
        f.write_str(name)
    }
}

/// Buttons on the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelAction {
    /// Run the room capture flow, then reload the scene
    ConfigureRoom,
    /// Show or hide physics debug lines
    ToggleDebug,
}

/// Services provided by the mixed reality runtime.
///
/// Edge boxes are spawned through the [`EdgeSink`] supertrait.
pub trait SceneRuntime: EdgeSink {
    /// Start loading the scene composition at `uri`, registered under `key`.
    /// Completion is reported through [`crate::Session::on_composition_loaded`].
    fn load_composition(&mut self, uri: &str, key: &str);

    fn has_scene_permission(&self, permission: &str) -> bool;

    /// Show the permission dialog. The answer arrives later through
    /// [`crate::Session::on_permission_result`].
    fn request_scene_permission(&mut self, permission: &str);

    /// Load room data; new rooms and anchors show up in [`Self::poll_scene_events`]
    fn load_scene_from_device(&mut self) -> LoadDeviceResult;

    /// Run the system room capture flow
    fn request_scene_capture(&mut self);

    /// Scene events since the last poll, in arrival order
    fn poll_scene_events(&mut self) -> Vec<SceneEvent>;

    fn set_physics_debug_lines(&mut self, enabled: bool);

    /// Destroy a node of the loaded composition by name. Returns false if no
    /// such node exists.
    fn destroy_node(&mut self, name: &str) -> bool;

    fn register_procedural_meshes(&mut self, plan: &ProceduralMeshPlan);

    fn register_panel(&mut self, panel: &PanelConfig);

    fn apply_lighting(&mut self, lighting: &LightingConfig);

    fn spawn_marker(&mut self, marker: &MarkerConfig);

    fn spawn_ball(&mut self, ball: &BallSpawn);

    fn despawn_ball(&mut self, id: BallId);
}
