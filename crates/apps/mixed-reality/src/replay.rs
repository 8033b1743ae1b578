//! In-memory runtime for running a session without a headset
//!
//! [`ReplayRuntime`] serves rooms from a JSON [`SceneFixture`] and records
//! everything the session asks it to spawn. [`ReplayReport`] summarizes the
//! result for the CLI.
//!
//! Fixture format:
//!
//! ```json
//! {
//!   "rooms": [
//!     { "id": 1, "anchors": [
//!       { "id": 10, "room": 1, "labels": ["FLOOR"],
//!         "pose": { "position": [0, 0, 0], "orientation": [-0.7071068, 0, 0, 0.7071068] },
//!         "plane": { "min": [-2, -1.5], "max": [2, 1.5] } }
//!     ] }
//!   ],
//!   "events": []
//! }
//! ```
//!
//! `events` are delivered after the rooms on the first successful load.

use crate::ball::{BallId, BallSpawn};
use crate::config::{LightingConfig, MarkerConfig, PanelConfig};
use crate::error::{read_file, Result};
use crate::runtime::{LoadDeviceResult, SceneRuntime};
use crate::session::Session;
use crate::state::AppState;
use outline::{EdgeBoxInstance, EdgeSide};
use scene::{Anchor, AnchorId, EdgeHandle, EdgeSink, MaterialSpec, ProceduralMeshPlan, Room, SceneEvent};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Rooms the device "knows" plus scripted follow-up events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFixture {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub events: Vec<SceneEvent>,
}

impl SceneFixture {
    /// Parse a fixture. Hand-written orientations are normalized so that
    /// rounded quaternion components do not skew the outlines.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut fixture: Self = serde_json::from_str(content)?;
        for anchor in fixture.anchors_mut() {
            if anchor.pose.orientation.length_squared() > 0.0 {
                anchor.pose = anchor.pose.normalized();
            }
        }
        Ok(fixture)
    }

    fn anchors_mut(&mut self) -> impl Iterator<Item = &mut Anchor> {
        let in_rooms = self.rooms.iter_mut().flat_map(|room| room.anchors.iter_mut());
        let in_events = self.events.iter_mut().filter_map(|event| match event {
            SceneEvent::AnchorAdded { anchor } | SceneEvent::AnchorUpdated { anchor } => {
                Some(anchor)
            }
            _ => None,
        });
        in_rooms.chain(in_events)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_file(path.as_ref())?;
        Self::from_json_str(&content)
    }
}

/// A live edge box
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRecord {
    pub name: String,
    pub edge: EdgeBoxInstance,
    pub material: MaterialSpec,
}

/// Composition requested by the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionRecord {
    pub uri: String,
    pub key: String,
}

/// How often each runtime service was called
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CallCounts {
    pub permission_requests: usize,
    pub scene_loads: usize,
    pub scene_captures: usize,
    pub edges_spawned: usize,
    pub edges_despawned: usize,
    pub balls_spawned: usize,
    pub balls_despawned: usize,
}

/// [`SceneRuntime`] backed by a fixture
#[derive(Debug)]
pub struct ReplayRuntime {
    fixture: SceneFixture,
    permission_granted: bool,
    composition_nodes: BTreeSet<String>,
    composition: Option<CompositionRecord>,
    pending: Vec<SceneEvent>,
    loaded_rooms: Vec<Room>,
    scripted_delivered: bool,
    next_edge: u64,
    edges: BTreeMap<EdgeHandle, EdgeRecord>,
    balls: BTreeMap<BallId, BallSpawn>,
    destroyed_nodes: Vec<String>,
    debug_lines: bool,
    procedural_labels: Vec<String>,
    panel: Option<PanelConfig>,
    lighting: Option<LightingConfig>,
    marker: Option<MarkerConfig>,
    counts: CallCounts,
}

impl ReplayRuntime {
    /// Runtime with the scene permission already granted and a composition
    /// holding the given nodes
    pub fn new<I, S>(fixture: SceneFixture, composition_nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fixture,
            permission_granted: true,
            composition_nodes: composition_nodes.into_iter().map(Into::into).collect(),
            composition: None,
            pending: Vec::new(),
            loaded_rooms: Vec::new(),
            scripted_delivered: false,
            next_edge: 0,
            edges: BTreeMap::new(),
            balls: BTreeMap::new(),
            destroyed_nodes: Vec::new(),
            debug_lines: false,
            procedural_labels: Vec::new(),
            panel: None,
            lighting: None,
            marker: None,
            counts: CallCounts::default(),
        }
    }

    /// Start without the permission; [`SceneRuntime::request_scene_permission`]
    /// does not grant it by itself
    pub fn without_permission(mut self) -> Self {
        self.permission_granted = false;
        self
    }

    /// Grant the permission, as the user answering the dialog would
    pub fn grant_permission(&mut self) {
        self.permission_granted = true;
    }

    /// Swap the rooms the device reports, e.g. after a room capture
    pub fn set_rooms(&mut self, rooms: Vec<Room>) {
        self.fixture.rooms = rooms;
    }

    /// Queue an event as if the device had just reported it
    pub fn push_event(&mut self, event: SceneEvent) {
        self.pending.push(event);
    }

    /// Composition the session asked for, if any
    pub fn composition(&self) -> Option<&CompositionRecord> {
        self.composition.as_ref()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeRecord> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn balls(&self) -> impl Iterator<Item = &BallSpawn> {
        self.balls.values()
    }

    pub fn destroyed_nodes(&self) -> &[String] {
        &self.destroyed_nodes
    }

    pub fn debug_lines(&self) -> bool {
        self.debug_lines
    }

    /// Labels that received a procedural mesh config
    pub fn procedural_labels(&self) -> &[String] {
        &self.procedural_labels
    }

    pub fn panel(&self) -> Option<&PanelConfig> {
        self.panel.as_ref()
    }

    pub fn lighting(&self) -> Option<&LightingConfig> {
        self.lighting.as_ref()
    }

    pub fn marker(&self) -> Option<&MarkerConfig> {
        self.marker.as_ref()
    }

    pub fn counts(&self) -> CallCounts {
        self.counts
    }

    pub fn loaded_rooms(&self) -> &[Room] {
        &self.loaded_rooms
    }
}

impl EdgeSink for ReplayRuntime {
    fn spawn_edge(
        &mut self,
        name: &str,
        edge: &EdgeBoxInstance,
        material: &MaterialSpec,
    ) -> EdgeHandle {
        let handle = EdgeHandle(self.next_edge);
        self.next_edge += 1;
        self.counts.edges_spawned += 1;
        self.edges.insert(
            handle,
            EdgeRecord {
                name: name.to_string(),
                edge: *edge,
                material: *material,
            },
        );
        handle
    }

    fn despawn_edge(&mut self, handle: EdgeHandle) {
        if self.edges.remove(&handle).is_some() {
            self.counts.edges_despawned += 1;
        } else {
            tracing::warn!("Despawn of unknown edge {:?}", handle);
        }
    }
}

impl SceneRuntime for ReplayRuntime {
    fn load_composition(&mut self, uri: &str, key: &str) {
        self.composition = Some(CompositionRecord {
            uri: uri.to_string(),
            key: key.to_string(),
        });
    }

    fn has_scene_permission(&self, _permission: &str) -> bool {
        self.permission_granted
    }

    fn request_scene_permission(&mut self, permission: &str) {
        tracing::debug!("Permission dialog shown for {}", permission);
        self.counts.permission_requests += 1;
    }

    fn load_scene_from_device(&mut self) -> LoadDeviceResult {
        self.counts.scene_loads += 1;
        if !self.permission_granted {
            return LoadDeviceResult::ErrorPermissionInsufficient;
        }
        if self.fixture.rooms.is_empty() {
            return LoadDeviceResult::ErrorNoRoomsFound;
        }

        // A reload replaces every previously reported room
        for room in self.loaded_rooms.drain(..) {
            self.pending.push(SceneEvent::RoomRemoved { room: room.id });
        }
        for room in &self.fixture.rooms {
            self.pending.push(SceneEvent::RoomAdded { room: room.id });
            self.pending.extend(
                room.anchors
                    .iter()
                    .cloned()
                    .map(|anchor| SceneEvent::AnchorAdded { anchor }),
            );
        }
        self.loaded_rooms = self.fixture.rooms.clone();

        if !self.scripted_delivered {
            self.pending.extend(self.fixture.events.iter().cloned());
            self.scripted_delivered = true;
        }
        LoadDeviceResult::Success
    }

    fn request_scene_capture(&mut self) {
        self.counts.scene_captures += 1;
    }

    fn poll_scene_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.pending)
    }

    fn set_physics_debug_lines(&mut self, enabled: bool) {
        self.debug_lines = enabled;
    }

    fn destroy_node(&mut self, name: &str) -> bool {
        if self.composition_nodes.remove(name) {
            self.destroyed_nodes.push(name.to_string());
            true
        } else {
            false
        }
    }

    fn register_procedural_meshes(&mut self, plan: &ProceduralMeshPlan) {
        self.procedural_labels = scene::SceneLabel::ALL
            .iter()
            .filter(|label| plan.contains(**label))
            .map(|label| label.name().to_string())
            .collect();
    }

    fn register_panel(&mut self, panel: &PanelConfig) {
        self.panel = Some(panel.clone());
    }

    fn apply_lighting(&mut self, lighting: &LightingConfig) {
        self.lighting = Some(lighting.clone());
    }

    fn spawn_marker(&mut self, marker: &MarkerConfig) {
        self.marker = Some(marker.clone());
    }

    fn spawn_ball(&mut self, ball: &BallSpawn) {
        self.counts.balls_spawned += 1;
        self.balls.insert(ball.id, ball.clone());
    }

    fn despawn_ball(&mut self, id: BallId) {
        if self.balls.remove(&id).is_some() {
            self.counts.balls_despawned += 1;
        }
    }
}

/// Edge boxes of one outlined anchor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorOutline {
    pub anchor: AnchorId,
    pub edges: Vec<EdgeSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSummary {
    pub side: EdgeSide,
    pub center: glam::Vec3,
    pub size: glam::Vec3,
}

/// What a replayed session ended up with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub state: AppState,
    pub composition: Option<CompositionRecord>,
    pub rooms: usize,
    pub outlined_anchors: usize,
    pub live_edges: usize,
    pub outlines: Vec<AnchorOutline>,
    pub live_balls: Vec<BallSpawn>,
    pub destroyed_nodes: Vec<String>,
    pub debug_lines: bool,
    pub procedural_labels: Vec<String>,
    pub counts: CallCounts,
}

impl ReplayReport {
    pub fn collect(session: &Session<ReplayRuntime>) -> Self {
        let runtime = session.runtime();
        let outlines = session.outlines();

        let outline_summaries = outlines
            .anchors()
            .filter_map(|anchor| {
                let edges = outlines.edges(anchor)?;
                Some(AnchorOutline {
                    anchor,
                    edges: edges
                        .iter()
                        .map(|edge| EdgeSummary {
                            side: edge.side,
                            center: edge.world_pose.position,
                            size: edge.size(),
                        })
                        .collect(),
                })
            })
            .collect();

        Self {
            state: session.state().clone(),
            composition: runtime.composition().cloned(),
            rooms: runtime.loaded_rooms().len(),
            outlined_anchors: outlines.len(),
            live_edges: runtime.edge_count(),
            outlines: outline_summaries,
            live_balls: runtime.balls().cloned().collect(),
            destroyed_nodes: runtime.destroyed_nodes().to_vec(),
            debug_lines: runtime.debug_lines(),
            procedural_labels: runtime.procedural_labels().to_vec(),
            counts: runtime.counts(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
