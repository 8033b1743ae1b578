//! Session wiring
//!
//! [`Session`] owns the application state and reacts to runtime callbacks:
//! composition loaded, permission answered, panel buttons, controller
//! triggers and, once per frame, the queued scene events.

use crate::ball::{BallId, BallShooter, BallSpawn};
use crate::config::AppConfig;
use crate::runtime::{LoadDeviceResult, PanelAction, SceneRuntime};
use crate::state::{AppState, PermissionState, SceneStatus};
use glam::Vec3;
use outline::Pose;
use scene::{RoomOutlines, SceneEvent, SceneEventQueue};

pub struct Session<R: SceneRuntime> {
    runtime: R,
    config: AppConfig,
    state: AppState,
    outlines: RoomOutlines,
    shooter: Option<BallShooter>,
    events: SceneEventQueue,
}

impl<R: SceneRuntime> Session<R> {
    /// Create a session and register the static runtime resources
    pub fn new(mut runtime: R, config: AppConfig) -> Self {
        runtime.register_procedural_meshes(&config.furniture.plan());
        runtime.register_panel(&config.panel);
        if config.physics.debug_lines {
            runtime.set_physics_debug_lines(true);
        }

        Self {
            state: AppState::new(config.physics.debug_lines),
            outlines: RoomOutlines::new(config.outline.style()),
            shooter: None,
            events: SceneEventQueue::new(),
            runtime,
            config,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn outlines(&self) -> &RoomOutlines {
        &self.outlines
    }

    pub fn shooter(&self) -> Option<&BallShooter> {
        self.shooter.as_ref()
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    pub fn into_runtime(self) -> R {
        self.runtime
    }

    /// Lighting, the marker cube and the composition, once the renderer is up
    pub fn on_scene_ready(&mut self) {
        self.runtime.apply_lighting(&self.config.lighting);
        if self.config.marker.enabled {
            self.runtime.spawn_marker(&self.config.marker);
        }

        let scene = &self.config.scene;
        tracing::info!("Loading composition {} as {}", scene.composition, scene.key);
        self.runtime.load_composition(&scene.composition, &scene.key);
    }

    /// The composition finished loading: arm the ball shooter and start
    /// loading room data, asking for permission first if needed.
    pub fn on_composition_loaded(&mut self) {
        if let Some(mut previous) = self.shooter.take() {
            for id in previous.clear() {
                self.runtime.despawn_ball(id);
            }
        }
        self.shooter = Some(BallShooter::new(
            self.config.scene.ball_node.clone(),
            self.config.ball.clone(),
        ));
        self.state.composition_loaded = true;

        let permission = self.config.scene.permission.clone();
        if self.runtime.has_scene_permission(&permission) {
            tracing::info!("Scene permission has already been granted!");
            self.state.permission = PermissionState::Granted;
            self.load_scene();
        } else {
            tracing::info!(
                "Scene permission has not been granted, requesting {}",
                permission
            );
            self.state.permission = PermissionState::Requested;
            self.runtime.request_scene_permission(&permission);
        }
    }

    /// Answer from the permission dialog
    pub fn on_permission_result(&mut self, granted: bool) {
        if granted {
            tracing::info!("Use scene permission has been granted");
            self.state.permission = PermissionState::Granted;
            self.load_scene();
        } else {
            tracing::warn!("Use scene permission was DENIED!");
            self.state.permission = PermissionState::Denied;
        }
    }

    /// Load room data from the device
    pub fn load_scene(&mut self) -> LoadDeviceResult {
        tracing::info!("Loading scene from device...");
        self.state.scene = SceneStatus::Loading;

        let result = self.runtime.load_scene_from_device();
        if result.is_success() {
            tracing::info!("Scene loaded from device");
            self.state.scene = SceneStatus::Loaded;
        } else {
            tracing::error!("Error loading scene from device: {}", result);
            self.state.scene = SceneStatus::Failed(result);
        }
        result
    }

    /// Drain and apply scene events; returns how many were handled
    pub fn update(&mut self) -> usize {
        self.events.extend(self.runtime.poll_scene_events());

        let mut handled = 0;
        while let Some(event) = self.events.pop() {
            self.handle_event(&event);
            handled += 1;
        }
        handled
    }

    fn handle_event(&mut self, event: &SceneEvent) {
        match event {
            SceneEvent::RoomAdded { room } => {
                self.state.rooms.insert(*room);
                // A real room has a floor, so the placeholder goes
                if !self.state.default_floor_removed {
                    let node = &self.config.scene.default_floor_node;
                    if !self.runtime.destroy_node(node) {
                        tracing::warn!("Composition has no {} node", node);
                    }
                    self.state.default_floor_removed = true;
                }
            }
            SceneEvent::RoomRemoved { room } => {
                self.state.rooms.remove(room);
            }
            _ => {}
        }

        event.dispatch(&mut self.outlines.listener(&mut self.runtime));
    }

    pub fn on_panel_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::ConfigureRoom => {
                self.runtime.request_scene_capture();
                self.load_scene();
            }
            PanelAction::ToggleDebug => {
                let debug_on = self.state.toggle_debug();
                tracing::debug!("Physics debug lines {}", if debug_on { "on" } else { "off" });
                self.runtime.set_physics_debug_lines(debug_on);
            }
        }
    }

    /// Fire a ball from the controller. Ignored until the composition
    /// has loaded.
    pub fn shoot(&mut self, controller: Pose) -> Option<BallSpawn> {
        let Some(shooter) = self.shooter.as_mut() else {
            tracing::debug!("Ignoring trigger before composition load");
            return None;
        };

        let shot = shooter.fire(controller);
        for id in shot.evicted {
            self.runtime.despawn_ball(id);
        }
        self.runtime.spawn_ball(&shot.spawn);
        Some(shot.spawn)
    }

    /// Remove balls that left the physics world; returns the removed ids
    pub fn cull_balls<I>(&mut self, positions: I) -> Vec<BallId>
    where
        I: IntoIterator<Item = (BallId, Vec3)>,
    {
        let Some(shooter) = self.shooter.as_mut() else {
            return Vec::new();
        };

        let fallen = shooter.cull_below(self.config.physics.world_min_y, positions);
        for id in &fallen {
            self.runtime.despawn_ball(*id);
        }
        fallen
    }

    /// Tear down everything the session spawned
    pub fn shutdown(&mut self) {
        self.outlines.clear(&mut self.runtime);
        if let Some(shooter) = self.shooter.as_mut() {
            for id in shooter.clear() {
                self.runtime.despawn_ball(id);
            }
        }
        tracing::info!("Session shut down");
    }
}
