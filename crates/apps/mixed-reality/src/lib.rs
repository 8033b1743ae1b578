//! Mixed reality room outline sample
//!
//! Wires the scene model and outline geometry into an application session:
//!
//! - [`config`]: TOML configuration with `ROOMFRAME_*` environment overrides
//! - [`runtime`]: the [`SceneRuntime`] collaborator interface
//! - [`session`]: permission flow, scene loading, per-frame event handling
//! - [`ball`]: controller ball shooting
//! - [`replay`]: an in-memory runtime that replays a JSON room fixture
//!
//! # Example
//!
//! ```no_run
//! use mixed_reality::{AppConfig, ReplayReport, ReplayRuntime, SceneFixture, Session};
//!
//! let fixture = SceneFixture::from_file("scenes/living_room.json")?;
//! let config = AppConfig::default();
//! let runtime = ReplayRuntime::new(fixture, [config.scene.default_floor_node.clone()]);
//!
//! let mut session = Session::new(runtime, config);
//! session.on_scene_ready();
//! session.on_composition_loaded();
//! session.update();
//!
//! println!("{}", ReplayReport::collect(&session).to_json_pretty()?);
//! # Ok::<(), mixed_reality::Error>(())
//! ```

pub mod ball;
pub mod config;
mod error;
pub mod replay;
pub mod runtime;
pub mod session;
pub mod state;

pub use ball::{BallId, BallShooter, BallSpawn, Shot};
pub use config::{AppConfig, PERMISSION_USE_SCENE};
pub use error::{Error, Result};
pub use replay::{CompositionRecord, ReplayReport, ReplayRuntime, SceneFixture};
pub use runtime::{LoadDeviceResult, PanelAction, SceneRuntime};
pub use session::Session;
pub use state::{AppState, PermissionState, SceneStatus};
