//! Application configuration
//!
//! Loaded from an optional TOML file where every key has a default, then
//! adjusted by `ROOMFRAME_*` environment variables:
//!
//! | variable | field |
//! |---|---|
//! | `ROOMFRAME_EDGE_THICKNESS` | `outline.thickness` |
//! | `ROOMFRAME_CLAMP_DEGENERATE` | `outline.clamp_degenerate` |
//! | `ROOMFRAME_DEBUG_LINES` | `physics.debug_lines` |
//! | `ROOMFRAME_COMPOSITION` | `scene.composition` |

use crate::error::{read_file, Error, Result};
use glam::{Vec3, Vec4};
use outline::DegeneratePolicy;
use scene::procedural::{FURNITURE_EDGE_COLOR, FURNITURE_EDGE_WIDTH, ROOM_EDGE_COLOR};
use scene::{MaterialSpec, OutlineStyle, ProceduralMeshPlan, EDGE_THICKNESS};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Permission the runtime needs before it shares room data
pub const PERMISSION_USE_SCENE: &str = "com.oculus.permission.USE_SCENE";

/// Scene composition and the nodes the app looks up in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub composition: String,
    /// Key under which the composition is registered
    pub key: String,
    /// Placeholder floor removed once a real room is known
    pub default_floor_node: String,
    /// Template mesh for shot balls
    pub ball_node: String,
    pub permission: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            composition: "apk:///scenes/Composition.glxf".to_string(),
            key: "GLXF_SCENE".to_string(),
            default_floor_node: "defaultFloor".to_string(),
            ball_node: "BasketBall".to_string(),
            permission: PERMISSION_USE_SCENE.to_string(),
        }
    }
}

/// Room-shell outline appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Edge box thickness in meters
    pub thickness: f32,
    pub color: Vec4,
    /// Collapse vertical edges of too-thin planes instead of skipping them
    pub clamp_degenerate: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            thickness: EDGE_THICKNESS,
            color: ROOM_EDGE_COLOR,
            clamp_degenerate: false,
        }
    }
}

impl OutlineConfig {
    pub fn style(&self) -> OutlineStyle {
        OutlineStyle {
            thickness: self.thickness,
            material: MaterialSpec::solid_color(self.color),
            policy: if self.clamp_degenerate {
                DegeneratePolicy::Clamp
            } else {
                DegeneratePolicy::Reject
            },
        }
    }
}

/// Furniture edge shader parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FurnitureConfig {
    pub color: Vec4,
    pub edge_width: f32,
}

impl Default for FurnitureConfig {
    fn default() -> Self {
        Self {
            color: FURNITURE_EDGE_COLOR,
            edge_width: FURNITURE_EDGE_WIDTH,
        }
    }
}

impl FurnitureConfig {
    pub fn plan(&self) -> ProceduralMeshPlan {
        ProceduralMeshPlan::furniture(MaterialSpec::edge_only(self.color, self.edge_width))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Bodies falling below this height leave the physics world
    pub world_min_y: f32,
    /// Initial state of physics debug lines
    pub debug_lines: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            world_min_y: -100.0,
            debug_lines: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: Vec3,
    pub sun_color: Vec3,
    /// Direction the sunlight travels
    pub sun_direction: Vec3,
    pub environment_intensity: f32,
    /// Image-based lighting environment
    pub environment: String,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: Vec3::ZERO,
            sun_color: Vec3::splat(7.0),
            sun_direction: -Vec3::new(1.0, 3.0, -2.0),
            environment_intensity: 0.3,
            environment: "environment.env".to_string(),
        }
    }
}

/// Translucent cube placed in front of the user when the scene is ready
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub enabled: bool,
    pub name: String,
    pub position: Vec3,
    pub half_size: f32,
    pub color: Vec4,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "redCube".to_string(),
            position: Vec3::new(0.0, 1.0, -2.0),
            half_size: 0.25,
            color: Vec4::new(1.0, 0.0, 0.0, 0.5),
        }
    }
}

impl MarkerConfig {
    pub fn material(&self) -> MaterialSpec {
        MaterialSpec::solid_color(self.color)
    }
}

/// Settings panel quad size in meters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 0.8,
            height: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Launch speed in m/s
    pub speed: f32,
    pub radius: f32,
    /// Oldest balls are removed past this count
    pub max_balls: usize,
    /// Spawn distance in front of the controller
    pub muzzle_offset: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            radius: 0.12,
            max_balls: 10,
            muzzle_offset: 0.15,
        }
    }
}

/// Combined application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scene: SceneConfig,
    pub outline: OutlineConfig,
    pub furniture: FurnitureConfig,
    pub physics: PhysicsConfig,
    pub lighting: LightingConfig,
    pub marker: MarkerConfig,
    pub panel: PanelConfig,
    pub ball: BallConfig,
}

impl AppConfig {
    /// Parse a TOML document, filling missing keys with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_file(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load the file if given (defaults otherwise), then apply environment
    /// overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `ROOMFRAME_*` overrides looked up through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ROOMFRAME_EDGE_THICKNESS") {
            self.outline.thickness = v
                .parse()
                .map_err(|_| Error::InvalidConfig(format!("ROOMFRAME_EDGE_THICKNESS={}", v)))?;
        }
        if let Some(v) = lookup("ROOMFRAME_CLAMP_DEGENERATE") {
            self.outline.clamp_degenerate = parse_flag("ROOMFRAME_CLAMP_DEGENERATE", &v)?;
        }
        if let Some(v) = lookup("ROOMFRAME_DEBUG_LINES") {
            self.physics.debug_lines = parse_flag("ROOMFRAME_DEBUG_LINES", &v)?;
        }
        if let Some(v) = lookup("ROOMFRAME_COMPOSITION") {
            self.scene.composition = v;
        }
        self.validate()
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let t = self.outline.thickness;
        if !(t.is_finite() && t > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "outline.thickness must be positive, got {}",
                t
            )));
        }
        if !(self.furniture.edge_width.is_finite() && self.furniture.edge_width >= 0.0) {
            return Err(Error::InvalidConfig(
                "furniture.edge_width must not be negative".to_string(),
            ));
        }
        for (name, color) in [
            ("outline.color", self.outline.color),
            ("furniture.color", self.furniture.color),
            ("marker.color", self.marker.color),
        ] {
            if !color.cmpge(Vec4::ZERO).all() || !color.cmple(Vec4::ONE).all() {
                return Err(Error::InvalidConfig(format!(
                    "{} components must be within [0, 1], got {:?}",
                    name, color
                )));
            }
        }
        for (name, value) in [
            ("ball.speed", self.ball.speed),
            ("ball.radius", self.ball.radius),
            ("panel.width", self.panel.width),
            ("panel.height", self.panel.height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        let offset = self.ball.muzzle_offset;
        if !(offset.is_finite() && offset >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "ball.muzzle_offset must not be negative, got {}",
                offset
            )));
        }
        if !self.physics.world_min_y.is_finite() {
            return Err(Error::InvalidConfig(
                "physics.world_min_y must be finite".to_string(),
            ));
        }
        if self.ball.max_balls == 0 {
            return Err(Error::InvalidConfig("ball.max_balls must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidConfig(format!("{}={} is not a flag", key, value))),
    }
}
