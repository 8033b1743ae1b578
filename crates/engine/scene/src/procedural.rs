//! Material descriptors for scene overlays
//!
//! Room shells (walls, floor, ceiling) are outlined with explicit edge boxes,
//! see [`crate::outlines`]. Furniture instead gets a procedural mesh rendered
//! with an edge-only shader. This module only describes which material goes
//! where; the shaders themselves belong to the renderer.

use crate::label::SceneLabel;
use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Translucent green used for room-shell edge boxes
pub const ROOM_EDGE_COLOR: Vec4 = Vec4::new(0.0, 1.0, 0.0, 0.35);

/// Translucent green used for furniture edges
pub const FURNITURE_EDGE_COLOR: Vec4 = Vec4::new(0.0, 1.0, 0.0, 0.3);

/// Edge width of the furniture shader, in meters
pub const FURNITURE_EDGE_WIDTH: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShaderKind {
    /// Unlit flat color
    SolidColor,
    /// Draws only the borders of each face
    EdgeOnly,
}

impl ShaderKind {
    /// Shader name as registered with the renderer
    pub fn name(&self) -> &'static str {
        match self {
            ShaderKind::SolidColor => "solidColor",
            ShaderKind::EdgeOnly => "edgeOnly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    Opaque,
    #[default]
    Translucent,
}

/// Custom material request handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub shader: ShaderKind,
    pub blend: BlendMode,
    /// RGBA, straight alpha
    pub color: Vec4,
    /// Edge shader parameters; x is the edge width
    pub edge_params: Option<Vec4>,
}

impl MaterialSpec {
    pub fn solid_color(color: Vec4) -> Self {
        Self {
            shader: ShaderKind::SolidColor,
            blend: blend_for(color),
            color,
            edge_params: None,
        }
    }

    pub fn edge_only(color: Vec4, edge_width: f32) -> Self {
        Self {
            shader: ShaderKind::EdgeOnly,
            blend: blend_for(color),
            color,
            edge_params: Some(Vec4::new(edge_width, 0.0, 0.0, 0.0)),
        }
    }
}

fn blend_for(color: Vec4) -> BlendMode {
    if color.w < 1.0 {
        BlendMode::Translucent
    } else {
        BlendMode::Opaque
    }
}

/// How to build the procedural mesh of one label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProceduralMeshConfig {
    pub material: MaterialSpec,
    /// Close openings (doors, windows) in the generated surface
    pub fill_holes: bool,
}

/// Label to procedural mesh mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProceduralMeshPlan {
    entries: HashMap<SceneLabel, ProceduralMeshConfig>,
}

impl ProceduralMeshPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every furniture label rendered with `material`. Room-shell labels are
    /// left out so they are only drawn by their edge boxes.
    pub fn furniture(material: MaterialSpec) -> Self {
        let mut plan = Self::new();
        for label in SceneLabel::ALL.into_iter().filter(SceneLabel::is_furniture) {
            plan.insert(
                label,
                ProceduralMeshConfig {
                    material,
                    fill_holes: true,
                },
            );
        }
        plan
    }

    pub fn insert(&mut self, label: SceneLabel, config: ProceduralMeshConfig) {
        self.entries.insert(label, config);
    }

    pub fn contains(&self, label: SceneLabel) -> bool {
        self.entries.contains_key(&label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self::solid_color(ROOM_EDGE_COLOR)
    }
}
