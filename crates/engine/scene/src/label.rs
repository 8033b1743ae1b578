//! Semantic labels attached to scene anchors

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic classification of a scene anchor as reported by the runtime.
///
/// Serialized using the runtime's own names (`"WALL_FACE"`, `"DOOR_FRAME"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SceneLabel {
    Floor,
    Ceiling,
    WallFace,
    InvisibleWallFace,
    Table,
    Couch,
    DoorFrame,
    WindowFrame,
    Storage,
    Bed,
    Screen,
    Lamp,
    Plant,
    WallArt,
    GlobalMesh,
    Other,
}

/// Labels that make up the shell of a room
pub const ROOM_BOUNDS_LABELS: [SceneLabel; 3] =
    [SceneLabel::WallFace, SceneLabel::Floor, SceneLabel::Ceiling];

impl SceneLabel {
    pub const ALL: [SceneLabel; 16] = [
        SceneLabel::Floor,
        SceneLabel::Ceiling,
        SceneLabel::WallFace,
        SceneLabel::InvisibleWallFace,
        SceneLabel::Table,
        SceneLabel::Couch,
        SceneLabel::DoorFrame,
        SceneLabel::WindowFrame,
        SceneLabel::Storage,
        SceneLabel::Bed,
        SceneLabel::Screen,
        SceneLabel::Lamp,
        SceneLabel::Plant,
        SceneLabel::WallArt,
        SceneLabel::GlobalMesh,
        SceneLabel::Other,
    ];

    /// Runtime name of the label
    pub const fn name(&self) -> &'static str {
        match self {
            SceneLabel::Floor => "FLOOR",
            SceneLabel::Ceiling => "CEILING",
            SceneLabel::WallFace => "WALL_FACE",
            SceneLabel::InvisibleWallFace => "INVISIBLE_WALL_FACE",
            SceneLabel::Table => "TABLE",
            SceneLabel::Couch => "COUCH",
            SceneLabel::DoorFrame => "DOOR_FRAME",
            SceneLabel::WindowFrame => "WINDOW_FRAME",
            SceneLabel::Storage => "STORAGE",
            SceneLabel::Bed => "BED",
            SceneLabel::Screen => "SCREEN",
            SceneLabel::Lamp => "LAMP",
            SceneLabel::Plant => "PLANT",
            SceneLabel::WallArt => "WALL_ART",
            SceneLabel::GlobalMesh => "GLOBAL_MESH",
            SceneLabel::Other => "OTHER",
        }
    }

    /// Walls, floor and ceiling
    pub fn is_room_bounds(&self) -> bool {
        ROOM_BOUNDS_LABELS.contains(self)
    }

    /// Objects inside the room that get the procedural edge material
    pub fn is_furniture(&self) -> bool {
        matches!(
            self,
            SceneLabel::Table
                | SceneLabel::Couch
                | SceneLabel::DoorFrame
                | SceneLabel::WindowFrame
                | SceneLabel::Storage
                | SceneLabel::Bed
                | SceneLabel::Screen
                | SceneLabel::Lamp
                | SceneLabel::Plant
                | SceneLabel::Other
        )
    }
}

impl fmt::Display for SceneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneLabel::ALL
            .iter()
            .copied()
            .find(|label| label.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownLabel(s.to_string()))
    }
}
