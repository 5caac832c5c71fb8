//! Spawned road objects

use serde::{Deserialize, Serialize};

use super::lane::Lane;

/// Entity identifier, unique within a run
pub type EntityId = u32;

/// What an entity does when the player reaches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Concrete barrier - ends the run
    Obstacle,
    /// Ball - adds score and is removed
    Collectible,
    /// Roadside tree - cosmetic only
    Decoration,
}

impl EntityKind {
    /// Stable numeric tag used in the render instance buffer
    pub fn tag(self) -> u32 {
        match self {
            EntityKind::Obstacle => 0,
            EntityKind::Collectible => 1,
            EntityKind::Decoration => 2,
        }
    }
}

/// Decorations sit at this lane index on either side of the road
pub const DECORATION_LANE: i8 = 2;

/// A spawned object on or beside the road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// -1, 0, 1 for road items; +/-2 for decorations
    pub lane: i8,
    /// Track position: negative is ahead of the player
    pub z: f32,
    pub width: f32,
    pub height: f32,
    /// Extra outward offset for decorations
    #[serde(default)]
    pub x_jitter: f32,
}

impl Entity {
    /// The road lane this entity occupies, or `None` for roadside decorations
    pub fn road_lane(&self) -> Option<Lane> {
        match self.kind {
            EntityKind::Decoration => None,
            _ => Lane::from_index(self.lane),
        }
    }

    pub fn is_road_item(&self) -> bool {
        self.road_lane().is_some()
    }
}
