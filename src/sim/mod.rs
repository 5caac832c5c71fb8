//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Discrete lanes only (no interpolated positions)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod lane;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{HitReport, Pickup, apply_hits, evaluate_hits, in_hit_window};
pub use difficulty::ramp_speed;
pub use entity::{DECORATION_LANE, Entity, EntityId, EntityKind};
pub use lane::{Lane, LaneShift, PlayerLane, SwipeTracker};
pub use motion::{advance, cull};
pub use spawn::{build_batch, maybe_spawn, spawn_interval};
pub use state::{RunPhase, SimEvent, SimState};
pub use tick::{TickInput, tick};
