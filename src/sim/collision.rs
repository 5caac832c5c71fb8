//! Collision and collection checks
//!
//! Hits are lane equality plus a fixed longitudinal window around the player,
//! not geometric overlap. Evaluation reads an immutable view of the entity
//! set and produces a [`HitReport`]; [`apply_hits`] then mutates the state in
//! one pass, so no entity can be scored twice in a tick.

use glam::Vec3;

use super::entity::{Entity, EntityId, EntityKind};
use super::lane::Lane;
use super::state::{RunPhase, SimEvent, SimState};
use crate::tuning::Tuning;

/// Height of the floating feedback anchor above the road
const FEEDBACK_HEIGHT: f32 = 1.0;

/// A collectible reached by the player this tick
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub id: EntityId,
    pub anchor: Vec3,
}

/// Result of checking the road against the player for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitReport {
    /// First obstacle found in the player's lane and window
    pub crash: Option<EntityId>,
    /// Every collectible in the player's lane and window
    pub pickups: Vec<Pickup>,
}

impl HitReport {
    pub fn is_empty(&self) -> bool {
        self.crash.is_none() && self.pickups.is_empty()
    }
}

/// Whether `z` lies inside the player's footprint (open interval)
#[inline]
pub fn in_hit_window(z: f32, hit_window: f32) -> bool {
    z > -hit_window && z < hit_window
}

/// Check every road entity against the player's lane
pub fn evaluate_hits(entities: &[Entity], player_lane: Lane, tuning: &Tuning) -> HitReport {
    let mut report = HitReport::default();

    for entity in entities {
        // Decorations have no road lane and are skipped here
        let Some(lane) = entity.road_lane() else {
            continue;
        };
        if lane != player_lane || !in_hit_window(entity.z, tuning.hit_window) {
            continue;
        }

        match entity.kind {
            EntityKind::Obstacle => {
                if report.crash.is_none() {
                    report.crash = Some(entity.id);
                }
            }
            EntityKind::Collectible => report.pickups.push(Pickup {
                id: entity.id,
                anchor: Vec3::new(lane.x(tuning.lane_width), FEEDBACK_HEIGHT, entity.z),
            }),
            EntityKind::Decoration => {}
        }
    }

    report
}

/// Apply a report to the state and return the resulting events.
///
/// A crash wins over pickups in the same tick: the run ends with the score it
/// had before the tick and nothing is removed.
pub fn apply_hits(state: &mut SimState, report: HitReport, player_lane: Lane) -> Vec<SimEvent> {
    if let Some(id) = report.crash {
        state.phase = RunPhase::GameOver;
        if !report.pickups.is_empty() {
            log::debug!(
                "Crash on tick {} voids {} pickup(s)",
                state.time_ticks,
                report.pickups.len()
            );
        }
        log::info!(
            "Crashed into obstacle {} in lane {:?} (score {})",
            id,
            player_lane,
            state.score
        );
        return vec![SimEvent::Crashed {
            id,
            lane: player_lane,
            score: state.score,
        }];
    }

    if report.pickups.is_empty() {
        return Vec::new();
    }

    let points = state.tuning.collectible_value;
    state
        .entities
        .retain(|e| !report.pickups.iter().any(|p| p.id == e.id));

    report
        .pickups
        .into_iter()
        .map(|pickup| {
            state.score += points;
            state.collectibles += 1;
            SimEvent::Collected {
                id: pickup.id,
                kind: EntityKind::Collectible,
                anchor: pickup.anchor,
                points,
            }
        })
        .collect()
}
