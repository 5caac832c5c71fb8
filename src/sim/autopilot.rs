//! Demo mode - picks lanes automatically
//!
//! Makes one lane decision per call, the same way a player would press a key.

use std::cmp::Ordering;

use super::entity::{Entity, EntityKind};
use super::lane::{Lane, LaneShift};
use crate::tuning::Tuning;

/// How far ahead (world units) the autopilot reacts to obstacles
pub const LOOK_AHEAD: f32 = 25.0;

fn ahead(entity: &Entity, tuning: &Tuning) -> bool {
    entity.z > -LOOK_AHEAD && entity.z < tuning.hit_window
}

/// z of the closest obstacle ahead in `lane`, if any
fn nearest_obstacle(entities: &[Entity], lane: Lane, tuning: &Tuning) -> Option<f32> {
    entities
        .iter()
        .filter(|e| {
            e.kind == EntityKind::Obstacle && e.road_lane() == Some(lane) && ahead(e, tuning)
        })
        .map(|e| e.z)
        .reduce(f32::max)
}

fn threatened(entities: &[Entity], lane: Lane, tuning: &Tuning) -> bool {
    nearest_obstacle(entities, lane, tuning).is_some()
}

fn toward(current: Lane, target: Lane) -> Option<LaneShift> {
    match target.index().cmp(&current.index()) {
        Ordering::Less => Some(LaneShift::Left),
        Ordering::Greater => Some(LaneShift::Right),
        Ordering::Equal => None,
    }
}

/// Decide the next lane shift for the current road, if any
pub fn steer(entities: &[Entity], current: Lane, tuning: &Tuning) -> Option<LaneShift> {
    if threatened(entities, current, tuning) {
        // Head for the lane whose next obstacle is furthest away (or absent),
        // preferring the closest such lane
        let safest = Lane::ALL
            .into_iter()
            .min_by(|&a, &b| {
                let da = nearest_obstacle(entities, a, tuning).unwrap_or(f32::NEG_INFINITY);
                let db = nearest_obstacle(entities, b, tuning).unwrap_or(f32::NEG_INFINITY);
                da.partial_cmp(&db).unwrap_or(Ordering::Equal).then_with(|| {
                    let ka = (a.index() - current.index()).abs();
                    let kb = (b.index() - current.index()).abs();
                    ka.cmp(&kb)
                })
            })
            .unwrap_or(current);
        return toward(current, safest);
    }

    // Road is clear - drift toward the nearest ball ahead
    let target = entities
        .iter()
        .filter(|e| e.kind == EntityKind::Collectible && ahead(e, tuning))
        .max_by(|a, b| a.z.partial_cmp(&b.z).unwrap_or(Ordering::Equal))
        .and_then(Entity::road_lane)?;

    let shift = toward(current, target)?;
    let next = current.shifted(shift);
    (!threatened(entities, next, tuning)).then_some(shift)
}
