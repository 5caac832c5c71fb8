//! Batch spawning
//!
//! Batches are spaced by road distance rather than time, so the interval
//! shrinks as speed rises and the perceived density stays constant.

use rand::Rng;
use rand::seq::SliceRandom;

use super::entity::{DECORATION_LANE, Entity, EntityKind};
use super::lane::Lane;
use super::state::SimState;
use crate::tuning::Tuning;

/// Seconds between batches at the given speed
#[inline]
pub fn spawn_interval(speed: f32, tuning: &Tuning) -> f32 {
    tuning.spawn_spacing / speed.max(tuning.min_spawn_speed)
}

/// Roll one batch: 0-2 road items plus exactly two roadside decorations.
///
/// Returned entities carry a placeholder id of 0; the caller allocates ids.
pub fn build_batch<R: Rng>(rng: &mut R, tuning: &Tuning) -> Vec<Entity> {
    let z = -tuning.spawn_distance;
    let mut batch = Vec::with_capacity(4);

    let mut lanes = Lane::ALL;
    lanes.shuffle(rng);

    // Never three: at least one lane must stay passable
    let count = if rng.random_bool(tuning.multi_spawn_chance) {
        2
    } else {
        1
    };
    let breather = rng.random_bool(tuning.breather_chance);

    if !breather {
        for &lane in lanes.iter().take(count) {
            let entity = if rng.random_bool(0.5) {
                let d = tuning.collectible_radius * 2.0;
                road_item(EntityKind::Collectible, lane, z, d, d)
            } else {
                road_item(
                    EntityKind::Obstacle,
                    lane,
                    z,
                    tuning.obstacle_width,
                    tuning.obstacle_height,
                )
            };
            batch.push(entity);
        }
    }

    for side in [-DECORATION_LANE, DECORATION_LANE] {
        batch.push(Entity {
            id: 0,
            kind: EntityKind::Decoration,
            lane: side,
            z: z + rng.random::<f32>() * tuning.decoration_z_jitter,
            width: 1.0,
            height: tuning.decoration_min_height
                + rng.random::<f32>() * tuning.decoration_height_range,
            x_jitter: rng.random::<f32>() * tuning.decoration_x_jitter,
        });
    }

    batch
}

fn road_item(kind: EntityKind, lane: Lane, z: f32, width: f32, height: f32) -> Entity {
    Entity {
        id: 0,
        kind,
        lane: lane.index(),
        z,
        width,
        height,
        x_jitter: 0.0,
    }
}

/// Accumulate `dt` and emit a batch once the interval has elapsed.
///
/// Returns the number of entities added.
pub fn maybe_spawn(state: &mut SimState, dt: f32) -> usize {
    state.since_last_spawn += dt;
    if state.since_last_spawn <= spawn_interval(state.speed, &state.tuning) {
        return 0;
    }
    state.since_last_spawn = 0.0;

    let mut batch = build_batch(&mut state.rng, &state.tuning);
    for entity in &mut batch {
        entity.id = state.next_entity_id();
    }
    let added = batch.len();
    log::trace!(
        "Spawned batch of {} ({} on road) at speed {:.1}",
        added,
        batch.iter().filter(|e| e.is_road_item()).count(),
        state.speed
    );
    state.entities.extend(batch);
    added
}
