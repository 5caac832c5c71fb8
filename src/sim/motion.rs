//! Entity motion and despawn

use super::entity::Entity;

/// Move every entity toward (and past) the player
pub fn advance(entities: &mut [Entity], speed: f32, dt: f32) {
    let step = speed * dt;
    for entity in entities.iter_mut() {
        entity.z += step;
    }
}

/// Drop entities that have passed the camera; returns how many were removed
pub fn cull(entities: &mut Vec<Entity>, despawn_distance: f32) -> usize {
    let before = entities.len();
    entities.retain(|e| e.z < despawn_distance);
    before - entities.len()
}
