//! Simulation tick
//!
//! One call advances the run by `dt` seconds in a fixed order:
//! difficulty, motion, cull, spawn, then collision/collection.

use super::collision::{apply_hits, evaluate_hits};
use super::difficulty::ramp_speed;
use super::lane::Lane;
use super::motion::{advance, cull};
use super::spawn::maybe_spawn;
use super::state::{SimEvent, SimState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player's discrete lane (owned by the host)
    pub player_lane: Lane,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the simulation by `dt` seconds.
///
/// Anything but [`super::RunPhase::Running`] skips the whole tick, so a
/// paused run keeps its speed, positions and spawn timer.
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) -> Vec<SimEvent> {
    debug_assert!(dt >= 0.0, "negative tick delta {dt}");

    if input.pause {
        state.toggle_pause();
        log::info!("Pause toggled -> {:?}", state.phase);
    }

    if !state.is_running() {
        return Vec::new();
    }

    state.time_ticks += 1;

    state.speed = ramp_speed(state.speed, dt, &state.tuning);

    advance(&mut state.entities, state.speed, dt);
    cull(&mut state.entities, state.tuning.despawn_distance);

    maybe_spawn(state, dt);

    let report = evaluate_hits(&state.entities, input.player_lane, &state.tuning);
    if report.is_empty() {
        return Vec::new();
    }
    apply_hits(state, report, input.player_lane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;
    use crate::sim::state::RunPhase;
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 64.0;

    fn running(seed: u64) -> SimState {
        let mut state = SimState::new(seed, Tuning::default());
        state.start_run(seed);
        state
    }

    fn lane(player_lane: Lane) -> TickInput {
        TickInput {
            player_lane,
            pause: false,
        }
    }

    #[test]
    fn test_idle_state_does_not_tick() {
        let mut state = SimState::new(1, Tuning::default());
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.speed, 15.0);
    }

    #[test]
    fn test_speed_caps_after_ninety_seconds() {
        // Nothing ever spawns in a lane, so the run cannot end
        let tuning = Tuning {
            breather_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = SimState::new(11, tuning);
        state.start_run(11);

        let mut last = state.speed;
        for _ in 0..(90 * 64) {
            tick(&mut state, &lane(Lane::Center), DT);
            assert!(state.speed >= last);
            assert!(state.speed <= 60.0);
            last = state.speed;
        }
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.speed, 60.0);
    }

    #[test]
    fn test_obstacle_in_lane_ends_run_once() {
        let mut state = running(2);
        let wall = state.place(EntityKind::Obstacle, 0, 0.0);

        let events = tick(&mut state, &lane(Lane::Center), DT);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SimEvent::Crashed { id, score: 0, .. } if id == wall));
        assert_eq!(state.phase, RunPhase::GameOver);
        assert_eq!(state.score, 0);

        // Later frames never re-fire
        for _ in 0..10 {
            assert!(tick(&mut state, &lane(Lane::Center), DT).is_empty());
        }
    }

    #[test]
    fn test_collectible_scores_once_and_disappears() {
        let mut state = running(3);
        let ball = state.place(EntityKind::Collectible, -1, -0.5);

        let events = tick(&mut state, &lane(Lane::Left), DT);
        let collected: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SimEvent::Collected { id, .. } if *id == ball))
            .collect();
        assert_eq!(collected.len(), 1);
        assert_eq!(state.score, 10);
        assert_eq!(state.collectibles, 1);
        assert!(state.entity(ball).is_none());

        tick(&mut state, &lane(Lane::Left), DT);
        assert_eq!(state.score, 10);
        assert_eq!(state.collectibles, 1);
        assert!(state.entity(ball).is_none());
    }

    #[test]
    fn test_other_lane_is_safe() {
        let mut state = running(4);
        state.place(EntityKind::Obstacle, 1, 0.0);
        let events = tick(&mut state, &lane(Lane::Left), DT);
        assert!(events.is_empty());
        assert_eq!(state.phase, RunPhase::Running);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = running(5);
        for _ in 0..200 {
            tick(&mut state, &lane(Lane::Right), DT);
            if state.phase != RunPhase::Running {
                // Unlucky seed: restart and keep going
                state.start_run(5);
            }
        }

        let pause = TickInput {
            player_lane: Lane::Right,
            pause: true,
        };
        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, RunPhase::Paused);

        let speed = state.speed;
        let since = state.since_last_spawn;
        let ticks = state.time_ticks;
        let snapshot = state.entities.clone();

        // A long stall while paused
        for _ in 0..1000 {
            assert!(tick(&mut state, &lane(Lane::Right), 0.1).is_empty());
        }
        assert_eq!(state.speed, speed);
        assert_eq!(state.since_last_spawn, since);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.entities, snapshot);

        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, RunPhase::Running);
        assert!(state.time_ticks > ticks);
    }

    #[test]
    fn test_entities_flow_past_and_despawn() {
        let tuning = Tuning {
            breather_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = SimState::new(6, tuning);
        state.start_run(6);
        let far = state.place(EntityKind::Decoration, 2, -5.0);
        // 20 units at >= 15 u/s takes well under two seconds
        for _ in 0..128 {
            tick(&mut state, &lane(Lane::Center), DT);
        }
        assert_eq!(state.phase, RunPhase::Running);
        assert!(state.entity(far).is_none());
        assert!(state.entities.iter().all(|e| e.z < state.tuning.despawn_distance));
    }

    #[test]
    fn test_entities_stay_in_id_order() {
        let tuning = Tuning {
            breather_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = SimState::new(8, tuning);
        state.start_run(8);
        for _ in 0..(20 * 64) {
            tick(&mut state, &lane(Lane::Center), DT);
            assert!(state.entities.windows(2).all(|w| w[0].id < w[1].id));
        }
        assert_eq!(state.phase, RunPhase::Running);
    }

    #[test]
    fn test_determinism() {
        let mut a = running(99999);
        let mut b = running(99999);

        let lanes = [Lane::Center, Lane::Left, Lane::Left, Lane::Right];
        for i in 0..600 {
            let input = lane(lanes[(i / 50) % lanes.len()]);
            let ea = tick(&mut a, &input, DT);
            let eb = tick(&mut b, &input, DT);
            assert_eq!(ea, eb);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.entities, b.entities);
    }
}
