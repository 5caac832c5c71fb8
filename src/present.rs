//! Render snapshot for the external renderer
//!
//! The renderer lives in JavaScript. Each frame it receives a packed
//! [`EntityInstance`] buffer plus a small JSON [`RenderFrame`] for HUD and
//! transient effects. Smooth lane changes are computed here and never fed
//! back into the simulation.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::Serialize;

use crate::sim::{Entity, EntityKind, Lane, RunPhase, SimEvent, SimState};
use crate::tuning::Tuning;

/// One entity as the renderer sees it
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct EntityInstance {
    pub position: [f32; 3],
    pub size: [f32; 2],
    /// 0 obstacle, 1 collectible, 2 decoration
    pub kind: u32,
}

impl EntityInstance {
    pub fn from_entity(entity: &Entity, tuning: &Tuning) -> Self {
        let x = match entity.kind {
            EntityKind::Decoration => {
                let side = f32::from(entity.lane.signum());
                side * (tuning.decoration_offset + entity.x_jitter)
            }
            _ => f32::from(entity.lane) * tuning.lane_width,
        };
        let y = match entity.kind {
            EntityKind::Collectible => tuning.collectible_radius,
            _ => 0.0,
        };
        let position = Vec3::new(x, y, entity.z);
        Self {
            position: position.to_array(),
            size: [entity.width, entity.height],
            kind: entity.kind.tag(),
        }
    }
}

/// Pack every active entity for upload
pub fn build_instances(state: &SimState) -> Vec<EntityInstance> {
    state
        .entities
        .iter()
        .map(|e| EntityInstance::from_entity(e, &state.tuning))
        .collect()
}

/// Raw bytes of an instance buffer (little-endian on every wasm target)
pub fn instance_bytes(instances: &[EntityInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Car x position sliding toward the lane centre
#[derive(Debug, Clone, Default)]
pub struct LateralMotion {
    x: f32,
    /// Gap to the lane centre before the last slide step
    gap: f32,
}

impl LateralMotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    /// Slide toward `lane` at `tuning.lateral_speed`, snapping on the last step
    pub fn update(&mut self, lane: Lane, dt: f32, tuning: &Tuning) {
        let target = lane.x(tuning.lane_width);
        let diff = target - self.x;
        self.gap = diff;
        let step = tuning.lateral_speed * dt;
        if diff.abs() < step {
            self.x = target;
        } else {
            self.x += diff.signum() * step;
        }
    }

    /// Chassis roll for the renderer, leaning into the current slide
    pub fn roll(&self) -> f32 {
        -self.gap * 0.08
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
        self.gap = 0.0;
    }
}

/// Score popup request, one per pickup
#[derive(Debug, Clone, Serialize)]
pub struct FloatingScore {
    pub id: u32,
    pub position: [f32; 3],
    pub points: u64,
}

/// Per-frame metadata for the HUD and effects
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    pub phase: RunPhase,
    pub score: u64,
    pub balls: u32,
    pub speed: f32,
    pub max_speed: f32,
    pub best_score: u64,
    pub player_x: f32,
    pub player_roll: f32,
    pub autopilot: bool,
    pub popups: Vec<FloatingScore>,
    pub crashed: bool,
}

impl RenderFrame {
    pub fn new(
        state: &SimState,
        lateral: &LateralMotion,
        best_score: u64,
        autopilot: bool,
        events: &[SimEvent],
    ) -> Self {
        let popups = events
            .iter()
            .filter_map(|event| match event {
                SimEvent::Collected {
                    id, anchor, points, ..
                } => Some(FloatingScore {
                    id: *id,
                    position: anchor.to_array(),
                    points: *points,
                }),
                SimEvent::Crashed { .. } => None,
            })
            .collect();

        Self {
            phase: state.phase,
            score: state.score,
            balls: state.collectibles,
            speed: state.speed,
            max_speed: state.tuning.max_speed,
            best_score,
            player_x: lateral.x(),
            player_roll: lateral.roll(),
            autopilot,
            popups,
            crashed: events
                .iter()
                .any(|e| matches!(e, SimEvent::Crashed { .. })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<EntityInstance>(), 24);
        let instances = [EntityInstance::zeroed(); 3];
        assert_eq!(instance_bytes(&instances).len(), 72);
    }

    #[test]
    fn test_instance_positions() {
        let tuning = Tuning::default();
        let mut state = SimState::new(1, tuning.clone());
        state.place(EntityKind::Obstacle, -1, -30.0);
        state.place(EntityKind::Collectible, 1, -10.0);
        let tree = state.place(EntityKind::Decoration, -2, -50.0);
        if let Some(e) = state.entities.iter_mut().find(|e| e.id == tree) {
            e.x_jitter = 1.5;
        }

        let instances = build_instances(&state);
        assert_eq!(instances[0].position, [-2.5, 0.0, -30.0]);
        assert_eq!(instances[0].kind, 0);
        assert_eq!(instances[1].position, [2.5, 0.4, -10.0]);
        assert_eq!(instances[1].size, [0.8, 0.8]);
        assert_eq!(instances[2].position, [-6.5, 0.0, -50.0]);
        assert_eq!(instances[2].kind, 2);
    }

    #[test]
    fn test_lateral_slide_snaps() {
        let tuning = Tuning::default();
        let mut lateral = LateralMotion::new();

        // 15 u/s * 0.1 s = 1.5 per step toward 2.5
        lateral.update(Lane::Right, 0.1, &tuning);
        assert!((lateral.x() - 1.5).abs() < 1e-5);
        assert!((lateral.roll() + 0.2).abs() < 1e-5);

        // Still leaning on the frame it snaps into the lane
        lateral.update(Lane::Right, 0.1, &tuning);
        assert_eq!(lateral.x(), 2.5);
        assert!((lateral.roll() + 0.08).abs() < 1e-5);

        lateral.update(Lane::Right, 0.1, &tuning);
        assert_eq!(lateral.roll(), 0.0);

        lateral.update(Lane::Left, 1.0, &tuning);
        assert_eq!(lateral.x(), -2.5);
    }

    #[test]
    fn test_frame_collects_popups() {
        let mut state = SimState::new(1, Tuning::default());
        state.start_run(1);
        let events = vec![SimEvent::Collected {
            id: 4,
            kind: EntityKind::Collectible,
            anchor: Vec3::new(0.0, 1.0, 0.3),
            points: 10,
        }];
        let frame = RenderFrame::new(
            &state,
            &LateralMotion::new(),
            120,
            false,
            &events,
        );
        assert_eq!(frame.popups.len(), 1);
        assert_eq!(frame.popups[0].position, [0.0, 1.0, 0.3]);
        assert!(!frame.crashed);

        let json = serde_json::to_string(&frame).expect("frame serializes");
        assert!(json.contains("\"best_score\":120"));
    }
}
