//! Movement system
//!
//! One dispatcher over [`MotionRule`]: the player wraps, items bounce,
//! rain falls and is culled once it drops out of view.

use glam::Vec2;

use super::entity::{EntityId, MotionRule, Registry};
use crate::tuning::Tuning;
use crate::{normalize_angle, polar_to_cartesian, wrap_coord};

/// Which axes reflected during an item step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

/// Move the player by the input vector and wrap each axis independently.
///
/// Diagonal input is not normalized, so a diagonal covers more ground.
pub fn step_player(pos: Vec2, input: Vec2, speed: f32, dt: f32, arena: Vec2) -> Vec2 {
    let moved = pos + input * speed * dt;
    Vec2::new(wrap_coord(moved.x, arena.x), wrap_coord(moved.y, arena.y))
}

/// Advance an autonomous item along its heading, reflecting off the walls.
///
/// Leaving `[0, width]` mirrors the heading horizontally (`π - θ`), leaving
/// `[0, height]` mirrors it vertically (`-θ`). Both can happen in one step.
/// The position is pulled back onto the wall it crossed.
pub fn step_item(
    pos: &mut Vec2,
    speed: f32,
    direction: &mut f32,
    dt: f32,
    arena: Vec2,
) -> Bounce {
    *pos += polar_to_cartesian(speed * dt, *direction);

    let mut bounce = Bounce::default();
    if pos.x < 0.0 || pos.x > arena.x {
        *direction = std::f32::consts::PI - *direction;
        pos.x = pos.x.clamp(0.0, arena.x);
        bounce.x = true;
    }
    if pos.y < 0.0 || pos.y > arena.y {
        *direction = -*direction;
        pos.y = pos.y.clamp(0.0, arena.y);
        bounce.y = true;
    }
    *direction = normalize_angle(*direction);
    bounce
}

/// Let a raindrop fall. Returns false once it is below the cull line.
pub fn step_particle(pos: &mut Vec2, speed: f32, dt: f32, arena_height: f32, margin: f32) -> bool {
    pos.y += speed * dt;
    pos.y <= arena_height + margin
}

/// Advance every live entity one tick.
///
/// Returns the particles that fell out of the arena; they have already been
/// removed from the registry.
pub fn run(registry: &mut Registry, input: Vec2, tuning: &Tuning, dt: f32) -> Vec<EntityId> {
    let arena = tuning.arena();
    let mut culled = Vec::new();

    for entity in registry.iter_live_mut(None) {
        match entity.motion {
            MotionRule::Player => {
                entity.pos = step_player(entity.pos, input, tuning.player_speed, dt, arena);
            }
            MotionRule::Autonomous {
                speed,
                ref mut direction,
            } => {
                step_item(&mut entity.pos, speed, direction, dt, arena);
            }
            MotionRule::Falling { speed } => {
                let visible = step_particle(
                    &mut entity.pos,
                    speed,
                    dt,
                    arena.y,
                    tuning.rain_cull_margin,
                );
                if !visible {
                    culled.push(entity.id);
                }
            }
        }
    }

    for &id in &culled {
        registry.destroy(id);
    }
    culled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::{Appearance, EntityKind, ItemKind};
    use std::f32::consts::PI;

    const ARENA: Vec2 = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_player_moves_at_speed() {
        let pos = step_player(Vec2::new(400.0, 300.0), Vec2::new(1.0, 0.0), 320.0, 0.5, ARENA);
        assert!((pos.x - 560.0).abs() < 1e-3);
        assert_eq!(pos.y, 300.0);
    }

    #[test]
    fn test_player_diagonal_not_normalized() {
        let pos = step_player(Vec2::new(400.0, 300.0), Vec2::new(1.0, 1.0), 320.0, 0.25, ARENA);
        assert!((pos.x - 480.0).abs() < 1e-3);
        assert!((pos.y - 380.0).abs() < 1e-3);
    }

    #[test]
    fn test_player_wraps_all_edges() {
        // Left edge
        let pos = step_player(Vec2::new(-1.0, 300.0), Vec2::new(1.0, 0.0), 32.0, DT, ARENA);
        assert_eq!(pos.x, ARENA_WIDTH);
        // Right edge
        let pos = step_player(Vec2::new(799.9, 300.0), Vec2::new(1.0, 0.0), 320.0, DT, ARENA);
        assert_eq!(pos.x, 0.0);
        // Top edge
        let pos = step_player(Vec2::new(400.0, 1.0), Vec2::new(0.0, -1.0), 320.0, DT, ARENA);
        assert_eq!(pos.y, ARENA_HEIGHT);
        // Bottom edge
        let pos = step_player(Vec2::new(400.0, 599.0), Vec2::new(0.0, 1.0), 320.0, DT, ARENA);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn test_player_corner_wraps_both_axes() {
        let pos = step_player(Vec2::new(1.0, 1.0), Vec2::new(-1.0, -1.0), 320.0, DT, ARENA);
        assert_eq!(pos, ARENA);
    }

    #[test]
    fn test_item_bounces_off_right_wall() {
        let theta = 0.3;
        let mut pos = Vec2::new(ARENA_WIDTH, 300.0);
        let mut dir = theta;
        let bounce = step_item(&mut pos, 150.0, &mut dir, DT, ARENA);
        assert!(bounce.x && !bounce.y);
        assert!((dir - (PI - theta)).abs() < 1e-5);
        assert!(pos.x <= ARENA_WIDTH);

        // Next step heads back into the arena
        let before = pos;
        step_item(&mut pos, 150.0, &mut dir, DT, ARENA);
        assert!(pos.x - before.x < 0.0);
    }

    #[test]
    fn test_item_bounces_off_floor() {
        let theta = PI / 3.0;
        let mut pos = Vec2::new(400.0, ARENA_HEIGHT);
        let mut dir = theta;
        let bounce = step_item(&mut pos, 150.0, &mut dir, DT, ARENA);
        assert!(bounce.y && !bounce.x);
        assert!((dir + theta).abs() < 1e-5);
    }

    #[test]
    fn test_item_corner_bounce() {
        let theta = PI / 4.0;
        let mut pos = ARENA;
        let mut dir = theta;
        let bounce = step_item(&mut pos, 150.0, &mut dir, DT, ARENA);
        assert!(bounce.x && bounce.y);
        // π - θ then negated: -(3π/4)
        assert!((dir - (-3.0 * PI / 4.0)).abs() < 1e-5);
        assert!(pos.x <= ARENA_WIDTH && pos.y <= ARENA_HEIGHT);
    }

    #[test]
    fn test_particle_culled_below_margin() {
        let mut pos = Vec2::new(10.0, ARENA_HEIGHT + RAIN_CULL_MARGIN - 1.0);
        assert!(!step_particle(&mut pos, 420.0, DT, ARENA_HEIGHT, RAIN_CULL_MARGIN));
        let mut pos = Vec2::new(10.0, 100.0);
        assert!(step_particle(&mut pos, 420.0, DT, ARENA_HEIGHT, RAIN_CULL_MARGIN));
    }

    #[test]
    fn test_run_dispatches_by_rule() {
        let tuning = Tuning::default();
        let mut reg = Registry::new();
        let player = reg.create(
            EntityKind::Player,
            Vec2::new(400.0, 300.0),
            MotionRule::Player,
            Appearance::Criminal,
        );
        let item = reg.create(
            EntityKind::Powerup,
            Vec2::new(100.0, 100.0),
            MotionRule::Autonomous {
                speed: 120.0,
                direction: 0.0,
            },
            Appearance::Item(ItemKind::Mango),
        );
        let drop = reg.create(
            EntityKind::Particle,
            Vec2::new(50.0, ARENA_HEIGHT + RAIN_CULL_MARGIN),
            MotionRule::Falling { speed: 420.0 },
            Appearance::Raindrop,
        );

        let culled = run(&mut reg, Vec2::new(0.0, -1.0), &tuning, 0.5);

        assert_eq!(culled, vec![drop]);
        assert!(!reg.contains(drop));
        assert_eq!(reg.get(player).unwrap().pos, Vec2::new(400.0, 140.0));
        assert_eq!(reg.get(item).unwrap().pos, Vec2::new(160.0, 100.0));
    }
}
