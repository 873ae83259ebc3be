//! Spawn manager
//!
//! Keeps the powerup and hazard populations at their targets, sprinkles
//! rain, and re-rolls item headings when their wander timers fire.
//! All randomness comes from one seeded PCG stream.

use std::f32::consts::PI;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Appearance, EntityId, EntityKind, ItemClass, MotionRule, Registry};
use super::timers::{Interval, TimerAction, TimerQueue};
use crate::tuning::Tuning;

/// Arena edge an item enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

/// Population target for a class
pub fn target_for(class: ItemClass, tuning: &Tuning) -> usize {
    match class {
        ItemClass::Powerup => tuning.powerup_target,
        ItemClass::Hazard => tuning.hazard_target,
    }
}

/// Spawning state for one scene
#[derive(Debug, Clone)]
pub struct SpawnManager {
    rng: Pcg32,
    maintenance: Interval,
    rain: Interval,
    /// Replacement requests from consumed items, flushed once per tick
    replacements: Vec<ItemClass>,
}

impl SpawnManager {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            maintenance: Interval::new(tuning.maintenance_interval),
            rain: Interval::new(tuning.rain_interval),
            replacements: Vec::new(),
        }
    }

    /// Forget cadence and pending requests (scene entry/exit)
    pub fn reset(&mut self) {
        self.maintenance.reset();
        self.rain.reset();
        self.replacements.clear();
    }

    /// Queue one replacement of `class` for this tick's spawn stage
    pub fn request_replacement(&mut self, class: ItemClass) {
        self.replacements.push(class);
    }

    pub fn pending_replacements(&self) -> usize {
        self.replacements.len()
    }

    /// Pick a spawn point on a random edge, inset by the margin.
    ///
    /// Returns `None` if the arena is too small to honour the margin.
    pub fn spawn_position(&mut self, tuning: &Tuning) -> Option<Vec2> {
        let m = tuning.spawn_edge_margin;
        let (w, h) = (tuning.arena_width, tuning.arena_height);
        if w - m < m || h - m < m {
            return None;
        }

        let edge = Edge::ALL[self.rng.random_range(0..Edge::ALL.len())];
        let pos = match edge {
            Edge::Top => Vec2::new(self.rng.random_range(m..=w - m), m),
            Edge::Bottom => Vec2::new(self.rng.random_range(m..=w - m), h - m),
            Edge::Left => Vec2::new(m, self.rng.random_range(m..=h - m)),
            Edge::Right => Vec2::new(w - m, self.rng.random_range(m..=h - m)),
        };
        Some(pos)
    }

    /// Spawn one item of `class` with a random kind, heading and speed
    pub fn spawn_item(
        &mut self,
        class: ItemClass,
        registry: &mut Registry,
        timers: &mut TimerQueue,
        tuning: &Tuning,
    ) -> Option<EntityId> {
        let Some(pos) = self.spawn_position(tuning) else {
            log::warn!("No room to spawn {:?}, retrying next maintenance pass", class);
            return None;
        };

        let catalog = class.catalog();
        let kind = catalog[self.rng.random_range(0..catalog.len())];
        let direction = self.rng.random_range(-PI..=PI);
        let speed = self
            .rng
            .random_range(tuning.item_min_speed..=tuning.item_max_speed);

        let id = registry.create(
            class.entity_kind(),
            pos,
            MotionRule::Autonomous { speed, direction },
            Appearance::Item(kind),
        );
        self.schedule_wander(id, timers, tuning);
        log::debug!(
            "Spawned {:?} {:?} at ({:.0}, {:.0}) heading {:.2} speed {:.0}",
            kind,
            id,
            pos.x,
            pos.y,
            direction,
            speed
        );
        Some(id)
    }

    /// Spawn `class` items until the live count reaches its target
    pub fn top_up(
        &mut self,
        class: ItemClass,
        registry: &mut Registry,
        timers: &mut TimerQueue,
        tuning: &Tuning,
    ) -> Vec<EntityId> {
        let target = target_for(class, tuning);
        let mut spawned = Vec::new();
        while registry.count(class.entity_kind()) < target {
            match self.spawn_item(class, registry, timers, tuning) {
                Some(id) => spawned.push(id),
                None => break,
            }
        }
        spawned
    }

    /// Honour queued replacements, never pushing a class above its target
    pub fn flush_replacements(
        &mut self,
        registry: &mut Registry,
        timers: &mut TimerQueue,
        tuning: &Tuning,
    ) -> Vec<EntityId> {
        let mut spawned = Vec::new();
        for class in std::mem::take(&mut self.replacements) {
            if registry.count(class.entity_kind()) >= target_for(class, tuning) {
                continue;
            }
            spawned.extend(self.spawn_item(class, registry, timers, tuning));
        }
        spawned
    }

    /// Periodic maintenance pass: top up both classes once per interval
    pub fn maintain(
        &mut self,
        dt: f32,
        registry: &mut Registry,
        timers: &mut TimerQueue,
        tuning: &Tuning,
    ) -> Vec<EntityId> {
        let mut spawned = Vec::new();
        for _ in 0..self.maintenance.advance(dt) {
            for class in [ItemClass::Powerup, ItemClass::Hazard] {
                spawned.extend(self.top_up(class, registry, timers, tuning));
            }
        }
        spawned
    }

    /// Drop a burst of raindrops along the top edge each rain interval
    pub fn rain(&mut self, dt: f32, registry: &mut Registry, tuning: &Tuning) -> Vec<EntityId> {
        let mut spawned = Vec::new();
        for _ in 0..self.rain.advance(dt) {
            for _ in 0..tuning.rain_per_burst {
                let x = self.rng.random_range(0.0..=tuning.arena_width);
                let id = registry.create(
                    EntityKind::Particle,
                    Vec2::new(x, 0.0),
                    MotionRule::Falling {
                        speed: tuning.rain_fall_speed,
                    },
                    Appearance::Raindrop,
                );
                spawned.push(id);
            }
        }
        spawned
    }

    /// Re-roll the heading of a wandering item and re-arm its timer.
    ///
    /// A stale handle does nothing.
    pub fn wander(
        &mut self,
        id: EntityId,
        registry: &mut Registry,
        timers: &mut TimerQueue,
        tuning: &Tuning,
    ) {
        let new_heading = self.rng.random_range(-PI..=PI);
        let Some(entity) = registry.get_mut(id) else {
            return;
        };
        let MotionRule::Autonomous { direction, .. } = &mut entity.motion else {
            return;
        };
        *direction = new_heading;
        self.schedule_wander(id, timers, tuning);
    }

    fn schedule_wander(&mut self, id: EntityId, timers: &mut TimerQueue, tuning: &Tuning) {
        let delay = self
            .rng
            .random_range(tuning.wander_min_delay..=tuning.wander_max_delay);
        timers.schedule(delay, TimerAction::Wander(id));
    }
}
