//! Fixed pipeline simulation tick
//!
//! Order within a tick is fixed: movement, then collision and energy, then
//! spawning and timers, then the scene transition. An item consumed this
//! tick is therefore never moved afterwards and never counted twice by the
//! maintenance pass.

use glam::Vec2;

use super::collision::{OverlapTracker, overlapping_items};
use super::economy::{EnergyOutcome, apply_energy_delta, decay_energy};
use super::entity::{Appearance, EntityId, EntityKind, ItemClass, MotionRule, Registry};
use super::events::{GameEvent, Hud};
use super::movement;
use super::scene::SceneMachine;
use super::spawn::SpawnManager;
use super::state::{GameState, Scene};
use super::timers::{Interval, TimerAction, TimerQueue};
use crate::clamp_unit;
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement vector, each component in [-1, 1]
    pub movement: Vec2,
    /// Start/restart signal (key press or tap)
    pub start: bool,
}

/// One play session: owns the registry, game state and every subsystem
#[derive(Debug, Clone)]
pub struct Session {
    tuning: Tuning,
    state: GameState,
    scenes: SceneMachine,
    registry: Registry,
    spawner: SpawnManager,
    timers: TimerQueue,
    overlaps: OverlapTracker,
    decay: Interval,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create a session sitting in the intro scene
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, &tuning),
            scenes: SceneMachine::new(),
            registry: Registry::new(),
            spawner: SpawnManager::new(seed, &tuning),
            timers: TimerQueue::new(),
            overlaps: OverlapTracker::new(),
            decay: Interval::new(tuning.energy_decay_interval),
            events: Vec::new(),
            tuning,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scenes.current()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            scene: self.scenes.current(),
            energy: self.state.energy(),
            energy_fraction: self.state.energy_fraction(),
            lives: self.state.lives(),
            census: self.registry.census(),
        }
    }

    /// Take everything that happened since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the session by one tick of `dt` seconds
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        self.state.time_ticks += 1;
        let steer = clamp_unit(input.movement);

        if input.start {
            if let Some(to) = self.scenes.start_target() {
                self.scenes.request(to);
            }
        }

        if self.scenes.current() == Scene::Main {
            // 1. Movement
            for id in movement::run(&mut self.registry, steer, &self.tuning, dt) {
                self.events.push(GameEvent::Despawned { id });
            }

            // 2. Collision and energy
            self.resolve_collisions();
            for _ in 0..self.decay.advance(dt) {
                if self.registry.player().is_none() {
                    break;
                }
                let outcome = decay_energy(&mut self.state, self.tuning.energy_decay);
                self.events.push(GameEvent::EnergyChanged {
                    energy: self.state.energy(),
                });
                self.handle_outcome(outcome);
            }

            // 3. Spawning, skipped once the scene is on its way out
            if self.scenes.pending().is_none() {
                let mut spawned =
                    self.spawner
                        .flush_replacements(&mut self.registry, &mut self.timers, &self.tuning);
                spawned.extend(self.spawner.maintain(
                    dt,
                    &mut self.registry,
                    &mut self.timers,
                    &self.tuning,
                ));
                spawned.extend(self.spawner.rain(dt, &mut self.registry, &self.tuning));
                self.report_spawned(&spawned);
            }
        }

        for action in self.timers.advance(dt) {
            match action {
                TimerAction::Wander(id) => {
                    self.spawner
                        .wander(id, &mut self.registry, &mut self.timers, &self.tuning);
                }
            }
        }

        // 4. Scene transition
        if let Some((from, to)) = self.scenes.commit() {
            self.exit_scene(from);
            self.events.push(GameEvent::SceneChanged { from, to });
            self.enter_scene(to);
        }
    }

    fn resolve_collisions(&mut self) {
        let touching = overlapping_items(
            &self.registry,
            self.tuning.player_radius,
            self.tuning.item_radius,
        );
        for id in self.overlaps.update(touching) {
            if self.registry.player().is_none() {
                break;
            }
            let Some(item) = self.registry.destroy(id) else {
                continue;
            };
            self.overlaps.forget(id);
            let Some(kind) = item.item_kind() else {
                continue;
            };

            let delta = kind.energy_delta();
            self.events.push(GameEvent::Despawned { id });
            self.events.push(GameEvent::ItemCollected {
                id,
                item: kind,
                delta,
            });
            self.spawner.request_replacement(kind.class());

            let outcome = apply_energy_delta(&mut self.state, delta);
            self.events.push(GameEvent::EnergyChanged {
                energy: self.state.energy(),
            });
            self.handle_outcome(outcome);
        }
    }

    fn handle_outcome(&mut self, outcome: EnergyOutcome) {
        let EnergyOutcome::LifeLost { lives_left } = outcome else {
            return;
        };
        self.events.push(GameEvent::LifeLost { lives_left });
        self.events.push(GameEvent::LivesChanged { lives: lives_left });

        if outcome.is_game_over() {
            self.destroy_player();
            self.scenes.request(Scene::GameOver);
        }
    }

    fn destroy_player(&mut self) {
        for id in self.registry.snapshot(Some(EntityKind::Player)) {
            if self.registry.destroy(id).is_some() {
                self.events.push(GameEvent::Despawned { id });
            }
        }
    }

    fn report_spawned(&mut self, ids: &[EntityId]) {
        for &id in ids {
            if let Some(e) = self.registry.get(id) {
                self.events.push(GameEvent::Spawned {
                    id,
                    kind: e.kind,
                    pos: e.pos,
                    appearance: e.appearance,
                });
            }
        }
    }

    /// Tear down everything the scene owned so the next one starts clean
    fn teardown(&mut self) {
        self.timers.cancel_all();
        self.overlaps.clear();
        self.spawner.reset();
        self.decay.reset();
        for id in self.registry.clear() {
            self.events.push(GameEvent::Despawned { id });
        }
    }

    fn exit_scene(&mut self, scene: Scene) {
        if scene == Scene::Main {
            self.events.push(GameEvent::MusicStopped);
            self.destroy_player();
        }
        self.teardown();
    }

    fn enter_scene(&mut self, scene: Scene) {
        if scene != Scene::Main {
            return;
        }

        self.state.reset_vitals();

        let center = self.tuning.arena() / 2.0;
        let player = self.registry.create(
            EntityKind::Player,
            center,
            MotionRule::Player,
            Appearance::Criminal,
        );
        let mut spawned = vec![player];
        for class in [ItemClass::Powerup, ItemClass::Hazard] {
            spawned.extend(
                self.spawner
                    .top_up(class, &mut self.registry, &mut self.timers, &self.tuning),
            );
        }
        self.report_spawned(&spawned);

        self.events.push(GameEvent::EnergyChanged {
            energy: self.state.energy(),
        });
        self.events.push(GameEvent::LivesChanged {
            lives: self.state.lives(),
        });
        self.events.push(GameEvent::MusicStarted);
        self.events.push(GameEvent::RainStarted);
    }
}
