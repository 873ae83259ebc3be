//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod economy;
pub mod entity;
pub mod events;
pub mod movement;
pub mod scene;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{OverlapTracker, circles_overlap};
pub use economy::{EnergyOutcome, apply_energy_delta, decay_energy, lose_life};
pub use entity::{
    Appearance, Census, Entity, EntityId, EntityKind, ItemClass, ItemKind, MotionRule, Registry,
};
pub use events::{GameEvent, Hud};
pub use scene::SceneMachine;
pub use spawn::SpawnManager;
pub use state::{GameState, Scene};
pub use tick::{Session, TickInput};
pub use timers::{Interval, TimerAction, TimerQueue};
