//! Events the simulation hands to the engine and UI
//!
//! The core never draws, plays audio or switches engine scenes itself; it
//! reports what happened and the driver forwards it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Appearance, Census, EntityId, EntityKind, ItemKind};
use super::state::Scene;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Create a visual for a new entity
    Spawned {
        id: EntityId,
        kind: EntityKind,
        pos: Vec2,
        appearance: Appearance,
    },
    /// Remove the visual for an entity
    Despawned { id: EntityId },
    /// The player touched an item
    ItemCollected {
        id: EntityId,
        item: ItemKind,
        delta: f32,
    },
    EnergyChanged { energy: f32 },
    LivesChanged { lives: u8 },
    LifeLost { lives_left: u8 },
    SceneChanged { from: Scene, to: Scene },
    MusicStarted,
    MusicStopped,
    RainStarted,
}

/// What the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub scene: Scene,
    pub energy: f32,
    /// Energy as a 0..=1 fraction for the bar
    pub energy_fraction: f32,
    pub lives: u8,
    pub census: Census,
}
