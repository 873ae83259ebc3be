//! Player vs item overlap detection
//!
//! Overlap is a plain circle test. The tracker turns the per-tick overlap
//! set into "entered" edges so a continuous overlap fires only once.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind, Registry};

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Whether two circles overlap (touching counts). Symmetric in its arguments.
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    sd_circle(a, b, ra + rb) <= 0.0
}

/// Remembers which items overlapped the player on the previous tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlapTracker {
    touching: BTreeSet<EntityId>,
}

impl OverlapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's overlap set; returns the ids that just started
    /// overlapping, in ascending order.
    pub fn update(&mut self, current: BTreeSet<EntityId>) -> Vec<EntityId> {
        let entered = current.difference(&self.touching).copied().collect();
        self.touching = current;
        entered
    }

    /// Forget an item (it was destroyed)
    pub fn forget(&mut self, id: EntityId) {
        self.touching.remove(&id);
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }

    pub fn is_touching(&self, id: EntityId) -> bool {
        self.touching.contains(&id)
    }
}

/// All live items currently overlapping the player
pub fn overlapping_items(
    registry: &Registry,
    player_radius: f32,
    item_radius: f32,
) -> BTreeSet<EntityId> {
    let Some(player) = registry.player() else {
        return BTreeSet::new();
    };
    registry
        .iter_live(None)
        .filter(|e| matches!(e.kind, EntityKind::Powerup | EntityKind::Hazard))
        .filter(|e| circles_overlap(player.pos, player_radius, e.pos, item_radius))
        .map(|e| e.id)
        .collect()
}
