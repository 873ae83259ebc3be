//! Entity registry
//!
//! Owns every live simulation entity. Handles are never recycled within a
//! session, so a stale `EntityId` held by a timer simply stops resolving.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque entity handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Broad entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Powerup,
    Hazard,
    Particle,
}

/// Item class: the two populations the spawner keeps topped up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemClass {
    Powerup,
    Hazard,
}

impl ItemClass {
    pub fn entity_kind(self) -> EntityKind {
        match self {
            ItemClass::Powerup => EntityKind::Powerup,
            ItemClass::Hazard => EntityKind::Hazard,
        }
    }

    /// Items of this class the spawner may pick from
    pub fn catalog(self) -> &'static [ItemKind] {
        match self {
            ItemClass::Powerup => &[ItemKind::Mango, ItemKind::Flower, ItemKind::Broccoli],
            ItemClass::Hazard => &[ItemKind::Ice, ItemKind::Glass],
        }
    }
}

/// Concrete collectible/hazard type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Mango,
    Flower,
    Broccoli,
    Ice,
    Glass,
}

impl ItemKind {
    /// Signed energy change applied when the player touches this item
    pub fn energy_delta(self) -> f32 {
        match self {
            ItemKind::Mango => 20.0,
            ItemKind::Flower => 15.0,
            ItemKind::Broccoli => 25.0,
            ItemKind::Ice => -30.0,
            ItemKind::Glass => -20.0,
        }
    }

    pub fn class(self) -> ItemClass {
        match self {
            ItemKind::Mango | ItemKind::Flower | ItemKind::Broccoli => ItemClass::Powerup,
            ItemKind::Ice | ItemKind::Glass => ItemClass::Hazard,
        }
    }
}

/// Visual tag handed to the renderer; the simulation never reads it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Appearance {
    Criminal,
    Item(ItemKind),
    Raindrop,
}

/// How an entity moves each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionRule {
    /// Driven by the input vector at the fixed player speed, wraps at edges
    Player,
    /// Polar heading, bounces off edges
    Autonomous { speed: f32, direction: f32 },
    /// Straight down, culled below the arena
    Falling { speed: f32 },
}

/// A simulation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub motion: MotionRule,
    pub appearance: Appearance,
}

impl Entity {
    /// Item type, if this entity is a powerup or hazard
    pub fn item_kind(&self) -> Option<ItemKind> {
        match self.appearance {
            Appearance::Item(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Live entity counts per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub players: usize,
    pub powerups: usize,
    pub hazards: usize,
    pub particles: usize,
}

impl Census {
    pub fn items(&self, class: ItemClass) -> usize {
        match class {
            ItemClass::Powerup => self.powerups,
            ItemClass::Hazard => self.hazards,
        }
    }
}

/// Owner of all live entities (sorted by id for determinism)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    entities: BTreeMap<EntityId, Entity>,
    census: Census,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            census: Census::default(),
            next_id: 1,
        }
    }

    /// Create an entity and return its fresh handle
    pub fn create(
        &mut self,
        kind: EntityKind,
        pos: Vec2,
        motion: MotionRule,
        appearance: Appearance,
    ) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(
            id,
            Entity {
                id,
                kind,
                pos,
                motion,
                appearance,
            },
        );
        *self.count_slot(kind) += 1;
        id
    }

    /// Remove an entity. Destroying a stale handle is a no-op.
    ///
    /// Returns the removed entity so callers can report it.
    pub fn destroy(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        *self.count_slot(entity.kind) -= 1;
        Some(entity)
    }

    /// Remove every entity. Handles keep counting up afterwards.
    pub fn clear(&mut self) -> Vec<EntityId> {
        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        self.entities.clear();
        self.census = Census::default();
        ids
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Live entities in id order, optionally filtered by kind
    pub fn iter_live(&self, kind: Option<EntityKind>) -> impl Iterator<Item = &Entity> + '_ {
        self.entities
            .values()
            .filter(move |e| kind.is_none_or(|k| e.kind == k))
    }

    /// Mutable walk over live entities of one kind
    pub fn iter_live_mut(
        &mut self,
        kind: Option<EntityKind>,
    ) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities
            .values_mut()
            .filter(move |e| kind.is_none_or(|k| e.kind == k))
    }

    /// Ids of live entities at this instant.
    ///
    /// Use this when entities may be destroyed while walking: resolve each id
    /// with [`Registry::get`], which skips anything destroyed in the meantime.
    pub fn snapshot(&self, kind: Option<EntityKind>) -> Vec<EntityId> {
        self.iter_live(kind).map(|e| e.id).collect()
    }

    /// The player, if one is alive
    pub fn player(&self) -> Option<&Entity> {
        self.iter_live(Some(EntityKind::Player)).next()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Player => self.census.players,
            EntityKind::Powerup => self.census.powerups,
            EntityKind::Hazard => self.census.hazards,
            EntityKind::Particle => self.census.particles,
        }
    }

    pub fn census(&self) -> Census {
        self.census
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn count_slot(&mut self, kind: EntityKind) -> &mut usize {
        match kind {
            EntityKind::Player => &mut self.census.players,
            EntityKind::Powerup => &mut self.census.powerups,
            EntityKind::Hazard => &mut self.census.hazards,
            EntityKind::Particle => &mut self.census.particles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_hazard(reg: &mut Registry) -> EntityId {
        reg.create(
            EntityKind::Hazard,
            Vec2::new(100.0, 100.0),
            MotionRule::Autonomous {
                speed: 150.0,
                direction: 0.0,
            },
            Appearance::Item(ItemKind::Ice),
        )
    }

    #[test]
    fn test_create_and_count() {
        let mut reg = Registry::new();
        spawn_hazard(&mut reg);
        spawn_hazard(&mut reg);
        reg.create(
            EntityKind::Player,
            Vec2::ZERO,
            MotionRule::Player,
            Appearance::Criminal,
        );
        assert_eq!(reg.count(EntityKind::Hazard), 2);
        assert_eq!(reg.count(EntityKind::Player), 1);
        assert_eq!(reg.census().powerups, 0);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut reg = Registry::new();
        let id = spawn_hazard(&mut reg);
        assert!(reg.destroy(id).is_some());
        assert!(reg.destroy(id).is_none());
        assert_eq!(reg.count(EntityKind::Hazard), 0);
        assert!(reg.get(id).is_none());
    }

    #[test]
    fn test_ids_never_recycled() {
        let mut reg = Registry::new();
        let a = spawn_hazard(&mut reg);
        reg.destroy(a);
        let _ = reg.clear();
        let b = spawn_hazard(&mut reg);
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_snapshot_skips_destroyed_mid_walk() {
        let mut reg = Registry::new();
        let ids: Vec<_> = (0..4).map(|_| spawn_hazard(&mut reg)).collect();

        let mut visited = Vec::new();
        for id in reg.snapshot(Some(EntityKind::Hazard)) {
            let Some(entity) = reg.get(id) else {
                continue;
            };
            visited.push(entity.id);
            // Destroy the next one while walking
            if id == ids[1] {
                reg.destroy(ids[2]);
            }
        }
        assert_eq!(visited, vec![ids[0], ids[1], ids[3]]);
    }

    #[test]
    fn test_iter_live_filters_by_kind() {
        let mut reg = Registry::new();
        spawn_hazard(&mut reg);
        reg.create(
            EntityKind::Particle,
            Vec2::ZERO,
            MotionRule::Falling { speed: 10.0 },
            Appearance::Raindrop,
        );
        assert_eq!(reg.iter_live(Some(EntityKind::Particle)).count(), 1);
        assert_eq!(reg.iter_live(None).count(), 2);
        // Restartable
        assert_eq!(reg.iter_live(None).count(), 2);
    }

    #[test]
    fn test_catalog_matches_class() {
        for class in [ItemClass::Powerup, ItemClass::Hazard] {
            for kind in class.catalog() {
                assert_eq!(kind.class(), class);
                match class {
                    ItemClass::Powerup => assert!(kind.energy_delta() > 0.0),
                    ItemClass::Hazard => assert!(kind.energy_delta() < 0.0),
                }
            }
        }
    }
}
