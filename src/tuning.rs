//! Data-driven game balance
//!
//! Every gameplay number lives here so a driver can load overrides from JSON.
//! Missing fields fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,

    pub player_speed: f32,
    pub player_radius: f32,

    pub max_energy: f32,
    pub start_lives: u8,
    pub energy_decay: f32,
    pub energy_decay_interval: f32,

    pub powerup_target: usize,
    pub hazard_target: usize,
    pub maintenance_interval: f32,
    pub item_radius: f32,
    pub item_min_speed: f32,
    pub item_max_speed: f32,
    pub spawn_edge_margin: f32,
    pub wander_min_delay: f32,
    pub wander_max_delay: f32,

    pub rain_interval: f32,
    pub rain_per_burst: u32,
    pub rain_fall_speed: f32,
    pub rain_cull_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_radius: PLAYER_RADIUS,

            max_energy: MAX_ENERGY,
            start_lives: START_LIVES,
            energy_decay: ENERGY_DECAY,
            energy_decay_interval: ENERGY_DECAY_INTERVAL,

            powerup_target: POWERUP_TARGET,
            hazard_target: HAZARD_TARGET,
            maintenance_interval: MAINTENANCE_INTERVAL,
            item_radius: ITEM_RADIUS,
            item_min_speed: ITEM_MIN_SPEED,
            item_max_speed: ITEM_MAX_SPEED,
            spawn_edge_margin: SPAWN_EDGE_MARGIN,
            wander_min_delay: WANDER_MIN_DELAY,
            wander_max_delay: WANDER_MAX_DELAY,

            rain_interval: RAIN_INTERVAL,
            rain_per_burst: RAIN_PER_BURST,
            rain_fall_speed: RAIN_FALL_SPEED,
            rain_cull_margin: RAIN_CULL_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Arena size as a vector
    pub fn arena(&self) -> glam::Vec2 {
        glam::Vec2::new(self.arena_width, self.arena_height)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.arena_width > 0.0) {
            return invalid("arena_width", "must be positive");
        }
        if !(self.arena_height > 0.0) {
            return invalid("arena_height", "must be positive");
        }
        if !(self.max_energy > 0.0) {
            return invalid("max_energy", "must be positive");
        }
        if self.start_lives == 0 {
            return invalid("start_lives", "must be at least 1");
        }
        if self.energy_decay < 0.0 {
            return invalid("energy_decay", "must not be negative");
        }
        if !(self.energy_decay_interval > 0.0) {
            return invalid("energy_decay_interval", "must be positive");
        }
        if !(self.maintenance_interval > 0.0) {
            return invalid("maintenance_interval", "must be positive");
        }
        if !(self.rain_interval > 0.0) {
            return invalid("rain_interval", "must be positive");
        }
        if self.item_min_speed < 0.0 || self.item_min_speed > self.item_max_speed {
            return invalid("item_min_speed", "must be within [0, item_max_speed]");
        }
        if self.wander_min_delay <= 0.0 || self.wander_min_delay > self.wander_max_delay {
            return invalid("wander_min_delay", "must be within (0, wander_max_delay]");
        }
        if self.spawn_edge_margin < 0.0
            || self.spawn_edge_margin * 2.0 > self.arena_width.min(self.arena_height)
        {
            return invalid("spawn_edge_margin", "must fit inside the arena");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.arena_width, 800.0);
        assert_eq!(tuning.arena_height, 600.0);
        assert_eq!(tuning.player_speed, 320.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 200.0 }"#).unwrap();
        assert_eq!(tuning.player_speed, 200.0);
        assert_eq!(tuning.powerup_target, POWERUP_TARGET);
        assert_eq!(tuning.max_energy, MAX_ENERGY);
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let err = Tuning::from_json(r#"{ "item_min_speed": 300.0, "item_max_speed": 100.0 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "item_min_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_oversized_margin() {
        let err = Tuning::from_json(r#"{ "spawn_edge_margin": 400.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Tuning::load("/definitely/not/here/tuning.json");
        assert!(matches!(result, Err(TuningError::Io(_))));
    }
}
