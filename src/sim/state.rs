//! Game state and core simulation types
//!
//! The active scene is tracked by [`super::scene::SceneMachine`]. Energy and
//! lives are private: every write goes through a clamping setter so an
//! out-of-range value is never observable.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Which scene is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scene {
    /// Title card, waiting for a key press or tap
    #[default]
    Intro,
    /// Active gameplay
    Main,
    /// Run ended, waiting for restart
    GameOver,
}

impl Scene {
    /// Scene name handed to the engine's scene switch
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Intro => "intro",
            Scene::Main => "main",
            Scene::GameOver => "gameover",
        }
    }
}

/// Session-wide state read by the HUD
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    energy: f32,
    lives: u8,
    max_energy: f32,
    max_lives: u8,
}

impl GameState {
    /// Fresh state with full energy and lives
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            time_ticks: 0,
            energy: tuning.max_energy,
            lives: tuning.start_lives,
            max_energy: tuning.max_energy,
            max_lives: tuning.start_lives,
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn max_energy(&self) -> f32 {
        self.max_energy
    }

    pub fn max_lives(&self) -> u8 {
        self.max_lives
    }

    /// Energy as a 0..=1 fraction for a proportional bar
    pub fn energy_fraction(&self) -> f32 {
        self.energy / self.max_energy
    }

    /// Set energy, clamped to `[0, max_energy]`
    pub fn set_energy(&mut self, energy: f32) {
        self.energy = if energy.is_nan() {
            0.0
        } else {
            energy.clamp(0.0, self.max_energy)
        };
    }

    /// Decrement lives if any remain. Returns whether a life was taken.
    pub fn take_life(&mut self) -> bool {
        if self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        true
    }

    /// Full energy and lives, as on every entry to the main scene
    pub fn reset_vitals(&mut self) {
        self.energy = self.max_energy;
        self.lives = self.max_lives;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(42, &Tuning::default());
        assert_eq!(state.energy(), 100.0);
        assert_eq!(state.lives(), 3);
        assert_eq!(state.energy_fraction(), 1.0);
    }

    #[test]
    fn test_set_energy_clamps() {
        let mut state = GameState::new(1, &Tuning::default());
        state.set_energy(250.0);
        assert_eq!(state.energy(), 100.0);
        state.set_energy(-40.0);
        assert_eq!(state.energy(), 0.0);
        state.set_energy(f32::NAN);
        assert_eq!(state.energy(), 0.0);
    }

    #[test]
    fn test_take_life_never_underflows() {
        let mut state = GameState::new(1, &Tuning::default());
        assert!(state.take_life());
        assert!(state.take_life());
        assert!(state.take_life());
        assert!(!state.take_life());
        assert_eq!(state.lives(), 0);
        state.reset_vitals();
        assert_eq!(state.lives(), 3);
    }

    #[test]
    fn test_scene_names() {
        assert_eq!(Scene::Main.name(), "main");
        assert_eq!(Scene::GameOver.name(), "gameover");
    }
}
