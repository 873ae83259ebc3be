//! Energy economy and the life-loss procedure
//!
//! Energy hitting zero costs a life and refills the bar; it is a trigger,
//! not a running debt.

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// What an energy change led to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyOutcome {
    /// Energy stayed above zero
    Steady,
    /// Energy ran out, a life was taken and energy refilled
    LifeLost { lives_left: u8 },
}

impl EnergyOutcome {
    /// True when the life taken was the last one
    pub fn is_game_over(&self) -> bool {
        matches!(self, EnergyOutcome::LifeLost { lives_left: 0 })
    }
}

/// Take one life if any remain. Returns the lives left after the attempt.
pub fn lose_life(state: &mut GameState) -> u8 {
    if state.take_life() {
        log::info!("Life lost, {} remaining", state.lives());
    }
    state.lives()
}

/// Apply a signed energy change, clamped, and run life loss at zero
pub fn apply_energy_delta(state: &mut GameState, delta: f32) -> EnergyOutcome {
    state.set_energy(state.energy() + delta);
    if state.energy() > 0.0 {
        return EnergyOutcome::Steady;
    }

    let lives_left = lose_life(state);
    state.set_energy(state.max_energy());
    EnergyOutcome::LifeLost { lives_left }
}

/// Periodic drain
pub fn decay_energy(state: &mut GameState, amount: f32) -> EnergyOutcome {
    apply_energy_delta(state, -amount)
}
