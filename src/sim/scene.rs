//! Scene state machine
//!
//! Transitions are requested during a tick and applied at the end of it.
//! Only one request can be pending; anything else is ignored.

use serde::{Deserialize, Serialize};

use super::state::Scene;

/// Whether `from -> to` is a legal transition
pub fn is_legal(from: Scene, to: Scene) -> bool {
    matches!(
        (from, to),
        (Scene::Intro, Scene::Main) | (Scene::Main, Scene::GameOver) | (Scene::GameOver, Scene::Main)
    )
}

/// Tracks the active scene and at most one pending transition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneMachine {
    current: Scene,
    pending: Option<Scene>,
}

impl SceneMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Scene {
        self.current
    }

    pub fn pending(&self) -> Option<Scene> {
        self.pending
    }

    /// Ask to move to `to`. Returns false if the request was dropped
    /// (illegal, or another transition is already pending).
    pub fn request(&mut self, to: Scene) -> bool {
        if let Some(pending) = self.pending {
            log::debug!(
                "Ignoring {:?} -> {:?}: transition to {:?} already pending",
                self.current,
                to,
                pending
            );
            return false;
        }
        if !is_legal(self.current, to) {
            log::debug!("Ignoring illegal transition {:?} -> {:?}", self.current, to);
            return false;
        }
        self.pending = Some(to);
        true
    }

    /// Commit the pending transition, returning `(from, to)`
    pub fn commit(&mut self) -> Option<(Scene, Scene)> {
        let to = self.pending.take()?;
        let from = self.current;
        self.current = to;
        log::info!("Scene {} -> {}", from.name(), to.name());
        Some((from, to))
    }

    /// Scene a start signal (key press / tap) leads to, if any
    pub fn start_target(&self) -> Option<Scene> {
        match self.current {
            Scene::Intro | Scene::GameOver => Some(Scene::Main),
            Scene::Main => None,
        }
    }
}
