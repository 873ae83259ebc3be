//! Input abstraction
//!
//! Keyboard and touch/drag both fold into one movement vector with each
//! component in [-1, 1]. Diagonals are left unnormalized on purpose: the
//! movement system expects raw per-axis input.

use glam::Vec2;

use crate::clamp_unit;
use crate::consts::{TOUCH_DEAD_ZONE, TOUCH_FULL_DEFLECTION};
use crate::sim::TickInput;

/// Arrow keys / WASD directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// An active drag gesture in screen units
#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    origin: Vec2,
    current: Vec2,
}

/// Accumulated raw input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Keyboard axis, latest press wins per axis
    keys: Vec2,
    drag: Option<Drag>,
    /// One-shot start signal, cleared by `take_tick_input`
    start: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down: point that axis in the key's direction
    pub fn key_down(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.keys.y = -1.0,
            Direction::Down => self.keys.y = 1.0,
            Direction::Left => self.keys.x = -1.0,
            Direction::Right => self.keys.x = 1.0,
        }
        self.start = true;
    }

    /// Key came up: clear the axis only if it still points that way
    pub fn key_up(&mut self, dir: Direction) {
        match dir {
            Direction::Up if self.keys.y < 0.0 => self.keys.y = 0.0,
            Direction::Down if self.keys.y > 0.0 => self.keys.y = 0.0,
            Direction::Left if self.keys.x < 0.0 => self.keys.x = 0.0,
            Direction::Right if self.keys.x > 0.0 => self.keys.x = 0.0,
            _ => {}
        }
    }

    /// Any non-directional key press (also starts the game)
    pub fn any_key(&mut self) {
        self.start = true;
    }

    pub fn touch_start(&mut self, at: Vec2) {
        self.drag = Some(Drag {
            origin: at,
            current: at,
        });
        self.start = true;
    }

    pub fn touch_move(&mut self, at: Vec2) {
        if let Some(drag) = &mut self.drag {
            drag.current = at;
        }
    }

    pub fn touch_end(&mut self) {
        self.drag = None;
    }

    /// Current movement vector. An active drag overrides the keyboard.
    pub fn movement(&self) -> Vec2 {
        match self.drag {
            Some(drag) => drag_vector(drag.current - drag.origin),
            None => self.keys,
        }
    }

    /// Build this tick's input and consume the start signal
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            movement: self.movement(),
            start: std::mem::take(&mut self.start),
        }
    }
}

/// Map a drag offset onto the unit box, with a small dead zone
pub fn drag_vector(offset: Vec2) -> Vec2 {
    if offset.length() < TOUCH_DEAD_ZONE {
        return Vec2::ZERO;
    }
    clamp_unit(offset / TOUCH_FULL_DEFLECTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_press_wins() {
        let mut input = InputState::new();
        input.key_down(Direction::Left);
        input.key_down(Direction::Right);
        assert_eq!(input.movement(), Vec2::new(1.0, 0.0));

        // Releasing the key that no longer owns the axis changes nothing
        input.key_up(Direction::Left);
        assert_eq!(input.movement(), Vec2::new(1.0, 0.0));
        input.key_up(Direction::Right);
        assert_eq!(input.movement(), Vec2::ZERO);
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let mut input = InputState::new();
        input.key_down(Direction::Up);
        input.key_down(Direction::Right);
        assert_eq!(input.movement(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_drag_overrides_keys() {
        let mut input = InputState::new();
        input.key_down(Direction::Left);
        input.touch_start(Vec2::new(100.0, 100.0));
        input.touch_move(Vec2::new(130.0, 400.0));
        assert_eq!(input.movement(), Vec2::new(0.5, 1.0));

        input.touch_end();
        assert_eq!(input.movement(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_drag_dead_zone() {
        assert_eq!(drag_vector(Vec2::new(3.0, 3.0)), Vec2::ZERO);
        assert_eq!(drag_vector(Vec2::new(-600.0, 0.0)), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_start_signal_is_one_shot() {
        let mut input = InputState::new();
        input.any_key();
        assert!(input.take_tick_input().start);
        assert!(!input.take_tick_input().start);

        input.touch_start(Vec2::ZERO);
        assert!(input.take_tick_input().start);
    }
}
