//! Periodic intervals and deferred actions on the simulation clock
//!
//! Timers hold entity handles, never references. Firing a timer whose
//! entity is gone resolves to nothing and the action is dropped.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// Slack when comparing accumulated time against a period
const PERIOD_EPSILON: f64 = 1e-6;

/// Fixed-period accumulator (decay, maintenance, rain cadence)
///
/// Time is summed in `f64` so a run of `SIM_DT` steps lands on the period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    period: f32,
    accumulator: f64,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulator: 0.0,
        }
    }

    /// Add elapsed time, returning how many periods completed
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.period <= 0.0 {
            return 0;
        }
        let period = f64::from(self.period);
        self.accumulator += f64::from(dt);
        let mut fired = 0;
        while self.accumulator + PERIOD_EPSILON >= period {
            self.accumulator -= period;
            fired += 1;
        }
        fired
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}

/// Something to do later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Pick a new random heading for an autonomous item
    Wander(EntityId),
}

impl TimerAction {
    /// Entity the action targets
    pub fn target(&self) -> EntityId {
        match *self {
            TimerAction::Wander(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Timer {
    due: f64,
    seq: u64,
    action: TimerAction,
}

/// Pending deferred actions ordered by due time, then schedule order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    /// Monotonic simulation clock (seconds)
    now: f64,
    timers: Vec<Timer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `action` to fire `delay` seconds from now
    pub fn schedule(&mut self, delay: f32, action: TimerAction) {
        let timer = Timer {
            due: self.now + f64::from(delay.max(0.0)),
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;
        let at = self
            .timers
            .partition_point(|t| (t.due, t.seq) <= (timer.due, timer.seq));
        self.timers.insert(at, timer);
    }

    /// Advance the clock and hand back every action that came due, in order
    pub fn advance(&mut self, dt: f32) -> Vec<TimerAction> {
        self.now += f64::from(dt);
        let due = self.timers.partition_point(|t| t.due <= self.now);
        self.timers.drain(..due).map(|t| t.action).collect()
    }

    /// Drop every pending timer (scene exit)
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_fires_once_per_period() {
        let mut interval = Interval::new(1.0);
        let mut fired = 0;
        for _ in 0..120 {
            fired += interval.advance(1.0 / 60.0);
        }
        assert_eq!(fired, 2);

        let mut interval = Interval::new(1.0);
        let fired: u32 = (0..60).map(|_| interval.advance(1.0 / 60.0)).sum();
        assert_eq!(fired, 1);

        let mut interval = Interval::new(0.1);
        let fired: u32 = (0..60).map(|_| interval.advance(1.0 / 60.0)).sum();
        assert_eq!(fired, 10);

        let mut interval = Interval::new(1.0);
        assert_eq!(interval.advance(0.5), 0);
        assert_eq!(interval.advance(0.5), 1);
        assert_eq!(interval.advance(2.25), 2);
        interval.reset();
        assert_eq!(interval.advance(0.9), 0);
    }

    #[test]
    fn test_queue_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(2.0, TimerAction::Wander(EntityId(2)));
        queue.schedule(1.0, TimerAction::Wander(EntityId(1)));
        queue.schedule(2.0, TimerAction::Wander(EntityId(3)));

        assert!(queue.advance(0.5).is_empty());
        assert_eq!(queue.advance(0.5), vec![TimerAction::Wander(EntityId(1))]);
        assert_eq!(
            queue.advance(1.0),
            vec![
                TimerAction::Wander(EntityId(2)),
                TimerAction::Wander(EntityId(3))
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = TimerQueue::new();
        queue.schedule(0.1, TimerAction::Wander(EntityId(7)));
        queue.cancel_all();
        assert!(queue.advance(1.0).is_empty());
        assert!(queue.now() > 0.0);
    }
}
