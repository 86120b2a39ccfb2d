//! [`DirectionGate`] – hysteresis on committed directions.
//!
//! Sensor jitter near a zone boundary would otherwise make the guidance flap
//! between, say, "straight" and "left" every frame.  The gate only commits a
//! new direction after it has been proposed on `threshold` consecutive ticks.
//!
//! # Example
//!
//! ```rust
//! use wayfinder_runtime::gate::DirectionGate;
//! use wayfinder_types::Direction;
//!
//! let mut gate = DirectionGate::new(2);
//!
//! // Nothing committed yet: the first proposal is taken as-is.
//! assert_eq!(gate.offer(Direction::Straight), Direction::Straight);
//!
//! assert_eq!(gate.offer(Direction::Left), Direction::Straight);
//! assert_eq!(gate.offer(Direction::Left), Direction::Left); // second in a row
//! ```

use wayfinder_types::Direction;

/// Commits a proposed [`Direction`] only once it has persisted.
#[derive(Debug, Clone)]
pub struct DirectionGate {
    /// Consecutive proposals needed before a change is committed.
    threshold: u32,
    committed: Direction,
    /// The change currently being counted, if any.
    pending: Option<Direction>,
    counter: u32,
}

impl DirectionGate {
    /// Create a gate.  A `threshold` of 1 commits every change immediately.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            committed: Direction::None,
            pending: None,
            counter: 0,
        }
    }

    /// The currently committed direction.
    pub fn committed(&self) -> Direction {
        self.committed
    }

    /// Consecutive ticks the pending change has been proposed.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Propose `candidate` for this tick and return the committed direction.
    ///
    /// With nothing committed yet the candidate is accepted outright.
    pub fn offer(&mut self, candidate: Direction) -> Direction {
        if self.committed == Direction::None {
            return self.force(candidate);
        }

        if candidate == self.committed {
            self.pending = None;
            self.counter = 0;
            return self.committed;
        }

        if self.pending == Some(candidate) {
            self.counter += 1;
        } else {
            self.pending = Some(candidate);
            self.counter = 1;
        }

        if self.counter >= self.threshold {
            self.force(candidate)
        } else {
            self.committed
        }
    }

    /// Commit `direction` immediately, bypassing the hysteresis count.
    pub fn force(&mut self, direction: Direction) -> Direction {
        self.committed = direction;
        self.pending = None;
        self.counter = 0;
        self.committed
    }

    /// Forget the committed direction and any pending change.
    pub fn reset(&mut self) {
        self.committed = Direction::None;
        self.pending = None;
        self.counter = 0;
    }
}
