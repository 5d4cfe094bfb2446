//! # Actuators Module
//!
//! Behavior sources for autonomous entities.
//!
//! An actuator answers one question, once per tick: which way next? The
//! session queries each NPC's actuator and feeds the answer straight into
//! movement resolution. Actuators own their state; nothing is shared between
//! entities.

use crate::game::Direction;
use log::warn;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fmt;

/// A source of movement directions for an autonomous entity.
pub trait Actuator: fmt::Debug + Send {
    /// Produces the next direction. Called once per tick per entity.
    fn next_move(&mut self) -> Direction;
}

/// Cycles through a fixed movement pattern.
///
/// # Examples
///
/// ```
/// use tatami::{Actuator, Direction, PatternActuator};
///
/// let mut actuator = PatternActuator::new(vec![Direction::Up, Direction::Right]);
/// assert_eq!(actuator.next_move(), Direction::Up);
/// assert_eq!(actuator.next_move(), Direction::Right);
/// assert_eq!(actuator.next_move(), Direction::Up);
/// ```
#[derive(Debug, Clone)]
pub struct PatternActuator {
    pattern: Vec<Direction>,
    index: usize,
}

impl PatternActuator {
    /// Creates an actuator cycling through `pattern`. An empty pattern is
    /// replaced by the 4 cardinal directions.
    pub fn new(pattern: Vec<Direction>) -> Self {
        let pattern = if pattern.is_empty() {
            warn!("empty movement pattern, substituting the cardinal directions");
            Direction::cardinal()
        } else {
            pattern
        };
        Self { pattern, index: 0 }
    }
}

impl Actuator for PatternActuator {
    fn next_move(&mut self) -> Direction {
        let direction = self.pattern[self.index];
        self.index = (self.index + 1) % self.pattern.len();
        direction
    }
}

/// Picks uniformly at random from a configured moveset.
#[derive(Debug)]
pub struct RandomActuator {
    moveset: Vec<Direction>,
    rng: StdRng,
}

impl RandomActuator {
    /// Creates an actuator over `moveset` with an entropy-seeded generator.
    /// An empty moveset is replaced by the 4 cardinal directions.
    pub fn new(moveset: Vec<Direction>) -> Self {
        Self::from_rng(moveset, StdRng::from_entropy())
    }

    /// Creates an actuator with a fixed seed, for reproducible runs.
    pub fn with_seed(moveset: Vec<Direction>, seed: u64) -> Self {
        Self::from_rng(moveset, StdRng::seed_from_u64(seed))
    }

    fn from_rng(moveset: Vec<Direction>, rng: StdRng) -> Self {
        let moveset = if moveset.is_empty() {
            warn!("empty moveset, substituting the cardinal directions");
            Direction::cardinal()
        } else {
            moveset
        };
        Self { moveset, rng }
    }
}

impl Actuator for RandomActuator {
    fn next_move(&mut self) -> Direction {
        self.moveset[self.rng.gen_range(0..self.moveset.len())]
    }
}
