//! # Game Module
//!
//! Core board, item, and session types for the engine.
//!
//! This module contains the fundamental building blocks of Tatami:
//! - Board storage and the movement resolution algorithm
//! - Items and their capability model
//! - Inventories for carrying entities
//! - Actuator behavior sources for NPCs
//! - The session object coordinating levels and turns

pub mod actuators;
pub mod board;
pub mod inventory;
pub mod items;
pub mod session;

pub use actuators::*;
pub use board::*;
pub use inventory::*;
pub use items::*;
pub use session::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a 2D coordinate on a board.
///
/// `x` is the column and `y` the row; rows grow downward so that `y == 0` is
/// the top row of a rendered board. Coordinates are signed so movement
/// arithmetic can leave the board before the bounds check rejects it.
///
/// # Examples
///
/// ```
/// use tatami::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// The eight movement directions.
///
/// This is a closed set: level-authoring code refers to these variants by
/// name. `Dr`/`Dl` prefixes read "diagonal right" and "diagonal left".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    DrUp,
    DrDown,
    DlUp,
    DlDown,
}

impl Direction {
    /// Converts a direction to a unit position delta.
    ///
    /// Diagonals move one cell on *each* axis; a diagonal step of `n` covers
    /// `n` cells per axis (Chebyshev movement, no normalization).
    ///
    /// # Examples
    ///
    /// ```
    /// use tatami::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
    /// assert_eq!(Direction::DrDown.to_delta(), Position::new(1, 1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
            Direction::DrUp => Position::new(1, -1),
            Direction::DrDown => Position::new(1, 1),
            Direction::DlUp => Position::new(-1, -1),
            Direction::DlDown => Position::new(-1, 1),
        }
    }

    /// Returns all 8 directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::DrUp,
            Direction::DrDown,
            Direction::DlUp,
            Direction::DlDown,
        ]
    }

    /// Returns only the 4 cardinal directions.
    pub fn cardinal() -> Vec<Direction> {
        vec![
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

/// Permission levels gating who may trigger an actionnable item.
///
/// A closed set, like [`Direction`]: existing level definitions reference
/// these by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    PlayerAuthorized,
    NpcAuthorized,
    AllPlayableAuthorized,
}

impl Permission {
    /// Whether an entity with the given role may trigger the guarded item.
    ///
    /// # Examples
    ///
    /// ```
    /// use tatami::{Permission, Role};
    ///
    /// assert!(Permission::PlayerAuthorized.allows(Role::Player));
    /// assert!(!Permission::PlayerAuthorized.allows(Role::Npc));
    /// assert!(Permission::AllPlayableAuthorized.allows(Role::Npc));
    /// ```
    pub fn allows(self, role: Role) -> bool {
        match (self, role) {
            (Permission::AllPlayableAuthorized, _) => true,
            (Permission::PlayerAuthorized, Role::Player) => true,
            (Permission::NpcAuthorized, Role::Npc) => true,
            _ => false,
        }
    }
}

/// Unique identifier for board items.
pub type ItemId = Uuid;

/// Creates a new unique item ID.
pub fn new_item_id() -> ItemId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
    }

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
        assert_eq!(Direction::Down.to_delta(), Position::new(0, 1));
        assert_eq!(Direction::Left.to_delta(), Position::new(-1, 0));
        assert_eq!(Direction::Right.to_delta(), Position::new(1, 0));
        assert_eq!(Direction::DrUp.to_delta(), Position::new(1, -1));
        assert_eq!(Direction::DlDown.to_delta(), Position::new(-1, 1));
    }

    #[test]
    fn test_direction_sets() {
        assert_eq!(Direction::all().len(), 8);
        assert_eq!(Direction::cardinal().len(), 4);
        assert!(!Direction::cardinal().contains(&Direction::DrUp));
    }

    #[test]
    fn test_permission_allows() {
        assert!(Permission::PlayerAuthorized.allows(Role::Player));
        assert!(!Permission::PlayerAuthorized.allows(Role::Npc));
        assert!(Permission::NpcAuthorized.allows(Role::Npc));
        assert!(!Permission::NpcAuthorized.allows(Role::Player));
        assert!(Permission::AllPlayableAuthorized.allows(Role::Player));
        assert!(Permission::AllPlayableAuthorized.allows(Role::Npc));
    }

    #[test]
    fn test_item_id_uniqueness() {
        let id1 = new_item_id();
        let id2 = new_item_id();
        assert_ne!(id1, id2);
    }
}
