//! # Tatami
//!
//! A 2D grid engine for turn-based games.
//!
//! ## Architecture Overview
//!
//! Tatami is a small, synchronous engine: a rectangular [`Board`] holds one
//! [`BoardItem`] per cell, movable entities walk across it under
//! collision/interaction rules, and a [`Game`] session tracks multiple boards
//! ("levels"), the player, and autonomous NPCs driven by pluggable
//! [`Actuator`] behavior sources.
//!
//! The heart of the crate is [`Board::move_item`]: given an entity, a
//! direction and a step count, it computes the target cell, classifies the
//! occupant, and applies exactly one outcome — walk onto it, pick it up,
//! trigger it, or stay put. Everything else (levels, NPC ticking, rendering
//! helpers) is orchestration around that state machine.
//!
//! ## Turn Model
//!
//! Everything is single-threaded and turn-based. The expected caller loop is:
//! read input, move the player, tick the NPCs, render. No operation suspends
//! or runs concurrently with another.

pub mod game;
pub mod rendering;

// Core module re-exports
pub use game::*;
pub use rendering::*;

// Explicit re-exports for commonly used types
pub use game::{
    Activable, Actuator, Board, BoardConfig, BoardItem, Character, Direction, Game, GameConfig,
    Inventory, ItemId, ItemKind, MoveOutcome, PatternActuator, Permission, PlayerStats, Position,
    RandomActuator, Role,
};

/// Core error type for the Tatami engine.
#[derive(thiserror::Error, Debug)]
pub enum TatamiError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Coordinate access or write beyond the board dimensions
    #[error("coordinates ({x},{y}) are outside the {width}x{height} board")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Wrong kind of value where another was required
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// Movement resolution invoked on something that cannot currently move
    #[error("'{0}' cannot move")]
    NotMovable(String),

    /// Operation referenced a level that is not registered
    #[error("invalid level: {0}")]
    InvalidLevel(String),

    /// Level change attempted with no player set
    #[error("no player is set on this game")]
    UndefinedPlayer,

    /// Random placement could not find an empty cell
    #[error("no empty cell available on board '{0}'")]
    NoSpaceAvailable(String),
}

/// Result type used throughout the Tatami codebase.
pub type TatamiResult<T> = Result<T, TatamiError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Default board width in cells
    pub const DEFAULT_BOARD_WIDTH: u32 = 10;

    /// Default board height in cells
    pub const DEFAULT_BOARD_HEIGHT: u32 = 10;

    /// Largest board dimension that renders comfortably in a terminal
    pub const MAX_COMFORTABLE_DIMENSION: u32 = 80;

    /// Default player starting health
    pub const DEFAULT_PLAYER_HEALTH: i64 = 100;

    /// Default movement speed for NPCs registered without one
    pub const DEFAULT_NPC_STEP: u32 = 1;

    /// Random placement attempts before falling back to a full scan
    pub const DEFAULT_PLACEMENT_RETRY_BUDGET: u32 = 64;

    /// Width of the player health bar in rendered stats
    pub const STAT_BAR_WIDTH: usize = 20;
}
