//! # Rendering Module
//!
//! Textual formatting of boards and player stats.
//!
//! Nothing here prints: every function returns a `String` and leaves the
//! terminal to the surrounding application.

pub mod display;

pub use display::*;
