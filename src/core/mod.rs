//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI, networking, or I/O.

pub mod effects;
pub mod game_state;
pub mod grid;
pub mod matches;
pub mod rng;
pub mod scoring;
pub mod snapshot;

// Re-export commonly used types
pub use game_state::{GameState, SessionConfig, TapOutcome};
pub use grid::Grid;
pub use matches::{find_matches, Axis, MatchRun};
pub use rng::TokenGen;
pub use snapshot::GameSnapshot;
