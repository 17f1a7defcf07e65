//! TUI Crush: a terminal match-3 game.
//!
//! The crate splits into a deterministic, I/O-free `core` (grid, match
//! detection, special effects, session state), a small `input` layer that maps
//! key events to game actions and handles key repeat, and a `term` renderer
//! that draws snapshots into a framebuffer and flushes diffs to the terminal.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
