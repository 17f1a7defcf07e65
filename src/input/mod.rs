//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::UiAction`] and provides a
//! held-key repeat handler suitable for terminal environments (including
//! terminals without key-release events).

pub mod handler;
pub mod map;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
