//! Held-key cursor repeat for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::types::{UiAction, KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers cursor repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks the held cursor direction and emits repeats after a delay.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: Option<UiAction>,
    last_key_time: std::time::Instant,
    repeat_timer: u32,
    repeat_accumulator: u32,
    repeat_delay: u32,
    repeat_interval: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS)
    }

    pub fn with_config(repeat_delay: u32, repeat_interval: u32) -> Self {
        Self {
            held: None,
            last_key_time: std::time::Instant::now(),
            repeat_timer: 0,
            repeat_accumulator: 0,
            repeat_delay,
            repeat_interval: repeat_interval.max(1),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Handle a key press. Returns the action to apply immediately; repeats
    /// of a direction that is already held come from `update` instead.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<UiAction> {
        let direction = cursor_direction(code)?;
        self.last_key_time = std::time::Instant::now();
        if self.held == Some(direction) {
            return None;
        }
        self.held = Some(direction);
        self.repeat_timer = 0;
        self.repeat_accumulator = 0;
        Some(direction)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        let Some(direction) = cursor_direction(code) else {
            return;
        };
        if self.held == Some(direction) {
            self.held = None;
            self.repeat_timer = 0;
            self.repeat_accumulator = 0;
        }
    }

    /// Advance timers by `elapsed_ms` and collect the repeat actions due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<UiAction, 32> {
        let mut actions = ArrayVec::<UiAction, 32>::new();

        // Auto-release when terminal does not emit release events.
        let time_since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if time_since_last_key > self.key_release_timeout_ms && self.held.is_some() {
            self.held = None;
            self.repeat_timer = 0;
            self.repeat_accumulator = 0;
        }

        let Some(direction) = self.held else {
            self.repeat_timer = 0;
            self.repeat_accumulator = 0;
            return actions;
        };

        let prev_timer = self.repeat_timer;
        self.repeat_timer += elapsed_ms;

        if self.repeat_timer >= self.repeat_delay {
            let excess = if prev_timer < self.repeat_delay {
                self.repeat_timer - self.repeat_delay
            } else {
                elapsed_ms
            };
            self.repeat_accumulator += excess;

            while self.repeat_accumulator >= self.repeat_interval {
                let _ = actions.try_push(direction);
                self.repeat_accumulator -= self.repeat_interval;
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.held = None;
        self.last_key_time = std::time::Instant::now();
        self.repeat_timer = 0;
        self.repeat_accumulator = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn cursor_direction(code: KeyCode) -> Option<UiAction> {
    match code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(UiAction::CursorLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(UiAction::CursorRight)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(UiAction::CursorUp)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(UiAction::CursorDown)
        }
        _ => None,
    }
}
