//! Terminal match-3 runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout).

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_crush::core::{GameSnapshot, GameState, SessionConfig};
use tui_crush::input::{handle_key_event, should_quit, InputHandler};
use tui_crush::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_crush::types::{Pos, UiAction, STEP_DELAY_MS, TICK_MS};

fn main() -> Result<()> {
    // Optional first argument pins the session seed for reproducible boards.
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(clock_seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut game_state = GameState::new_session(SessionConfig::with_seed(seed));
    game_state.start();

    let view = GameView::default();
    let mut input_handler = InputHandler::new();

    // Reused across frames so the render loop stays allocation-free.
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut cursor = Pos::new(0, 0);
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut step_timer_ms: u32 = 0;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game_state.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, cursor, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }

                        if let Some(action) = input_handler.handle_key_press(key.code) {
                            apply_action(&mut game_state, &mut cursor, action);
                        }

                        if let Some(action) = handle_key_event(key) {
                            match action {
                                UiAction::CursorUp
                                | UiAction::CursorDown
                                | UiAction::CursorLeft
                                | UiAction::CursorRight => {
                                    // Cursor keys are handled by the input
                                    // handler above (with key repeat).
                                }
                                _ => apply_action(&mut game_state, &mut cursor, action),
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; the input handler repeats
                        // held cursor keys itself.
                    }
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for action in input_handler.update(TICK_MS) {
                apply_action(&mut game_state, &mut cursor, action);
            }

            // Cascades resolve one pass at a time so the player can follow them.
            if game_state.is_resolving() {
                step_timer_ms += TICK_MS;
                if step_timer_ms >= STEP_DELAY_MS {
                    step_timer_ms = 0;
                    game_state.step();
                }
            } else {
                step_timer_ms = 0;
            }
        }
    }
}

fn apply_action(game_state: &mut GameState, cursor: &mut Pos, action: UiAction) {
    let max = game_state.grid().size().saturating_sub(1);
    match action {
        UiAction::CursorUp => cursor.row = cursor.row.saturating_sub(1),
        UiAction::CursorDown => cursor.row = (cursor.row + 1).min(max),
        UiAction::CursorLeft => cursor.col = cursor.col.saturating_sub(1),
        UiAction::CursorRight => cursor.col = (cursor.col + 1).min(max),
        UiAction::Tap => {
            game_state.tap(*cursor);
        }
        UiAction::Restart => game_state.restart(),
    }
}
