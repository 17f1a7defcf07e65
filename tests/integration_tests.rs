//! Integration tests for the session lifecycle through the public API

use tui_crush::core::{find_matches, GameState, SessionConfig};
use tui_crush::input::InputHandler;
use tui_crush::types::{Phase, Pos, SwapError, UiAction, DEFAULT_MOVES};

/// Walk adjacent pairs until a swap commits. Mirrors what a player does on a
/// fresh board: the first legal move wins.
fn commit_first_legal_swap(state: &mut GameState) -> (Pos, Pos) {
    let size = state.grid().size();
    for row in 0..size {
        for col in 0..size {
            let pos = Pos::new(row, col);
            if col + 1 < size {
                let right = Pos::new(row, col + 1);
                if state.request_swap(pos, right).is_ok() {
                    return (pos, right);
                }
            }
            if row + 1 < size {
                let down = Pos::new(row + 1, col);
                if state.request_swap(pos, down).is_ok() {
                    return (pos, down);
                }
            }
        }
    }
    panic!("no legal swap found on a grid that reported legal moves");
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new_session(SessionConfig::with_seed(12345));
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.score(), 0);
    assert_eq!(state.moves_remaining(), DEFAULT_MOVES);
    assert_eq!(state.episode_id(), 0);

    state.start();
    assert_eq!(state.phase(), Phase::AwaitingInput);

    // The board opens full, with every cell holding a token.
    let snap = state.snapshot();
    assert!(snap.playable());
    let size = state.grid().size();
    for row in 0..size {
        for col in 0..size {
            assert!(snap.token_at(Pos::new(row, col)).is_some());
        }
    }
}

#[test]
fn test_rejected_swap_leaves_state_unchanged() {
    let mut state = GameState::new_session(SessionConfig::with_seed(42));
    state.start();
    let before = state.snapshot();

    let err = state
        .request_swap(Pos::new(0, 0), Pos::new(0, 2))
        .unwrap_err();
    assert_eq!(err, SwapError::NotAdjacent);

    let err = state
        .request_swap(Pos::new(0, 0), Pos::new(0, 8))
        .unwrap_err();
    assert_eq!(err, SwapError::OutOfBounds);

    assert_eq!(state.snapshot(), before);
    assert_eq!(state.moves_remaining(), DEFAULT_MOVES);
}

#[test]
fn test_first_legal_swap_resolves_and_scores() {
    let mut state = GameState::new_session(SessionConfig::with_seed(12345));
    state.start();
    assert!(state.has_legal_moves());

    commit_first_legal_swap(&mut state);
    assert!(state.is_resolving());
    assert_eq!(state.moves_remaining(), DEFAULT_MOVES - 1);

    let passes = state.run_to_stable(100);
    assert!(passes >= 1);
    assert!(state.score() >= 300);
    assert_eq!(state.phase(), Phase::AwaitingInput);
    // Stable means no runs left on the board.
    assert!(find_matches(state.grid()).is_empty());
}

#[test]
fn test_cascade_accumulates_score() {
    // This seed's first legal swap chains across several passes.
    let mut state = GameState::new_session(SessionConfig::with_seed(20_240_101));
    state.start();

    commit_first_legal_swap(&mut state);
    let passes = state.run_to_stable(100);

    assert!(passes >= 1);
    assert_eq!(state.cascade_passes() as usize, passes);
    assert!(state.cascade_score() >= 300);
    assert_eq!(state.score(), state.cascade_score());
}

#[test]
fn test_same_seed_same_playthrough() {
    let mut a = GameState::new_session(SessionConfig::with_seed(777));
    let mut b = GameState::new_session(SessionConfig::with_seed(777));
    a.start();
    b.start();
    assert_eq!(a.snapshot(), b.snapshot());

    let swap_a = commit_first_legal_swap(&mut a);
    let swap_b = commit_first_legal_swap(&mut b);
    assert_eq!(swap_a, swap_b);

    a.run_to_stable(100);
    b.run_to_stable(100);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_restart_starts_fresh_episode() {
    let mut state = GameState::new_session(SessionConfig::with_seed(20_240_101));
    state.start();

    commit_first_legal_swap(&mut state);
    state.run_to_stable(100);
    assert!(state.score() > 0);

    state.restart();
    assert_eq!(state.episode_id(), 1);
    assert_eq!(state.score(), 0);
    assert_eq!(state.moves_remaining(), DEFAULT_MOVES);
    assert_eq!(state.phase(), Phase::AwaitingInput);
    assert_ne!(state.seed(), 20_240_101);
}

#[test]
fn test_tap_flow_via_public_api() {
    let mut state = GameState::new_session(SessionConfig::with_seed(7));
    state.start();

    state.tap(Pos::new(0, 0));
    assert_eq!(state.selection(), Some(Pos::new(0, 0)));
    assert_eq!(state.snapshot().selection, Some(Pos::new(0, 0)));

    state.tap(Pos::new(0, 0));
    assert_eq!(state.selection(), None);
}

#[test]
fn test_input_handler_integration() {
    use crossterm::event::KeyCode;

    // Long release timeout so a slow test runner cannot auto-release the key.
    let mut input = InputHandler::new().with_key_release_timeout_ms(10_000);

    // The initial press moves immediately.
    assert_eq!(
        input.handle_key_press(KeyCode::Right),
        Some(UiAction::CursorRight)
    );

    // First update: 166ms (repeat delay not yet reached).
    let actions = input.update(166);
    assert!(actions.is_empty(), "repeat should not fire at 166ms");

    // 100ms more crosses the 170ms delay: one interval of excess.
    let actions = input.update(100);
    assert!(!actions.is_empty(), "repeat should fire after the delay");
    assert_eq!(actions[0], UiAction::CursorRight);

    // Another 100ms accumulates enough for two repeats.
    let actions = input.update(100);
    assert!(actions.len() >= 2, "repeat should keep firing while held");

    // Release stops the stream.
    input.handle_key_release(KeyCode::Right);
    assert!(input.update(200).is_empty());
}
