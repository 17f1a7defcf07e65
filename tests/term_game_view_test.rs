use tui_crush::core::{GameSnapshot, GameState, SessionConfig};
use tui_crush::term::{AnchorY, FrameBuffer, GameView, Rgb, Viewport};
use tui_crush::types::Pos;

fn plain_session() -> GameState {
    // Zero obstacle rate keeps every cell a plain block glyph.
    let mut config = SessionConfig::with_seed(1);
    config.obstacle_percent = 0;
    let mut state = GameState::new_session(config);
    state.start();
    state
}

fn flatten(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = plain_session().snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 8*2 by 8*1 => 16x8
    // plus border => 18x10
    let vp = Viewport::new(18, 10);
    let fb = view.render(&snap, Pos::new(0, 0), vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(17, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 9).unwrap().ch, '└');
    assert_eq!(fb.get(17, 9).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_token_cell_as_two_chars_wide() {
    let snap = plain_session().snapshot();
    let view = GameView::default();
    let vp = Viewport::new(18, 10);
    let fb = view.render(&snap, Pos::new(0, 0), vp);

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    assert_eq!(fb.get(1, 1).unwrap().ch, '█');
    assert_eq!(fb.get(2, 1).unwrap().ch, '█');
}

#[test]
fn term_view_renders_empty_cells_as_dots() {
    let mut snap = GameSnapshot::default();
    snap.size = 8;
    snap.cells = vec![None; 64];

    let view = GameView::default();
    let fb = view.render(&snap, Pos::new(0, 0), Viewport::new(18, 10));

    assert_eq!(fb.get(1, 1).unwrap().ch, '·');
    assert_eq!(fb.get(16, 8).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let gs = plain_session();
    let mut snap = gs.snapshot();
    snap.score = 1234;
    snap.level = 2;

    let view = GameView::default();
    // Wider than the 18x10 board frame to allow a panel.
    let fb = view.render(&snap, Pos::new(0, 0), Viewport::new(60, 12));

    let all = flatten(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("MOVES"));
    assert!(all.contains("GOALS"));
    assert!(all.contains("1234"));

    // A narrow viewport drops the panel entirely.
    gs.snapshot_into(&mut snap);
    let fb = view.render(&snap, Pos::new(0, 0), Viewport::new(18, 12));
    assert!(!flatten(&fb).contains("SCORE"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = plain_session().snapshot();
    let view = GameView::default();

    // Board frame is 10 rows tall (8 + border).
    let vp = Viewport::new(18, 30);
    let fb = view.render(&snap, Pos::new(0, 0), vp);

    // start_y = (30 - 10) / 2 = 10 => top-left corner at (0,10).
    assert_eq!(fb.get(0, 10).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = plain_session().snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    let vp = Viewport::new(18, 30);
    let fb = view.render(&snap, Pos::new(0, 0), vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_tints_cursor_cell() {
    let snap = plain_session().snapshot();
    let view = GameView::default();
    let fb = view.render(&snap, Pos::new(3, 3), Viewport::new(18, 10));

    // Cursor cell (3,3) => px = 1 + 3*2 = 7, py = 1 + 3 = 4.
    assert_eq!(fb.get(7, 4).unwrap().style.bg, Rgb::new(60, 60, 95));
    // A neighboring cell keeps the board background.
    assert_eq!(fb.get(9, 4).unwrap().style.bg, Rgb::new(30, 30, 40));
}

#[test]
fn term_view_tints_selected_cell() {
    let mut gs = plain_session();
    gs.tap(Pos::new(2, 2));
    let snap = gs.snapshot();

    let view = GameView::default();
    let fb = view.render(&snap, Pos::new(0, 0), Viewport::new(18, 10));

    // Selection cell (2,2) => px = 1 + 2*2 = 5, py = 1 + 2 = 3.
    assert_eq!(fb.get(5, 3).unwrap().style.bg, Rgb::new(110, 90, 30));
}

#[test]
fn term_view_overlays_outcome_text() {
    let mut snap = plain_session().snapshot();
    snap.is_won = true;
    let view = GameView::default();
    let fb = view.render(&snap, Pos::new(0, 0), Viewport::new(18, 10));
    assert!(flatten(&fb).contains("YOU WIN"));

    snap.is_won = false;
    snap.is_lost = true;
    let fb = view.render(&snap, Pos::new(0, 0), Viewport::new(18, 10));
    assert!(flatten(&fb).contains("GAME OVER"));
}
