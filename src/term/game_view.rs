//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::term::fb::{FrameBuffer, GlyphStyle, Rgb};
use crate::types::{CandyColor, ObstacleKind, Pos, SpecialKind, Token};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the match grid.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Pos,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(GlyphStyle::default().into_glyph(' '));

        let size = snap.size as u16;
        let grid_px_w = size * self.cell_w;
        let grid_px_h = size * self.cell_h;
        let frame_w = grid_px_w + 2;
        let frame_h = grid_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let board_bg = Rgb::new(30, 30, 40);
        let border = GlyphStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        // Background for the play area.
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            grid_px_w,
            grid_px_h,
            ' ',
            GlyphStyle {
                fg: Rgb::new(80, 80, 90),
                bg: board_bg,
                bold: false,
                dim: false,
            },
        );

        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Grid cells. The cursor and the pending selection tint the cell
        // background so they stay visible under any token.
        for row in 0..snap.size {
            for col in 0..snap.size {
                let pos = Pos::new(row, col);
                let bg = if snap.selection == Some(pos) {
                    Rgb::new(110, 90, 30)
                } else if cursor == pos {
                    Rgb::new(60, 60, 95)
                } else {
                    board_bg
                };
                match snap.token_at(pos) {
                    Some(token) => self.draw_token_cell(fb, start_x, start_y, pos, token, bg),
                    None => self.draw_empty_cell(fb, start_x, start_y, pos, bg),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.is_won {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "YOU WIN");
        } else if snap.is_lost {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, cursor: Pos, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: GlyphStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, pos: Pos, bg: Rgb) {
        let style = GlyphStyle {
            fg: Rgb::new(90, 90, 100),
            bg,
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, start_x, start_y, pos, '·', style);
    }

    fn draw_token_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: Pos,
        token: Token,
        bg: Rgb,
    ) {
        let (ch, fg, bold, dim) = token_face(token);
        let style = GlyphStyle { fg, bg, bold, dim };
        self.fill_cell_rect(fb, start_x, start_y, pos, ch, style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: Pos,
        ch: char,
        style: GlyphStyle,
    ) {
        let px = start_x + 1 + (pos.col as u16) * self.cell_w;
        let py = start_y + 1 + (pos.row as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = GlyphStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = GlyphStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let dim = GlyphStyle { dim: true, ..value };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        let w = fb.put_u32(panel_x, y, snap.score, value);
        if panel_w >= w + 8 {
            fb.put_char(panel_x + w, y, '/', dim);
            fb.put_u32(panel_x + w + 1, y, snap.target_score, dim);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves_remaining, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GOALS", label);
        y = y.saturating_add(1);
        for objective in &snap.objectives {
            if y >= viewport.height {
                break;
            }
            let style = if objective.is_met() {
                GlyphStyle { bold: true, ..value }
            } else {
                value
            };
            let w = fb.put_u32(panel_x, y, objective.current.min(objective.target), style);
            fb.put_char(panel_x + w, y, '/', style);
            fb.put_u32(panel_x + w + 1, y, objective.target, style);
            y = y.saturating_add(1);
            if panel_w >= 16 {
                fb.put_str(panel_x + 1, y, &objective.description, dim);
                y = y.saturating_add(1);
            }
        }

        // Cascade echo while the board resolves.
        if snap.cascade_passes > 0 {
            y = y.saturating_add(1);
            fb.put_str(panel_x, y, "CHAIN", label);
            y = y.saturating_add(1);
            fb.put_char(panel_x, y, 'x', value);
            let w = fb.put_u32(panel_x + 1, y, snap.cascade_passes, value);
            fb.put_char(panel_x + w + 2, y, '+', dim);
            fb.put_u32(panel_x + w + 3, y, snap.cascade_score, dim);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = GlyphStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Pick the glyph and color a token renders with. Obstacles mask the token;
/// specials keep the token's color but get a distinct shape.
fn token_face(token: Token) -> (char, Rgb, bool, bool) {
    if let Some(obstacle) = token.obstacle {
        return match obstacle.kind {
            ObstacleKind::Ice => {
                // Thick frost thins out as it takes damage.
                let ch = if obstacle.health >= 2 { '▒' } else { '░' };
                (ch, Rgb::new(170, 215, 240), false, false)
            }
            ObstacleKind::Locked => ('#', color_rgb(token.color), false, true),
            ObstacleKind::Blocker => ('█', Rgb::new(95, 95, 105), false, false),
        };
    }
    match token.special {
        Some(SpecialKind::StripedRow) => ('═', color_rgb(token.color), true, false),
        Some(SpecialKind::StripedCol) => ('║', color_rgb(token.color), true, false),
        Some(SpecialKind::Wrapped) => ('◆', color_rgb(token.color), true, false),
        Some(SpecialKind::ColorBomb) => ('●', color_rgb(token.color), true, false),
        None => ('█', color_rgb(token.color), false, false),
    }
}

fn color_rgb(color: CandyColor) -> Rgb {
    match color {
        CandyColor::Red => Rgb::new(220, 80, 80),
        CandyColor::Orange => Rgb::new(255, 165, 0),
        CandyColor::Yellow => Rgb::new(240, 220, 80),
        CandyColor::Green => Rgb::new(100, 220, 120),
        CandyColor::Blue => Rgb::new(80, 120, 220),
        CandyColor::Purple => Rgb::new(200, 120, 220),
    }
}

trait IntoGlyph {
    fn into_glyph(self, ch: char) -> crate::term::fb::Glyph;
}

impl IntoGlyph for GlyphStyle {
    fn into_glyph(self, ch: char) -> crate::term::fb::Glyph {
        crate::term::fb::Glyph { ch, style: self }
    }
}
