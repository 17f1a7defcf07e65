//! Special-effect targeting
//!
//! Pure target computation for triggered specials. Each function returns the
//! occupied cells an effect clears on the current grid; executing the clear
//! (damage rules, scoring, gravity) is the session's job. Effects never
//! chain: a special token caught inside another effect's region is simply a
//! target like any other token.

use crate::types::{CandyColor, Pos, SpecialKind};

use super::grid::Grid;

/// Occupied cells cleared by triggering `kind` from `pos`.
/// `color` is the triggering token's color (only color bombs use it).
pub fn effect_targets(grid: &Grid, pos: Pos, kind: SpecialKind, color: CandyColor) -> Vec<Pos> {
    match kind {
        SpecialKind::StripedRow => row_targets(grid, pos.row),
        SpecialKind::StripedCol => col_targets(grid, pos.col),
        SpecialKind::Wrapped => block_targets(grid, pos),
        SpecialKind::ColorBomb => color_targets(grid, color),
    }
}

/// Every occupied cell in one row
fn row_targets(grid: &Grid, row: usize) -> Vec<Pos> {
    (0..grid.size())
        .map(|col| Pos::new(row, col))
        .filter(|&p| grid.token(p).is_some())
        .collect()
}

/// Every occupied cell in one column
fn col_targets(grid: &Grid, col: usize) -> Vec<Pos> {
    (0..grid.size())
        .map(|row| Pos::new(row, col))
        .filter(|&p| grid.token(p).is_some())
        .collect()
}

/// The 3x3 block centered on `pos`, clipped to grid bounds
fn block_targets(grid: &Grid, pos: Pos) -> Vec<Pos> {
    let mut out = Vec::with_capacity(9);
    let row_min = pos.row.saturating_sub(1);
    let col_min = pos.col.saturating_sub(1);
    for row in row_min..=(pos.row + 1).min(grid.size() - 1) {
        for col in col_min..=(pos.col + 1).min(grid.size() - 1) {
            let p = Pos::new(row, col);
            if grid.token(p).is_some() {
                out.push(p);
            }
        }
    }
    out
}

/// Every cell holding a token of `color`, obstructed or not
fn color_targets(grid: &Grid, color: CandyColor) -> Vec<Pos> {
    let mut out = Vec::new();
    for row in 0..grid.size() {
        for col in 0..grid.size() {
            let p = Pos::new(row, col);
            if grid.token(p).map(|t| t.color) == Some(color) {
                out.push(p);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Obstacle, ObstacleKind};

    #[test]
    fn test_striped_row_targets_whole_row() {
        let grid = Grid::from_colors(&[
            "RGBY",
            "GBYR",
            "BYRG",
            "YRGB",
        ]);
        let targets = effect_targets(&grid, Pos::new(2, 1), SpecialKind::StripedRow, CandyColor::Yellow);
        assert_eq!(
            targets,
            vec![Pos::new(2, 0), Pos::new(2, 1), Pos::new(2, 2), Pos::new(2, 3)]
        );
    }

    #[test]
    fn test_striped_row_skips_empty_cells() {
        let grid = Grid::from_colors(&[
            "RGBY",
            "G.Y.",
            "BYRG",
            "YRGB",
        ]);
        let targets = effect_targets(&grid, Pos::new(1, 0), SpecialKind::StripedRow, CandyColor::Green);
        assert_eq!(targets, vec![Pos::new(1, 0), Pos::new(1, 2)]);
    }

    #[test]
    fn test_striped_col_targets_whole_column() {
        let grid = Grid::from_colors(&[
            "RGBY",
            "GBYR",
            "BYRG",
            "YRGB",
        ]);
        let targets = effect_targets(&grid, Pos::new(0, 3), SpecialKind::StripedCol, CandyColor::Yellow);
        assert_eq!(
            targets,
            vec![Pos::new(0, 3), Pos::new(1, 3), Pos::new(2, 3), Pos::new(3, 3)]
        );
    }

    #[test]
    fn test_wrapped_center_is_three_by_three() {
        let grid = Grid::from_colors(&[
            "RGBY",
            "GBYR",
            "BYRG",
            "YRGB",
        ]);
        let targets = effect_targets(&grid, Pos::new(1, 1), SpecialKind::Wrapped, CandyColor::Blue);
        assert_eq!(targets.len(), 9);
        assert!(targets.contains(&Pos::new(0, 0)));
        assert!(targets.contains(&Pos::new(2, 2)));
        assert!(!targets.contains(&Pos::new(3, 3)));
    }

    #[test]
    fn test_wrapped_clips_at_corner() {
        let grid = Grid::from_colors(&[
            "RGBY",
            "GBYR",
            "BYRG",
            "YRGB",
        ]);
        let targets = effect_targets(&grid, Pos::new(0, 0), SpecialKind::Wrapped, CandyColor::Red);
        assert_eq!(targets.len(), 4);

        let targets = effect_targets(&grid, Pos::new(3, 3), SpecialKind::Wrapped, CandyColor::Blue);
        assert_eq!(targets.len(), 4);
    }

    #[test]
    fn test_wrapped_clips_at_edge() {
        let grid = Grid::from_colors(&[
            "RGBY",
            "GBYR",
            "BYRG",
            "YRGB",
        ]);
        let targets = effect_targets(&grid, Pos::new(0, 2), SpecialKind::Wrapped, CandyColor::Blue);
        assert_eq!(targets.len(), 6);
    }

    #[test]
    fn test_color_bomb_collects_every_matching_token() {
        let grid = Grid::from_colors(&[
            "RGBR",
            "GRYB",
            "BYRG",
            "RRGB",
        ]);
        let targets = effect_targets(&grid, Pos::new(0, 0), SpecialKind::ColorBomb, CandyColor::Red);
        assert_eq!(targets.len(), 6);
        assert!(targets.contains(&Pos::new(0, 0)));
        assert!(targets.contains(&Pos::new(3, 1)));
    }

    #[test]
    fn test_color_bomb_includes_obstructed_tokens() {
        let mut grid = Grid::from_colors(&[
            "RGBY",
            "GRYB",
            "BYRG",
            "YRGB",
        ]);
        let mut t = grid.token(Pos::new(1, 1)).expect("expected token");
        t.obstacle = Some(Obstacle::new(ObstacleKind::Blocker));
        grid.set(Pos::new(1, 1), Some(t));

        let targets = effect_targets(&grid, Pos::new(0, 0), SpecialKind::ColorBomb, CandyColor::Red);
        assert!(targets.contains(&Pos::new(1, 1)));
    }

    #[test]
    fn test_color_bomb_on_unique_color() {
        let grid = Grid::from_colors(&[
            "PGBY",
            "GBYR",
            "BYRG",
            "YRGB",
        ]);
        let targets = effect_targets(&grid, Pos::new(0, 0), SpecialKind::ColorBomb, CandyColor::Purple);
        assert_eq!(targets, vec![Pos::new(0, 0)]);
    }
}
