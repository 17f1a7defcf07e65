//! Match detection - maximal same-color runs
//!
//! Scans rows, then columns, for maximal runs of >= 3 consecutive matchable
//! tokens. Obstructed tokens never join a run. Horizontal scans commit
//! first: a token consumed by a horizontal run breaks vertical runs at its
//! cell, the same way an obstructed token would.
//!
//! One call is a flat scan over one grid snapshot; the resolution loop
//! reaches a fixed point by calling it repeatedly, not by recursing here.

use std::collections::HashSet;

use crate::types::{
    CandyColor, Pos, SpecialKind, Token, COLOR_BOMB_RUN_LEN, STRIPED_RUN_LEN, WRAPPED_RUN_LEN,
};

use super::grid::Grid;

/// Axis of a detected run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

/// One maximal run found in a single grid snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRun {
    /// Cells of the run, ordered along the axis
    pub positions: Vec<Pos>,
    pub color: CandyColor,
    pub axis: Axis,
    /// Special kind the surviving token promotes to, if the run is long enough
    pub promotion: Option<SpecialKind>,
}

impl MatchRun {
    /// Cell where a promoted special lands (run midpoint)
    pub fn promotion_pos(&self) -> Pos {
        self.positions[self.positions.len() / 2]
    }
}

/// Map a run length to the special kind it promotes to
pub fn promotion_for(len: usize, axis: Axis) -> Option<SpecialKind> {
    if len >= COLOR_BOMB_RUN_LEN {
        Some(SpecialKind::ColorBomb)
    } else if len == WRAPPED_RUN_LEN {
        Some(SpecialKind::Wrapped)
    } else if len == STRIPED_RUN_LEN {
        Some(match axis {
            Axis::Row => SpecialKind::StripedRow,
            Axis::Col => SpecialKind::StripedCol,
        })
    } else {
        None
    }
}

/// Find every maximal run of >= 3 in one grid snapshot
pub fn find_matches(grid: &Grid) -> Vec<MatchRun> {
    let size = grid.size();
    let mut runs = Vec::new();
    let mut claimed: HashSet<u32> = HashSet::new();
    let mut line: Vec<Pos> = Vec::with_capacity(size);

    for row in 0..size {
        line.clear();
        line.extend((0..size).map(|col| Pos::new(row, col)));
        scan_line(grid, &line, Axis::Row, &mut claimed, &mut runs);
    }
    for col in 0..size {
        line.clear();
        line.extend((0..size).map(|row| Pos::new(row, col)));
        scan_line(grid, &line, Axis::Col, &mut claimed, &mut runs);
    }

    runs
}

/// Token at `pos` if it may join a run right now: present, not obstructed,
/// and not already consumed by an earlier run this pass
fn eligible(grid: &Grid, pos: Pos, claimed: &HashSet<u32>) -> Option<Token> {
    grid.token(pos)
        .filter(|t| t.matchable() && !claimed.contains(&t.id))
}

/// Collect maximal runs along one line of cells
fn scan_line(
    grid: &Grid,
    line: &[Pos],
    axis: Axis,
    claimed: &mut HashSet<u32>,
    out: &mut Vec<MatchRun>,
) {
    let mut i = 0;
    while i < line.len() {
        let Some(first) = eligible(grid, line[i], claimed) else {
            i += 1;
            continue;
        };

        let mut j = i + 1;
        while j < line.len() {
            match eligible(grid, line[j], claimed) {
                Some(t) if t.color == first.color => j += 1,
                _ => break,
            }
        }

        let len = j - i;
        if len >= 3 {
            let positions = line[i..j].to_vec();
            for pos in &positions {
                if let Some(t) = grid.token(*pos) {
                    claimed.insert(t.id);
                }
            }
            out.push(MatchRun {
                positions,
                color: first.color,
                axis,
                promotion: promotion_for(len, axis),
            });
        }
        i = j;
    }
}
