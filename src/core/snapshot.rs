use crate::core::Grid;
use crate::types::{Cell, Objective, Phase, Pos, Token};

/// Flat copy of everything the presentation layer needs for one frame.
/// Filled in place via `GameState::snapshot_into` so a long-lived buffer
/// never reallocates once it has seen a full grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub size: usize,
    /// Row-major cells, `size * size` entries
    pub cells: Vec<Cell>,
    pub score: u32,
    pub moves_remaining: u32,
    pub level: u32,
    pub target_score: u32,
    pub objectives: Vec<Objective>,
    pub phase: Phase,
    pub is_won: bool,
    pub is_lost: bool,
    pub selection: Option<Pos>,
    pub episode_id: u32,
    pub seed: u32,
    pub cascade_passes: u32,
    pub cascade_score: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.size = 0;
        self.cells.clear();
        self.score = 0;
        self.moves_remaining = 0;
        self.level = 0;
        self.target_score = 0;
        self.objectives.clear();
        self.phase = Phase::Idle;
        self.is_won = false;
        self.is_lost = false;
        self.selection = None;
        self.episode_id = 0;
        self.seed = 0;
        self.cascade_passes = 0;
        self.cascade_score = 0;
    }

    pub fn write_grid(&mut self, grid: &Grid) {
        self.size = grid.size();
        self.cells.clear();
        self.cells.extend_from_slice(grid.cells());
    }

    pub fn token_at(&self, pos: Pos) -> Option<Token> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        self.cells.get(pos.row * self.size + pos.col).copied().flatten()
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::AwaitingInput
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            size: 0,
            cells: Vec::new(),
            score: 0,
            moves_remaining: 0,
            level: 0,
            target_score: 0,
            objectives: Vec::new(),
            phase: Phase::Idle,
            is_won: false,
            is_lost: false,
            selection: None,
            episode_id: 0,
            seed: 0,
            cascade_passes: 0,
            cascade_score: 0,
        };
        s.clear();
        s
    }
}
