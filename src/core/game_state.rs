//! Game state module - owns the complete session state
//!
//! Ties together grid, token generation, match detection, special effects,
//! scoring, and objective bookkeeping, and drives the swap -> resolve ->
//! terminal lifecycle as an explicit step-driven state machine. Callers pace
//! cascades by calling `step`; the session holds no timers of its own.

use std::collections::HashSet;

use crate::core::{
    effects::effect_targets,
    matches::find_matches,
    scoring::{effect_clear_score, run_score},
    Grid, TokenGen,
};
use crate::types::*;

/// Session configuration consumed by `GameState::new_session`
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub grid_size: usize,
    pub palette_size: usize,
    pub initial_moves: u32,
    pub target_score: u32,
    /// Probability (in percent) that a generated token spawns obstructed
    pub obstacle_percent: u32,
    /// Win conditions; when empty, a single score objective at
    /// `target_score` is used
    pub objectives: Vec<Objective>,
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            palette_size: DEFAULT_PALETTE_SIZE,
            initial_moves: DEFAULT_MOVES,
            target_score: DEFAULT_TARGET_SCORE,
            obstacle_percent: DEFAULT_OBSTACLE_PERCENT,
            objectives: Vec::new(),
            seed: 1,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// Result of a tap on the selection surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Selected,
    Deselected,
    Swapped,
    Rejected(SwapError),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    gen: TokenGen,
    config: SessionConfig,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    phase: Phase,
    score: u32,
    moves_remaining: u32,
    level: u32,
    target_score: u32,
    objectives: Vec<Objective>,
    is_won: bool,
    is_lost: bool,
    /// Pending tap-selection origin
    selection: Option<Pos>,
    /// Passes resolved since the last committed move
    cascade_passes: u32,
    /// Score gained since the last committed move
    cascade_score: u32,
}

impl GameState {
    /// Create a new session from a config. The grid is filled with the
    /// no-initial-match constraint; the session starts in `Phase::Idle`.
    pub fn new_session(config: SessionConfig) -> Self {
        let grid_size = config.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        let mut gen = TokenGen::new(config.seed, config.palette_size, config.obstacle_percent);
        let mut grid = Grid::new(grid_size);
        Self::fill_initial(&mut grid, &mut gen);

        let mut objectives = if config.objectives.is_empty() {
            vec![Objective::score(config.target_score)]
        } else {
            config.objectives.clone()
        };
        for objective in &mut objectives {
            objective.current = 0;
        }

        Self {
            grid,
            gen,
            episode_id: 0,
            phase: Phase::Idle,
            score: 0,
            moves_remaining: config.initial_moves,
            level: 1,
            target_score: config.target_score,
            objectives,
            is_won: false,
            is_lost: false,
            selection: None,
            cascade_passes: 0,
            cascade_score: 0,
            config,
        }
    }

    /// Place a token at every cell, regenerating (up to the retry limit) any
    /// candidate that would complete a run of >= 3 with already-placed
    /// neighbors. The last candidate is accepted as-is.
    fn fill_initial(grid: &mut Grid, gen: &mut TokenGen) {
        for row in 0..grid.size() {
            for col in 0..grid.size() {
                let pos = Pos::new(row, col);
                let mut token = gen.generate();
                let mut attempts = 1;
                while attempts < FILL_RETRY_LIMIT && grid.completes_run(pos, token.color) {
                    token = gen.generate();
                    attempts += 1;
                }
                grid.set(pos, Some(token));
            }
        }
    }

    /// Open the session for input. Also catches a born-dead grid: with no
    /// legal move available the session goes terminal immediately.
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.finish_resolution();
    }

    /// Replace the session wholesale: fresh grid, reset score, moves, and
    /// objectives. The generator is reseeded so consecutive games differ.
    pub fn restart(&mut self) {
        let mut config = self.config.clone();
        config.seed = self.gen.reseed();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new_session(config);
        self.episode_id = next_episode;
        self.start();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_resolving(&self) -> bool {
        self.phase == Phase::Resolving
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    pub fn is_won(&self) -> bool {
        self.is_won
    }

    pub fn is_lost(&self) -> bool {
        self.is_lost
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn selection(&self) -> Option<Pos> {
        self.selection
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.config.seed
    }

    pub fn cascade_passes(&self) -> u32 {
        self.cascade_passes
    }

    pub fn cascade_score(&self) -> u32 {
        self.cascade_score
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    #[cfg(test)]
    pub fn set_moves(&mut self, moves: u32) {
        self.moves_remaining = moves;
    }

    pub fn snapshot_into(&self, out: &mut crate::core::snapshot::GameSnapshot) {
        out.write_grid(&self.grid);
        out.score = self.score;
        out.moves_remaining = self.moves_remaining;
        out.level = self.level;
        out.target_score = self.target_score;
        out.objectives.clone_from(&self.objectives);
        out.phase = self.phase;
        out.is_won = self.is_won;
        out.is_lost = self.is_lost;
        out.selection = self.selection;
        out.episode_id = self.episode_id;
        out.seed = self.config.seed;
        out.cascade_passes = self.cascade_passes;
        out.cascade_score = self.cascade_score;
    }

    pub fn snapshot(&self) -> crate::core::snapshot::GameSnapshot {
        let mut s = crate::core::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Handle one tap on the selection surface: select an origin, deselect
    /// it, or resolve into a swap request when the second tap is adjacent.
    /// A non-adjacent second tap clears the selection.
    pub fn tap(&mut self, pos: Pos) -> TapOutcome {
        match self.phase {
            Phase::Resolving => return TapOutcome::Rejected(SwapError::Resolving),
            Phase::Idle | Phase::Terminal => {
                return TapOutcome::Rejected(SwapError::NotPlayable)
            }
            Phase::AwaitingInput => {}
        }
        if !self.grid.contains(pos) {
            return TapOutcome::Rejected(SwapError::OutOfBounds);
        }

        match self.selection {
            None => {
                self.selection = Some(pos);
                TapOutcome::Selected
            }
            Some(origin) if origin == pos => {
                self.selection = None;
                TapOutcome::Deselected
            }
            Some(origin) if origin.is_adjacent(pos) => match self.request_swap(origin, pos) {
                Ok(()) => TapOutcome::Swapped,
                Err(err) => {
                    self.selection = None;
                    TapOutcome::Rejected(err)
                }
            },
            Some(_) => {
                self.selection = None;
                TapOutcome::Deselected
            }
        }
    }

    /// Request a swap of two adjacent positions.
    ///
    /// A plain swap commits only if it forms at least one match; otherwise
    /// it is reverted and rejected. If either token is special the request
    /// is a trigger instead: effects execute in place and the tokens are
    /// not exchanged. Committed requests consume one move and enter the
    /// resolution loop; the caller drives it with `step`.
    pub fn request_swap(&mut self, a: Pos, b: Pos) -> Result<(), SwapError> {
        match self.phase {
            Phase::Resolving => return Err(SwapError::Resolving),
            Phase::Idle | Phase::Terminal => return Err(SwapError::NotPlayable),
            Phase::AwaitingInput => {}
        }
        if !self.grid.contains(a) || !self.grid.contains(b) {
            return Err(SwapError::OutOfBounds);
        }
        if !a.is_adjacent(b) {
            return Err(SwapError::NotAdjacent);
        }
        // Stable grids are always full; an empty cell rejects like a
        // match-less swap.
        let (Some(token_a), Some(token_b)) = (self.grid.token(a), self.grid.token(b)) else {
            return Err(SwapError::NoMatch);
        };

        if token_a.special.is_some() || token_b.special.is_some() {
            self.commit_move();
            self.trigger_specials(a, token_a, b, token_b);
            return Ok(());
        }

        self.grid.swap(a, b);
        if find_matches(&self.grid).is_empty() {
            self.grid.swap(a, b);
            return Err(SwapError::NoMatch);
        }

        self.commit_move();
        Ok(())
    }

    /// Book-keeping shared by both committed paths: one move spent, the
    /// selection dropped, cascade counters rearmed, resolution entered.
    fn commit_move(&mut self) {
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        self.selection = None;
        self.cascade_passes = 0;
        self.cascade_score = 0;
        self.phase = Phase::Resolving;
    }

    /// Execute the area effects of one or both special tokens against the
    /// current grid, in one non-recursive clear pass, then backfill.
    fn trigger_specials(&mut self, a: Pos, token_a: Token, b: Pos, token_b: Token) {
        let mut targets: HashSet<Pos> = HashSet::new();
        if let Some(kind) = token_a.special {
            targets.extend(effect_targets(&self.grid, a, kind, token_a.color));
        }
        if let Some(kind) = token_b.special {
            targets.extend(effect_targets(&self.grid, b, kind, token_b.color));
        }

        // Clearing the union is idempotent, so overlapping regions and
        // either execution order give the same result.
        let mut removed = 0usize;
        for pos in targets {
            match self.grid.token(pos) {
                Some(token) if token.obstacle.is_none() => {
                    self.credit_color(token.color);
                    self.grid.set(pos, None);
                    removed += 1;
                }
                // Obstructed tokens absorb the effect as one point of
                // obstacle damage instead of being removed.
                Some(_) => self.damage_obstacle(pos),
                None => {}
            }
        }

        let gained = effect_clear_score(removed);
        self.score = self.score.saturating_add(gained);
        self.cascade_score = self.cascade_score.saturating_add(gained);
        self.sync_score_objective();
        self.apply_gravity();
    }

    /// Advance one resolution pass. Returns true when the pass removed
    /// tokens; a stable session is left unchanged.
    pub fn step(&mut self) -> bool {
        if self.phase != Phase::Resolving {
            return false;
        }

        let runs = find_matches(&self.grid);
        if runs.is_empty() {
            self.finish_resolution();
            return false;
        }

        // Score first: every run member counts, including the promoted
        // survivor.
        let mut gained = 0u32;
        for run in &runs {
            gained = gained.saturating_add(run_score(run.positions.len()));
        }
        self.score = self.score.saturating_add(gained);
        self.cascade_score = self.cascade_score.saturating_add(gained);

        // Promote survivors before removal so their cells are skipped.
        let mut survivors: HashSet<Pos> = HashSet::new();
        for run in &runs {
            if let Some(kind) = run.promotion {
                let pos = run.promotion_pos();
                if let Some(mut token) = self.grid.token(pos) {
                    token.special = Some(kind);
                    self.grid.set(pos, Some(token));
                }
                survivors.insert(pos);
            }
        }

        // Remove matched tokens. Specials caught in a run are removed
        // inert; only a swap trigger fires their effect.
        let mut matched: Vec<Pos> = Vec::new();
        for run in &runs {
            for &pos in &run.positions {
                matched.push(pos);
                if survivors.contains(&pos) {
                    continue;
                }
                if let Some(token) = self.grid.token(pos) {
                    self.credit_color(token.color);
                    self.grid.set(pos, None);
                }
            }
        }

        // Each matched cell deals one point of damage to every adjacent
        // obstacle; a cell flanked by several matched cells is hit once per
        // neighbor.
        for &pos in &matched {
            for neighbor in self.grid.neighbors(pos) {
                self.damage_obstacle(neighbor);
            }
        }

        self.sync_score_objective();
        self.apply_gravity();
        self.cascade_passes += 1;
        true
    }

    /// Drain the resolution loop in one call, up to `max_passes`. Returns
    /// the number of passes that removed tokens.
    pub fn run_to_stable(&mut self, max_passes: usize) -> usize {
        let mut passes = 0;
        while self.is_resolving() && passes < max_passes {
            if !self.step() {
                break;
            }
            passes += 1;
        }
        // Let a final no-match step settle the phase if the loop is done.
        if self.is_resolving() && find_matches(&self.grid).is_empty() {
            self.step();
        }
        passes
    }

    /// Decrement the obstacle at `pos` by one, if any. A destroyed obstacle
    /// falls off the token; the token itself survives and becomes matchable.
    fn damage_obstacle(&mut self, pos: Pos) {
        let Some(mut token) = self.grid.token(pos) else {
            return;
        };
        let Some(mut obstacle) = token.obstacle else {
            return;
        };

        obstacle.health = obstacle.health.saturating_sub(1);
        if obstacle.health == 0 {
            token.obstacle = None;
            if obstacle.kind == ObstacleKind::Blocker {
                self.credit_blocker();
            }
        } else {
            token.obstacle = Some(obstacle);
        }
        self.grid.set(pos, Some(token));
    }

    /// Compact columns and refill the vacated cells bottom-up with fresh
    /// tokens. Refill runs without the no-initial-match constraint: new
    /// matches are intentional and drive the cascade.
    fn apply_gravity(&mut self) {
        if self.grid.collapse_columns() == 0 {
            return;
        }
        let size = self.grid.size();
        for col in 0..size {
            for row in (0..size).rev() {
                let pos = Pos::new(row, col);
                if self.grid.get(pos) == Some(None) {
                    let token = self.gen.generate();
                    self.grid.set(pos, Some(token));
                }
            }
        }
    }

    /// Stable point reached: settle the session phase. Objectives all met
    /// wins outright; otherwise running out of moves or of legal swaps ends
    /// the session, and the grid stays live if neither holds.
    fn finish_resolution(&mut self) {
        if self.objectives.iter().all(Objective::is_met) {
            self.phase = Phase::Terminal;
            self.is_won = true;
            return;
        }
        if self.moves_remaining == 0 || !self.has_legal_moves() {
            self.phase = Phase::Terminal;
            self.is_lost = true;
            return;
        }
        self.phase = Phase::AwaitingInput;
    }

    /// Exhaustive adjacent-swap lookahead on a scratch copy of the grid:
    /// true if any horizontal or vertical swap would produce a match.
    pub fn has_legal_moves(&self) -> bool {
        let size = self.grid.size();
        let mut probe = self.grid.clone();
        for row in 0..size {
            for col in 0..size {
                let pos = Pos::new(row, col);
                if col + 1 < size && Self::trial_swap(&mut probe, pos, Pos::new(row, col + 1)) {
                    return true;
                }
                if row + 1 < size && Self::trial_swap(&mut probe, pos, Pos::new(row + 1, col)) {
                    return true;
                }
            }
        }
        false
    }

    /// Swap, scan, swap back; the probe grid is unchanged on return
    fn trial_swap(probe: &mut Grid, a: Pos, b: Pos) -> bool {
        probe.swap(a, b);
        let found = !find_matches(probe).is_empty();
        probe.swap(a, b);
        found
    }

    /// The score objective mirrors the running score; it is resynchronized,
    /// never incremented independently.
    fn sync_score_objective(&mut self) {
        for objective in &mut self.objectives {
            if objective.kind == ObjectiveKind::Score {
                objective.current = self.score;
            }
        }
    }

    fn credit_color(&mut self, color: CandyColor) {
        for objective in &mut self.objectives {
            if objective.kind == ObjectiveKind::CollectColor
                && objective.color_filter == Some(color)
            {
                objective.current += 1;
            }
        }
    }

    fn credit_blocker(&mut self) {
        for objective in &mut self.objectives {
            if objective.kind == ObjectiveKind::ClearBlockers {
                objective.current += 1;
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_session(SessionConfig::default())
    }
}
