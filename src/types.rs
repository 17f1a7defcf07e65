//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Grid sizing. The side length is per-session; these bound the accepted range.
pub const DEFAULT_GRID_SIZE: usize = 8;
pub const MIN_GRID_SIZE: usize = 4;
pub const MAX_GRID_SIZE: usize = 16;

/// Session defaults
pub const DEFAULT_MOVES: u32 = 30;
pub const DEFAULT_TARGET_SCORE: u32 = 10_000;
pub const DEFAULT_OBSTACLE_PERCENT: u32 = 10;
pub const DEFAULT_PALETTE_SIZE: usize = 6;
pub const MIN_PALETTE_SIZE: usize = 3;

/// Initial fill rejects candidates that complete a run, up to this many
/// attempts per cell; the last candidate is accepted as-is.
pub const FILL_RETRY_LIMIT: u32 = 10;

/// Match scoring: a run of length L scores L * MATCH_BASE * (L - 2).
pub const MATCH_BASE_SCORE: u32 = 100;
/// Tokens cleared by a special effect score a flat amount each.
pub const EFFECT_CLEAR_SCORE: u32 = 100;

/// Run lengths that promote the surviving token
pub const STRIPED_RUN_LEN: usize = 4;
pub const WRAPPED_RUN_LEN: usize = 5;
pub const COLOR_BOMB_RUN_LEN: usize = 6;

/// UI timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
/// Pause between resolution passes so cascades stay readable.
pub const STEP_DELAY_MS: u32 = 150;
/// Held-key cursor repeat timing.
pub const KEY_REPEAT_DELAY_MS: u32 = 170;
pub const KEY_REPEAT_INTERVAL_MS: u32 = 60;

/// Token colors (fixed palette of 6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandyColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl CandyColor {
    pub const ALL: [CandyColor; 6] = [
        CandyColor::Red,
        CandyColor::Orange,
        CandyColor::Yellow,
        CandyColor::Green,
        CandyColor::Blue,
        CandyColor::Purple,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            CandyColor::Red => "red",
            CandyColor::Orange => "orange",
            CandyColor::Yellow => "yellow",
            CandyColor::Green => "green",
            CandyColor::Blue => "blue",
            CandyColor::Purple => "purple",
        }
    }
}

/// Special token kinds created by runs of length >= 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKind {
    StripedRow,
    StripedCol,
    Wrapped,
    ColorBomb,
}

/// Obstacle kinds that block match participation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Locked,
    Ice,
    Blocker,
}

impl ObstacleKind {
    /// Starting health when the obstacle spawns
    pub fn initial_health(&self) -> u8 {
        match self {
            ObstacleKind::Locked => 1,
            ObstacleKind::Blocker => 1,
            ObstacleKind::Ice => 2,
        }
    }
}

/// Obstacle attached to a token; absent on normal tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub health: u8,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind) -> Self {
        Self {
            kind,
            health: kind.initial_health(),
        }
    }
}

/// A token occupying one grid cell. Position is implied by the cell that
/// holds it; the id stays stable while the token moves under gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub id: u32,
    pub color: CandyColor,
    pub special: Option<SpecialKind>,
    pub obstacle: Option<Obstacle>,
}

impl Token {
    /// Obstructed tokens never count toward a new run
    pub fn matchable(&self) -> bool {
        self.obstacle.is_none()
    }
}

/// Cell on the grid (None = empty, Some = occupied)
pub type Cell = Option<Token>;

/// Grid coordinate, row-major, (0, 0) at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 4-directional adjacency: Manhattan distance exactly 1
    pub fn is_adjacent(&self, other: Pos) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr + dc == 1
    }
}

/// Session phase driven by `GameState::step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingInput,
    Resolving,
    Terminal,
}

/// Objective kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveKind {
    Score,
    ClearBlockers,
    CollectColor,
}

/// A win condition tracked across the session. Mutated only by the
/// post-resolution bookkeeping step.
#[derive(Debug, PartialEq, Eq)]
pub struct Objective {
    pub kind: ObjectiveKind,
    pub target: u32,
    pub current: u32,
    pub color_filter: Option<CandyColor>,
    pub description: String,
}

// Hand-written so `clone_from` reuses the description buffer. The
// per-frame snapshot copy relies on that staying allocation-free.
impl Clone for Objective {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            target: self.target,
            current: self.current,
            color_filter: self.color_filter,
            description: self.description.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.kind = source.kind;
        self.target = source.target;
        self.current = source.current;
        self.color_filter = source.color_filter;
        self.description.clone_from(&source.description);
    }
}

impl Objective {
    pub fn score(target: u32) -> Self {
        Self {
            kind: ObjectiveKind::Score,
            target,
            current: 0,
            color_filter: None,
            description: format!("Score {} points", target),
        }
    }

    pub fn clear_blockers(target: u32) -> Self {
        Self {
            kind: ObjectiveKind::ClearBlockers,
            target,
            current: 0,
            color_filter: None,
            description: format!("Clear {} blockers", target),
        }
    }

    pub fn collect_color(color: CandyColor, target: u32) -> Self {
        Self {
            kind: ObjectiveKind::CollectColor,
            target,
            current: 0,
            color_filter: Some(color),
            description: format!("Collect {} {} candies", target, color.as_str()),
        }
    }

    pub fn is_met(&self) -> bool {
        self.current >= self.target
    }
}

/// Why a swap request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    OutOfBounds,
    NotAdjacent,
    NoMatch,
    Resolving,
    NotPlayable,
}

impl SwapError {
    pub fn code(self) -> &'static str {
        match self {
            SwapError::OutOfBounds | SwapError::NotAdjacent | SwapError::NoMatch => "invalid_swap",
            SwapError::Resolving => "resolving",
            SwapError::NotPlayable => "not_playable",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SwapError::OutOfBounds => "position out of bounds",
            SwapError::NotAdjacent => "positions are not adjacent",
            SwapError::NoMatch => "swap forms no match",
            SwapError::Resolving => "resolution in progress",
            SwapError::NotPlayable => "game is not accepting moves",
        }
    }
}

/// UI actions produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Tap,
    Restart,
}
