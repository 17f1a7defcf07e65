//! Grid module - manages the match-3 board
//!
//! The grid is a size x size board using flat row-major storage, where each
//! cell is empty or holds one token. Coordinates: (row, col) with row 0 at
//! the top; gravity pulls tokens toward the highest row index.

use arrayvec::ArrayVec;

use crate::types::{CandyColor, Cell, Pos, Token};

/// The game grid - square board with flat storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Side length; cells.len() == size * size
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid with the given side length
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        Some(pos.row * self.size + pos.col)
    }

    /// Get side length of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if a position is within bounds
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Get cell at a position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Get the token at a position (None if out of bounds or empty)
    pub fn token(&self, pos: Pos) -> Option<Token> {
        self.get(pos).flatten()
    }

    /// Color of the token at a position if it may join a run
    /// (None if out of bounds, empty, or obstructed)
    pub fn matchable_color(&self, pos: Pos) -> Option<CandyColor> {
        self.token(pos).filter(|t| t.matchable()).map(|t| t.color)
    }

    /// Set cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Pos, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange the contents of two cells
    /// Returns false if either position is out of bounds
    pub fn swap(&mut self, a: Pos, b: Pos) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// In-bounds 4-directional neighbors of a position
    pub fn neighbors(&self, pos: Pos) -> ArrayVec<Pos, 4> {
        let mut out = ArrayVec::new();
        if pos.row > 0 {
            out.push(Pos::new(pos.row - 1, pos.col));
        }
        if pos.row + 1 < self.size {
            out.push(Pos::new(pos.row + 1, pos.col));
        }
        if pos.col > 0 {
            out.push(Pos::new(pos.row, pos.col - 1));
        }
        if pos.col + 1 < self.size {
            out.push(Pos::new(pos.row, pos.col + 1));
        }
        out
    }

    /// Check whether placing `color` at `pos` would complete a horizontal or
    /// vertical run of >= 3 identical colors with already-placed neighbors.
    /// Compares raw colors; stricter than match detection, which also skips
    /// obstructed tokens.
    pub fn completes_run(&self, pos: Pos, color: CandyColor) -> bool {
        let same = |p: Pos| self.token(p).map(|t| t.color) == Some(color);

        // Horizontal: contiguous same-color cells left and right of pos.
        let mut len = 1;
        let mut c = pos.col;
        while c > 0 && same(Pos::new(pos.row, c - 1)) {
            len += 1;
            c -= 1;
        }
        let mut c = pos.col + 1;
        while c < self.size && same(Pos::new(pos.row, c)) {
            len += 1;
            c += 1;
        }
        if len >= 3 {
            return true;
        }

        // Vertical
        let mut len = 1;
        let mut r = pos.row;
        while r > 0 && same(Pos::new(r - 1, pos.col)) {
            len += 1;
            r -= 1;
        }
        let mut r = pos.row + 1;
        while r < self.size && same(Pos::new(r, pos.col)) {
            len += 1;
            r += 1;
        }
        len >= 3
    }

    /// Compact every column downward, preserving relative vertical order.
    /// Vacated cells become None at the top of each column. Returns the
    /// number of empty cells left to refill.
    pub fn collapse_columns(&mut self) -> usize {
        let mut holes = 0;
        for col in 0..self.size {
            // Two-pointer scan from the bottom of the column upward.
            let mut write_row = self.size;
            for read_row in (0..self.size).rev() {
                let idx = read_row * self.size + col;
                if self.cells[idx].is_some() {
                    write_row -= 1;
                    if write_row != read_row {
                        self.cells[write_row * self.size + col] = self.cells[idx];
                        self.cells[idx] = None;
                    }
                }
            }
            // Rows above the write pointer are the column's holes.
            for row in 0..write_row {
                self.cells[row * self.size + col] = None;
            }
            holes += write_row;
        }
        holes
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a grid from one string per row for testing.
    /// 'R','O','Y','G','B','P' place plain tokens, '.' leaves the cell empty.
    /// Token ids are assigned sequentially from 1.
    #[cfg(test)]
    pub fn from_colors(rows: &[&str]) -> Self {
        let size = rows.len();
        assert!(rows.iter().all(|row| row.len() == size));

        let mut grid = Self::new(size);
        let mut next_id = 1;
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let color = match ch {
                    'R' => CandyColor::Red,
                    'O' => CandyColor::Orange,
                    'Y' => CandyColor::Yellow,
                    'G' => CandyColor::Green,
                    'B' => CandyColor::Blue,
                    'P' => CandyColor::Purple,
                    '.' => continue,
                    _ => panic!("unknown color char: {}", ch),
                };
                grid.set(
                    Pos::new(row, col),
                    Some(Token {
                        id: next_id,
                        color,
                        special: None,
                        obstacle: None,
                    }),
                );
                next_id += 1;
            }
        }
        grid
    }

    /// Convert to one string per row for testing/display
    #[cfg(test)]
    pub fn to_colors(&self) -> Vec<String> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| match self.token(Pos::new(row, col)) {
                        Some(t) => match t.color {
                            CandyColor::Red => 'R',
                            CandyColor::Orange => 'O',
                            CandyColor::Yellow => 'Y',
                            CandyColor::Green => 'G',
                            CandyColor::Blue => 'B',
                            CandyColor::Purple => 'P',
                        },
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }
}
