//! RNG module - deterministic token generation
//!
//! A seeded LCG drives every random draw in a session (colors, obstacle
//! rolls), so identical seeds reproduce identical games bit-for-bit.

use crate::types::{CandyColor, Obstacle, ObstacleKind, Token, MIN_PALETTE_SIZE};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Roll a percentage chance in [0, 100]
    pub fn chance(&mut self, percent: u32) -> bool {
        self.next_range(100) < percent
    }
}

/// Deterministic token factory for one session
#[derive(Debug, Clone)]
pub struct TokenGen {
    rng: SimpleRng,
    /// Colors are drawn from the first `palette_len` entries of the palette
    palette_len: usize,
    /// Probability (in percent) that a fresh token spawns obstructed
    obstacle_percent: u32,
    /// Next token id to hand out; ids stay unique within a session
    next_id: u32,
}

impl TokenGen {
    pub fn new(seed: u32, palette_len: usize, obstacle_percent: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            palette_len: palette_len.clamp(MIN_PALETTE_SIZE, CandyColor::ALL.len()),
            obstacle_percent: obstacle_percent.min(100),
            next_id: 1,
        }
    }

    /// Draw a uniform-random color from the active palette
    pub fn next_color(&mut self) -> CandyColor {
        let idx = self.rng.next_range(self.palette_len as u32) as usize;
        CandyColor::ALL[idx]
    }

    /// Generate a fresh token: uniform color, obstacle attached with the
    /// configured probability
    pub fn generate(&mut self) -> Token {
        let color = self.next_color();
        let obstacle = if self.rng.chance(self.obstacle_percent) {
            let kind = match self.rng.next_range(3) {
                0 => ObstacleKind::Blocker,
                1 => ObstacleKind::Locked,
                _ => ObstacleKind::Ice,
            };
            Some(Obstacle::new(kind))
        } else {
            None
        };

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        Token {
            id,
            color,
            special: None,
            obstacle,
        }
    }

    /// Draw a fresh seed for a replacement session
    pub fn reseed(&mut self) -> u32 {
        self.rng.next_u32()
    }
}
