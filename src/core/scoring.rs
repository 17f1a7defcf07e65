//! Scoring module - match and effect clear points
//!
//! A detected run of length L scores `L * 100 * (L - 2)`: every token in the
//! match contributes `100 * (L - 2)`, so longer runs score super-linearly.
//! The promoted survivor of a length >= 4 run still counts toward the token
//! count even though it stays on the grid. Tokens cleared by a triggered
//! special score a flat amount each; no run multiplier applies.

use crate::types::{EFFECT_CLEAR_SCORE, MATCH_BASE_SCORE};

/// Points for one detected run of `len` tokens
pub fn run_score(len: usize) -> u32 {
    if len < 3 {
        return 0;
    }
    (len as u32)
        .saturating_mul(MATCH_BASE_SCORE)
        .saturating_mul(len as u32 - 2)
}

/// Points for `tokens` cleared by a special-effect trigger
pub fn effect_clear_score(tokens: usize) -> u32 {
    (tokens as u32).saturating_mul(EFFECT_CLEAR_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_scores() {
        assert_eq!(run_score(3), 300);
        assert_eq!(run_score(4), 800);
        assert_eq!(run_score(5), 1500);
        assert_eq!(run_score(6), 2400);
        assert_eq!(run_score(8), 4800);
    }

    #[test]
    fn test_short_runs_score_nothing() {
        assert_eq!(run_score(0), 0);
        assert_eq!(run_score(1), 0);
        assert_eq!(run_score(2), 0);
    }

    #[test]
    fn test_effect_clear_scores() {
        assert_eq!(effect_clear_score(0), 0);
        assert_eq!(effect_clear_score(1), 100);
        assert_eq!(effect_clear_score(9), 900);
        assert_eq!(effect_clear_score(64), 6400);
    }

    #[test]
    fn test_run_score_saturates() {
        // Degenerate lengths never wrap.
        assert_eq!(run_score(usize::MAX), u32::MAX);
    }
}
