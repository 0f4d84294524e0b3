//! Tiered interest-rate schedule.
//!
//! | SenteScore | Rate (bps) |
//! |------------|-----------:|
//! | 90 – 100   |        500 |
//! | 80 – 89    |        650 |
//! | 70 – 79    |        800 |
//! | 60 – 69    |      1 000 |
//! | 40 – 59    |      1 500 |
//! | 0 – 39     |      2 000 |

use crate::types::MAX_SCORE;

/// `(lowest score in tier, rate in basis points)`, highest tier first.
pub const RATE_TIERS: [(u32, u32); 6] = [
    (90, 500),
    (80, 650),
    (70, 800),
    (60, 1_000),
    (40, 1_500),
    (0, 2_000),
];

/// Rate in basis points for `score`. Scores above the scale are treated as
/// the top of the scale.
pub fn interest_rate_bps(score: u32) -> u32 {
    let score = score.min(MAX_SCORE);
    RATE_TIERS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, rate)| *rate)
        .unwrap_or(RATE_TIERS[RATE_TIERS.len() - 1].1)
}
