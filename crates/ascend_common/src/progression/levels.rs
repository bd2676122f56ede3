//! Level thresholds for goals.
//!
//! ## Threshold table
//!
//! | level | XP needed |
//! |-------|-----------|
//! | 0     | 0         |
//! | 1     | 50        |
//! | 2     | 150       |
//! | 3     | 300       |
//! | 4     | 500       |
//!
//! With the flat +10 per completion a fresh goal reaches level 1 after 5
//! completions and level 2 after 15.

use serde::Serialize;

/// XP cutoffs per level, ascending
pub const LEVEL_THRESHOLDS: [u64; 5] = [0, 50, 150, 300, 500];

/// Flat XP granted for every completion
pub const XP_PER_COMPLETION: u64 = 10;

/// Ordered table of experience cutoffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelThresholds(&'static [u64]);

impl LevelThresholds {
    /// The table goals are graded against
    pub const STANDARD: LevelThresholds = LevelThresholds(&LEVEL_THRESHOLDS);

    pub fn as_slice(&self) -> &'static [u64] {
        self.0
    }

    /// Highest reachable level
    pub fn max_level(&self) -> u8 {
        self.0.len().saturating_sub(1) as u8
    }

    /// Walk `level` forward while the next threshold is met.
    ///
    /// Starts from the stored level and never moves down, so a goal whose
    /// XP was lowered by hand keeps its level.
    pub fn advance(&self, mut level: u8, xp: u64) -> u8 {
        while let Some(&next) = self.0.get(level as usize + 1) {
            if xp < next {
                break;
            }
            level += 1;
        }
        level
    }

    /// XP still missing for the next level, `None` at the top
    pub fn xp_to_next(&self, level: u8, xp: u64) -> Option<u64> {
        self.0
            .get(level as usize + 1)
            .map(|&next| next.saturating_sub(xp))
    }
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}
