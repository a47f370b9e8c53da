//! Scoring, combo tracking and level progression

use std::time::Duration;

/// Points for 0..=4 regular line clears at level 1
const LINE_POINTS: [u64; 5] = [0, 100, 300, 500, 800];
/// Base points per line for a spin clear (doubled on award)
const SPIN_POINTS: u64 = 400;
const COMBO_POINTS: u64 = 50;
const LINES_PER_LEVEL: u32 = 10;

const BASE_DROP_INTERVAL_MS: u64 = 1000;
const DROP_INTERVAL_STEP_MS: u64 = 100;
const MIN_DROP_INTERVAL_MS: u64 = 100;

/// Type of line clear for scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearType {
    /// Regular line clear (1-4 lines)
    Regular(u8),
    /// Spin clear (T piece rotated into a corner-locked slot)
    Spin(u8),
}

impl ClearType {
    pub fn lines(&self) -> u8 {
        match self {
            ClearType::Regular(n) | ClearType::Spin(n) => *n,
        }
    }

    /// Name for display
    pub fn name(&self) -> &'static str {
        match self {
            ClearType::Regular(1) => "Single",
            ClearType::Regular(2) => "Double",
            ClearType::Regular(3) => "Triple",
            ClearType::Regular(4) => "Tetris",
            ClearType::Spin(1) => "T-Spin Single",
            ClearType::Spin(2) => "T-Spin Double",
            ClearType::Spin(3) => "T-Spin Triple",
            _ => "",
        }
    }
}

/// Score tracking for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level, starts at 1 and never goes down
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
    /// Current combo count (-1 = no combo)
    pub combo: i32,
    /// Gravity period for the current level
    drop_interval: Duration,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            lines: 0,
            combo: -1,
            drop_interval: Duration::from_millis(BASE_DROP_INTERVAL_MS),
        }
    }

    /// Account for a locked piece that cleared `cleared` rows.
    /// Returns the clear that was scored, or None when nothing was cleared.
    pub fn on_lock(&mut self, cleared: usize, spin: bool) -> Option<ClearType> {
        if cleared == 0 {
            self.combo = -1;
            return None;
        }

        self.combo += 1;
        let level = self.level as u64;
        let rows = cleared as u64;
        let clear = if spin {
            ClearType::Spin(cleared as u8)
        } else {
            ClearType::Regular(cleared as u8)
        };

        let points = match clear {
            ClearType::Spin(_) => SPIN_POINTS * rows * 2 * level,
            ClearType::Regular(_) => {
                LINE_POINTS.get(cleared).copied().unwrap_or(LINE_POINTS[4]) * level
            }
        };
        let combo_bonus = COMBO_POINTS * self.combo as u64 * level;

        self.points += points + combo_bonus;
        self.lines += cleared as u32;

        let new_level = self.lines / LINES_PER_LEVEL + 1;
        if new_level > self.level {
            self.level = new_level;
            self.drop_interval = Self::interval_for(new_level);
            tracing::debug!(level = new_level, interval_ms = self.drop_interval.as_millis() as u64, "level up");
        }

        Some(clear)
    }

    /// Time between automatic drops at the current level
    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Combo as shown to the player (never negative)
    pub fn display_combo(&self) -> u32 {
        self.combo.max(0) as u32
    }

    fn interval_for(level: u32) -> Duration {
        let step = (level.saturating_sub(1) as u64).saturating_mul(DROP_INTERVAL_STEP_MS);
        Duration::from_millis(
            BASE_DROP_INTERVAL_MS
                .saturating_sub(step)
                .max(MIN_DROP_INTERVAL_MS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        assert_eq!(score.on_lock(1, false), Some(ClearType::Regular(1)));
        assert_eq!(score.points, 100);
        assert_eq!(score.lines, 1);
        assert_eq!(score.combo, 0);
    }

    #[test]
    fn test_tetris() {
        let mut score = Score::new();
        score.on_lock(4, false);
        assert_eq!(score.points, 800);
        assert_eq!(score.lines, 4);
    }

    #[test]
    fn test_spin_single_beats_plain_single() {
        let mut spin = Score::new();
        spin.on_lock(1, true);
        assert_eq!(spin.points, 800);

        let mut plain = Score::new();
        plain.on_lock(1, false);
        assert!(spin.points > plain.points);
    }

    #[test]
    fn test_combo() {
        let mut score = Score::new();
        score.on_lock(1, false);
        score.on_lock(2, false);
        // 100 + (300 + 50 * 1)
        assert_eq!(score.points, 450);
        assert_eq!(score.combo, 1);
        score.on_lock(1, false);
        // + 100 + 50 * 2
        assert_eq!(score.points, 650);
    }

    #[test]
    fn test_miss_resets_combo() {
        let mut score = Score::new();
        score.on_lock(1, false);
        score.on_lock(1, false);
        assert_eq!(score.on_lock(0, false), None);
        assert_eq!(score.combo, -1);
        assert_eq!(score.display_combo(), 0);
        score.on_lock(1, false);
        assert_eq!(score.points, 100 + 150 + 100);
    }

    #[test]
    fn test_zero_clear_spin_scores_nothing() {
        let mut score = Score::new();
        assert_eq!(score.on_lock(0, true), None);
        assert_eq!(score.points, 0);
    }

    #[test]
    fn test_level_up() {
        let mut score = Score::new();
        assert_eq!(score.drop_interval(), Duration::from_millis(1000));
        for _ in 0..10 {
            score.on_lock(1, false);
        }
        assert_eq!(score.level, 2);
        assert_eq!(score.drop_interval(), Duration::from_millis(900));
    }

    #[test]
    fn test_level_multiplies_points() {
        let mut score = Score::new();
        score.on_lock(4, false);
        score.on_lock(4, false);
        score.on_lock(0, false);
        assert_eq!(score.level, 1);
        score.on_lock(4, false);
        // 12 lines: level 2 is reached only after this clear is scored
        assert_eq!(score.level, 2);
        let before = score.points;
        score.on_lock(1, false);
        // 100 * 2 + 50 * 1 * 2
        assert_eq!(score.points - before, 300);
    }

    #[test]
    fn test_drop_interval_floor() {
        assert_eq!(Score::interval_for(1), Duration::from_millis(1000));
        assert_eq!(Score::interval_for(10), Duration::from_millis(100));
        assert_eq!(Score::interval_for(25), Duration::from_millis(100));
    }
}
