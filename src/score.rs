//! Scoring, leveling and drop speed
//!
//! Classic table: 40 / 100 / 300 / 1200 points for 1-4 lines, scaled by
//! `level + 1`. Every function clamps out-of-range input instead of failing.

/// Base points by number of lines cleared at once
pub const LINE_CLEAR_SCORES: [u64; 5] = [0, 40, 100, 300, 1200];

/// Fastest automatic drop, whatever the level
pub const MIN_DROP_INTERVAL_MS: u32 = 50;

/// Points for clearing `lines_cleared` rows at once while at `level`.
///
/// Counts past four score as four; negative counts and levels count as zero.
pub fn calculate_score(lines_cleared: i64, level: i64) -> u64 {
    let index = lines_cleared.clamp(0, LINE_CLEAR_SCORES.len() as i64 - 1) as usize;
    let multiplier = (level.max(0) as u64).saturating_add(1);
    LINE_CLEAR_SCORES[index].saturating_mul(multiplier)
}

/// Level reached after `total_lines` cleared lines.
///
/// A `lines_per_level` of zero is treated as one.
pub fn calculate_level(total_lines: i64, lines_per_level: u32) -> u32 {
    let per_level = i64::from(lines_per_level.max(1));
    let level = total_lines.max(0) / per_level;
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// Milliseconds between automatic drops at `level`, never below
/// [`MIN_DROP_INTERVAL_MS`].
pub fn drop_speed(level: u32, base_interval_ms: u32, decrement_ms: u32) -> u32 {
    let reduced = i64::from(base_interval_ms) - i64::from(level) * i64::from(decrement_ms);
    reduced.max(i64::from(MIN_DROP_INTERVAL_MS)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(calculate_score(0, 0), 0);
        assert_eq!(calculate_score(1, 0), 40);
        assert_eq!(calculate_score(2, 0), 100);
        assert_eq!(calculate_score(3, 0), 300);
        assert_eq!(calculate_score(4, 0), 1200);
    }

    #[test]
    fn test_score_scales_with_level() {
        assert_eq!(calculate_score(1, 1), 80);
        assert_eq!(calculate_score(4, 2), 3600);
        assert_eq!(calculate_score(2, 9), 1000);
    }

    #[test]
    fn test_score_clamps_line_count() {
        assert_eq!(calculate_score(5, 0), 1200);
        assert_eq!(calculate_score(100, 1), 2400);
        assert_eq!(calculate_score(-3, 5), 0);
    }

    #[test]
    fn test_score_clamps_negative_level() {
        assert_eq!(calculate_score(1, -1), 40);
        assert_eq!(calculate_score(4, i64::MIN), 1200);
        assert_eq!(calculate_score(4, i64::MAX), u64::MAX);
    }

    #[test]
    fn test_level_up() {
        assert_eq!(calculate_level(0, 10), 0);
        assert_eq!(calculate_level(9, 10), 0);
        assert_eq!(calculate_level(10, 10), 1);
        assert_eq!(calculate_level(25, 10), 2);
        assert_eq!(calculate_level(-5, 10), 0);
        assert_eq!(calculate_level(7, 0), 7);
    }

    #[test]
    fn test_drop_speed() {
        assert_eq!(drop_speed(0, 1000, 50), 1000);
        assert_eq!(drop_speed(1, 1000, 50), 950);
        assert_eq!(drop_speed(10, 1000, 50), 500);
        assert_eq!(drop_speed(19, 1000, 50), 50);
        assert_eq!(drop_speed(20, 1000, 50), 50);
        assert_eq!(drop_speed(u32::MAX, 1000, 50), 50);
    }
}
