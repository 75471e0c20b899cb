pub const MAX_EXPERIENCE: i32 = 10_000_000;

/// Level reached for a given amount of experience, and how much more
/// experience the next level needs.
///
/// `level = floor((sqrt(2500 + 200 * xp) - 50) / 100)`
/// `until_next_level = 50 * (level + 1) * (level + 2) - xp`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: i32,
    pub until_next_level: i32,
}

impl LevelProgress {
    pub fn from_experience(experience: i32) -> Self {
        // negative experience never passes validation; treat it as zero here
        let experience = u64::try_from(experience).unwrap_or(0);

        // flooring the integer root gives the same level as flooring the real root,
        // since every level threshold sits on an integer
        let root = (2500 + 200 * experience).isqrt();
        let level = (root - 50) / 100;
        let next_level_experience = 50 * (level + 1) * (level + 2);

        Self {
            level: level as i32,
            until_next_level: (next_level_experience - experience) as i32,
        }
    }

    /// Total experience needed to reach `level`.
    pub fn experience_for_level(level: i32) -> i64 {
        let level = i64::from(level.max(0));
        50 * level * (level + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(experience: i32) -> (i32, i32) {
        let p = LevelProgress::from_experience(experience);
        (p.level, p.until_next_level)
    }

    #[test]
    fn test_known_values() {
        assert_eq!(progress(0), (0, 100));
        assert_eq!(progress(99), (0, 1));
        assert_eq!(progress(100), (1, 200));
        assert_eq!(progress(299), (1, 1));
        assert_eq!(progress(300), (2, 300));
        assert_eq!(progress(1000), (4, 500));
        assert_eq!(progress(MAX_EXPERIENCE), (446, 12_800));
    }

    #[test]
    fn test_level_thresholds_match_formula() {
        for level in 0..=446 {
            let threshold = LevelProgress::experience_for_level(level) as i32;
            assert_eq!(LevelProgress::from_experience(threshold).level, level);
            if threshold > 0 {
                assert_eq!(LevelProgress::from_experience(threshold - 1).level, level - 1);
            }
        }
    }

    #[test]
    fn test_level_is_monotonic_over_full_range() {
        let mut previous = LevelProgress::from_experience(0);
        for experience in 1..=MAX_EXPERIENCE {
            let current = LevelProgress::from_experience(experience);
            assert!(current.level >= previous.level, "level dropped at {}", experience);
            assert!(current.until_next_level > 0);
            assert_eq!(
                i64::from(experience) + i64::from(current.until_next_level),
                LevelProgress::experience_for_level(current.level + 1)
            );
            previous = current;
        }
    }

    #[test]
    fn test_negative_experience_is_level_zero() {
        assert_eq!(progress(-5), (0, 100));
    }
}
