//! Difficulty selection and the round profile table.
//!
//! A profile is read once at round start and stays immutable for the whole
//! round; switching the selector mid-round only affects the next round.

use serde::{Deserialize, Serialize};

/// Difficulty selector. Unknown keys fall back to [`Difficulty::Normal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Per-round configuration shaped by the difficulty table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Round length in seconds.
    pub duration_secs: u32,
    /// Earliest next contamination after a clean transition.
    pub contamination_min_ms: u64,
    /// Latest next contamination after a clean transition.
    pub contamination_max_ms: u64,
}

impl Difficulty {
    /// Parse a selector key, falling back to `Normal` for anything unknown.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Normal,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Display label used in result summaries.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard]
    }

    /// Static profile lookup. `Normal` carries the baseline tuning.
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                duration_secs: 60,
                contamination_min_ms: 1500,
                contamination_max_ms: 3500,
            },
            Difficulty::Normal => DifficultyProfile {
                duration_secs: 45,
                contamination_min_ms: 900,
                contamination_max_ms: 2500,
            },
            Difficulty::Hard => DifficultyProfile {
                duration_secs: 30,
                contamination_min_ms: 600,
                contamination_max_ms: 1600,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_falls_back_to_normal() {
        assert_eq!(Difficulty::from_key("nightmare"), Difficulty::Normal);
        assert_eq!(Difficulty::from_key(""), Difficulty::Normal);
    }

    #[test]
    fn keys_round_trip() {
        for d in Difficulty::all() {
            assert_eq!(Difficulty::from_key(d.key()), d);
        }
    }

    #[test]
    fn key_parsing_ignores_case_and_whitespace() {
        assert_eq!(Difficulty::from_key("  EASY "), Difficulty::Easy);
        assert_eq!(Difficulty::from_key("Hard"), Difficulty::Hard);
    }

    #[test]
    fn profiles_have_ordered_contamination_bounds() {
        for d in Difficulty::all() {
            let p = d.profile();
            assert!(p.duration_secs > 0);
            assert!(p.contamination_min_ms > 0);
            assert!(p.contamination_min_ms <= p.contamination_max_ms);
        }
    }

    #[test]
    fn normal_profile_keeps_the_baseline_tuning() {
        let p = Difficulty::Normal.profile();
        assert_eq!(p.duration_secs, 45);
        assert_eq!(p.contamination_min_ms, 900);
        assert_eq!(p.contamination_max_ms, 2500);
    }
}
