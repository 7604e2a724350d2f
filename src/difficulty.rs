//! Difficulty tiers.
//!
//! Each tier fixes how deep the engine searches and how often it throws the
//! search away in favour of a random legal move. The thinking delay is only a
//! hint for whatever presents the game; the engine itself never waits.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DifficultyError;

/// A named difficulty tier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

/// Settings behind a tier.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DifficultyConfig {
    pub name: &'static str,
    pub description: &'static str,
    /// Ply limit handed to the search.
    pub max_depth: u32,
    /// Chance in `[0, 1]` of playing a random move instead of searching.
    pub mistake_probability: f64,
    /// Presentation-only pause before showing the move.
    pub thinking_delay_ms: u64,
}

impl DifficultyConfig {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

const EASY: DifficultyConfig = DifficultyConfig {
    name: "Easy",
    description: "Perfect for beginners - AI makes occasional mistakes",
    max_depth: 3,
    mistake_probability: 0.30,
    thinking_delay_ms: 300,
};

const MEDIUM: DifficultyConfig = DifficultyConfig {
    name: "Medium",
    description: "Balanced gameplay - AI plays well but not perfectly",
    max_depth: 5,
    mistake_probability: 0.15,
    thinking_delay_ms: 600,
};

const HARD: DifficultyConfig = DifficultyConfig {
    name: "Hard",
    description: "Challenging opponent - AI rarely makes mistakes",
    max_depth: 7,
    mistake_probability: 0.05,
    thinking_delay_ms: 800,
};

const EXPERT: DifficultyConfig = DifficultyConfig {
    name: "Expert",
    description: "Ultimate challenge - perfect AI play",
    max_depth: 9,
    mistake_probability: 0.0,
    thinking_delay_ms: 1000,
};

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn config(self) -> &'static DifficultyConfig {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
            Difficulty::Expert => &EXPERT,
        }
    }

    #[inline]
    pub fn max_depth(self) -> u32 {
        self.config().max_depth
    }

    #[inline]
    pub fn mistake_probability(self) -> f64 {
        self.config().mistake_probability
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| DifficultyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        let rows: Vec<(u32, f64, u64)> = Difficulty::ALL
            .iter()
            .map(|d| {
                let c = d.config();
                (c.max_depth, c.mistake_probability, c.thinking_delay_ms)
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                (3, 0.30, 300),
                (5, 0.15, 600),
                (7, 0.05, 800),
                (9, 0.0, 1000),
            ]
        );
    }

    #[test]
    fn test_harder_tiers_search_deeper_and_err_less() {
        for pair in Difficulty::ALL.windows(2) {
            assert!(pair[0].max_depth() < pair[1].max_depth());
            assert!(pair[0].mistake_probability() > pair[1].mistake_probability());
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" Expert ".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert!("impossible".parse::<Difficulty>().is_err());
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
    }

    #[test]
    fn test_thinking_delay() {
        assert_eq!(
            Difficulty::Hard.config().thinking_delay(),
            Duration::from_millis(800)
        );
    }
}
