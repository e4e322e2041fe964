use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    Display,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Live tokens kept in the pool for the whole round.
    pub fn token_count(&self) -> usize {
        match self {
            Self::Easy => 15,
            Self::Medium => 12,
            Self::Hard => 10,
        }
    }

    pub fn time_limit_secs(&self) -> f64 {
        match self {
            Self::Easy => 120.0,
            Self::Medium => 90.0,
            Self::Hard => 60.0,
        }
    }
}
