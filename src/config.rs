use crate::error::{GameError, GameResult};
use crate::geometry::{PresentationMode, SpawnRegion};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::Display;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    #[command(flatten)]
    pub placement: PlacementParams,
    #[command(flatten)]
    pub rules: RuleParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementParams {
    #[arg(long, value_enum, default_value_t = PresentationMode::Anchored)]
    pub presentation: PresentationMode,

    // === TOKENS ===
    #[arg(long, default_value_t = 0.1)]
    pub token_radius: f32,
    /// Centre-to-centre separation as a multiple of the radius.
    #[arg(long, default_value_t = 2.4)]
    pub separation_factor: f32,
    #[arg(long, default_value_t = 1000)]
    pub position_attempts: usize,

    // === REGION ===
    #[arg(long, default_value_t = 0.5)]
    pub spread_radius: f32,
    #[arg(long, default_value_t = 1.0)]
    pub forward_distance: f32,
    #[arg(long, default_value_t = 0.4)]
    pub depth_jitter: f32,

    // === COLOURS ===
    #[arg(long, default_value_t = 10_000)]
    pub color_attempts: usize,
    #[arg(long, default_value_t = 0.3)]
    pub min_color_distance: f32,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            presentation: PresentationMode::Anchored,
            token_radius: 0.1,
            separation_factor: 2.4,
            position_attempts: 1000,
            spread_radius: 0.5,
            forward_distance: 1.0,
            depth_jitter: 0.4,
            color_attempts: 10_000,
            min_color_distance: 0.3,
        }
    }
}

impl PlacementParams {
    #[inline(always)]
    pub fn min_separation(&self) -> f32 {
        self.token_radius * self.separation_factor
    }

    pub fn region(&self) -> SpawnRegion {
        SpawnRegion::for_mode(
            self.presentation,
            self.spread_radius,
            self.forward_distance,
            self.depth_jitter,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterDraw {
    #[default]
    Uniform,
    Weighted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateWords {
    #[default]
    Allow,
    Reject,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleParams {
    #[arg(long, default_value_t = 3)]
    pub min_word_length: usize,
    #[arg(long, value_enum, default_value_t = LetterDraw::Uniform)]
    pub letter_draw: LetterDraw,
    #[arg(long, value_enum, default_value_t = DuplicateWords::Allow)]
    pub duplicate_words: DuplicateWords,
    #[arg(long, default_value = "en")]
    pub default_language: String,
    /// Locale identifier of the device, e.g. "en_GB". Falls back to the default language.
    #[arg(long)]
    pub device_locale: Option<String>,
    #[arg(long, default_value_t = 10)]
    pub tick_hz: u32,
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for RuleParams {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            letter_draw: LetterDraw::Uniform,
            duplicate_words: DuplicateWords::Allow,
            default_language: "en".to_string(),
            device_locale: None,
            tick_hz: 10,
            seed: None,
        }
    }
}

impl RuleParams {
    pub fn tick_interval_secs(&self) -> f64 {
        1.0 / self.tick_hz.max(1) as f64
    }
}

impl GameConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Rejects values that would make placement or validation meaningless.
    pub fn check(&self) -> GameResult<()> {
        let p = &self.placement;
        if !(p.token_radius.is_finite() && p.token_radius > 0.0) {
            return Err(GameError::Config(format!(
                "token_radius must be positive, got {}",
                p.token_radius
            )));
        }
        if !(p.spread_radius.is_finite() && p.spread_radius > 0.0) {
            return Err(GameError::Config(format!(
                "spread_radius must be positive, got {}",
                p.spread_radius
            )));
        }
        for (name, value) in [
            ("separation_factor", p.separation_factor),
            ("forward_distance", p.forward_distance),
            ("depth_jitter", p.depth_jitter),
            ("min_color_distance", p.min_color_distance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GameError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if p.position_attempts == 0 || p.color_attempts == 0 {
            return Err(GameError::Config(
                "attempt caps must be at least 1".to_string(),
            ));
        }
        if self.rules.min_word_length == 0 {
            return Err(GameError::Config(
                "min_word_length must be at least 1".to_string(),
            ));
        }
        if self.rules.default_language.trim().is_empty() {
            return Err(GameError::Config(
                "default_language must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl GameConfig {
    /// Overlays values the user typed on the command line onto a file-loaded config.
    pub fn merge_from_cli(&mut self, cli: &GameConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident, $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(placement, presentation);
        update_if_present!(placement, token_radius);
        update_if_present!(placement, separation_factor);
        update_if_present!(placement, position_attempts);
        update_if_present!(placement, spread_radius);
        update_if_present!(placement, forward_distance);
        update_if_present!(placement, depth_jitter);
        update_if_present!(placement, color_attempts);
        update_if_present!(placement, min_color_distance);

        update_if_present!(rules, min_word_length);
        update_if_present!(rules, letter_draw);
        update_if_present!(rules, duplicate_words);
        update_if_present!(rules, default_language);
        update_if_present!(rules, device_locale);
        update_if_present!(rules, tick_hz);
        update_if_present!(rules, seed);
    }
}
