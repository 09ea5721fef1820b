//! Engine configuration

use crate::random::{RandomSource, SeededRandom, ThreadRandom};
use crate::settings::GameplaySettings;
use std::fmt;

pub const DEFAULT_BASE_DROP_INTERVAL_MS: u32 = 1000;
pub const DEFAULT_DROP_INTERVAL_DECREMENT_MS: u32 = 50;
pub const DEFAULT_LINES_PER_LEVEL: u32 = 10;

/// The tunable parts of the engine
pub struct EngineConfig {
    /// Where new pieces come from
    pub random_source: Box<dyn RandomSource>,
    /// Drop interval at level 0
    pub base_drop_interval_ms: u32,
    /// How much faster each level drops
    pub drop_interval_decrement_ms: u32,
    /// Cleared lines needed per level
    pub lines_per_level: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            random_source: Box::new(ThreadRandom::new()),
            base_drop_interval_ms: DEFAULT_BASE_DROP_INTERVAL_MS,
            drop_interval_decrement_ms: DEFAULT_DROP_INTERVAL_DECREMENT_MS,
            lines_per_level: DEFAULT_LINES_PER_LEVEL,
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("base_drop_interval_ms", &self.base_drop_interval_ms)
            .field("drop_interval_decrement_ms", &self.drop_interval_decrement_ms)
            .field("lines_per_level", &self.lines_per_level)
            .finish_non_exhaustive()
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the gameplay section of the settings file.
    /// A configured seed selects a reproducible piece sequence.
    pub fn from_settings(gameplay: &GameplaySettings) -> Self {
        let random_source: Box<dyn RandomSource> = match gameplay.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(ThreadRandom::new()),
        };
        Self {
            random_source,
            base_drop_interval_ms: gameplay.base_drop_interval_ms,
            drop_interval_decrement_ms: gameplay.drop_interval_decrement_ms,
            lines_per_level: gameplay.lines_per_level.max(1),
        }
    }

    pub fn with_random_source(mut self, source: impl RandomSource + 'static) -> Self {
        self.random_source = Box::new(source);
        self
    }

    pub fn with_base_drop_interval_ms(mut self, ms: u32) -> Self {
        self.base_drop_interval_ms = ms;
        self
    }

    pub fn with_drop_interval_decrement_ms(mut self, ms: u32) -> Self {
        self.drop_interval_decrement_ms = ms;
        self
    }

    /// Zero is raised to one
    pub fn with_lines_per_level(mut self, lines: u32) -> Self {
        self.lines_per_level = lines.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.base_drop_interval_ms, 1000);
        assert_eq!(config.drop_interval_decrement_ms, 50);
        assert_eq!(config.lines_per_level, 10);
    }

    #[test]
    fn test_builder() {
        let mut config = EngineConfig::new()
            .with_random_source(|| 0.25)
            .with_base_drop_interval_ms(800)
            .with_drop_interval_decrement_ms(100)
            .with_lines_per_level(0);
        assert_eq!(config.base_drop_interval_ms, 800);
        assert_eq!(config.drop_interval_decrement_ms, 100);
        assert_eq!(config.lines_per_level, 1);
        assert_eq!(config.random_source.sample(), 0.25);
    }

    #[test]
    fn test_from_settings_with_seed() {
        let gameplay = GameplaySettings {
            seed: Some(99),
            lines_per_level: 5,
            ..GameplaySettings::default()
        };
        let mut a = EngineConfig::from_settings(&gameplay);
        let mut b = EngineConfig::from_settings(&gameplay);
        assert_eq!(a.lines_per_level, 5);
        for _ in 0..10 {
            assert_eq!(a.random_source.sample(), b.random_source.sample());
        }
    }
}
