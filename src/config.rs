//! Tunable thresholds for the engine and the gesture resolver.

use std::time::Duration;

use crate::error::ConfigError;

/// Default length of an animated quarter turn.
pub const DEFAULT_TURN_DURATION: Duration = Duration::from_millis(300);

/// Number of moves in a scramble.
pub const SCRAMBLE_LENGTH: usize = 20;

/// Thresholds used to turn a pointer drag into a move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Drags shorter than this on both screen axes (pixels) are jitter.
    pub dead_zone_px: f32,
    /// Minimum magnitude of a unit vector's component for that axis to count
    /// as dominant.
    pub axis_dominance: f32,
    /// A candidate axis must score strictly above this to be chosen.
    pub confidence: f32,
    /// The winning score must beat the runner-up by at least this much.
    pub ambiguity_margin: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            dead_zone_px: 2.0,
            axis_dominance: 0.9,
            confidence: 0.5,
            ambiguity_margin: 0.1,
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dead_zone_px.is_nan() || self.dead_zone_px < 0.0 {
            return Err(ConfigError::DeadZone(self.dead_zone_px));
        }
        unit_range("axis dominance", self.axis_dominance)?;
        unit_range("confidence", self.confidence)?;
        if !(0.0..1.0).contains(&self.ambiguity_margin) {
            return Err(ConfigError::OutOfUnitRange {
                name: "ambiguity margin",
                value: self.ambiguity_margin,
            });
        }
        Ok(())
    }
}

fn unit_range(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Used when a turn request does not name a duration.
    pub default_duration: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_duration: DEFAULT_TURN_DURATION,
        }
    }
}

/// Everything the application can tune.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Config {
    pub engine: EngineConfig,
    pub resolver: ResolverConfig,
    pub scramble: ScrambleConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrambleConfig {
    pub moves: usize,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            moves: SCRAMBLE_LENGTH,
            seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.default_duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        if self.scramble.moves == 0 {
            return Err(ConfigError::EmptyScramble);
        }
        self.resolver.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut config = Config::default();
        config.resolver.confidence = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange {
                name: "confidence",
                value: 1.5
            })
        );

        let mut config = Config::default();
        config.resolver.dead_zone_px = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::DeadZone(_))));

        let mut config = Config::default();
        config.engine.default_duration = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));
    }
}
