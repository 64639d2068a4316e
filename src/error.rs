//! Error types for the fallible edges of the crate.
//!
//! The turn engine and gesture resolver never fail; they drop requests they
//! cannot honour. Parsing and configuration are the only places that report
//! errors.

use thiserror::Error;

/// Failure to parse a move written in `<axis><layer><dir>` notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("empty move")]
    Empty,

    #[error("unknown axis {0:?}, expected x, y or z")]
    Axis(char),

    #[error("invalid layer {0:?}, expected -1, 0 or 1")]
    Layer(String),

    #[error("move {0:?} must end in + or -")]
    Direction(String),
}

/// A configuration value outside its domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("dead zone must be a non-negative pixel count, got {0}")]
    DeadZone(f32),

    #[error("{name} must lie in (0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },

    #[error("turn duration must be positive")]
    ZeroDuration,

    #[error("scramble length must be at least one move")]
    EmptyScramble,
}
