//! Twister: a 3x3x3 rotating cube driven by pointer gestures.
//!
//! The library holds the puzzle's discrete state, executes quarter turns of a
//! layer (instantly or as an eased animation advanced by the host's frame
//! loop), and resolves a drag on the cube's surface into one legal move.
//! Rendering, windowing and camera control live in the binary.

pub mod camera;
pub mod config;
pub mod cubie;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod grid;
pub mod history;
pub mod layer;
pub mod pick;
pub mod pivot;
pub mod puzzle;
pub mod scramble;

pub use config::Config;
pub use engine::{RotationEngine, TurnOutcome};
pub use geometry::{Axis, Direction, Move};
pub use gesture::GestureResolver;
pub use puzzle::Puzzle;
