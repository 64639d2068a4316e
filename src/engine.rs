//! The layer-rotation engine.
//!
//! Owns the cubie store and at most one pivot. Animated turns are driven by
//! [`RotationEngine::advance`], called once per frame by the host; instant
//! turns complete inside [`RotationEngine::rotate_layer`].
//!
//! Only animated requests honour the busy lock. An instant request made while
//! an animated turn is in flight first runs that turn to completion, then
//! applies itself, so there is never more than one pivot.

use std::time::Duration;

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::cubie::{CubieId, CubieStore};
use crate::geometry::{Move, Transform};
use crate::layer;
use crate::pivot::Pivot;

/// Ease-out cubic: fast start, gentle landing.
#[inline]
pub fn ease_out_cubic(progress: f32) -> f32 {
    1.0 - (1.0 - progress).powi(3)
}

/// A turn in progress.
#[derive(Debug, Clone)]
pub struct ActiveTurn {
    pub turn: Move,
    pub elapsed: Duration,
    pub duration: Duration,
    pivot: Pivot,
}

impl ActiveTurn {
    /// Fraction of the turn's duration that has elapsed, clamped to `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn pivot(&self) -> &Pivot {
        &self.pivot
    }
}

/// Lifecycle of the engine.
#[derive(Debug, Clone, Default)]
pub enum EngineState {
    #[default]
    Idle,
    Rotating(ActiveTurn),
}

/// What happened to a turn request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The turn was applied synchronously.
    Completed,
    /// An animated turn began; it completes in a later `advance`.
    Started,
    /// An animated turn was requested while another was in flight.
    Dropped,
    /// The move selects no cubies.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct RotationEngine {
    store: CubieStore,
    state: EngineState,
    config: EngineConfig,
}

impl RotationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            store: CubieStore::solved(),
            state: EngineState::Idle,
            config,
        }
    }

    /// Cubies at rest. While a turn is animating, the turning layer is
    /// attached to the pivot instead.
    pub fn store(&self) -> &CubieStore {
        &self.store
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, EngineState::Rotating(_))
    }

    pub fn active_turn(&self) -> Option<&ActiveTurn> {
        match &self.state {
            EngineState::Idle => None,
            EngineState::Rotating(turn) => Some(turn),
        }
    }

    /// Requests a quarter turn.
    ///
    /// With `animate`, the turn is dropped if another animated turn is in
    /// flight; otherwise it starts and completes over `duration` (or the
    /// configured default). Without `animate`, the turn is applied before
    /// returning. A move whose layer selects no cubies is ignored.
    pub fn rotate_layer(
        &mut self,
        turn: Move,
        animate: bool,
        duration: Option<Duration>,
    ) -> TurnOutcome {
        if animate && self.is_busy() {
            debug!(%turn, "engine busy, dropping animated turn");
            return TurnOutcome::Dropped;
        }
        if !turn.has_valid_layer() {
            debug!(%turn, "layer selects no cubies, ignoring");
            return TurnOutcome::Ignored;
        }
        if !animate {
            self.complete_in_flight();
        }

        let cubies = layer::extract(&mut self.store, turn.axis, turn.layer);
        let mut pivot = Pivot::attach(turn.axis, cubies);

        if animate {
            let duration = duration.unwrap_or(self.config.default_duration);
            trace!(%turn, ?duration, "starting animated turn");
            self.state = EngineState::Rotating(ActiveTurn {
                turn,
                elapsed: Duration::ZERO,
                duration,
                pivot,
            });
            TurnOutcome::Started
        } else {
            pivot.set_angle(turn.angle());
            self.finish_rotation(pivot);
            TurnOutcome::Completed
        }
    }

    /// Applies a turn instantly.
    pub fn turn(&mut self, turn: Move) -> TurnOutcome {
        self.rotate_layer(turn, false, None)
    }

    /// Advances the animated turn by `dt`. Returns the move once it lands.
    pub fn advance(&mut self, dt: Duration) -> Option<Move> {
        match std::mem::take(&mut self.state) {
            EngineState::Idle => None,
            EngineState::Rotating(mut active) => {
                active.elapsed = active.elapsed.saturating_add(dt);
                let progress = active.progress();
                active
                    .pivot
                    .set_angle(active.turn.angle() * ease_out_cubic(progress));
                if progress < 1.0 {
                    self.state = EngineState::Rotating(active);
                    return None;
                }
                let turn = active.turn;
                self.finish_rotation(active.pivot);
                Some(turn)
            }
        }
    }

    /// Returns the pivot's cubies to the store and snaps them onto the grid.
    fn finish_rotation(&mut self, pivot: Pivot) {
        let mut cubies = pivot.release();
        for cubie in &mut cubies {
            cubie.snap();
        }
        self.store.restore(cubies);
    }

    /// Lands an in-flight animated turn at its target angle.
    fn complete_in_flight(&mut self) {
        if let EngineState::Rotating(mut active) = std::mem::take(&mut self.state) {
            trace!(turn = %active.turn, "completing in-flight turn");
            active.pivot.set_angle(active.turn.angle());
            self.finish_rotation(active.pivot);
        }
    }

    /// Back to a solved, idle cube.
    pub fn reset(&mut self) {
        self.store = CubieStore::solved();
        self.state = EngineState::Idle;
    }

    /// World transform of every cubie, including those on the pivot.
    pub fn world_cubies(&self) -> impl Iterator<Item = (CubieId, Transform)> + '_ {
        let resting = self.store.iter().map(|cubie| (cubie.id, cubie.transform));
        let turning = self
            .active_turn()
            .into_iter()
            .flat_map(|active| active.pivot.world_cubies());
        resting.chain(turning)
    }
}
