//! The interactive puzzle: engine, gesture resolver and move history wired
//! together the way a frontend drives them.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::camera::{OrbitControl, Projector, Ray};
use crate::config::Config;
use crate::engine::{RotationEngine, TurnOutcome};
use crate::geometry::Move;
use crate::gesture::GestureResolver;
use crate::history::{MoveHistory, MoveQueue};
use crate::pick::{pick, Pick, CUBIE_HALF_EXTENT};
use crate::scramble;

#[derive(Debug, Clone, Default)]
pub struct Puzzle {
    config: Config,
    engine: RotationEngine,
    resolver: GestureResolver,
    history: MoveHistory,
    replay: MoveQueue,
}

impl Puzzle {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            engine: RotationEngine::new(config.engine),
            resolver: GestureResolver::new(config.resolver),
            history: MoveHistory::default(),
            replay: MoveQueue::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engine(&self) -> &RotationEngine {
        &self.engine
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn is_gesture_active(&self) -> bool {
        self.resolver.is_active()
    }

    pub fn is_replaying(&self) -> bool {
        !self.replay.is_empty()
    }

    /// Nearest cubie face under `ray`.
    pub fn pick(&self, ray: Ray) -> Option<Pick> {
        pick(self.engine.world_cubies(), ray, CUBIE_HALF_EXTENT)
    }

    /// Pointer pressed. Starts a gesture if the ray hits the cube; returns
    /// whether it did.
    pub fn pointer_down(&mut self, ray: Ray, orbit: &mut impl OrbitControl) -> bool {
        match self.pick(ray) {
            Some(hit) => {
                self.resolver.begin(hit, orbit);
                true
            }
            None => false,
        }
    }

    /// Pointer moved by `(dx, dy)` pixels. Returns the move the gesture
    /// produced, if it produced one now and the engine accepted it.
    pub fn pointer_move(
        &mut self,
        dx: f32,
        dy: f32,
        projector: &impl Projector,
        orbit: &mut impl OrbitControl,
    ) -> Option<Move> {
        let turn = self.resolver.drag(dx, dy, projector, orbit)?;
        match self.request_turn(turn, true) {
            TurnOutcome::Started | TurnOutcome::Completed => Some(turn),
            TurnOutcome::Dropped | TurnOutcome::Ignored => None,
        }
    }

    pub fn pointer_up(&mut self, orbit: &mut impl OrbitControl) {
        self.resolver.end(orbit);
    }

    /// Requests a turn and records it if the engine takes it.
    ///
    /// Dropped while an undo replay is pending.
    pub fn request_turn(&mut self, turn: Move, animate: bool) -> TurnOutcome {
        let outcome = if self.is_replaying() {
            TurnOutcome::Dropped
        } else {
            self.engine.rotate_layer(turn, animate, None)
        };
        match outcome {
            TurnOutcome::Started | TurnOutcome::Completed => self.history.record(turn),
            TurnOutcome::Dropped | TurnOutcome::Ignored => {
                debug!(%turn, ?outcome, "turn not applied");
            }
        }
        outcome
    }

    /// Scrambles with instant turns. Does nothing while an undo replay is
    /// pending.
    pub fn scramble(&mut self, rng: &mut impl Rng) -> Vec<Move> {
        if self.is_replaying() {
            debug!("undo replay pending, not scrambling");
            return Vec::new();
        }
        let moves = scramble::scramble(&mut self.engine, rng, self.config.scramble.moves);
        self.history.extend(moves.iter().copied());
        info!(moves = moves.len(), "scrambled");
        moves
    }

    /// Queues the inverse of the whole history for animated replay.
    pub fn start_undo(&mut self) -> usize {
        let undo = self.history.take_undo_sequence();
        let count = undo.len();
        self.replay.extend(undo);
        info!(count, "replaying history in reverse");
        count
    }

    /// Back to the solved cube, discarding history and pending replay.
    pub fn reset(&mut self, orbit: &mut impl OrbitControl) {
        self.resolver.end(orbit);
        self.replay.clear();
        self.history.clear();
        self.engine.reset();
        info!("reset to solved");
    }

    /// Per-frame update.
    pub fn tick(&mut self, dt: Duration) -> Option<Move> {
        self.replay.pump(&mut self.engine);
        self.engine.advance(dt)
    }
}
