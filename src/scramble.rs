//! Random scrambles.
//!
//! Moves are drawn independently and uniformly. No attempt is made to avoid
//! redundant or self-cancelling sequences.

use rand::Rng;
use tracing::debug;

use crate::engine::RotationEngine;
use crate::geometry::{Axis, Direction, Move, LAYER_INDICES};

/// A uniformly random quarter turn.
pub fn random_move(rng: &mut impl Rng) -> Move {
    let axis = Axis::ALL[rng.gen_range(0..Axis::ALL.len())];
    let layer = LAYER_INDICES[rng.gen_range(0..LAYER_INDICES.len())];
    let direction = Direction::from_positive(rng.gen_bool(0.5));
    Move::new(axis, layer, direction)
}

/// Applies `count` random instant turns and returns them in order.
pub fn scramble(engine: &mut RotationEngine, rng: &mut impl Rng, count: usize) -> Vec<Move> {
    let moves: Vec<Move> = (0..count).map(|_| random_move(rng)).collect();
    for &turn in &moves {
        engine.turn(turn);
    }
    debug!(count, "scrambled");
    moves
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rustc_hash::FxHashSet;

    use super::*;
    use crate::config::SCRAMBLE_LENGTH;
    use crate::grid::is_valid_permutation;

    #[test]
    fn test_scramble_keeps_valid_permutation() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut engine = RotationEngine::default();
            let moves = scramble(&mut engine, &mut rng, SCRAMBLE_LENGTH);
            assert_eq!(moves.len(), SCRAMBLE_LENGTH);
            assert!(is_valid_permutation(engine.store()), "seed {seed}");
            assert!(!engine.is_busy());
        }
    }

    #[test]
    fn test_scramble_is_reproducible() {
        let mut a = RotationEngine::default();
        let mut b = RotationEngine::default();
        let moves_a = scramble(&mut a, &mut StdRng::seed_from_u64(7), SCRAMBLE_LENGTH);
        let moves_b = scramble(&mut b, &mut StdRng::seed_from_u64(7), SCRAMBLE_LENGTH);
        assert_eq!(moves_a, moves_b);
        assert_eq!(
            crate::grid::format_state(a.store()),
            crate::grid::format_state(b.store())
        );
    }

    #[test]
    fn test_random_moves_cover_the_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: FxHashSet<Move> = (0..2000).map(|_| random_move(&mut rng)).collect();
        // 3 axes x 3 layers x 2 directions
        assert_eq!(seen.len(), 18);
        assert!(seen.iter().all(|turn| turn.has_valid_layer()));
    }

    #[test]
    fn test_undoing_scramble_solves() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = RotationEngine::default();
        let moves = scramble(&mut engine, &mut rng, SCRAMBLE_LENGTH);
        for turn in moves.iter().rev() {
            engine.turn(turn.inverse());
        }
        assert!(engine.store().is_solved());
    }
}
