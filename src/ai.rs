//! Computer targeting: blind uniform search over cells not yet fired at.
//! No memory of earlier hits and no follow-up around them.

use rand::Rng;

use crate::board::Board;
use crate::config::{BOARD_CELLS, BOARD_SIZE, MAX_TARGET_ATTEMPTS};
use crate::coordinate::Coordinate;

/// Pick a uniformly random cell of `target` that has not been shot yet.
///
/// After `MAX_TARGET_ATTEMPTS` already-shot samples the first free cell in
/// row-major order is returned instead. Returns `None` only when every cell
/// has been shot.
pub fn random_target<R: Rng + ?Sized>(rng: &mut R, target: &Board) -> Option<Coordinate> {
    if target.shots().len() >= BOARD_CELLS {
        return None;
    }
    for _ in 0..MAX_TARGET_ATTEMPTS {
        let row = rng.random_range(0..BOARD_SIZE as usize);
        let col = rng.random_range(0..BOARD_SIZE as usize);
        let coord = Coordinate::new(row, col).ok()?;
        if target.shot_at(coord).is_none() {
            return Some(coord);
        }
    }
    log::warn!(
        "random targeting exhausted {} attempts; scanning",
        MAX_TARGET_ATTEMPTS
    );
    Coordinate::all().find(|&c| target.shot_at(c).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn never_repeats_a_cell() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut board = Board::new();
        for _ in 0..BOARD_CELLS {
            let coord = random_target(&mut rng, &board).unwrap();
            assert!(board.shot_at(coord).is_none());
            board.receive_shot(coord);
        }
        assert_eq!(board.shots().len(), BOARD_CELLS);
        assert_eq!(random_target(&mut rng, &board), None);
    }

    #[test]
    fn single_free_cell_is_found() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut board = Board::new();
        let last = Coordinate::new(6, 2).unwrap();
        for c in Coordinate::all().filter(|&c| c != last) {
            board.receive_shot(c);
        }
        assert_eq!(random_target(&mut rng, &board), Some(last));
    }
}
