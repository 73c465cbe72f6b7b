use std::collections::HashSet;

use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{Board, Coordinate, Orientation, BOARD_SIZE, FLEET, TOTAL_SHIP_CELLS};

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    Board::with_random_fleet(&mut rng).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn fleet_occupies_exactly_ten_cells(seed in any::<u64>()) {
        let board = random_board(seed);
        prop_assert_eq!(board.total_ship_cells(), TOTAL_SHIP_CELLS);

        let mut seen = HashSet::new();
        for ship in board.ships() {
            for cell in ship.cells() {
                prop_assert!(seen.insert(cell), "cell {} used twice", cell);
            }
        }
        prop_assert_eq!(seen.len(), TOTAL_SHIP_CELLS);
    }

    #[test]
    fn ships_have_fleet_lengths(seed in any::<u64>()) {
        let board = random_board(seed);
        let lengths: Vec<usize> = board.ships().iter().map(|s| s.length()).collect();
        prop_assert_eq!(lengths, FLEET.to_vec());
        prop_assert!(board.has_standard_fleet());
    }

    #[test]
    fn ships_are_straight_and_in_bounds(seed in any::<u64>()) {
        let board = random_board(seed);
        for ship in board.ships() {
            let cells: Vec<Coordinate> = ship.cells().collect();
            prop_assert_eq!(cells.len(), ship.length());
            for (i, cell) in cells.iter().enumerate() {
                prop_assert!(cell.row() < BOARD_SIZE as usize);
                prop_assert!(cell.col() < BOARD_SIZE as usize);
                let origin = ship.origin();
                let expected = match ship.orientation() {
                    Orientation::Horizontal => (origin.row(), origin.col() + i),
                    Orientation::Vertical => (origin.row() + i, origin.col()),
                };
                prop_assert_eq!((cell.row(), cell.col()), expected);
            }
        }
    }

    #[test]
    fn refire_does_not_change_board(seed in any::<u64>(), row in 0..10usize, col in 0..10usize) {
        let mut board = random_board(seed);
        let coord = Coordinate::new(row, col).unwrap();
        let first = board.receive_shot(coord);
        let after_first = board.clone();
        let second = board.receive_shot(coord);
        prop_assert_eq!(first, second);
        prop_assert_eq!(board, after_first);
    }
}

#[test]
fn same_seed_same_layout() {
    assert_eq!(random_board(42), random_board(42));
}

#[test]
fn boards_are_placed_independently() {
    // Each side gets its own fleet; sharing cells across boards is allowed.
    let mut rng = SmallRng::seed_from_u64(8);
    let a = Board::with_random_fleet(&mut rng).unwrap();
    let b = Board::with_random_fleet(&mut rng).unwrap();
    assert_eq!(a.total_ship_cells(), 10);
    assert_eq!(b.total_ship_cells(), 10);
}
