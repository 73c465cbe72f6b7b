#![cfg(feature = "std")]

//! Text rendering of boards and scores for the terminal client.

use std::fmt;

use crate::board::Board;
use crate::common::{ShotOutcome, Side};
use crate::config::BOARD_SIZE;
use crate::coordinate::{Coordinate, ROW_LETTERS};
use crate::game::GameState;
use crate::snapshot::Summary;

/// A board as its owner sees it: ships plus incoming shots.
pub struct FleetView<'a>(pub &'a Board);

/// A board as the opponent sees it: only the shots fired at it.
pub struct TargetView<'a>(pub &'a Board);

/// One-line score summary.
pub struct StatsView<'a>(pub &'a Summary);

fn write_grid(
    f: &mut fmt::Formatter<'_>,
    cell: impl Fn(Coordinate) -> char,
) -> fmt::Result {
    write!(f, "   ")?;
    for c in 1..=BOARD_SIZE {
        write!(f, "{:>3}", c)?;
    }
    writeln!(f)?;
    for (r, &letter) in ROW_LETTERS.iter().enumerate() {
        write!(f, "  {}", letter as char)?;
        for c in 0..BOARD_SIZE as usize {
            let ch = Coordinate::new(r, c).map(&cell).unwrap_or(' ');
            write!(f, "{:>3}", ch)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn shot_mark(outcome: ShotOutcome) -> char {
    match outcome {
        ShotOutcome::Hit => 'X',
        ShotOutcome::Miss => 'o',
    }
}

impl fmt::Display for FleetView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        write_grid(f, |c| match board.shot_at(c) {
            Some(outcome) => shot_mark(outcome),
            None if board.is_ship_cell(c) => 'S',
            None => '.',
        })?;
        writeln!(f, "   Legend: S=Ship  X=Hit  o=Miss  .=Water")
    }
}

impl fmt::Display for TargetView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        write_grid(f, |c| board.shot_at(c).map_or('.', shot_mark))?;
        writeln!(f, "   Legend: X=Hit  o=Miss  .=Unknown")
    }
}

impl fmt::Display for StatsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        write!(
            f,
            "You: {} shots, {} hits, {}% accuracy, {} cells left | \
             Computer: {} shots, {} hits, {} cells left | {}",
            s.player.shots,
            s.player.hits,
            s.player.accuracy(),
            s.player.remaining_ship_cells,
            s.computer.shots,
            s.computer.hits,
            s.computer.remaining_ship_cells,
            s.phase,
        )?;
        if let Some(winner) = s.winner {
            write!(f, " | winner: {}", winner)?;
        }
        Ok(())
    }
}

/// Both boards and the score line.
pub fn render_game(game: &GameState) -> String {
    format!(
        "Enemy waters:\n{}\nYour fleet:\n{}\n{}\n",
        TargetView(game.board(Side::Computer)),
        FleetView(game.board(Side::Player)),
        StatsView(&game.summary()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::Orientation;

    fn board_with_destroyer() -> Board {
        let mut board = Board::new();
        board
            .place(2, Orientation::Horizontal, Coordinate::parse("A1").unwrap())
            .unwrap();
        board
    }

    #[test]
    fn target_view_hides_ships() {
        let mut board = board_with_destroyer();
        board.receive_shot(Coordinate::parse("A1").unwrap());
        board.receive_shot(Coordinate::parse("B1").unwrap());
        let text = TargetView(&board).to_string();
        let row_a = text.lines().nth(1).unwrap();
        let row_b = text.lines().nth(2).unwrap();
        assert!(row_a.starts_with("  A  X  ."));
        assert!(row_b.starts_with("  B  o"));
        assert!(text.lines().skip(1).take(10).all(|l| !l.contains('S')));
    }

    #[test]
    fn fleet_view_shows_ships() {
        let board = board_with_destroyer();
        let text = FleetView(&board).to_string();
        let row_a = text.lines().nth(1).unwrap();
        assert!(row_a.starts_with("  A  S  S  ."));
    }

    #[test]
    fn rows_are_labelled_a_to_j() {
        let text = FleetView(&Board::new()).to_string();
        let labels: String = text
            .lines()
            .skip(1)
            .take(10)
            .filter_map(|l| l.trim_start().chars().next())
            .collect();
        assert_eq!(labels, "ABCDEFGHIJ");
    }

    #[test]
    fn header_has_ten_columns() {
        let board = Board::new();
        let text = TargetView(&board).to_string();
        let header = text.lines().next().unwrap();
        assert!(header.trim_end().ends_with("10"));
        assert_eq!(text.lines().count(), 12);
    }
}
