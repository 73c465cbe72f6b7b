//! Read-only projections of a [`GameState`] for clients rehydrating a view.

use alloc::collections::BTreeMap;

use crate::common::{ShotOutcome, Side};
use crate::coordinate::Coordinate;
use crate::game::{GameState, Phase};

/// Shot and hit totals for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct SideSummary {
    /// Shots this side has fired.
    pub shots: usize,
    /// Hits this side has scored.
    pub hits: usize,
    /// Cells of this side's own fleet still afloat.
    pub remaining_ship_cells: usize,
}

impl SideSummary {
    /// Hits as a whole percentage of shots, 0 before the first shot.
    pub fn accuracy(&self) -> usize {
        if self.shots == 0 {
            0
        } else {
            (self.hits * 100 + self.shots / 2) / self.shots
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub player: SideSummary,
    pub computer: SideSummary,
    pub phase: Phase,
    pub winner: Option<Side>,
}

/// Every recorded shot, keyed by coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct Marks {
    pub player_shots_on_computer: BTreeMap<Coordinate, ShotOutcome>,
    pub computer_shots_on_player: BTreeMap<Coordinate, ShotOutcome>,
}

/// Summary plus marks, as sent after every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct StateSnapshot {
    #[cfg_attr(feature = "std", serde(rename = "state"))]
    pub summary: Summary,
    pub marks: Marks,
}

impl GameState {
    pub fn side_summary(&self, side: Side) -> SideSummary {
        SideSummary {
            shots: self.shots(side),
            hits: self.hits(side),
            remaining_ship_cells: self.remaining_ship_cells(side),
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            player: self.side_summary(Side::Player),
            computer: self.side_summary(Side::Computer),
            phase: self.phase(),
            winner: self.winner(),
        }
    }

    pub fn marks(&self) -> Marks {
        Marks {
            player_shots_on_computer: self.board(Side::Computer).shots().clone(),
            computer_shots_on_player: self.board(Side::Player).shots().clone(),
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            summary: self.summary(),
            marks: self.marks(),
        }
    }
}

impl From<&GameState> for StateSnapshot {
    fn from(game: &GameState) -> Self {
        game.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn fresh_snapshot_is_empty() {
        let mut rng = SmallRng::seed_from_u64(9);
        let game = GameState::new(&mut rng).unwrap();
        let snap = game.snapshot();
        assert_eq!(snap.summary.player.shots, 0);
        assert_eq!(snap.summary.computer.remaining_ship_cells, 10);
        assert_eq!(snap.summary.phase, Phase::PlayerTurn);
        assert_eq!(snap.summary.winner, None);
        assert_eq!(snap.marks, Marks::default());
    }

    #[test]
    fn marks_follow_shots() {
        let mut rng = SmallRng::seed_from_u64(10);
        let mut game = GameState::new(&mut rng).unwrap();
        let target = Coordinate::parse("E5").unwrap();
        let outcome = game.fire(&mut rng, target);
        let snap = game.snapshot();
        let player_shot = outcome.player_shot.unwrap();
        let computer_shot = outcome.computer_shot.unwrap();
        assert_eq!(snap.marks.player_shots_on_computer.get(&target), Some(&player_shot.result));
        assert_eq!(
            snap.marks.computer_shots_on_player.get(&computer_shot.coord),
            Some(&computer_shot.result)
        );
        assert_eq!(snap.summary.player.shots, 1);
        assert_eq!(snap.summary.computer.shots, 1);
    }

    #[test]
    fn accuracy_rounds() {
        let s = SideSummary {
            shots: 3,
            hits: 2,
            remaining_ship_cells: 10,
        };
        assert_eq!(s.accuracy(), 67);
        let none = SideSummary {
            shots: 0,
            hits: 0,
            remaining_ship_cells: 10,
        };
        assert_eq!(none.accuracy(), 0);
    }

    #[test]
    fn json_uses_textual_coordinates() {
        let mut rng = SmallRng::seed_from_u64(12);
        let mut game = GameState::new(&mut rng).unwrap();
        game.fire(&mut rng, Coordinate::parse("J10").unwrap());
        let json = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(json["state"]["phase"], "PLAYER_TURN");
        assert!(json["state"]["winner"].is_null());
        assert_eq!(json["state"]["player"]["shots"], 1);
        assert!(json["state"]["computer"]["remainingShipCells"].is_u64());
        let mark = &json["marks"]["playerShotsOnComputer"]["J10"];
        assert!(mark == "hit" || mark == "miss");
    }
}
