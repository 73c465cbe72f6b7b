//! Game state and turn resolution.
//!
//! A [`GameState`] holds both boards, the four shot/hit counters and the
//! coarse phase. The player's shot and the computer's counter-shot are
//! resolved together in [`GameState::fire`]; there is no separate computer
//! phase.

use rand::Rng;

use crate::ai;
use crate::board::Board;
use crate::common::{BoardError, ShotOutcome, Side};
use crate::config::{BOARD_CELLS, TOTAL_SHIP_CELLS};
use crate::coordinate::Coordinate;

/// Coarse state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Phase {
    PlayerTurn,
    GameOver,
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Phase::PlayerTurn => f.write_str("PLAYER_TURN"),
            Phase::GameOver => f.write_str("GAME_OVER"),
        }
    }
}

/// A resolved shot: where it landed and what it hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotRecord {
    pub coord: Coordinate,
    pub result: ShotOutcome,
}

/// Shots resolved by one call to [`GameState::fire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct FireOutcome {
    /// `None` when the game was already over.
    pub player_shot: Option<ShotRecord>,
    /// `None` when the player's shot ended the game or was a refire.
    pub computer_shot: Option<ShotRecord>,
}

/// Full game record for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct GameState {
    /// Player's fleet; shots recorded here were fired by the computer.
    player_board: Board,
    /// Computer's fleet; shots recorded here were fired by the player.
    computer_board: Board,
    player_shot_count: usize,
    player_hit_count: usize,
    computer_shot_count: usize,
    computer_hit_count: usize,
    phase: Phase,
    winner: Option<Side>,
}

impl GameState {
    /// Start a fresh game with both fleets placed at random.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, BoardError> {
        let player_board = Board::with_random_fleet(rng)?;
        let computer_board = Board::with_random_fleet(rng)?;
        Ok(Self::from_boards(player_board, computer_board))
    }

    /// Start a game over fleets placed by the caller. Any recorded shots
    /// on the boards are dropped.
    pub fn from_boards(mut player_board: Board, mut computer_board: Board) -> Self {
        player_board.clear_shots();
        computer_board.clear_shots();
        GameState {
            player_board,
            computer_board,
            player_shot_count: 0,
            player_hit_count: 0,
            computer_shot_count: 0,
            computer_hit_count: 0,
            phase: Phase::PlayerTurn,
            winner: None,
        }
    }

    /// Keep both fleets where they are and clear everything else.
    pub fn restart(&mut self) {
        self.player_board.clear_shots();
        self.computer_board.clear_shots();
        self.player_shot_count = 0;
        self.player_hit_count = 0;
        self.computer_shot_count = 0;
        self.computer_hit_count = 0;
        self.phase = Phase::PlayerTurn;
        self.winner = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// The board holding `side`'s fleet.
    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::Player => &self.player_board,
            Side::Computer => &self.computer_board,
        }
    }

    /// Shots fired by `side`.
    pub fn shots(&self, side: Side) -> usize {
        match side {
            Side::Player => self.player_shot_count,
            Side::Computer => self.computer_shot_count,
        }
    }

    /// Hits scored by `side`.
    pub fn hits(&self, side: Side) -> usize {
        match side {
            Side::Player => self.player_hit_count,
            Side::Computer => self.computer_hit_count,
        }
    }

    /// Cells of `side`'s fleet not yet hit by the opponent.
    pub fn remaining_ship_cells(&self, side: Side) -> usize {
        self.board(side)
            .total_ship_cells()
            .saturating_sub(self.hits(side.opponent()))
    }

    /// Resolve the player's shot at `coord` and, unless that ends the game,
    /// the computer's counter-shot.
    ///
    /// Firing after game over resolves nothing. Firing at a cell already shot
    /// returns the stored outcome without touching counters and without a
    /// counter-shot.
    pub fn fire<R: Rng + ?Sized>(&mut self, rng: &mut R, coord: Coordinate) -> FireOutcome {
        if self.is_over() {
            return FireOutcome::default();
        }
        if let Some(result) = self.computer_board.shot_at(coord) {
            log::debug!("player refired at {} ({})", coord, result);
            return FireOutcome {
                player_shot: Some(ShotRecord { coord, result }),
                computer_shot: None,
            };
        }

        let player_shot = self.resolve_shot(Side::Player, coord);
        self.evaluate_end();

        let computer_shot = if self.is_over() {
            None
        } else {
            let shot = self.computer_turn(rng);
            self.evaluate_end();
            shot
        };

        FireOutcome {
            player_shot: Some(player_shot),
            computer_shot,
        }
    }

    fn computer_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<ShotRecord> {
        match ai::random_target(rng, &self.player_board) {
            Some(coord) => Some(self.resolve_shot(Side::Computer, coord)),
            None => {
                log::warn!("computer has no cell left to fire at");
                None
            }
        }
    }

    /// Record a fresh shot by `shooter`. The caller guarantees `coord` has
    /// not been shot on the target board.
    fn resolve_shot(&mut self, shooter: Side, coord: Coordinate) -> ShotRecord {
        let (board, shots, hits) = match shooter {
            Side::Player => (
                &mut self.computer_board,
                &mut self.player_shot_count,
                &mut self.player_hit_count,
            ),
            Side::Computer => (
                &mut self.player_board,
                &mut self.computer_shot_count,
                &mut self.computer_hit_count,
            ),
        };
        *shots += 1;
        let result = board.receive_shot(coord);
        if result.is_hit() {
            *hits += 1;
        }
        log::debug!("{} fired at {}: {}", shooter, coord, result);
        ShotRecord { coord, result }
    }

    /// Move to game over once either fleet has no cells left. The computer's
    /// fleet is checked first.
    fn evaluate_end(&mut self) {
        if self.is_over() {
            return;
        }
        let winner = if self.remaining_ship_cells(Side::Computer) == 0 {
            Side::Player
        } else if self.remaining_ship_cells(Side::Player) == 0 {
            Side::Computer
        } else {
            return;
        };
        log::info!(
            "game over: {} wins after {} player shots",
            winner,
            self.player_shot_count
        );
        self.phase = Phase::GameOver;
        self.winner = Some(winner);
    }

    /// Whether the record satisfies every structural invariant: standard
    /// fleets, counters matching the shot records, and a winner present
    /// exactly when the game is over.
    pub fn is_consistent(&self) -> bool {
        let fleets_ok = [&self.player_board, &self.computer_board]
            .iter()
            .all(|b| b.has_standard_fleet() && b.total_ship_cells() == TOTAL_SHIP_CELLS);
        if !fleets_ok {
            return false;
        }

        let counters_ok = [Side::Player, Side::Computer].iter().all(|&side| {
            let target = self.board(side.opponent());
            self.shots(side) == target.shots().len()
                && self.hits(side) == target.hits_taken()
                && self.hits(side) <= self.shots(side)
                && self.shots(side) <= BOARD_CELLS
        });
        if !counters_ok {
            return false;
        }

        match (self.phase, self.winner) {
            (Phase::PlayerTurn, None) => {
                self.remaining_ship_cells(Side::Player) > 0
                    && self.remaining_ship_cells(Side::Computer) > 0
            }
            (Phase::GameOver, Some(winner)) => self.remaining_ship_cells(winner.opponent()) == 0,
            _ => false,
        }
    }
}
