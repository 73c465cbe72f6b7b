#![cfg(feature = "std")]

//! Interactive terminal client driving a [`GameEngine`] session.

use std::io::{BufRead, Write};

use crate::common::{GameError, Side};
use crate::engine::GameEngine;
use crate::session::{SessionId, SessionStore};
use crate::ui::render_game;

const HELP: &str = "Commands: a coordinate such as B7 to fire, `new` for a new layout, \
`restart` to replay the same layout, `quit` to leave.";

/// Play `session` reading commands from `input` until `quit` or end of input.
pub fn run_terminal<S, R, W>(
    engine: &GameEngine<S>,
    session: &SessionId,
    input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    S: SessionStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", HELP)?;
    let mut lines = input.lines();
    loop {
        let board = engine.with_game(session, |game| render_game(game))?;
        write!(output, "\n{}> ", board)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" | "q" | "exit" => break,
            "help" | "?" => writeln!(output, "{}", HELP)?,
            "new" => {
                engine.new_game(session)?;
                writeln!(output, "New game: both fleets have been placed again.")?;
            }
            "restart" => {
                engine.restart_game(session)?;
                writeln!(output, "Restarted: same fleets, clean boards.")?;
            }
            _ => match engine.fire(session, &line) {
                Ok(resp) => {
                    match resp.shots.player_shot {
                        Some(shot) => writeln!(output, "You fired at {}: {}", shot.coord, shot.result)?,
                        None => writeln!(output, "The game is over. Type `new` or `restart`.")?,
                    }
                    if let Some(shot) = resp.shots.computer_shot {
                        writeln!(output, "Computer fired at {}: {}", shot.coord, shot.result)?;
                    }
                    match resp.state.summary.winner {
                        Some(Side::Player) if resp.shots.player_shot.is_some() => {
                            writeln!(output, "You sank the whole fleet. You win!")?
                        }
                        Some(Side::Computer) if resp.shots.player_shot.is_some() => {
                            writeln!(output, "Your fleet is gone. The computer wins.")?
                        }
                        _ => {}
                    }
                }
                Err(e @ GameError::InvalidCoordinate(_)) => writeln!(output, "{}", e)?,
                Err(e) => return Err(e.into()),
            },
        }
    }
    writeln!(output, "Goodbye.")?;
    Ok(())
}
