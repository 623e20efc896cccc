use crate::agents::Agent;
use crate::boards::Board;
use crate::checkers_errors::*;
use crate::game_state::GameState;
use crate::pieces::Color;
use std::fmt::{self, Display};
use std::io;
use tracing::info;

/// Applied moves (plies) after which a match is cut short and the result is
/// inferred from piece counts.
pub const MOVE_CAP: u16 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Color),
    Draw,
}

impl Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Winner(Color::Red) => write!(f, "RED WINS!"),
            GameOutcome::Winner(Color::Blue) => write!(f, "BLUE WINS!"),
            GameOutcome::Draw => write!(f, "DRAW!"),
        }
    }
}

/// The rules engine never declares a draw; a cut-short match is decided by
/// whoever kept more pieces.
pub fn outcome_by_count(board: &Board) -> GameOutcome {
    use std::cmp::Ordering;
    match board.count(Color::Red).cmp(&board.count(Color::Blue)) {
        Ordering::Greater => GameOutcome::Winner(Color::Red),
        Ordering::Less => GameOutcome::Winner(Color::Blue),
        Ordering::Equal => GameOutcome::Draw,
    }
}

pub struct Game<A1: Agent, A2: Agent> {
    blue: A1,
    red: A2,
    state: GameState,
}

impl<A1: Agent, A2: Agent> Game<A1, A2> {
    pub fn new(blue: A1, red: A2) -> Game<A1, A2> {
        Game {
            blue,
            red,
            state: GameState::standard_setup(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Alternates the two agents until one side wins or the move cap fires.
    /// Every move chosen by a searching agent is appended to `log` with its
    /// node count, in the shape the result file expects.
    pub fn play(&mut self, log: &mut dyn io::Write) -> CheckersResult<GameOutcome> {
        let mut move_count = 0u32;
        loop {
            if let Some(w) = self.state.winner() {
                info!(winner = %w, "game over");
                return Ok(GameOutcome::Winner(w));
            }
            if self.state.turn_count() >= MOVE_CAP {
                let outcome = outcome_by_count(self.state.board());
                info!(%outcome, "move cap reached");
                return Ok(outcome);
            }

            println!("{}", self.state);
            let (name, nodes) = match self.state.get_current_player() {
                Color::Blue => (self.blue.name(), self.blue.play_move(&mut self.state)?),
                Color::Red => (self.red.name(), self.red.play_move(&mut self.state)?),
            };
            // Human moves report zero nodes and stay out of the log, as only
            // searched moves carry an instrumentation count.
            if nodes > 0 {
                move_count += 1;
                writeln!(log, "Move {}: {} explored {} nodes", move_count, name, nodes)?;
                log.flush()?;
            }
        }
    }
}
