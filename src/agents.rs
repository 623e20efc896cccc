/// Differing kinds of agents that can play the game
use crate::algorithms::{choose_move, Strategy};
use crate::boards::Board;
use crate::checkers_errors::*;
use crate::evaluators::Evaluator;
use crate::game_state::GameState;
use crate::pieces::Color;
use crate::positions::Position;
use rand::rngs::SmallRng;
use std::io::{stdout, Write};
use text_io::read;
use tracing::debug;

/// An agent is an object that can play checkers by choosing moves
/// appropriate to a current game state. `play_move` applies exactly one move
/// for the side to move and reports how many positions were examined while
/// choosing it (zero for a human).
pub trait Agent {
    fn play_move(&mut self, state: &mut GameState) -> CheckersResult<u64>;
    fn name(&self) -> String;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn play_move(&mut self, state: &mut GameState) -> CheckersResult<u64> {
        (**self).play_move(state)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

pub struct HumanAgent;

impl Agent for HumanAgent {
    fn play_move(&mut self, state: &mut GameState) -> CheckersResult<u64> {
        println!("Your turn ({}).", state.get_current_player());
        loop {
            print!("From: ");
            stdout().flush()?;
            let from_raw: String = read!();
            print!("To: ");
            stdout().flush()?;
            let to_raw: String = read!();

            let endpoints = from_raw
                .parse::<Position>()
                .and_then(|from| to_raw.parse::<Position>().map(|to| (from, to)));
            let result = endpoints.and_then(|(from, to)| state.player_move(from, to));
            match result {
                Ok(_) => return Ok(0),
                Err(e) => println!("{}", e),
            }
        }
    }

    fn name(&self) -> String {
        "Human".to_string()
    }
}

// ---------------------------------------------
// Bot
// ---------------------------------------------

/// Total pieces on the board at or below which a bot switches from its
/// mid-game to its end-game evaluator.
pub const DEFAULT_ENDGAME_THRESHOLD: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    MidGame,
    EndGame,
}

/// Binds a side, a search strategy, a depth and an evaluator pair. The
/// configuration is validated here, before any search runs.
pub struct Bot {
    color: Color,
    strategy: Strategy,
    depth: u16,
    mid_eval: Evaluator,
    end_eval: Evaluator,
    endgame_threshold: u8,
    level: Option<u8>,
    rng: SmallRng,
}

impl Bot {
    pub fn new(
        color: Color,
        strategy: Strategy,
        depth: u16,
        mid_eval: Evaluator,
        end_eval: Evaluator,
        rng: SmallRng,
    ) -> CheckersResult<Bot> {
        if depth == 0 {
            return Err(CheckersError::InvalidConfiguration(
                "search depth must be positive".to_string(),
            ));
        }
        Ok(Bot {
            color,
            strategy,
            depth,
            mid_eval,
            end_eval,
            endgame_threshold: DEFAULT_ENDGAME_THRESHOLD,
            level: None,
            rng,
        })
    }

    /// The five selectable difficulty levels.
    pub fn from_level(color: Color, level: u8, rng: SmallRng) -> CheckersResult<Bot> {
        use Evaluator::*;
        let bot = match level {
            1 => Bot::new(color, Strategy::Random, 1, PieceValue, PieceValue, rng),
            2 => Bot::new(color, Strategy::Minmax, 1, PieceAndBoard, PieceAndBoard, rng),
            3 => Bot::new(color, Strategy::Minmax, 2, PieceAndBoard, SumOfDist, rng),
            4 => Bot::new(color, Strategy::AlphaBeta, 3, PieceAndRow, FarthestPiece, rng),
            5 => Bot::new(
                color,
                Strategy::AlphaBeta,
                4,
                PieceAndBoardPov,
                FarthestPiece,
                rng,
            ),
            _ => {
                return Err(CheckersError::InvalidConfiguration(format!(
                    "unknown difficulty level {}",
                    level
                )))
            }
        }?;
        Ok(Bot {
            level: Some(level),
            ..bot
        })
    }

    pub fn with_endgame_threshold(mut self, threshold: u8) -> Bot {
        self.endgame_threshold = threshold;
        self
    }

    pub fn phase(&self, board: &Board) -> GamePhase {
        if board.total_pieces() <= self.endgame_threshold {
            GamePhase::EndGame
        } else {
            GamePhase::MidGame
        }
    }

    /// Chooses one move for this bot's side and, when `commit` is set,
    /// applies it to the state. The evaluator is picked from the game phase
    /// once per invocation and used for every leaf of that search. Returns
    /// the number of positions the search visited.
    pub fn step(&mut self, state: &mut GameState, commit: bool) -> CheckersResult<u64> {
        debug_assert_eq!(
            self.color,
            state.get_current_player(),
            "Bot asked to move out of turn"
        );
        let evaluator = match self.phase(state.board()) {
            GamePhase::MidGame => self.mid_eval,
            GamePhase::EndGame => self.end_eval,
        };
        let (mv, nodes) = choose_move(state, self.strategy, self.depth, evaluator, &mut self.rng)?;
        debug!(color = %self.color, mv = %mv, nodes, "bot chose move");
        if commit {
            state.make_move(&mv);
        }
        Ok(nodes)
    }
}

impl Agent for Bot {
    fn play_move(&mut self, state: &mut GameState) -> CheckersResult<u64> {
        self.step(state, true)
    }

    fn name(&self) -> String {
        match self.level {
            Some(level) => format!("{} Bot (Level {})", self.color, level),
            None => format!("{} Bot", self.color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;
    use crate::pieces::Rank;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn test_level_table() {
        let b = Bot::from_level(Color::Red, 1, rng()).unwrap();
        assert_eq!(b.strategy, Strategy::Random);
        assert_eq!(b.depth, 1);

        let b = Bot::from_level(Color::Red, 3, rng()).unwrap();
        assert_eq!(b.strategy, Strategy::Minmax);
        assert_eq!(b.depth, 2);
        assert_eq!(b.mid_eval, Evaluator::PieceAndBoard);
        assert_eq!(b.end_eval, Evaluator::SumOfDist);

        let b = Bot::from_level(Color::Blue, 5, rng()).unwrap();
        assert_eq!(b.strategy, Strategy::AlphaBeta);
        assert_eq!(b.depth, 4);
        assert_eq!(b.mid_eval, Evaluator::PieceAndBoardPov);
        assert_eq!(b.end_eval, Evaluator::FarthestPiece);
        assert_eq!(b.name(), "Blue Bot (Level 5)");
    }

    #[test]
    fn test_bad_configurations_fail_fast() {
        assert!(matches!(
            Bot::from_level(Color::Red, 0, rng()),
            Err(CheckersError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Bot::from_level(Color::Red, 6, rng()),
            Err(CheckersError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Bot::new(
                Color::Red,
                Strategy::Minmax,
                0,
                Evaluator::PieceValue,
                Evaluator::PieceValue,
                rng()
            ),
            Err(CheckersError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_phase_threshold() {
        let bot = Bot::from_level(Color::Blue, 4, rng()).unwrap();
        assert_eq!(bot.phase(&Board::standard_setup()), GamePhase::MidGame);
        let sparse = board![
            (2, 1) => Blue King,
            (5, 4) => Red Man,
        ];
        assert_eq!(bot.phase(&sparse), GamePhase::EndGame);
    }

    #[test]
    fn test_step_commits_and_flips_turn() {
        let mut g = GameState::standard_setup();
        let mut bot = Bot::from_level(Color::Blue, 2, rng()).unwrap();
        let nodes = bot.step(&mut g, true).unwrap();
        assert!(nodes >= 1);
        assert_eq!(g.get_current_player(), Color::Red);
        assert_eq!(g.turn_count(), 1);
    }

    #[test]
    fn test_step_without_commit_leaves_state() {
        let mut g = GameState::standard_setup();
        let before = g.clone();
        let mut bot = Bot::from_level(Color::Blue, 4, rng()).unwrap();
        let nodes = bot.step(&mut g, false).unwrap();
        assert!(nodes >= 1);
        assert_eq!(g, before);
    }

    #[test]
    fn test_step_without_moves_is_an_error() {
        // Red has pieces but no moves; a caller that skips the terminal
        // check gets the contract violation surfaced.
        let b = board![
            (7, 6) => Red Man,
            (6, 5) => Blue Man,
            (6, 7) => Blue Man,
            (5, 4) => Blue Man,
        ];
        let mut g = GameState::new(b, Color::Red);
        let mut bot = Bot::from_level(Color::Red, 2, rng()).unwrap();
        let err = bot.step(&mut g, true).unwrap_err();
        assert!(matches!(err, CheckersError::NoLegalMove(Color::Red)));
    }

    #[test]
    fn test_end_eval_drives_endgame_play() {
        // Two kings chasing one man with the distance evaluator: the chosen
        // move must close in rather than drift.
        let b = board![
            (0, 1) => Blue King,
            (5, 6) => Red King,
        ];
        let mut g = GameState::new(b, Color::Blue);
        let mut bot = Bot::new(
            Color::Blue,
            Strategy::AlphaBeta,
            1,
            Evaluator::PieceValue,
            Evaluator::SumOfDist,
            rng(),
        )
        .unwrap();
        assert_eq!(bot.phase(g.board()), GamePhase::EndGame);
        bot.step(&mut g, true).unwrap();
        // Both available moves leave row 1; the evaluator picks the one
        // closing the file distance.
        let blue_pos = g
            .board()
            .pieces()
            .find(|(_, p)| p.color == Color::Blue && p.rank == Rank::King)
            .map(|(pos, _)| pos)
            .unwrap();
        assert_eq!(blue_pos.row(), 1);
        assert_eq!(blue_pos.col(), 2);
    }
}
