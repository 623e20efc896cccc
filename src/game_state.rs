use crate::boards::*;
use crate::checkers_errors::*;
use crate::moves::*;
use crate::pieces::*;
use crate::positions::*;
use rand::Rng;
use std::fmt::{self, Debug, Display};

// -------------------------------------
// GameState
// ------------------------------------

/// The full game position: board, side to move and move counter.
/// Implements the rules of the game (legal move generation with the
/// forced-capture rule, executing one move forward and backward, promotion,
/// win detection).
#[derive(Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Color,
    turn_count: u16,
}

// Public Interface
impl GameState {
    /// Returns a game with the standard 12-per-side starting layout.
    /// Blue moves first.
    pub fn standard_setup() -> GameState {
        GameState::new(Board::standard_setup(), Color::Blue)
    }

    pub fn new(board: Board, current_player: Color) -> GameState {
        GameState {
            board,
            current_player,
            turn_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn get_current_player(&self) -> Color {
        self.current_player
    }

    pub fn turn_count(&self) -> u16 {
        self.turn_count
    }

    /// Returns the winner, if the game is over: the side to move loses when
    /// it has no pieces left or no legal move. Draws are not detected here;
    /// a caller cutting a game short infers the result from piece counts.
    pub fn winner(&self) -> Option<Color> {
        let to_move = self.current_player;
        if self.board.count(to_move) == 0 || self.gen_moves().is_empty() {
            Some(to_move.opposite())
        } else {
            None
        }
    }

    /// Applies the move matching the given endpoints for the current player.
    /// When two capture chains share both endpoints, the first one in
    /// enumeration order is taken.
    pub fn player_move(&mut self, start: Position, end: Position) -> CheckersResult<Move> {
        let m = self
            .find_player_move(start, end)
            .ok_or_else(|| CheckersError::IllegalMove(format!("{}-{}", start, end)))?;
        self.make_move(&m);
        Ok(m)
    }

    /// Applies `m` after checking it against the current legal move set.
    /// The move is rejected whole; a multi-jump chain is never applied
    /// partially.
    pub fn apply_move(&mut self, m: &Move) -> CheckersResult<()> {
        if !self.gen_moves().contains(m) {
            return Err(CheckersError::IllegalMove(m.to_string()));
        }
        self.make_move(m);
        Ok(())
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Turn: {}  Player: {}\n{}",
            self.turn_count, self.current_player, self.board
        )
    }
}

impl Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// -------------------------------------
// Move generation
// ------------------------------------

impl GameState {
    /// Returns all legal moves for the current player.
    pub fn gen_moves(&self) -> Vec<Move> {
        self.gen_moves_for(self.current_player)
    }

    /// Returns all legal moves for `color`: every maximal capture chain if
    /// any capture exists (captures are forced, over the whole side, not per
    /// piece), otherwise every single diagonal step.
    pub fn gen_moves_for(&self, color: Color) -> Vec<Move> {
        let mut jumps = Vec::new();
        let mut scratch = self.board.clone();
        for (pos, piece) in self.board.pieces() {
            if piece.color != color {
                continue;
            }
            // The moving piece leaves its start square for the whole chain,
            // so a long king chain may land back on it.
            scratch.set(pos, Square::Empty);
            let mut path = vec![pos];
            let mut captures = Vec::new();
            collect_jump_chains(&mut scratch, piece, pos, &mut path, &mut captures, &mut jumps);
            scratch.set(pos, Square::Occupied(piece));
        }
        if !jumps.is_empty() {
            return jumps;
        }

        let mut steps = Vec::new();
        for (pos, piece) in self.board.pieces() {
            if piece.color != color {
                continue;
            }
            for d in piece.step_deltas() {
                if let Some(to) = pos + *d {
                    if self.board.square(to).is_empty() {
                        steps.push(Move::step(piece, pos, to));
                    }
                }
            }
        }
        steps
    }

    fn find_player_move(&self, start: Position, end: Position) -> Option<Move> {
        self.gen_moves()
            .into_iter()
            .find(|m| m.start() == start && m.end() == end)
    }
}

/// Depth-first expansion of capture chains from `from`. Jumps are taken on
/// the scratch board and rolled back after the recursion, so one board
/// instance serves the whole enumeration. A chain extends until no further
/// jump is available from the landing square, or until a Man lands on its
/// promotion row (promotion ends the move); only such maximal chains are
/// emitted.
fn collect_jump_chains(
    board: &mut Board,
    piece: Piece,
    from: Position,
    path: &mut Vec<Position>,
    captures: &mut Vec<(Position, Piece)>,
    out: &mut Vec<Move>,
) {
    let mut extended = false;
    for d in piece.jump_deltas() {
        let over = match from + *d {
            Some(p) => p,
            None => continue,
        };
        let land = match from + *d * 2 {
            Some(p) => p,
            None => continue,
        };
        let victim = match board.piece_at(over) {
            Some(v) if v.color != piece.color => v,
            _ => continue,
        };
        if !board.square(land).is_empty() {
            continue;
        }

        board.set(over, Square::Empty);
        path.push(land);
        captures.push((over, victim));

        let promotes = !piece.is_king() && land.row() == piece.color.promotion_row();
        if promotes {
            out.push(Move::chain(piece, path.clone(), captures.clone()));
        } else {
            collect_jump_chains(board, piece, land, path, captures, out);
        }

        captures.pop();
        path.pop();
        board.set(over, Square::Occupied(victim));
        extended = true;
    }
    if !extended && path.len() > 1 {
        out.push(Move::chain(piece, path.clone(), captures.clone()));
    }
}

// -------------------------------------
// Making and unmaking moves
// ------------------------------------

impl GameState {
    /// Makes a move on the board without checking legality. The search and
    /// `apply_move` both funnel through here; external callers go through
    /// `apply_move` or `player_move` instead.
    pub fn make_move(&mut self, m: &Move) {
        debug_assert_eq!(
            m.piece.color, self.current_player,
            "Move of the wrong color applied: {}",
            m
        );
        self.board.set(m.start(), Square::Empty);
        for (pos, _) in &m.captures {
            self.board.set(*pos, Square::Empty);
        }
        let landed = if !m.piece.is_king() && m.end().row() == m.piece.color.promotion_row() {
            m.piece.promoted()
        } else {
            m.piece
        };
        self.board.set(m.end(), Square::Occupied(landed));
        self.advance_turn();
    }

    /// Reverse operation to `make_move`. Restores the moving piece at its
    /// start square with its pre-move rank (undoing a promotion) and puts
    /// every captured piece back.
    pub fn undo_move(&mut self, m: &Move) {
        self.deadvance_turn();
        self.board.set(m.end(), Square::Empty);
        self.board.set(m.start(), Square::Occupied(m.piece));
        for (pos, victim) in &m.captures {
            self.board.set(*pos, Square::Occupied(*victim));
        }
    }

    pub fn play_random_turn<R: Rng>(&mut self, rng: &mut R) -> CheckersResult<Move> {
        use rand::seq::SliceRandom;
        let moves = self.gen_moves();
        let mv = moves
            .choose(rng)
            .ok_or(CheckersError::NoLegalMove(self.current_player))?
            .clone();
        self.make_move(&mv);
        Ok(mv)
    }

    fn advance_turn(&mut self) {
        self.turn_count += 1;
        self.flip_color();
    }

    fn deadvance_turn(&mut self) {
        self.turn_count -= 1;
        self.flip_color();
    }

    fn flip_color(&mut self) {
        self.current_player = self.current_player.opposite();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rc(row: u8, col: u8) -> Position {
        Position::from_row_col(row, col)
    }

    #[test]
    fn test_standard_setup() {
        let g = GameState::standard_setup();
        assert_eq!(g.get_current_player(), Color::Blue);
        assert_eq!(g.turn_count(), 0);
        assert_eq!(g.winner(), None);
        // Each of the four Blue men on row 2 has two forward steps, except
        // the one on the h-file.
        let moves = g.gen_moves();
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| !m.is_jump()));
        assert!(moves.iter().all(|m| m.end().row() == 3));
    }

    #[test]
    fn test_forced_capture_suppresses_steps() {
        let b = board![
            (2, 1) => Blue Man,
            (3, 2) => Red Man,
            (2, 5) => Blue Man,
        ];
        let g = GameState::new(b, Color::Blue);
        let moves = g.gen_moves();
        // The man on (2,5) could step, but the capture on the other flank
        // is forced for the whole side.
        assert!(moves.iter().all(|m| m.is_jump()));
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].path, vec![rc(2, 1), rc(4, 3)]);
    }

    #[test]
    fn test_double_jump_chain() {
        let b = board![
            (2, 1) => Blue Man,
            (3, 2) => Red Man,
            (5, 4) => Red Man,
        ];
        let g = GameState::new(b, Color::Blue);
        let moves = g.gen_moves();
        // The chain must be taken whole; the single-jump prefix is not a
        // legal alternative.
        assert_eq!(moves.len(), 1);
        let m = &moves[0];
        assert_eq!(m.path, vec![rc(2, 1), rc(4, 3), rc(6, 5)]);
        assert_eq!(m.captures.len(), 2);
        assert_eq!(m.captures[0].0, rc(3, 2));
        assert_eq!(m.captures[1].0, rc(5, 4));
    }

    #[test]
    fn test_men_capture_backward() {
        let b = board![
            (4, 3) => Blue Man,
            (3, 2) => Red Man,
        ];
        let g = GameState::new(b, Color::Blue);
        let moves = g.gen_moves();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].path, vec![rc(4, 3), rc(2, 1)]);
    }

    #[test]
    fn test_men_never_step_backward() {
        let b = board![(4, 3) => Blue Man];
        let g = GameState::new(b, Color::Blue);
        let moves = g.gen_moves();
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.end().row() == 5));
    }

    #[test]
    fn test_kings_step_all_directions() {
        let b = board![(4, 3) => Red King];
        let g = GameState::new(b, Color::Red);
        assert_eq!(g.gen_moves().len(), 4);
    }

    #[test]
    fn test_king_jumps_king() {
        let b = board![
            (4, 3) => Red King,
            (3, 2) => Blue King,
        ];
        let g = GameState::new(b, Color::Red);
        let moves = g.gen_moves();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].path, vec![rc(4, 3), rc(2, 1)]);
    }

    #[test]
    fn test_promotion_on_step() {
        let b = board![(6, 1) => Blue Man];
        let mut g = GameState::new(b, Color::Blue);
        let mv = g.player_move(rc(6, 1), rc(7, 2)).unwrap();
        assert_eq!(
            g.board().piece_at(rc(7, 2)),
            Some(Piece::new(Color::Blue, Rank::King))
        );
        // Unmaking the move restores the man.
        g.undo_move(&mv);
        assert_eq!(
            g.board().piece_at(rc(6, 1)),
            Some(Piece::new(Color::Blue, Rank::Man))
        );
    }

    #[test]
    fn test_promotion_ends_jump_chain() {
        // After promoting on (7,4) the new king could jump backward over
        // (6,5), but the move ends at the promotion square.
        let b = board![
            (5, 2) => Blue Man,
            (6, 3) => Red Man,
            (6, 5) => Red Man,
        ];
        let g = GameState::new(b, Color::Blue);
        let moves = g.gen_moves();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].path, vec![rc(5, 2), rc(7, 4)]);
        assert_eq!(moves[0].captures.len(), 1);
    }

    #[test]
    fn test_king_never_demotes() {
        let b = board![(7, 2) => Blue King];
        let mut g = GameState::new(b, Color::Blue);
        g.player_move(rc(7, 2), rc(6, 1)).unwrap();
        assert!(g.board().piece_at(rc(6, 1)).unwrap().is_king());
    }

    #[test]
    fn test_winner_no_pieces() {
        let b = board![(0, 1) => Blue Man];
        let g = GameState::new(b, Color::Red);
        assert_eq!(g.winner(), Some(Color::Blue));
    }

    #[test]
    fn test_winner_no_moves() {
        // Blue's only man has both steps blocked, the one in-board jump
        // landing square is occupied, and the other jump leaves the board.
        let b = board![
            (0, 1) => Blue Man,
            (1, 0) => Red Man,
            (1, 2) => Red Man,
            (2, 3) => Red Man,
        ];
        let g = GameState::new(b, Color::Blue);
        assert!(g.gen_moves().is_empty());
        assert_eq!(g.winner(), Some(Color::Red));
    }

    #[test]
    fn test_apply_move_rejects_illegal() {
        let mut g = GameState::standard_setup();
        let bogus = Move::step(
            Piece::new(Color::Blue, Rank::Man),
            rc(2, 1),
            rc(4, 1),
        );
        let err = g.apply_move(&bogus).unwrap_err();
        assert!(matches!(err, CheckersError::IllegalMove(_)));
        // The state is untouched.
        assert_eq!(g, GameState::standard_setup());
    }

    #[test]
    fn test_player_move_rejects_wrong_side() {
        let mut g = GameState::standard_setup();
        let err = g.player_move(rc(5, 0), rc(4, 1)).unwrap_err();
        assert!(matches!(err, CheckersError::IllegalMove(_)));
    }

    #[test]
    fn test_make_undo_random_moves() {
        let mut g = GameState::standard_setup();
        let rng = &mut SmallRng::seed_from_u64(17);

        for _ in 0..40 {
            if g.winner().is_some() {
                break;
            }
            let prev_g = g.clone();
            let mv = g.play_random_turn(rng).unwrap();
            g.undo_move(&mv);
            assert_eq!(g, prev_g, "\nCouldn't undo move {}\n", mv);

            g.make_move(&mv);
        }
    }

    #[test]
    fn test_board_invariants_hold_over_random_play() {
        let mut g = GameState::standard_setup();
        let rng = &mut SmallRng::seed_from_u64(99);

        for _ in 0..120 {
            if g.winner().is_some() {
                break;
            }
            g.play_random_turn(rng).unwrap();
            assert!(g.board().pieces().all(|(pos, _)| pos.is_dark()));
            assert!(g.board().count(Color::Blue) <= PIECES_PER_SIDE);
            assert!(g.board().count(Color::Red) <= PIECES_PER_SIDE);
        }
    }
}
