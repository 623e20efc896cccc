use crate::pieces::*;
/// Describing the moves that can be done on a checkerboard.
use crate::positions::*;
use std::fmt;

/// A full move: either a single diagonal step (path of length 2, no
/// captures) or a multi-jump chain (one capture per path segment). The chain
/// is one indivisible move; the captured pieces are recorded with their
/// positions so the move can be applied atomically and undone exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub path: Vec<Position>,
    pub captures: Vec<(Position, Piece)>,
    /// The moving piece as it stood before the move, pre-promotion.
    pub piece: Piece,
}

impl Move {
    pub fn step(piece: Piece, from: Position, to: Position) -> Self {
        Move {
            path: vec![from, to],
            captures: Vec::new(),
            piece,
        }
    }

    pub fn chain(piece: Piece, path: Vec<Position>, captures: Vec<(Position, Piece)>) -> Self {
        debug_assert!(path.len() >= 2 && captures.len() == path.len() - 1);
        Move {
            path,
            captures,
            piece,
        }
    }

    pub fn start(&self) -> Position {
        self.path[0]
    }

    pub fn end(&self) -> Position {
        self.path[self.path.len() - 1]
    }

    pub fn is_jump(&self) -> bool {
        !self.captures.is_empty()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.piece.is_king() {
            write!(f, "K")?;
        }
        let sep = if self.is_jump() { "x" } else { "-" };
        for (i, pos) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", sep)?;
            }
            write!(f, "{}", pos)?;
        }
        Ok(())
    }
}
