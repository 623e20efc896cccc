use crate::boards::Board;
use crate::checkers_errors::*;
use crate::pieces::{Color, Piece, Rank};
use crate::positions::Position;
use lazy_static::lazy_static;
use std::cmp::max;
use std::str::FromStr;

// ---------------------------------------------
// Evaluators
// ---------------------------------------------

pub const MAN_VALUE: i32 = 1;
pub const KING_VALUE: i32 = 3;

/// A positional scoring function: maps a board and a point of view to a
/// number, higher is better for that point of view. The set is closed and
/// resolved once at bot construction; an unknown name fails there, never
/// mid-search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluator {
    /// Material only: Men count 1, Kings 3.
    PieceValue,
    /// Material plus a per-cell weight (advance + centre), table oriented
    /// for Blue regardless of the point of view.
    PieceAndBoard,
    /// Material plus each own piece's advancement toward promotion.
    PieceAndRow,
    /// `PieceAndBoard` with the weight table mirrored for Red, so both
    /// colors are rewarded for advancing toward the opponent.
    PieceAndBoardPov,
    /// Negative summed distance to the nearest enemy piece. End-game: forces
    /// contact instead of stalling.
    SumOfDist,
    /// Material plus the advancement of the single farthest own piece.
    /// End-game tie-breaker in sparse positions.
    FarthestPiece,
}

impl FromStr for Evaluator {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "piece2val" => Ok(Evaluator::PieceValue),
            "piece_and_board" => Ok(Evaluator::PieceAndBoard),
            "piece_and_row" => Ok(Evaluator::PieceAndRow),
            "piece_and_board_pov" => Ok(Evaluator::PieceAndBoardPov),
            "sum_of_dist" => Ok(Evaluator::SumOfDist),
            "farthest_piece" => Ok(Evaluator::FarthestPiece),
            _ => Err(CheckersError::InvalidConfiguration(format!(
                "unknown evaluator '{}'",
                s
            ))),
        }
    }
}

impl Evaluator {
    pub fn score(&self, board: &Board, pov: Color) -> i32 {
        match self {
            Evaluator::PieceValue => material(board, pov),
            Evaluator::PieceAndBoard => positional(board, pov, &BLUE_WEIGHTS),
            Evaluator::PieceAndRow => piece_and_row(board, pov),
            Evaluator::PieceAndBoardPov => match pov {
                Color::Blue => positional(board, pov, &BLUE_WEIGHTS),
                Color::Red => positional(board, pov, &RED_WEIGHTS),
            },
            Evaluator::SumOfDist => sum_of_dist(board, pov),
            Evaluator::FarthestPiece => farthest_piece(board, pov),
        }
    }
}

type WeightTable = [i32; 64];

lazy_static! {
    static ref BLUE_WEIGHTS: WeightTable = weight_table(Color::Blue);
    static ref RED_WEIGHTS: WeightTable = weight_table(Color::Red);
}

/// Cell weights as seen by `pov`: rows count up toward the opponent's back
/// row, columns toward the centre. The Red table is the Blue table mirrored
/// row-wise.
fn weight_table(pov: Color) -> WeightTable {
    let mut t = [0; 64];
    for pos in Position::all_positions() {
        let centre = pos.col().min(7 - pos.col()) as i32;
        t[pos] = advancement(pov, pos.row()) as i32 + centre;
    }
    t
}

/// How many rows `color` has advanced a piece standing on `row`.
fn advancement(color: Color, row: u8) -> u8 {
    match color {
        Color::Blue => row,
        Color::Red => 7 - row,
    }
}

fn piece_value(piece: Piece) -> i32 {
    match piece.rank {
        Rank::Man => MAN_VALUE,
        Rank::King => KING_VALUE,
    }
}

fn material(board: &Board, pov: Color) -> i32 {
    board
        .pieces()
        .map(|(_, p)| {
            if p.color == pov {
                piece_value(p)
            } else {
                -piece_value(p)
            }
        })
        .sum()
}

fn positional(board: &Board, pov: Color, weights: &WeightTable) -> i32 {
    board
        .pieces()
        .map(|(pos, p)| {
            if p.color == pov {
                4 * piece_value(p) + weights[pos]
            } else {
                -4 * piece_value(p)
            }
        })
        .sum()
}

fn piece_and_row(board: &Board, pov: Color) -> i32 {
    board
        .pieces()
        .map(|(pos, p)| {
            if p.color == pov {
                8 * piece_value(p) + advancement(p.color, pos.row()) as i32
            } else {
                -8 * piece_value(p)
            }
        })
        .sum()
}

fn chebyshev(a: Position, b: Position) -> i32 {
    let dr = (a.row() as i32 - b.row() as i32).abs();
    let dc = (a.col() as i32 - b.col() as i32).abs();
    max(dr, dc)
}

fn sum_of_dist(board: &Board, pov: Color) -> i32 {
    let enemies: Vec<Position> = board
        .pieces()
        .filter(|(_, p)| p.color != pov)
        .map(|(pos, _)| pos)
        .collect();
    if enemies.is_empty() {
        return 0;
    }
    -board
        .pieces()
        .filter(|(_, p)| p.color == pov)
        .map(|(pos, _)| {
            enemies
                .iter()
                .map(|e| chebyshev(pos, *e))
                .min()
                .unwrap_or(0)
        })
        .sum::<i32>()
}

fn farthest_piece(board: &Board, pov: Color) -> i32 {
    let farthest = board
        .pieces()
        .filter(|(_, p)| p.color == pov)
        .map(|(pos, p)| {
            if p.is_king() {
                7
            } else {
                advancement(p.color, pos.row()) as i32
            }
        })
        .max()
        .unwrap_or(0);
    4 * material(board, pov) + farthest
}
