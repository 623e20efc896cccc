use crate::checkers_errors::*;
use std::fmt::{self, Display};
use std::ops;
use std::str::FromStr;

// Board positions on the 8x8 grid.
//
// Numbered as follows:
//
//     a  b  c  d  e  f  g  h
//   ---------------------------
// 8 | 0  1  2  3  4  5  6  7  | 8
// 7 | 8  9  10 11 12 13 14 15 | 7
// 6 | 16 17 18 19 20 21 22 23 | 6
// 5 | 24 25 26 27 28 29 30 31 | 5
// 4 | 32 33 34 35 36 37 38 39 | 4
// 3 | 40 41 42 43 44 45 46 47 | 3
// 2 | 48 49 50 51 52 53 54 55 | 2
// 1 | 56 57 58 59 60 61 62 63 | 1
//   ---------------------------
//    a  b  c  d  e  f  g  h
//
// Rows count from 0 at the top; Blue advances toward higher rows, Red toward
// lower ones. Play happens entirely on the dark squares (row + col odd).
//
// ---------------------------------------------
// Positions
// ---------------------------------------------

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position(u8);

impl From<u8> for Position {
    fn from(u: u8) -> Self {
        debug_assert!(u < 64, "Invalid position: {}", u);
        Position(u)
    }
}

impl From<usize> for Position {
    fn from(u: usize) -> Self {
        (u as u8).into()
    }
}

impl FromStr for Position {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Error is rather big, so we use a closure to avoid copies
        let err_closure = || CheckersError::InvalidPosition(s.to_string());
        let mut chars = s.chars();

        let col = chars.next().ok_or_else(err_closure)?;
        let row = chars
            .next()
            .map(|r| r.to_digit(10))
            .flatten()
            .ok_or_else(err_closure)?;

        // We need to catch invalid early rows, else we will have a panic on unsigned integer underflow
        //    Too many characters || row is invalid
        if chars.next().is_some() || row == 0 || row > 8 {
            return Err(err_closure());
        }

        // number part v               v letter part
        let pos = ((8 - row) * 8) as i16 + col as i16 - 'a' as i16;
        if pos < 0 || pos >= 8 * 8 {
            Err(err_closure())
        } else {
            Ok(Position::from(pos as u8))
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_row_col();
        write!(
            f,
            "{}{}",
            ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'][col as usize],
            8 - row,
        )
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_row_col();
        write!(f, "({},{})", row, col)
    }
}

pub struct PositionIterator(u8);

impl Iterator for PositionIterator {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 > 63 {
            None
        } else {
            self.0 = self.0 + 1u8;
            Some((self.0 - 1).into())
        }
    }
}

impl Position {
    /// Returns row and col from position.
    /// Example: Position 63 (h1 on the printed board) is mapped to (7,7)
    pub const fn to_row_col(self) -> (u8, u8) {
        (self.0 / 8, self.0 % 8)
    }

    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Transforms a row and a col to Position on the board.
    /// Row and col must correspond to a legal board position,
    /// else the returned value also doesn't correspond to a legal board position.
    pub fn from_row_col(row: u8, col: u8) -> Position {
        debug_assert!(Position::in_board(row as i16, col as i16));
        (row * 8 + col).into()
    }

    /// Checks if row and col belong to a legal board position.
    pub const fn in_board(row: i16, col: i16) -> bool {
        row >= 0 && col >= 0 && row < 8 && col < 8
    }

    /// The 32 squares reachable by diagonal play. Pieces only ever stand on
    /// these.
    pub const fn is_dark(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    /// Allows to iterate over all positions on the board
    pub fn all_positions() -> PositionIterator {
        PositionIterator(0)
    }
}

impl<T> ops::Index<Position> for [T; 64] {
    type Output = T;

    fn index(&self, index: Position) -> &T {
        &self[index.0 as usize]
    }
}

impl<T> ops::IndexMut<Position> for [T; 64] {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        &mut self[index.0 as usize]
    }
}

// ---------------------------------------------
// Deltas
// ---------------------------------------------

/// A signed (row, col) offset. The four diagonal units are the only deltas
/// checkers movement is built from; a jump is the doubled delta.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Delta(pub i8, pub i8);

pub const ALL_DIAGONALS: [Delta; 4] = [Delta(-1, -1), Delta(-1, 1), Delta(1, -1), Delta(1, 1)];
pub const BLUE_FORWARD: [Delta; 2] = [Delta(1, -1), Delta(1, 1)];
pub const RED_FORWARD: [Delta; 2] = [Delta(-1, -1), Delta(-1, 1)];

impl_op_ex!(*|a: &Delta, b: &i8| -> Delta { Delta(a.0 * b, a.1 * b) });

impl_op_ex!(+ |a: &Position, b: &Delta| -> Option<Position> {
    let row = a.row() as i16 + b.0 as i16;
    let col = a.col() as i16 + b.1 as i16;
    if Position::in_board(row, col) {
        Some(Position::from_row_col(row as u8, col as u8))
    } else {
        None
    }
});
