use crate::positions::{Delta, ALL_DIAGONALS, BLUE_FORWARD, RED_FORWARD};
use std::fmt::{self, Display};

// ---------------------------------------------
// Pieces
// ---------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    /// The row a Man of this color promotes on. Blue advances toward row 7,
    /// Red toward row 0.
    pub const fn promotion_row(&self) -> u8 {
        match self {
            Color::Blue => 7,
            Color::Red => 0,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Blue => write!(f, "Blue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub fn new(color: Color, rank: Rank) -> Piece {
        Piece { color, rank }
    }

    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    /// The same piece one promotion later. Kings stay kings.
    pub fn promoted(&self) -> Piece {
        Piece {
            color: self.color,
            rank: Rank::King,
        }
    }

    /// Directions this piece may take a simple (non-capturing) step in:
    /// forward-only for Men, all four diagonals for Kings.
    pub fn step_deltas(&self) -> &'static [Delta] {
        match (self.rank, self.color) {
            (Rank::King, _) => &ALL_DIAGONALS,
            (Rank::Man, Color::Blue) => &BLUE_FORWARD,
            (Rank::Man, Color::Red) => &RED_FORWARD,
        }
    }

    /// Directions this piece may jump in. Men may jump backward in this
    /// variant, so every piece jumps on all four diagonals.
    pub fn jump_deltas(&self) -> &'static [Delta] {
        &ALL_DIAGONALS
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match (self.color, self.rank) {
            (Color::Blue, Rank::Man) => '\u{26c0}',
            (Color::Blue, Rank::King) => '\u{26c1}',
            (Color::Red, Rank::Man) => '\u{26c2}',
            (Color::Red, Rank::King) => '\u{26c3}',
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Empty,
    Occupied(Piece),
}

impl Square {
    pub fn piece(&self) -> Option<Piece> {
        match self {
            Square::Empty => None,
            Square::Occupied(p) => Some(*p),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Square::Empty)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Square::Empty => write!(f, "."),
            Square::Occupied(p) => write!(f, "{}", p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Color::Red.opposite(), Color::Blue);
        assert_eq!(Color::Blue.opposite(), Color::Red);
    }

    #[test]
    fn test_promotion_is_idempotent() {
        let man = Piece::new(Color::Blue, Rank::Man);
        let king = man.promoted();
        assert!(king.is_king());
        assert_eq!(king.promoted(), king);
    }

    #[test]
    fn test_men_step_forward_only() {
        let blue = Piece::new(Color::Blue, Rank::Man);
        assert!(blue.step_deltas().iter().all(|d| d.0 == 1));
        let red = Piece::new(Color::Red, Rank::Man);
        assert!(red.step_deltas().iter().all(|d| d.0 == -1));
        let king = Piece::new(Color::Red, Rank::King);
        assert_eq!(king.step_deltas().len(), 4);
    }

    #[test]
    fn test_all_pieces_jump_all_diagonals() {
        let man = Piece::new(Color::Blue, Rank::Man);
        assert_eq!(man.jump_deltas().len(), 4);
    }
}
