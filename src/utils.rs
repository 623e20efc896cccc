// For testing purposes: Easily creates a board with pieces placed on the
// given (row, col) squares. Not very efficient.
#[macro_export]
macro_rules! board {
    ( $( ($row:expr, $col:expr) => $color:ident $rank:ident ),* $(,)? ) => {
        {
            #[allow(unused_mut)]
            let mut base = $crate::boards::Board::empty();
            $(
                base.set(
                    $crate::positions::Position::from_row_col($row, $col),
                    $crate::pieces::Square::Occupied($crate::pieces::Piece::new(
                        $crate::pieces::Color::$color,
                        $crate::pieces::Rank::$rank,
                    )),
                );
            )*
            base
        }
    };
}
