use crate::pieces::Color;
use thiserror::Error;

// ---------------------------------------------
// Error Handling
// ---------------------------------------------

/// Everything that can go wrong when driving the engine. The first three
/// variants are contract violations: an illegal move is reported back to the
/// caller and never silently corrected, and a bad bot configuration fails at
/// construction, before any search has started.
#[derive(Debug, Error)]
pub enum CheckersError {
    #[error("illegal move: {0} is not in the current legal move set")]
    IllegalMove(String),
    #[error("no legal move available for {0}")]
    NoLegalMove(Color),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type CheckersResult<T> = std::result::Result<T, CheckersError>;
