use crate::checkers_errors::*;
use crate::evaluators::Evaluator;
use crate::game_state::GameState;
use crate::moves::Move;
use crate::pieces::Color;
use rand::Rng;
use std::cmp::{max, min};
use std::str::FromStr;

/// Score of a position where the side to move has already lost. Large
/// enough to dominate every evaluator, small enough to stay clear of
/// integer overflow when negated or compared.
const WIN_SCORE: i32 = 1_000_000;

// ---------------------------------------------
// Search strategies
// ---------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Uniform choice among the legal moves; the only non-deterministic
    /// strategy, and only through the injected RNG.
    Random,
    /// Depth-limited minimax without pruning.
    Minmax,
    /// Minimax with alpha-beta pruning. Same chosen move and score as
    /// `Minmax`, never more visited nodes.
    AlphaBeta,
}

impl FromStr for Strategy {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Strategy::Random),
            "minmax" => Ok(Strategy::Minmax),
            "alpha_beta" => Ok(Strategy::AlphaBeta),
            _ => Err(CheckersError::InvalidConfiguration(format!(
                "unknown strategy '{}'",
                s
            ))),
        }
    }
}

/// Picks a move for the side to move and reports how many positions the
/// search visited. The search works on a scratch clone of the state with
/// make/unmake around every child, so the passed state is never mutated.
///
/// Ties are broken deterministically: the first best move in enumeration
/// order wins.
pub fn choose_move<R: Rng>(
    state: &GameState,
    strategy: Strategy,
    depth: u16,
    evaluator: Evaluator,
    rng: &mut R,
) -> CheckersResult<(Move, u64)> {
    let color = state.get_current_player();
    let moves = state.gen_moves();
    if moves.is_empty() {
        return Err(CheckersError::NoLegalMove(color));
    }

    match strategy {
        Strategy::Random => {
            use rand::seq::SliceRandom;
            let mv = moves
                .choose(rng)
                .ok_or(CheckersError::NoLegalMove(color))?
                .clone();
            Ok((mv, moves.len() as u64))
        }
        Strategy::Minmax => {
            let (mv, _, nodes) = minmax_root(state, &moves, depth, evaluator)?;
            Ok((mv, nodes))
        }
        Strategy::AlphaBeta => {
            let (mv, _, nodes) = alphabeta_root(state, &moves, depth, evaluator)?;
            Ok((mv, nodes))
        }
    }
}

fn check_depth(depth: u16) -> CheckersResult<()> {
    if depth == 0 {
        Err(CheckersError::InvalidConfiguration(
            "search depth must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

fn minmax_root(
    state: &GameState,
    moves: &[Move],
    depth: u16,
    evaluator: Evaluator,
) -> CheckersResult<(Move, i32, u64)> {
    check_depth(depth)?;
    let pov = state.get_current_player();
    let mut scratch = state.clone();
    let mut nodes = 0u64;

    let mut best_val = i32::MIN;
    let mut best_move = None;

    for mv in moves {
        scratch.make_move(mv);
        nodes += 1;
        let move_val = minmax_value(&mut scratch, depth - 1, pov, evaluator, false, &mut nodes);
        scratch.undo_move(mv);

        if move_val > best_val {
            best_val = move_val;
            best_move = Some(mv.clone());
        }
    }
    best_move
        .map(|m| (m, best_val, nodes))
        .ok_or(CheckersError::NoLegalMove(pov))
}

fn alphabeta_root(
    state: &GameState,
    moves: &[Move],
    depth: u16,
    evaluator: Evaluator,
) -> CheckersResult<(Move, i32, u64)> {
    check_depth(depth)?;
    let pov = state.get_current_player();
    let mut scratch = state.clone();
    let mut nodes = 0u64;

    let mut best_val = i32::MIN;
    let mut best_move = None;
    let mut alpha_ = i32::MIN;
    let beta_ = i32::MAX;

    for mv in moves {
        scratch.make_move(mv);
        nodes += 1;
        let move_val = alphabeta_value(
            &mut scratch,
            depth - 1,
            pov,
            evaluator,
            alpha_,
            beta_,
            false,
            &mut nodes,
        );
        scratch.undo_move(mv);

        if move_val > best_val {
            best_val = move_val;
            best_move = Some(mv.clone());
        }
        alpha_ = max(alpha_, best_val);
        if alpha_ >= beta_ {
            break;
        }
    }
    best_move
        .map(|m| (m, best_val, nodes))
        .ok_or(CheckersError::NoLegalMove(pov))
}

fn minmax_value(
    state: &mut GameState,
    depth: u16,
    pov: Color,
    evaluator: Evaluator,
    maximizing: bool,
    nodes: &mut u64,
) -> i32 {
    let moves = state.gen_moves();

    // A side without moves has lost, regardless of remaining depth.
    if moves.is_empty() {
        return if maximizing { -WIN_SCORE } else { WIN_SCORE };
    }
    if depth == 0 {
        return evaluator.score(state.board(), pov);
    }

    let mut val = if maximizing { i32::MIN } else { i32::MAX };
    for mv in &moves {
        state.make_move(mv);
        *nodes += 1;
        let child = minmax_value(state, depth - 1, pov, evaluator, !maximizing, nodes);
        state.undo_move(mv);
        val = if maximizing {
            max(val, child)
        } else {
            min(val, child)
        };
    }
    val
}

fn alphabeta_value(
    state: &mut GameState,
    depth: u16,
    pov: Color,
    evaluator: Evaluator,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    nodes: &mut u64,
) -> i32 {
    let moves = state.gen_moves();

    if moves.is_empty() {
        return if maximizing { -WIN_SCORE } else { WIN_SCORE };
    }
    if depth == 0 {
        return evaluator.score(state.board(), pov);
    }

    let mut alpha_ = alpha;
    let mut beta_ = beta;
    let mut val;
    if maximizing {
        val = i32::MIN;
        for mv in &moves {
            state.make_move(mv);
            *nodes += 1;
            val = max(
                val,
                alphabeta_value(state, depth - 1, pov, evaluator, alpha_, beta_, false, nodes),
            );
            state.undo_move(mv);
            alpha_ = max(alpha_, val);
            if alpha_ >= beta_ {
                break;
            }
        }
    } else {
        val = i32::MAX;
        for mv in &moves {
            state.make_move(mv);
            *nodes += 1;
            val = min(
                val,
                alphabeta_value(state, depth - 1, pov, evaluator, alpha_, beta_, true, nodes),
            );
            state.undo_move(mv);
            beta_ = min(beta_, val);
            if alpha_ >= beta_ {
                break;
            }
        }
    }
    val
}
