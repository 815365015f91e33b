use crate::games::RandomSource;
use super::board::available_moves;
use super::types::{Board, Difficulty, Mark, Outcome, CELL_COUNT, CENTER, CORNERS, LINES, SIDES};
use super::win_detector::evaluate;

/// Share of Medium turns that use the full search instead of a random cell.
pub const MEDIUM_OPTIMAL_PROBABILITY: f64 = 0.6;

const WIN_SCORE: i32 = 10;

/// Picks the cell the computer plays next.
///
/// Returns `None` only when the board has no empty cell; callers are expected
/// to check for a terminal outcome first. Easy and Medium draw from `rng`,
/// Hard is deterministic and never touches it.
pub fn select_move<R>(
    board: &Board,
    difficulty: Difficulty,
    computer_mark: Mark,
    rng: &mut R,
) -> Option<usize>
where
    R: RandomSource + ?Sized,
{
    match difficulty {
        Difficulty::Easy => random_move(board, rng),
        Difficulty::Medium => {
            if rng.chance(MEDIUM_OPTIMAL_PROBABILITY) {
                best_move(board, computer_mark)
            } else {
                random_move(board, rng)
            }
        }
        Difficulty::Hard => perfect_move(board, computer_mark),
    }
}

pub fn random_move<R>(board: &Board, rng: &mut R) -> Option<usize>
where
    R: RandomSource + ?Sized,
{
    let moves = available_moves(board);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.pick_index(moves.len())])
}

/// Hard tier: opening shortcuts, immediate win, immediate block, then full search.
pub fn perfect_move(board: &Board, computer_mark: Mark) -> Option<usize> {
    let moves = available_moves(board);
    if moves.is_empty() {
        return None;
    }

    if moves.len() == CELL_COUNT {
        return Some(CENTER);
    }

    let opponent_mark = computer_mark.opponent();

    if moves.len() == CELL_COUNT - 1 && board.mark_at(CENTER) == Some(opponent_mark) {
        return Some(CORNERS[0]);
    }

    if let Some(index) = find_winning_move(board, computer_mark) {
        return Some(index);
    }

    if let Some(index) = find_winning_move(board, opponent_mark) {
        return Some(index);
    }

    best_move(board, computer_mark).or_else(|| fallback_move(board))
}

/// Empty cell of the first line (in scan order) holding two of `mark` and nothing else.
pub fn find_winning_move(board: &Board, mark: Mark) -> Option<usize> {
    LINES.iter().find_map(|line| {
        let own = line.iter().filter(|&&i| board.mark_at(i) == Some(mark)).count();
        let empty: Vec<usize> = line
            .iter()
            .copied()
            .filter(|&i| board.is_empty_cell(i))
            .collect();

        match (own, empty.as_slice()) {
            (2, [index]) => Some(*index),
            _ => None,
        }
    })
}

/// Center, then corners, then sides.
pub fn fallback_move(board: &Board) -> Option<usize> {
    std::iter::once(CENTER)
        .chain(CORNERS)
        .chain(SIDES)
        .find(|&index| board.is_empty_cell(index))
}

/// Minimax with alpha-beta pruning. Ties go to the lowest index.
pub fn best_move(board: &Board, computer_mark: Mark) -> Option<usize> {
    let mut scratch = *board;
    let mut best: Option<(usize, i32)> = None;

    for index in available_moves(board) {
        scratch.set(index, computer_mark);
        // A candidate that cannot beat the current best only needs an upper bound.
        let alpha = best.map_or(i32::MIN, |(_, score)| score);
        let score = minimax(&mut scratch, 0, false, computer_mark, alpha, i32::MAX);
        scratch.clear(index);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
}

fn minimax(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    computer_mark: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    match evaluate(board) {
        Outcome::Win(winner) if winner == computer_mark => return WIN_SCORE - depth,
        Outcome::Win(_) => return depth - WIN_SCORE,
        Outcome::Draw => return 0,
        Outcome::InProgress => {}
    }

    let moves = available_moves(board);

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for index in moves {
            board.set(index, computer_mark);
            let eval = minimax(board, depth + 1, false, computer_mark, alpha, beta);
            board.clear(index);

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let opponent_mark = computer_mark.opponent();
        let mut min_eval = i32::MAX;
        for index in moves {
            board.set(index, opponent_mark);
            let eval = minimax(board, depth + 1, true, computer_mark, alpha, beta);
            board.clear(index);

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}
