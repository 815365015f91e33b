use super::types::{Board, Mark, CELL_COUNT};

/// Indices of empty cells in ascending order.
pub fn available_moves(board: &Board) -> Vec<usize> {
    (0..CELL_COUNT).filter(|&index| board.is_empty_cell(index)).collect()
}

pub fn ply_count(board: &Board) -> usize {
    CELL_COUNT - available_moves(board).len()
}

/// Cell number shown to players, 1-9 in reading order.
pub fn cell_number(index: usize) -> usize {
    index + 1
}

/// X moves first, so X is to move whenever both marks have been placed equally often.
pub fn next_mark(board: &Board) -> Mark {
    if board.count(Mark::X) == board.count(Mark::O) {
        Mark::X
    } else {
        Mark::O
    }
}
