use super::types::{Board, Mark, Outcome, LINES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [usize; 3],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [usize; 3]) -> Self {
        Self { mark, cells }
    }
}

/// First completed line in scan order, if any.
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    LINES.iter().find_map(|&[a, b, c]| {
        let mark = board.mark_at(a)?;
        if board.mark_at(b) == Some(mark) && board.mark_at(c) == Some(mark) {
            Some(WinningLine::new(mark, [a, b, c]))
        } else {
            None
        }
    })
}

pub fn evaluate(board: &Board) -> Outcome {
    if let Some(line) = winning_line(board) {
        return Outcome::Win(line.mark);
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
