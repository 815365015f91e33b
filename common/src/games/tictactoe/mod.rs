mod board;
mod bot_controller;
mod session;
mod types;
mod win_detector;

pub use board::{available_moves, cell_number, next_mark, ply_count};
pub use bot_controller::{
    best_move, fallback_move, find_winning_move, perfect_move, random_move, select_move,
    MEDIUM_OPTIMAL_PROBABILITY,
};
pub use session::{GameMode, MoveError, TicTacToeSession};
pub use types::{Board, Cell, Difficulty, Mark, Outcome, CELL_COUNT, CENTER, CORNERS, LINES, SIDES};
pub use win_detector::{evaluate, winning_line, WinningLine};
