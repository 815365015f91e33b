use serde::{Deserialize, Serialize};

use crate::games::RandomSource;
use crate::log;
use crate::profile::MatchResult;
use super::board::{cell_number, next_mark};
use super::bot_controller::select_move;
use super::types::{Board, Difficulty, Mark, Outcome, CELL_COUNT};
use super::win_detector::{evaluate, winning_line, WinningLine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    VsComputer {
        difficulty: Difficulty,
        computer_mark: Mark,
    },
    VsFriend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    OutOfBounds(usize),
    CellOccupied(usize),
    GameOver,
    NotYourTurn,
    NoComputerOpponent,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::OutOfBounds(index) => write!(f, "Cell {} is out of bounds", index),
            MoveError::CellOccupied(index) => write!(f, "Cell {} is already marked", index),
            MoveError::GameOver => write!(f, "Game is already over"),
            MoveError::NotYourTurn => write!(f, "Not your turn"),
            MoveError::NoComputerOpponent => write!(f, "This game has no computer opponent"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Owns the board of one game and enforces whose turn it is.
///
/// The engine functions stay stateless; this is the collaborator that calls
/// `evaluate` after every move and asks for a computer move once per turn.
#[derive(Debug, Clone)]
pub struct TicTacToeSession {
    mode: GameMode,
    board: Board,
}

impl TicTacToeSession {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            board: Board::new(),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        evaluate(&self.board)
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        winning_line(&self.board)
    }

    pub fn current_mark(&self) -> Mark {
        next_mark(&self.board)
    }

    pub fn computer_mark(&self) -> Option<Mark> {
        match self.mode {
            GameMode::VsComputer { computer_mark, .. } => Some(computer_mark),
            GameMode::VsFriend => None,
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        self.computer_mark() == Some(self.current_mark()) && !self.outcome().is_terminal()
    }

    /// Places the mark of whoever is to move. Rejected while the computer is to move.
    pub fn place_mark(&mut self, index: usize) -> Result<Outcome, MoveError> {
        self.check_cell(index)?;
        if self.computer_mark() == Some(self.current_mark()) {
            return Err(MoveError::NotYourTurn);
        }
        Ok(self.apply(index))
    }

    /// Asks the engine for the computer's move without applying it.
    pub fn computer_move<R>(&self, rng: &mut R) -> Result<usize, MoveError>
    where
        R: RandomSource + ?Sized,
    {
        let GameMode::VsComputer {
            difficulty,
            computer_mark,
        } = self.mode
        else {
            return Err(MoveError::NoComputerOpponent);
        };

        if self.outcome().is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.current_mark() != computer_mark {
            return Err(MoveError::NotYourTurn);
        }

        select_move(&self.board, difficulty, computer_mark, rng).ok_or(MoveError::GameOver)
    }

    /// Applies a move previously returned by [`Self::computer_move`].
    pub fn apply_computer_move(&mut self, index: usize) -> Result<Outcome, MoveError> {
        let computer_mark = self.computer_mark().ok_or(MoveError::NoComputerOpponent)?;
        self.check_cell(index)?;
        if self.current_mark() != computer_mark {
            return Err(MoveError::NotYourTurn);
        }
        Ok(self.apply(index))
    }

    pub fn play_computer_turn<R>(&mut self, rng: &mut R) -> Result<usize, MoveError>
    where
        R: RandomSource + ?Sized,
    {
        let index = self.computer_move(rng)?;
        self.apply_computer_move(index)?;
        Ok(index)
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
    }

    /// The finished game from `mark`'s point of view; `None` while still in progress.
    pub fn result_for(&self, mark: Mark) -> Option<MatchResult> {
        match self.outcome() {
            Outcome::Win(winner) if winner == mark => Some(MatchResult::Win),
            Outcome::Win(_) => Some(MatchResult::Loss),
            Outcome::Draw => Some(MatchResult::Draw),
            Outcome::InProgress => None,
        }
    }

    fn check_cell(&self, index: usize) -> Result<(), MoveError> {
        if self.outcome().is_terminal() {
            return Err(MoveError::GameOver);
        }
        if index >= CELL_COUNT {
            return Err(MoveError::OutOfBounds(index));
        }
        if !self.board.is_empty_cell(index) {
            return Err(MoveError::CellOccupied(index));
        }
        Ok(())
    }

    fn apply(&mut self, index: usize) -> Outcome {
        let mark = self.current_mark();
        self.board.set(index, mark);
        let outcome = self.outcome();

        log!("{} placed at cell {}", mark, cell_number(index));
        match outcome {
            Outcome::Win(winner) => log!("Game over, {} wins", winner),
            Outcome::Draw => log!("Game over, draw"),
            Outcome::InProgress => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;
    use crate::games::tictactoe::perfect_move;

    fn vs_computer(difficulty: Difficulty, computer_mark: Mark) -> TicTacToeSession {
        TicTacToeSession::new(GameMode::VsComputer {
            difficulty,
            computer_mark,
        })
    }

    #[test]
    fn test_friends_alternate_marks() {
        let mut session = TicTacToeSession::new(GameMode::VsFriend);
        assert_eq!(session.current_mark(), Mark::X);
        session.place_mark(0).unwrap();
        assert_eq!(session.current_mark(), Mark::O);
        session.place_mark(4).unwrap();
        assert_eq!(session.board().mark_at(0), Some(Mark::X));
        assert_eq!(session.board().mark_at(4), Some(Mark::O));
    }

    #[test]
    fn test_invalid_moves_are_rejected() {
        let mut session = TicTacToeSession::new(GameMode::VsFriend);
        session.place_mark(0).unwrap();
        assert_eq!(session.place_mark(0), Err(MoveError::CellOccupied(0)));
        assert_eq!(session.place_mark(9), Err(MoveError::OutOfBounds(9)));
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut session = TicTacToeSession::new(GameMode::VsFriend);
        for index in [0, 3, 1, 4] {
            assert_eq!(session.place_mark(index), Ok(Outcome::InProgress));
        }
        assert_eq!(session.place_mark(2), Ok(Outcome::Win(Mark::X)));
        assert_eq!(session.winning_line().map(|line| line.cells), Some([0, 1, 2]));
        assert_eq!(session.place_mark(5), Err(MoveError::GameOver));
        assert_eq!(session.result_for(Mark::X), Some(MatchResult::Win));
        assert_eq!(session.result_for(Mark::O), Some(MatchResult::Loss));
    }

    #[test]
    fn test_human_cannot_move_on_computer_turn() {
        let mut session = vs_computer(Difficulty::Hard, Mark::X);
        assert!(session.is_computer_turn());
        assert_eq!(session.place_mark(0), Err(MoveError::NotYourTurn));

        let mut rng = SessionRng::new(42);
        assert_eq!(session.play_computer_turn(&mut rng), Ok(4));
        assert!(!session.is_computer_turn());
        assert!(session.place_mark(0).is_ok());
    }

    #[test]
    fn test_computer_move_is_not_applied_until_asked() {
        let mut session = vs_computer(Difficulty::Hard, Mark::O);
        session.place_mark(0).unwrap();
        assert_eq!(session.place_mark(4), Err(MoveError::NotYourTurn));

        let mut rng = SessionRng::new(42);
        let index = session.computer_move(&mut rng).unwrap();
        assert_eq!(index, 4);
        assert!(session.board().is_empty_cell(index));

        assert_eq!(session.apply_computer_move(index), Ok(Outcome::InProgress));
        assert_eq!(session.board().mark_at(index), Some(Mark::O));
        assert_eq!(session.computer_move(&mut rng), Err(MoveError::NotYourTurn));
    }

    #[test]
    fn test_friend_game_has_no_computer() {
        let mut session = TicTacToeSession::new(GameMode::VsFriend);
        let mut rng = SessionRng::new(42);
        assert_eq!(session.computer_move(&mut rng), Err(MoveError::NoComputerOpponent));
        assert_eq!(session.apply_computer_move(0), Err(MoveError::NoComputerOpponent));
        assert!(!session.is_computer_turn());
    }

    #[test]
    fn test_perfect_players_draw() {
        let mut session = vs_computer(Difficulty::Hard, Mark::O);
        let mut rng = SessionRng::new(42);
        while !session.outcome().is_terminal() {
            if session.is_computer_turn() {
                session.play_computer_turn(&mut rng).unwrap();
            } else {
                let index = perfect_move(session.board(), Mark::X).unwrap();
                session.place_mark(index).unwrap();
            }
        }
        assert_eq!(session.outcome(), Outcome::Draw);
        assert_eq!(session.result_for(Mark::O), Some(MatchResult::Draw));
    }

    #[test]
    fn test_reset_starts_over() {
        let mut session = TicTacToeSession::new(GameMode::VsFriend);
        session.place_mark(4).unwrap();
        session.reset();
        assert_eq!(*session.board(), Board::new());
        assert_eq!(session.result_for(Mark::X), None);
        assert_eq!(session.current_mark(), Mark::X);
    }
}
