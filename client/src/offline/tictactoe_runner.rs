use std::time::Duration;

use tictactoe_common::games::RandomSource;
use tictactoe_common::games::tictactoe::{cell_number, MoveError, Outcome, TicTacToeSession};
use tictactoe_common::log;
use tokio::io::{AsyncBufRead, Lines};

#[derive(Debug)]
pub enum RunnerError {
    Io(std::io::Error),
    Move(MoveError),
    InputClosed,
    Quit,
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunnerError::Io(e) => write!(f, "Failed to read input: {}", e),
            RunnerError::Move(e) => write!(f, "Illegal move: {}", e),
            RunnerError::InputClosed => write!(f, "Input closed before the game finished"),
            RunnerError::Quit => write!(f, "Game abandoned"),
        }
    }
}

impl std::error::Error for RunnerError {}

impl From<std::io::Error> for RunnerError {
    fn from(e: std::io::Error) -> Self {
        RunnerError::Io(e)
    }
}

impl From<MoveError> for RunnerError {
    fn from(e: MoveError) -> Self {
        RunnerError::Move(e)
    }
}

/// Parses a 1-based cell number as typed by the player.
pub fn parse_cell(input: &str) -> Result<usize, String> {
    match input.trim().parse::<usize>() {
        Ok(number @ 1..=9) => Ok(number - 1),
        Ok(number) => Err(format!("Cell {} does not exist, pick 1-9", number)),
        Err(_) => Err(format!("'{}' is not a cell number, pick 1-9", input.trim())),
    }
}

/// Plays one game to the end, reading human moves from `lines`.
///
/// The computer's move is chosen once, then `computer_delay` passes before
/// it is placed; the delay never changes which cell is played.
pub async fn run_tictactoe_game<R, G>(
    session: &mut TicTacToeSession,
    lines: &mut Lines<R>,
    rng: &mut G,
    computer_delay: Duration,
) -> Result<Outcome, RunnerError>
where
    R: AsyncBufRead + Unpin,
    G: RandomSource + ?Sized,
{
    loop {
        let outcome = session.outcome();
        if outcome.is_terminal() {
            println!("{}\n", session.board());
            return Ok(outcome);
        }

        if session.is_computer_turn() {
            let index = session.computer_move(rng)?;
            if !computer_delay.is_zero() {
                tokio::time::sleep(computer_delay).await;
            }
            session.apply_computer_move(index)?;
            println!("Computer plays {}", cell_number(index));
            continue;
        }

        println!("{}\n", session.board());
        println!("Player {}, choose a cell (1-9, q to quit):", session.current_mark());

        let Some(line) = lines.next_line().await? else {
            return Err(RunnerError::InputClosed);
        };
        if line.trim().eq_ignore_ascii_case("q") {
            log!("Player quit mid-game");
            return Err(RunnerError::Quit);
        }

        match parse_cell(&line).map(|index| session.place_mark(index)) {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => println!("{}", e),
            Err(message) => println!("{}", message),
        }
    }
}
