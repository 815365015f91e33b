mod config;
mod offline;

use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tictactoe_common::config::{FileContentConfigProvider, Validate};
use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{Difficulty, GameMode, Mark, Outcome, TicTacToeSession};
use tictactoe_common::log;
use tictactoe_common::logger;
use tictactoe_common::profile::{Rank, ScoreBook};
use tokio::io::{AsyncBufReadExt, BufReader};

use config::{get_config_manager, Config, PlayMode};
use offline::{run_tictactoe_game, RunnerError};

#[derive(Parser)]
#[command(name = "tictactoe_client")]
struct Args {
    /// Config file; defaults to one next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    mode: Option<PlayMode>,
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long)]
    computer_mark: Option<Mark>,
    #[arg(long)]
    player: Option<String>,
    /// Fixes the computer's random choices.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1)]
    games: u32,
    /// Print stats and the leaderboard, then exit.
    #[arg(long)]
    leaderboard: bool,
    /// List the ranks for sale with their prices, then exit.
    #[arg(long)]
    shop: bool,
    #[arg(long)]
    buy_rank: Option<Rank>,
    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(computer_mark) = self.computer_mark {
            config.computer_mark = computer_mark;
        }
        if let Some(ref player) = self.player {
            config.player_name = player.clone();
        }
    }
}

fn game_mode(config: &Config) -> GameMode {
    match config.mode {
        PlayMode::Computer => GameMode::VsComputer {
            difficulty: config.difficulty,
            computer_mark: config.computer_mark,
        },
        PlayMode::Friend => GameMode::VsFriend,
    }
}

fn announce(outcome: Outcome) {
    match outcome {
        Outcome::Win(mark) => println!("{} wins!", mark),
        Outcome::Draw => println!("It's a draw!"),
        Outcome::InProgress => {}
    }
}

fn print_profile(book: &ScoreBook, player: &str) {
    let stats = book.stats(player);
    let wallet = book.wallet(player);
    println!(
        "{}: {} wins, {} losses, {} draws ({:.1}% win rate) | {:.1} coins | rank {}",
        player,
        stats.wins,
        stats.losses,
        stats.draws,
        stats.win_rate(),
        wallet.coins,
        wallet.rank
    );
}

fn print_leaderboard(book: &ScoreBook) {
    println!("Leaderboard");
    for (place, entry) in book.leaderboard().iter().enumerate() {
        println!(
            "{:>3}. {} | Wins: {} | Losses: {} | Draws: {}",
            place + 1,
            entry.player,
            entry.stats.wins,
            entry.stats.losses,
            entry.stats.draws
        );
    }
    if let Some(last) = book.records().last() {
        let played_at = last.played_at.with_timezone(&Local);
        println!("Last game: {} ({})", played_at.format("%Y-%m-%d %H:%M"), last.player);
    }
}

fn print_shop(book: &ScoreBook, player: &str) {
    let wallet = book.wallet(player);
    println!("Rank shop ({:.1} coins available)", wallet.coins);
    for rank in Rank::FOR_SALE {
        let cost = rank.cost().unwrap_or_default();
        let status = if wallet.rank == rank {
            "owned"
        } else if wallet.coins >= cost {
            "affordable"
        } else {
            "locked"
        };
        println!("  {:<12} {:>8.0} coins  {}", rank.name(), cost, status);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut config = get_config_manager(args.config.as_deref()).get_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let score_provider = FileContentConfigProvider::new(&config.score_book_path);
    let mut book = ScoreBook::load(&score_provider)?;
    log!("Score book loaded from {}", score_provider.path().display());

    if args.leaderboard {
        print_profile(&book, &config.player_name);
        print_leaderboard(&book);
        return Ok(());
    }

    if args.shop {
        print_shop(&book, &config.player_name);
        return Ok(());
    }

    if let Some(rank) = args.buy_rank {
        match book.purchase_rank(&config.player_name, rank) {
            Ok(()) => {
                book.save(&score_provider)?;
                println!("Purchased rank {}", rank);
            }
            Err(e) => {
                println!("{}", e);
                print_shop(&book, &config.player_name);
            }
        }
        print_profile(&book, &config.player_name);
        return Ok(());
    }

    let mut rng = args.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    let mode = game_mode(&config);
    let delay = Duration::from_millis(config.computer_move_delay_ms);
    log!("Starting {:?} with seed {}", mode, rng.seed());

    let mut session = TicTacToeSession::new(mode);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    for game in 1..=args.games {
        session.reset();
        if args.games > 1 {
            println!("Game {} of {}", game, args.games);
        }

        let outcome = match run_tictactoe_game(&mut session, &mut lines, &mut rng, delay).await {
            Ok(outcome) => outcome,
            Err(RunnerError::Quit) | Err(RunnerError::InputClosed) => break,
            Err(e) => return Err(e.into()),
        };
        announce(outcome);

        // Only games against the computer count towards stats and coins.
        if let GameMode::VsComputer {
            difficulty,
            computer_mark,
        } = session.mode()
            && let Some(result) = session.result_for(computer_mark.opponent())
        {
            let earned = book.record(&config.player_name, result, Some(difficulty), &config.rewards);
            book.save(&score_provider)?;
            println!("Result: {} (+{:.1} coins)", result, earned);
            print_profile(&book, &config.player_name);
        }
    }

    log!("Client finished");
    Ok(())
}
