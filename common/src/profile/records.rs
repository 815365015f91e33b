use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::games::tictactoe::Difficulty;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Win => write!(f, "win"),
            MatchResult::Loss => write!(f, "loss"),
            MatchResult::Draw => write!(f, "draw"),
        }
    }
}

/// One finished game as seen by one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player: String,
    pub result: MatchResult,
    /// `None` for games against a friend.
    pub difficulty: Option<Difficulty>,
    pub played_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(player: &str, result: MatchResult, difficulty: Option<Difficulty>) -> Self {
        Self {
            player: player.to_string(),
            result,
            difficulty,
            played_at: Utc::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl PlayerStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a MatchRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.add(record.result);
        }
        stats
    }

    pub fn add(&mut self, result: MatchResult) {
        match result {
            MatchResult::Win => self.wins += 1,
            MatchResult::Loss => self.losses += 1,
            MatchResult::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Percentage of games won, 0 when nothing has been played.
    pub fn win_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.wins as f64 / total as f64 * 100.0,
        }
    }
}
