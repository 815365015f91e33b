mod leaderboard;
mod records;
mod rewards;
mod score_book;

pub use leaderboard::{leaderboard, LeaderboardEntry};
pub use records::{MatchRecord, MatchResult, PlayerStats};
pub use rewards::{PurchaseError, Rank, RewardSchedule, Wallet};
pub use score_book::ScoreBook;
