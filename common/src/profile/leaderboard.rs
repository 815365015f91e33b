use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::records::{MatchRecord, PlayerStats};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub stats: PlayerStats,
}

/// Aggregates records per player, most wins first. Equal win counts keep the
/// order in which players first appear in `records`.
pub fn leaderboard<'a>(records: impl IntoIterator<Item = &'a MatchRecord>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let position = *positions.entry(record.player.as_str()).or_insert_with(|| {
            entries.push(LeaderboardEntry {
                player: record.player.clone(),
                stats: PlayerStats::default(),
            });
            entries.len() - 1
        });
        entries[position].stats.add(record.result);
    }

    entries.sort_by(|a, b| b.stats.wins.cmp(&a.stats.wins));
    entries
}
