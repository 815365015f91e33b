use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigContentProvider, ConfigError, ConfigSerializer, YamlConfigSerializer};
use crate::games::tictactoe::Difficulty;
use crate::log;
use super::leaderboard::{leaderboard, LeaderboardEntry};
use super::records::{MatchRecord, MatchResult, PlayerStats};
use super::rewards::{PurchaseError, Rank, RewardSchedule, Wallet};

/// Finished games and coin balances for every player, kept in memory and
/// persisted as YAML through a content provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBook {
    #[serde(default)]
    records: Vec<MatchRecord>,
    #[serde(default)]
    wallets: BTreeMap<String, Wallet>,
}

impl ScoreBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty book when the provider has nothing stored yet.
    pub fn load<P: ConfigContentProvider>(provider: &P) -> Result<Self, ConfigError> {
        let Some(content) = provider.get_config_content()? else {
            return Ok(Self::new());
        };
        let serializer = YamlConfigSerializer::new();
        <YamlConfigSerializer as ConfigSerializer<ScoreBook>>::deserialize(&serializer, &content)
    }

    pub fn save<P: ConfigContentProvider>(&self, provider: &P) -> Result<(), ConfigError> {
        let serializer = YamlConfigSerializer::new();
        let content = <YamlConfigSerializer as ConfigSerializer<ScoreBook>>::serialize(&serializer, self)?;
        provider.set_config_content(&content)
    }

    /// Stores the result and credits the player's wallet. Returns the coins earned.
    pub fn record(
        &mut self,
        player: &str,
        result: MatchResult,
        difficulty: Option<Difficulty>,
        schedule: &RewardSchedule,
    ) -> f64 {
        self.records.push(MatchRecord::new(player, result, difficulty));
        let earned = self
            .wallets
            .entry(player.to_string())
            .or_default()
            .credit(result, schedule);

        log!("Recorded {} for {} (+{:.1} coins)", result, player, earned);
        earned
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn stats(&self, player: &str) -> PlayerStats {
        PlayerStats::from_records(self.records.iter().filter(|record| record.player == player))
    }

    pub fn wallet(&self, player: &str) -> Wallet {
        self.wallets.get(player).cloned().unwrap_or_default()
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        leaderboard(&self.records)
    }

    pub fn purchase_rank(&mut self, player: &str, rank: Rank) -> Result<(), PurchaseError> {
        let wallet = self.wallets.entry(player.to_string()).or_default();
        wallet.purchase(rank)?;
        log!("{} bought rank {}, {:.1} coins left", player, rank, wallet.coins);
        Ok(())
    }
}
