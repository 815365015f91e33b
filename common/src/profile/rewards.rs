use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::records::MatchResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    None,
    Heroic,
    Master,
    GrandMaster,
}

impl Rank {
    pub const FOR_SALE: [Rank; 3] = [Rank::Heroic, Rank::Master, Rank::GrandMaster];

    /// Price in coins; `None` for ranks that cannot be bought.
    pub fn cost(&self) -> Option<f64> {
        match self {
            Rank::None => None,
            Rank::Heroic => Some(1000.0),
            Rank::Master => Some(5000.0),
            Rank::GrandMaster => Some(10000.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rank::None => "None",
            Rank::Heroic => "Heroic",
            Rank::Master => "Master",
            Rank::GrandMaster => "Grand Master",
        }
    }
}

impl std::str::FromStr for Rank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "none" => Ok(Rank::None),
            "heroic" => Ok(Rank::Heroic),
            "master" => Ok(Rank::Master),
            "grandmaster" => Ok(Rank::GrandMaster),
            _ => Err(format!("Unknown rank '{}'", s)),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Coins credited for each finished game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardSchedule {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}

impl RewardSchedule {
    pub fn amount(&self, result: MatchResult) -> f64 {
        match result {
            MatchResult::Win => self.win,
            MatchResult::Draw => self.draw,
            MatchResult::Loss => self.loss,
        }
    }
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            win: 10.0,
            draw: 2.5,
            loss: 0.0,
        }
    }
}

impl Validate for RewardSchedule {
    fn validate(&self) -> Result<(), String> {
        for (name, amount) in [("win", self.win), ("draw", self.draw), ("loss", self.loss)] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(format!("Reward for a {} must be a non-negative number, got {}", name, amount));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseError {
    NotForSale(Rank),
    AlreadyOwned(Rank),
    NotEnoughCoins { needed: f64, available: f64 },
}

impl std::fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseError::NotForSale(rank) => write!(f, "Rank {} is not for sale", rank),
            PurchaseError::AlreadyOwned(rank) => write!(f, "Rank {} is already owned", rank),
            PurchaseError::NotEnoughCoins { needed, available } => {
                write!(f, "Not enough coins: need {:.1}, have {:.1}", needed, available)
            }
        }
    }
}

impl std::error::Error for PurchaseError {}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub coins: f64,
    pub rank: Rank,
}

impl Wallet {
    /// Adds the reward for `result` and returns the amount credited.
    pub fn credit(&mut self, result: MatchResult, schedule: &RewardSchedule) -> f64 {
        let amount = schedule.amount(result);
        self.coins += amount;
        amount
    }

    /// Buying replaces the current rank; only re-buying the same rank is refused.
    pub fn purchase(&mut self, rank: Rank) -> Result<(), PurchaseError> {
        let cost = rank.cost().ok_or(PurchaseError::NotForSale(rank))?;
        if self.rank == rank {
            return Err(PurchaseError::AlreadyOwned(rank));
        }
        if self.coins < cost {
            return Err(PurchaseError::NotEnoughCoins {
                needed: cost,
                available: self.coins,
            });
        }
        self.coins -= cost;
        self.rank = rank;
        Ok(())
    }
}
