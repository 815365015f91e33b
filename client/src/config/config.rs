use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tictactoe_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_common::games::tictactoe::{Difficulty, Mark};
use tictactoe_common::profile::RewardSchedule;

use super::PlayMode;

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";
const MAX_COMPUTER_MOVE_DELAY_MS: u64 = 10_000;

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<&Path>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub player_name: String,
    pub mode: PlayMode,
    pub difficulty: Difficulty,
    pub computer_mark: Mark,
    /// Pause before the computer's already chosen move is shown.
    pub computer_move_delay_ms: u64,
    pub score_book_path: String,
    #[serde(default)]
    pub rewards: RewardSchedule,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.player_name.trim().is_empty() {
            return Err("player_name must not be empty".to_string());
        }
        if self.score_book_path.trim().is_empty() {
            return Err("score_book_path must not be empty".to_string());
        }
        if self.computer_move_delay_ms > MAX_COMPUTER_MOVE_DELAY_MS {
            return Err(format!(
                "computer_move_delay_ms must not exceed {}",
                MAX_COMPUTER_MOVE_DELAY_MS
            ));
        }
        self.rewards.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            mode: PlayMode::Computer,
            difficulty: Difficulty::Medium,
            computer_mark: Mark::O,
            computer_move_delay_ms: 500,
            score_book_path: "tictactoe_scores.yaml".to_string(),
            rewards: RewardSchedule::default(),
        }
    }
}
