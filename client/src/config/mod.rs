mod config;
mod play_mode;

pub use config::{get_config_manager, Config};
pub use play_mode::PlayMode;
