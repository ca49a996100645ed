use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Bot identity and world anchors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// In-game name of the account the bot plays. Chat lines from this
    /// name are ignored so the bot never reacts to its own output.
    pub name: String,

    /// Path to the game client's latest.log
    pub log_path: PathBuf,

    /// Home coordinates the bot returns to after routines
    pub home: [f64; 3],
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "IronManForever".to_string(),
            log_path: PathBuf::new(),
            home: [-4188.0, 59.0, 4259.0],
        }
    }
}
