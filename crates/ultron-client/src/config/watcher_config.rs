use serde::{Deserialize, Serialize};

/// Log watcher tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Seconds between polls of the log file in the main loop
    pub poll_interval_secs: u64,

    /// Seconds to wait for the farm routine to report completion
    pub farm_timeout_secs: u64,

    /// Seconds to wait for a polled goto to reach its target
    pub goto_timeout_secs: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 2,
            farm_timeout_secs: 300,
            goto_timeout_secs: 300,
        }
    }
}
