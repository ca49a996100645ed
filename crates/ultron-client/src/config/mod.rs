pub mod bot_config;
pub mod paths;
pub mod server_config;
pub mod ultron_config;
pub mod watcher_config;

pub use bot_config::BotConfig;
pub use paths::ProjectPaths;
pub use server_config::ServerConfig;
pub use ultron_config::{ConfigLoadError, UltronConfig};
pub use watcher_config::WatcherConfig;
