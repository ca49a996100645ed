pub mod bot_runner;
pub mod dispatch;
pub mod event_consumer;
pub mod log_watcher;
pub mod logging;
pub mod routines;
pub mod store;

pub use bot_runner::{print_player_status, BotRunner};
pub use dispatch::Dispatcher;
pub use event_consumer::LoggingConsumer;
pub use log_watcher::LogWatcher;
pub use logging::init_logging;
pub use store::{Farms, Waypoints};
