use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use ultron_client::client::{GameQueryClient, GameQueryServer};
use ultron_client::config::UltronConfig;
use ultron_client::error::ClientError;
use ultron_events::{
    commands::parse_command, ChatClassifier, EventConsumer, EventEnvelope, SystemEvent,
};

use crate::dispatch::{command_name, Dispatcher};
use crate::log_watcher::LogWatcher;

/// The bot's coordination loop: tail the log, classify chat, dispatch
/// commands. Single-threaded and sequential by design - a routine runs to
/// completion before the next batch of chat lines is looked at.
pub struct BotRunner {
    client: GameQueryClient,
    config: UltronConfig,
    consumers: Vec<Box<dyn EventConsumer>>,
}

impl BotRunner {
    pub fn new(config: UltronConfig) -> Self {
        let server = GameQueryServer::new(config.server.host.clone(), config.server.port);
        Self {
            client: GameQueryClient::new(server),
            config,
            consumers: Vec::new(),
        }
    }

    /// Register an observer for chat and lifecycle events
    pub fn add_consumer(&mut self, consumer: Box<dyn EventConsumer>) {
        self.consumers.push(consumer);
    }

    pub fn client(&self) -> &GameQueryClient {
        &self.client
    }

    fn publish(&mut self, envelope: EventEnvelope) {
        for consumer in &mut self.consumers {
            consumer.handle_event(envelope.clone());
        }
    }

    pub async fn run(mut self) -> Result<()> {
        // Fail fast if the mod endpoint is not answering
        info!("Testing connection to GameQuery server at {}", self.client.server());
        self.client
            .position()
            .await
            .context("cannot connect to the GameQuery server")?;
        info!("Connected to GameQuery server");
        self.publish(EventEnvelope::system_event(SystemEvent::Connected {
            endpoint: self.client.server().to_string(),
        }));

        if let Err(e) = print_player_status(&self.client).await {
            error!("Error getting player status: {}", e);
        }

        let classifier = ChatClassifier::new(self.config.bot.name.clone());
        let dispatcher = Dispatcher::new(self.client.clone(), self.config.clone());
        let poll_interval = Duration::from_secs(self.config.watcher.poll_interval_secs);

        let mut watcher = LogWatcher::new(&self.config.bot.log_path);
        watcher.seek_to_end().with_context(|| {
            format!(
                "cannot open log file {}",
                self.config.bot.log_path.display()
            )
        })?;

        info!("Listening for chat commands in {}", self.config.bot.log_path.display());
        loop {
            tokio::select! {
                _ = tokio::time::sleep(poll_interval) => {
                    let lines = match watcher.poll_new_lines() {
                        Ok(lines) => lines,
                        Err(e) => {
                            error!("Failed to read log file: {}", e);
                            continue;
                        }
                    };
                    for line in lines {
                        debug!(target: "watcher", "LOG: {}", line);
                        self.handle_line(&classifier, &dispatcher, &line).await;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl+C, shutting down gracefully...");
                    break;
                }
            }
        }

        self.publish(EventEnvelope::system_event(SystemEvent::Shutdown));
        Ok(())
    }

    async fn handle_line(&mut self, classifier: &ChatClassifier, dispatcher: &Dispatcher, line: &str) {
        let Some(event) = classifier.classify(line) else {
            if is_malformed_chat_line(line) {
                warn!(target: "watcher", "unparseable chat line: {}", line);
            }
            return;
        };
        info!(
            target: "watcher",
            "detected chat from {}: {}",
            event.sender(),
            event.message()
        );
        self.publish(EventEnvelope::chat_event(event.clone()));

        let Some(command) = parse_command(event.message()) else {
            return;
        };
        let name = command_name(&command);
        let sender = event.sender().to_string();
        self.publish(EventEnvelope::system_event(SystemEvent::RoutineStarted {
            name: name.to_string(),
            sender: sender.clone(),
        }));

        // Best-effort: a failing routine must not take the loop down
        let success = match dispatcher.dispatch(&sender, command).await {
            Ok(()) => true,
            Err(e) => {
                error!(target: "dispatch", "command '{}' from {} failed: {}", name, sender, e);
                false
            }
        };
        self.publish(EventEnvelope::system_event(SystemEvent::RoutineFinished {
            name: name.to_string(),
            success,
        }));
    }
}

/// A player-chat line that failed to parse. Plain `[CHAT]` lines without
/// the `<sender>` form are routine broadcasts (Baritone status, joins,
/// deaths) and are ignored silently.
fn is_malformed_chat_line(line: &str) -> bool {
    line.contains("[CHAT] <") && ultron_events::chat::parse_chat_line(line).is_none()
}

/// Log the player's current status snapshot
pub async fn print_player_status(client: &GameQueryClient) -> Result<(), ClientError> {
    let status = client.position().await?;
    info!("Player status:");
    info!(
        "  Location: ({:.1}, {:.1}, {:.1})",
        status.x, status.y, status.z
    );
    info!(
        "  Rotation: yaw {:.1}, pitch {:.1}",
        status.yaw, status.pitch
    );
    info!("  Health: {:.1}/{:.1}", status.health, status.max_health);
    info!("  Food: {}/20", status.food);
    info!(
        "  Level: {} (total XP: {})",
        status.level, status.experience
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_chat_lines_are_not_malformed() {
        // Automation status and server broadcasts use [CHAT] without a
        // <sender>; they are not player chat and must pass silently
        assert!(!is_malformed_chat_line(
            "[12:00:00] [main/INFO]: [CHAT] [Baritone] goal reached"
        ));
        assert!(!is_malformed_chat_line(
            "[12:00:00] [main/INFO]: [CHAT] Steve joined the game"
        ));
        assert!(!is_malformed_chat_line(
            "[12:00:00] [main/INFO]: not chat at all"
        ));
    }

    #[test]
    fn test_truncated_player_chat_is_malformed() {
        assert!(is_malformed_chat_line(
            "[12:00:00] [main/INFO]: [CHAT] <Steve farm home"
        ));
    }

    #[test]
    fn test_well_formed_player_chat_is_not_malformed() {
        assert!(!is_malformed_chat_line(
            "[12:00:00] [main/INFO]: [CHAT] <Steve> farm home"
        ));
    }
}
