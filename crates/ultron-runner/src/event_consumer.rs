use tracing::{error, info};

use ultron_events::{ChatEvent, EventEnvelope, EventType, SystemEvent};

// Re-export EventConsumer from ultron-events
pub use ultron_events::EventConsumer;

/// Event consumer that logs events to the console
pub struct LoggingConsumer;

impl LoggingConsumer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingConsumer {
    fn default() -> Self {
        Self::new()
    }
}

impl EventConsumer for LoggingConsumer {
    fn handle_event(&mut self, envelope: EventEnvelope) {
        match envelope.event {
            EventType::Chat(chat_event) => match chat_event {
                ChatEvent::Chat { sender, message } => {
                    info!(target: "events", "CHAT <{}> {}", sender, message);
                }
                ChatEvent::Whisper { sender, message } => {
                    info!(target: "events", "WHISPER {} -> {}", sender, message);
                }
            },
            EventType::System(system_event) => match system_event {
                SystemEvent::Connected { endpoint } => {
                    info!(target: "events", "Connected to GameQuery at {}", endpoint);
                }
                SystemEvent::RoutineStarted { name, sender } => {
                    info!(target: "events", "Routine '{}' started for {}", name, sender);
                }
                SystemEvent::RoutineFinished { name, success } => {
                    if success {
                        info!(target: "events", "Routine '{}' finished", name);
                    } else {
                        error!(target: "events", "Routine '{}' failed", name);
                    }
                }
                SystemEvent::Shutdown => {
                    info!(target: "events", "Shutting down");
                }
            },
        }
    }
}
