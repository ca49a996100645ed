//! Core event types for ultron
//!
//! This crate provides the foundational types shared between the client and
//! the runner, allowing consumers to be implemented without circular
//! dependencies.

use std::time::Instant;

pub mod chat;
pub mod commands;

pub use chat::{ChatClassifier, ChatEvent};
pub use commands::{Command, GotoTarget};

/// Source of the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    /// Event originated from the game client's log file
    LogFile,
    /// Event originated from system/lifecycle
    System,
}

/// System and lifecycle events
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// GameQuery endpoint answered the startup probe
    Connected { endpoint: String },
    RoutineStarted { name: String, sender: String },
    RoutineFinished { name: String, success: bool },
    Shutdown,
}

/// Unified event type seen by consumers
#[derive(Debug, Clone)]
pub enum EventType {
    Chat(ChatEvent),
    System(SystemEvent),
}

/// Complete event envelope
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub event: EventType,
    pub timestamp: Instant,
    pub source: EventSource,
}

impl EventEnvelope {
    pub fn new(event: EventType, source: EventSource) -> Self {
        Self {
            event,
            timestamp: Instant::now(),
            source,
        }
    }

    pub fn chat_event(event: ChatEvent) -> Self {
        Self::new(EventType::Chat(event), EventSource::LogFile)
    }

    pub fn system_event(event: SystemEvent) -> Self {
        Self::new(EventType::System(event), EventSource::System)
    }
}

/// Trait for consuming bot events - allows different observers for the
/// same event stream (console logging, transcripts, ...)
pub trait EventConsumer: Send + 'static {
    /// Handle an event envelope
    fn handle_event(&mut self, envelope: EventEnvelope);
}
