/// Chat events extracted from the game client's log file
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Public chat: `[CHAT] <Sender> message`
    Chat { sender: String, message: String },
    /// Whisper: `[CHAT] Sender whispers to you: message`
    Whisper { sender: String, message: String },
}

impl ChatEvent {
    pub fn sender(&self) -> &str {
        match self {
            ChatEvent::Chat { sender, .. } => sender,
            ChatEvent::Whisper { sender, .. } => sender,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ChatEvent::Chat { message, .. } => message,
            ChatEvent::Whisper { message, .. } => message,
        }
    }
}

/// Classifies raw log lines into chat events, suppressing the bot's own
/// chat output so it never reacts to itself.
#[derive(Debug, Clone)]
pub struct ChatClassifier {
    bot_name: String,
}

impl ChatClassifier {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
        }
    }

    /// Classify a single log line. Returns None for non-chat lines,
    /// unparseable chat lines, and the bot's own messages.
    pub fn classify(&self, line: &str) -> Option<ChatEvent> {
        let event = parse_chat_line(line)?;
        if event.sender() == self.bot_name {
            return None;
        }
        Some(event)
    }
}

/// Parse a log line into a chat event, without own-name suppression.
///
/// Public chat lines look like `[12:00:00] [Render thread/INFO]: [CHAT]
/// <Sender> message`; whispers replace the angle brackets with
/// `Sender whispers to you: message`.
pub fn parse_chat_line(line: &str) -> Option<ChatEvent> {
    if let Some(rest) = split_after(line, "[CHAT] <") {
        let (sender, message) = rest.split_once('>')?;
        return Some(ChatEvent::Chat {
            sender: sender.trim().to_string(),
            message: message.trim().to_string(),
        });
    }

    if line.contains("[CHAT]") && line.contains("whispers to you:") {
        let rest = split_after(line, "[CHAT]")?;
        let (sender, message) = rest.split_once("whispers to you:")?;
        return Some(ChatEvent::Whisper {
            sender: sender.trim().to_string(),
            message: message.trim().to_string(),
        });
    }

    None
}

fn split_after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.split_once(marker).map(|(_, rest)| rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_public_chat() {
        let line = "[12:34:56] [Render thread/INFO]: [CHAT] <Steve> farm home";
        assert_eq!(
            parse_chat_line(line),
            Some(ChatEvent::Chat {
                sender: "Steve".to_string(),
                message: "farm home".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_whisper() {
        let line = "[12:34:56] [Render thread/INFO]: [CHAT] Alex whispers to you: go home";
        assert_eq!(
            parse_chat_line(line),
            Some(ChatEvent::Whisper {
                sender: "Alex".to_string(),
                message: "go home".to_string(),
            })
        );
    }

    #[test]
    fn test_non_chat_lines_are_ignored() {
        assert_eq!(
            parse_chat_line("[12:34:56] [Render thread/INFO]: Baritone goal reached"),
            None
        );
        assert_eq!(parse_chat_line(""), None);
    }

    #[test]
    fn test_malformed_public_chat_is_ignored() {
        // Opening bracket but no closing '>'
        assert_eq!(
            parse_chat_line("[12:34:56] [Render thread/INFO]: [CHAT] <Steve farm"),
            None
        );
    }

    #[test]
    fn test_message_with_angle_brackets_in_body() {
        let line = "[12:00:00] [Render thread/INFO]: [CHAT] <Steve> set spot <here>";
        assert_eq!(
            parse_chat_line(line),
            Some(ChatEvent::Chat {
                sender: "Steve".to_string(),
                message: "set spot <here>".to_string(),
            })
        );
    }

    #[test]
    fn test_classifier_drops_own_messages() {
        let classifier = ChatClassifier::new("IronManForever");
        let own = "[12:00:00] [Render thread/INFO]: [CHAT] <IronManForever> Ok komrad";
        let other = "[12:00:00] [Render thread/INFO]: [CHAT] <Steve> mine diamond_ore";
        assert_eq!(classifier.classify(own), None);
        assert!(classifier.classify(other).is_some());
    }

    #[test]
    fn test_classifier_drops_own_whispers() {
        let classifier = ChatClassifier::new("IronManForever");
        let line = "[12:00:00] [CHAT] IronManForever whispers to you: hi";
        assert_eq!(classifier.classify(line), None);
    }
}
