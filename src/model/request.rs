use std::fmt::Display;

/// A command sent by a user to the bot
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Command {
    /// Shows the welcome text.
    Start,

    /// Shows the usage hints.
    Help,

    /// Searches repositories on the code-hosting site. The query may be empty.
    Git(String),

    /// Searches releases on the listing site. The query may be empty.
    Apk(String),
}

impl Command {
    /// Parses a message text into a command.
    ///
    /// The command word is case-insensitive and may carry a `@botname` suffix.
    /// Returns `None` when the text is not a known command.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let text = text.strip_prefix('/')?;
        let (head, arguments) = match text.split_once(char::is_whitespace) {
            Some((head, arguments)) => (head, arguments.trim()),
            None => (text, ""),
        };
        let name = head.split('@').next().unwrap_or_default().to_lowercase();

        match name.as_str() {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            "git" => Some(Command::Git(arguments.to_string())),
            "apk" => Some(Command::Apk(arguments.to_string())),
            _ => None,
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Start => write!(f, "/start"),
            Command::Help => write!(f, "/help"),
            Command::Git(query) => write!(f, "/git {query}"),
            Command::Apk(query) => write!(f, "/apk {query}"),
        }
    }
}

/// A text message received from a bot user
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IncomingMessage {
    /// The identifier of the update carrying the message.
    pub(crate) update_id: i64,

    /// The chat the message was posted in.
    pub(crate) chat_id: i64,

    /// The identifier of the message in its chat.
    pub(crate) message_id: i64,

    /// The text of the message.
    pub(crate) text: String,
}

impl IncomingMessage {
    /// Creates a new `IncomingMessage`.
    pub fn new(update_id: i64, chat_id: i64, message_id: i64, text: &str) -> Self {
        Self {
            update_id,
            chat_id,
            message_id,
            text: text.to_string(),
        }
    }

    /// Retrieves the update identifier.
    pub fn update_id(&self) -> i64 {
        self.update_id
    }

    /// Retrieves the chat identifier.
    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    /// Retrieves the message identifier.
    pub fn message_id(&self) -> i64 {
        self.message_id
    }

    /// Retrieves the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Creates a dummy `IncomingMessage` for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy(text: &str) -> Self {
        Self::new(1, 42, 7, text)
    }
}

impl Display for IncomingMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IncomingMessage: update_id={}, chat_id={}, message_id={}, text={:?}",
            self.update_id, self.chat_id, self.message_id, self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_search_commands_with_arguments() {
        assert_eq!(
            Command::parse("/git python telegram"),
            Some(Command::Git("python telegram".to_string()))
        );
        assert_eq!(
            Command::parse("  /apk   youtube  "),
            Some(Command::Apk("youtube".to_string()))
        );
    }

    #[test]
    fn parse_search_command_without_arguments() {
        assert_eq!(Command::parse("/git"), Some(Command::Git(String::new())));
        assert_eq!(Command::parse("/apk   "), Some(Command::Apk(String::new())));
    }

    #[test]
    fn parse_command_with_bot_mention() {
        assert_eq!(
            Command::parse("/GIT@search_bot rust cli"),
            Some(Command::Git("rust cli".to_string()))
        );
        assert_eq!(Command::parse("/start@search_bot"), Some(Command::Start));
    }

    #[test]
    fn parse_ignores_unknown_text() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("/unknown foo"), None);
        assert_eq!(Command::parse(""), None);
    }
}
