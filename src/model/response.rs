use serde::Serialize;

/// Parse mode for formatted messages.
pub const MARKDOWN_PARSE_MODE: &str = "Markdown";

/// A message sent by the bot in reply to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    /// The chat to post the message in.
    pub(crate) chat_id: i64,

    /// The message being replied to.
    #[serde(
        rename = "reply_to_message_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) reply_to: Option<i64>,

    /// The formatted text.
    pub(crate) text: String,

    /// The parse mode of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) parse_mode: Option<String>,

    /// Whether link previews are disabled.
    pub(crate) disable_web_page_preview: bool,
}

impl OutgoingMessage {
    /// Creates a Markdown reply to the given message, with link previews disabled.
    pub fn markdown_reply(chat_id: i64, reply_to: i64, text: &str) -> Self {
        Self {
            chat_id,
            reply_to: Some(reply_to),
            text: text.to_string(),
            parse_mode: Some(MARKDOWN_PARSE_MODE.to_string()),
            disable_web_page_preview: true,
        }
    }

    /// Creates a plain text reply to the given message.
    pub fn plain_reply(chat_id: i64, reply_to: i64, text: &str) -> Self {
        Self {
            chat_id,
            reply_to: Some(reply_to),
            text: text.to_string(),
            parse_mode: None,
            disable_web_page_preview: false,
        }
    }

    /// Creates a Markdown message posted to the chat without replying.
    pub fn markdown(chat_id: i64, text: &str) -> Self {
        Self {
            chat_id,
            reply_to: None,
            text: text.to_string(),
            parse_mode: Some(MARKDOWN_PARSE_MODE.to_string()),
            disable_web_page_preview: false,
        }
    }

    /// Retrieves the chat identifier.
    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    /// Retrieves the identifier of the message being replied to.
    pub fn reply_to(&self) -> Option<i64> {
        self.reply_to
    }

    /// Retrieves the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Retrieves the parse mode.
    pub fn parse_mode(&self) -> Option<&str> {
        self.parse_mode.as_deref()
    }
}
