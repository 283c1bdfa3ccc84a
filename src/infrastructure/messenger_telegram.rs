use std::time::Duration;

use anyhow::{Context, anyhow};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{BotMessenger, IncomingMessage, OutgoingMessage, StdResult};

/// The production endpoint of the Telegram Bot API.
pub const TELEGRAM_API_ENDPOINT: &str = "https://api.telegram.org";

#[derive(Deserialize, Debug)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Deserialize, Debug)]
struct Message {
    message_id: i64,
    chat: Chat,
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Chat {
    id: i64,
}

/// Exchanges messages with Telegram users through the Bot API long polling.
#[derive(Debug)]
pub struct TelegramMessenger {
    client: Client,
    bot_url: String,
    request_timeout: Duration,
}

impl TelegramMessenger {
    /// Creates a new `TelegramMessenger` instance.
    ///
    /// `request_timeout` bounds every call, on top of the long polling hold time
    /// for `getUpdates`.
    pub fn try_new(endpoint: &str, bot_token: &str, request_timeout: Duration) -> StdResult<Self> {
        if bot_token.trim().is_empty() {
            return Err(anyhow!("Missing bot token"));
        }
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            bot_url: format!("{}/bot{}", endpoint.trim_end_matches('/'), bot_token.trim()),
            request_timeout,
        })
    }

    async fn decode<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> StdResult<Option<T>> {
        let status = response.status();
        let body: ApiResponse<T> = response
            .json()
            .await
            .with_context(|| format!("Failed to decode {method} response (status {status})"))?;
        if !body.ok {
            return Err(anyhow!(
                "Telegram {method} failed (status {status}): {}",
                body.description.unwrap_or_default()
            ));
        }

        Ok(body.result)
    }
}

#[async_trait::async_trait]
impl BotMessenger for TelegramMessenger {
    async fn fetch_messages(
        &self,
        offset: Option<i64>,
        poll_timeout: Duration,
    ) -> StdResult<(Vec<IncomingMessage>, Option<i64>)> {
        let mut query = vec![("timeout", poll_timeout.as_secs().to_string())];
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }
        let response = self
            .client
            .get(format!("{}/getUpdates", self.bot_url))
            .query(&query)
            .timeout(poll_timeout + self.request_timeout)
            .send()
            .await
            .with_context(|| "Failed to call getUpdates")?;
        let updates: Vec<Update> = Self::decode("getUpdates", response)
            .await?
            .unwrap_or_default();
        debug!("Received {} updates", updates.len());

        let last_update_id = updates.iter().map(|update| update.update_id).max();
        let messages = updates
            .into_iter()
            .filter_map(|update| {
                let message = update.message?;
                let text = message.text?;
                Some(IncomingMessage::new(
                    update.update_id,
                    message.chat.id,
                    message.message_id,
                    &text,
                ))
            })
            .collect();

        Ok((messages, last_update_id))
    }

    async fn send_message(&self, message: &OutgoingMessage) -> StdResult<()> {
        let response = self
            .client
            .post(format!("{}/sendMessage", self.bot_url))
            .json(message)
            .timeout(self.request_timeout)
            .send()
            .await
            .with_context(|| "Failed to call sendMessage")?;
        Self::decode::<serde_json::Value>("sendMessage", response).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;

    const TOKEN: &str = "123:secret";

    fn build_messenger(server: &MockServer) -> TelegramMessenger {
        TelegramMessenger::try_new(&server.base_url(), TOKEN, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn try_new_fails_without_token() {
        TelegramMessenger::try_new(TELEGRAM_API_ENDPOINT, " ", Duration::from_secs(1))
            .expect_err("Expected a missing token error");
    }

    #[tokio::test]
    async fn fetch_messages_keeps_text_messages() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path(format!("/bot{TOKEN}/getUpdates"))
                .query_param("offset", "10")
                .query_param("timeout", "1");
            then.status(200).json_body(json!({
                "ok": true,
                "result": [
                    {
                        "update_id": 10,
                        "message": {
                            "message_id": 100,
                            "chat": { "id": 42, "type": "private" },
                            "text": "/git rust"
                        }
                    },
                    {
                        "update_id": 11,
                        "message": {
                            "message_id": 101,
                            "chat": { "id": 42, "type": "private" },
                            "sticker": {}
                        }
                    },
                    {
                        "update_id": 12,
                        "edited_message": {}
                    }
                ]
            }));
        });
        let messenger = build_messenger(&server);

        let (messages, last_update_id) = messenger
            .fetch_messages(Some(10), Duration::from_secs(1))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(vec![IncomingMessage::new(10, 42, 100, "/git rust")], messages);
        assert_eq!(10, messages[0].update_id());
        assert_eq!(Some(12), last_update_id);
    }

    #[tokio::test]
    async fn fetch_messages_without_hold_time() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path(format!("/bot{TOKEN}/getUpdates"))
                .query_param("offset", "-1")
                .query_param("timeout", "0");
            then.status(200).json_body(json!({ "ok": true, "result": [] }));
        });
        let messenger = build_messenger(&server);

        let (messages, last_update_id) = messenger
            .fetch_messages(Some(-1), Duration::ZERO)
            .await
            .unwrap();

        mock.assert();
        assert!(messages.is_empty());
        assert_eq!(None, last_update_id);
    }

    #[tokio::test]
    async fn fetch_messages_fails_on_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path(format!("/bot{TOKEN}/getUpdates"));
            then.status(401)
                .json_body(json!({ "ok": false, "description": "Unauthorized" }));
        });
        let messenger = build_messenger(&server);

        messenger
            .fetch_messages(None, Duration::from_secs(1))
            .await
            .expect_err("Expected an API error");
    }

    #[tokio::test]
    async fn send_message_posts_markdown_reply() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path(format!("/bot{TOKEN}/sendMessage"))
                .json_body(json!({
                    "chat_id": 42,
                    "reply_to_message_id": 7,
                    "text": "*hello*",
                    "parse_mode": "Markdown",
                    "disable_web_page_preview": true
                }));
            then.status(200)
                .json_body(json!({ "ok": true, "result": { "message_id": 8 } }));
        });
        let messenger = build_messenger(&server);

        messenger
            .send_message(&OutgoingMessage::markdown_reply(42, 7, "*hello*"))
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn send_message_omits_missing_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path(format!("/bot{TOKEN}/sendMessage"))
                .json_body(json!({
                    "chat_id": 42,
                    "text": "plain",
                    "disable_web_page_preview": false
                }));
            then.status(200)
                .json_body(json!({ "ok": true, "result": { "message_id": 8 } }));
        });
        let messenger = build_messenger(&server);
        let message = OutgoingMessage {
            chat_id: 42,
            reply_to: None,
            text: "plain".to_string(),
            parse_mode: None,
            disable_web_page_preview: false,
        };

        messenger.send_message(&message).await.unwrap();

        mock.assert();
    }
}
