use std::time::Duration;

use crate::{IncomingMessage, OutgoingMessage, StdResult};

/// A trait for exchanging messages with the users of a bot platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BotMessenger: Sync + Send {
    /// Fetches the text messages received from the given update offset on,
    /// waiting up to `poll_timeout` for one to arrive.
    ///
    /// Each call also returns the identifier of the last update seen, which may
    /// belong to an update without text.
    async fn fetch_messages(
        &self,
        offset: Option<i64>,
        poll_timeout: Duration,
    ) -> StdResult<(Vec<IncomingMessage>, Option<i64>)>;

    /// Sends a message.
    async fn send_message(&self, message: &OutgoingMessage) -> StdResult<()>;
}
