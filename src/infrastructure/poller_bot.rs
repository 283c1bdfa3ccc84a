use std::{sync::Arc, time::Duration};

use log::{error, info, warn};
use tokio::{task::JoinHandle, time::sleep};

use crate::{BotMessenger, CommandDispatcher, StdResult};

/// A polling loop that feeds received messages to the dispatcher.
pub struct BotPoller {
    messenger: Arc<dyn BotMessenger>,
    dispatcher: Arc<CommandDispatcher>,
    poll_timeout: Duration,
    error_delay: Duration,
}

impl BotPoller {
    /// Creates a new `BotPoller` instance.
    pub fn new(
        messenger: Arc<dyn BotMessenger>,
        dispatcher: Arc<CommandDispatcher>,
        poll_timeout: Duration,
        error_delay: Duration,
    ) -> Self {
        Self {
            messenger,
            dispatcher,
            poll_timeout,
            error_delay,
        }
    }

    /// Drops the updates received while the bot was offline and returns the offset to poll from.
    ///
    /// The call must not wait: a message arriving while it is held open would be dropped too.
    pub async fn skip_pending_updates(&self) -> StdResult<Option<i64>> {
        let (_, last_update_id) = self
            .messenger
            .fetch_messages(Some(-1), Duration::ZERO)
            .await?;

        Ok(last_update_id.map(|update_id| update_id + 1))
    }

    /// Fetches one batch of messages and hands each one to its own handler task.
    ///
    /// Returns the offset of the next batch and the handles of the spawned tasks.
    pub async fn poll_once(
        &self,
        offset: Option<i64>,
    ) -> StdResult<(Option<i64>, Vec<JoinHandle<()>>)> {
        let (messages, last_update_id) = self
            .messenger
            .fetch_messages(offset, self.poll_timeout)
            .await?;
        let handles = messages
            .into_iter()
            .map(|message| {
                let dispatcher = Arc::clone(&self.dispatcher);
                tokio::spawn(async move {
                    if let Err(e) = dispatcher.handle(&message).await {
                        error!("Failed to handle {message}: {e:?}");
                    }
                })
            })
            .collect();
        let next_offset = last_update_id
            .map(|update_id| update_id + 1)
            .or(offset);

        Ok((next_offset, handles))
    }

    /// Polls forever.
    pub async fn run(&self) -> StdResult<()> {
        let mut offset = match self.skip_pending_updates().await {
            Ok(offset) => offset,
            Err(e) => {
                warn!("Failed to skip pending updates: {e:?}");
                None
            }
        };
        info!("Polling for messages");

        loop {
            match self.poll_once(offset).await {
                Ok((next_offset, _)) => offset = next_offset,
                Err(e) => {
                    warn!("Polling failed: {e:?}");
                    sleep(self.error_delay).await;
                }
            }
        }
    }
}
