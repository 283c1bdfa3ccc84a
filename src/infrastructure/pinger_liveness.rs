use std::time::Duration;

use anyhow::anyhow;
use chrono::Local;
use log::{error, info, warn};
use reqwest::{Client, StatusCode};
use tokio::{sync::watch, task::JoinHandle, time::interval};

use crate::StdResult;

const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Periodically requests an address so that the hosting instance stays awake.
#[derive(Debug)]
pub struct LivenessPinger {
    client: Client,
    url: String,
    interval: Duration,
}

impl LivenessPinger {
    /// Creates a new `LivenessPinger` instance.
    pub fn try_new(url: &str, interval: Duration) -> StdResult<Self> {
        if interval.is_zero() {
            return Err(anyhow!("Ping interval must not be zero"));
        }
        let client = Client::builder().timeout(PING_TIMEOUT).build()?;

        Ok(Self {
            client,
            url: url.to_string(),
            interval,
        })
    }

    /// Requests the address once.
    pub async fn ping(&self) -> StdResult<StatusCode> {
        Ok(self.client.get(&self.url).send().await?.status())
    }

    async fn ping_and_log(&self) {
        match self.ping().await {
            Ok(status) if status == StatusCode::OK => {
                info!(
                    "Ping succeeded: 200 at {}",
                    Local::now().format("%H:%M:%S")
                );
            }
            Ok(status) => warn!("Ping returned status: {status}"),
            Err(e) => error!("Ping failed: {e}"),
        }
    }

    /// Starts pinging in the background, the first ping being immediate.
    pub fn start(self) -> PingerHandle {
        let (stop_sender, mut stop_receiver) = watch::channel(false);
        info!(
            "Liveness pinger started for {}, interval {}s",
            self.url,
            self.interval.as_secs()
        );
        let task = tokio::spawn(async move {
            let mut ticker = interval(self.interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => self.ping_and_log().await,
                    _ = stop_receiver.changed() => break,
                }
            }
            info!("Liveness pinger stopped");
        });

        PingerHandle { stop_sender, task }
    }
}

/// A handle on a running `LivenessPinger`.
pub struct PingerHandle {
    stop_sender: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PingerHandle {
    /// Stops the pinger and waits for its task to end.
    pub async fn stop(self) -> StdResult<()> {
        self.stop_sender.send_replace(true);
        self.task.await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use tokio::time::sleep;

    use super::*;

    #[test]
    fn try_new_rejects_zero_interval() {
        LivenessPinger::try_new("http://localhost", Duration::ZERO)
            .expect_err("Expected an invalid interval error");
    }

    #[tokio::test]
    async fn ping_returns_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/");
            then.status(503);
        });
        let pinger = LivenessPinger::try_new(&server.url("/"), Duration::from_secs(60)).unwrap();

        let status = pinger.ping().await.unwrap();

        mock.assert();
        assert_eq!(StatusCode::SERVICE_UNAVAILABLE, status);
    }

    #[tokio::test]
    async fn ping_fails_on_transport_error() {
        let pinger = LivenessPinger::try_new("http://127.0.0.1:1/", Duration::from_secs(60)).unwrap();

        pinger
            .ping()
            .await
            .expect_err("Expected a transport error");
    }

    #[tokio::test]
    async fn start_pings_until_stopped() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/health");
            then.status(200);
        });
        let pinger =
            LivenessPinger::try_new(&server.url("/health"), Duration::from_millis(50)).unwrap();

        let handle = pinger.start();
        sleep(Duration::from_millis(180)).await;
        handle.stop().await.unwrap();
        let hits_when_stopped = mock.hits();
        sleep(Duration::from_millis(150)).await;

        assert!(hits_when_stopped >= 2);
        assert_eq!(hits_when_stopped, mock.hits());
    }
}
