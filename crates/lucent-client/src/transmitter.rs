use anyhow::Context;
use lucent_core::report::WirePayload;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const REGISTER_PATH: &str = "/register-exception";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Best-effort delivery of wire payloads to the collector.
///
/// Missing credentials mean the transmitter is disabled, not broken: `send`
/// returns `false` without any network activity. A bounded timeout keeps a
/// slow collector from stalling the host's fault-handling path.
pub struct Transmitter {
    client: Client,
    url: String,
    key: String,
}

impl Transmitter {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
            key: key.into(),
        })
    }

    /// One POST, no retries, no buffering. Returns `false` when disabled,
    /// on any transport error, and on non-2xx responses.
    pub async fn send(&self, payload: &WirePayload) -> bool {
        if self.url.is_empty() || self.key.is_empty() {
            return false;
        }

        let endpoint = format!("{}{}", self.url.trim_end_matches('/'), REGISTER_PATH);
        let result = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.key)
            .json(payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!("Fault report delivered to {}", endpoint);
                true
            }
            Ok(response) => {
                warn!("Collector rejected fault report: {}", response.status());
                false
            }
            Err(err) => {
                warn!("Failed to deliver fault report: {}", err);
                false
            }
        }
    }
}
