//! Outbound callback dispatch
//!
//! Fire-and-log delivery: one POST per detected press, the full response
//! body is read for visibility, and a non-success status is part of the
//! outcome rather than a delivery failure. Network-level failures surface
//! as [`DispatchError::Delivery`] and are logged and discarded by the run
//! loop; they never reach the capture path.

use anyhow::{Context, Result};
use presswire_core::Button;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Per-request timeout for callback deliveries
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The callback target could not be reached or the response body could
    /// not be read (connection refused, timeout, DNS failure)
    #[error("delivery to {url} failed: {source}")]
    Delivery {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Outcome of one delivery attempt; logged, never persisted
#[derive(Debug)]
pub struct DispatchOutcome {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP dispatcher shared by all deliveries
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
}

impl Dispatcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Deliver one press notification for `button`.
    ///
    /// POSTs the configured payload as JSON to the button's callback URL
    /// and reads the response body in full. At most one attempt per press;
    /// no retry, no queueing.
    pub async fn dispatch(&self, button: &Button) -> Result<DispatchOutcome, DispatchError> {
        let response = self
            .client
            .post(&button.url)
            .json(&button.payload)
            .send()
            .await
            .map_err(|source| DispatchError::Delivery {
                url: button.url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| DispatchError::Delivery {
                url: button.url.clone(),
                source,
            })?;

        debug!(button = %button.label, status = %status, "Callback response read");
        Ok(DispatchOutcome { status, body })
    }
}
