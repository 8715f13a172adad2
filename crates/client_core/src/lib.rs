use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{domain::Item, error::ApiError, protocol::SubmitOutcome};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub mod error;
pub mod list;
pub mod reconcile;
pub mod submit;

pub use error::{FetchFailed, SubmitTransport};
pub use list::{ListController, ListEntry, LoadState};
pub use submit::{FormState, SubmissionController, SubmitDisposition, SubmitPolicy};

/// Source of the item collection: one read, one create. No caching, no
/// retry; cancellation and error translation are the whole contract.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Loads the full item list.
    ///
    /// Cancellation resolves to an empty list rather than an error: a torn
    /// down caller treats a cancelled load as "no data yet". Every other
    /// failure (non-2xx, network, malformed body) is a [`FetchFailed`].
    async fn fetch_items(&self, cancel: CancellationToken) -> Result<Vec<Item>, FetchFailed>;

    /// Creates an item.
    ///
    /// A non-2xx response is an ordinary rejection reported through
    /// [`SubmitOutcome::Rejected`]; only transport-level failures surface
    /// on the error channel.
    async fn submit_item(&self, item: &Item) -> Result<SubmitOutcome, SubmitTransport>;
}

/// HTTP repository over the fixed items endpoint, e.g. base
/// `http://host/api` serving `GET {base}/items` and `POST {base}/items`.
pub struct HttpItemRepository {
    http: Client,
    base_url: String,
}

impl HttpItemRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn items_url(&self) -> String {
        format!("{}/items", self.base_url.trim_end_matches('/'))
    }

    async fn fetch_items_uncancelled(&self) -> Result<Vec<Item>, FetchFailed> {
        let response = self
            .http
            .get(self.items_url())
            .send()
            .await
            .map_err(|err| FetchFailed(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchFailed(failure_message(status, &body)));
        }
        response
            .json::<Vec<Item>>()
            .await
            .map_err(|err| FetchFailed(err.to_string()))
    }
}

#[async_trait]
impl ItemRepository for HttpItemRepository {
    async fn fetch_items(&self, cancel: CancellationToken) -> Result<Vec<Item>, FetchFailed> {
        // Biased so that a token cancelled before the first poll never
        // races the network future.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("item load cancelled before completion; resolving empty");
                Ok(Vec::new())
            }
            outcome = self.fetch_items_uncancelled() => outcome,
        }
    }

    async fn submit_item(&self, item: &Item) -> Result<SubmitOutcome, SubmitTransport> {
        let response = self.http.post(self.items_url()).json(item).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = failure_message(status, &body);
            debug!(%status, %message, "item submit rejected");
            return Ok(SubmitOutcome::Rejected { message });
        }
        let confirmed = response.json::<Item>().await?;
        Ok(SubmitOutcome::Accepted(confirmed))
    }
}

/// Best message for a non-2xx response: the `ApiError` body's message if
/// the body parses as one, the raw body text otherwise, the status text
/// when the body is empty.
fn failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(api_error) = serde_json::from_str::<ApiError>(body) {
        return api_error.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
