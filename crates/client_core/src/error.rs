use thiserror::Error;

/// Infrastructure failure while loading the item list. Not retried
/// automatically; callers escalate it to a top-level fallback.
///
/// Carries the server-provided message when one exists, otherwise the
/// status text or the underlying transport error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load items: {0}")]
pub struct FetchFailed(pub String);

/// Transport-level failure while submitting an item: the network was
/// unreachable or a 2xx response carried a malformed body.
///
/// Distinct from an ordinary rejection (`SubmitOutcome::Rejected`), which
/// stays local to the form. This channel escalates like [`FetchFailed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("item submit transport failure: {0}")]
pub struct SubmitTransport(pub String);

impl From<reqwest::Error> for SubmitTransport {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}
