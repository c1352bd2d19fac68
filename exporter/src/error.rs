use thiserror::Error;

use crate::pipeline::ScrapeState;

/// Boxed transport-level cause carried by [`ScrapeError::FetchFailed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by a single collection step.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The node could not be reached, or the transfer of its response failed.
    #[error("GET {endpoint} failed: {source}")]
    FetchFailed {
        endpoint: String,
        #[source]
        source: BoxError,
    },
    /// The node answered, but the body could not be decoded or a required
    /// field could not be parsed.
    #[error("malformed {what}: {reason}")]
    MalformedResponse { what: &'static str, reason: String },
}

impl ScrapeError {
    pub fn fetch_failed(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ScrapeError::FetchFailed {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn malformed(what: &'static str, reason: impl ToString) -> Self {
        ScrapeError::MalformedResponse {
            what,
            reason: reason.to_string(),
        }
    }
}

/// A scrape that stopped before reaching [`ScrapeState::Exported`].
///
/// `at` is the last state the pipeline reached successfully; any registry
/// writes made by collectors before that point remain in place.
#[derive(Debug, Error)]
#[error("scrape aborted after {at:?} in collector `{collector}`: {source}")]
pub struct ScrapeAborted {
    pub at: ScrapeState,
    pub collector: &'static str,
    #[source]
    pub source: ScrapeError,
}
