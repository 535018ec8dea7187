//! Fetching suggestions.
//!
//! The widget talks to its backend through [`SuggestionSource`]. The
//! default source, [`HttpSource`], sends `GET <url>?term=<text>` and parses
//! a JSON array of [`Suggestion`]s. Nothing here retries: a failure is
//! handed back to the widget as a [`FetchErrMsg`] and the next keystroke
//! starts over.

use super::types::{FetchErrMsg, Suggestion, SuggestionsMsg};
use bubbletea_rs::{Cmd, Msg};
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use reqwest::{Client, StatusCode, Url};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Why a fetch produced no suggestions.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("endpoint answered {0}")]
    Status(StatusCode),
    /// The body is not a JSON array of suggestions.
    #[error("malformed suggestion payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// A custom source failed.
    #[error("{0}")]
    Source(String),
}

/// Future returned by [`SuggestionSource::fetch`].
pub type SourceFuture = Pin<Box<dyn Future<Output = Result<Vec<Suggestion>, FetchError>> + Send>>;

/// Backend that turns a query term into suggestions.
///
/// ```rust
/// use suggest_widget::suggest::{FetchError, SourceFuture, Suggestion, SuggestionSource};
///
/// struct Fruit;
///
/// impl SuggestionSource for Fruit {
///     fn fetch(&self, term: String) -> SourceFuture {
///         Box::pin(async move {
///             Ok::<_, FetchError>(
///                 ["apple", "apricot"]
///                     .iter()
///                     .filter(|f| f.starts_with(&term))
///                     .map(|f| Suggestion::new(*f, *f))
///                     .collect(),
///             )
///         })
///     }
/// }
/// ```
pub trait SuggestionSource: Send + Sync {
    /// Fetches suggestions for `term`.
    fn fetch(&self, term: String) -> SourceFuture;
}

/// Queries an HTTP endpoint with `?term=<text>`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    endpoint: Url,
}

impl HttpSource {
    /// Creates a source for `endpoint` with a default client.
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Creates a source that sends requests through `client`.
    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// The base endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The URL requested for `term`. Query parameters already present on
    /// the endpoint are kept.
    ///
    /// ```rust
    /// use suggest_widget::suggest::HttpSource;
    ///
    /// let source = HttpSource::new("https://example.com/s?lang=en".parse().unwrap());
    /// assert_eq!(
    ///     source.request_url("a&b").as_str(),
    ///     "https://example.com/s?lang=en&term=a%26b"
    /// );
    /// ```
    pub fn request_url(&self, term: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("term", term);
        url
    }
}

impl SuggestionSource for HttpSource {
    fn fetch(&self, term: String) -> SourceFuture {
        let client = self.client.clone();
        let url = self.request_url(&term);
        Box::pin(async move {
            debug!(%url, "requesting suggestions");
            let response = client
                .get(url)
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache")
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json")
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status));
            }

            let body = response.bytes().await?;
            parse_suggestions(&body)
        })
    }
}

/// Parses a response body into suggestions, keeping their order.
pub fn parse_suggestions(body: &[u8]) -> Result<Vec<Suggestion>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

/// Command that runs one fetch and reports back as a message.
pub(super) fn fetch_cmd(source: Arc<dyn SuggestionSource>, id: i64, seq: u64, term: String) -> Cmd {
    Box::pin(async move {
        let msg = match source.fetch(term.clone()).await {
            Ok(suggestions) => Box::new(SuggestionsMsg {
                id,
                seq,
                term,
                suggestions,
            }) as Msg,
            Err(error) => Box::new(FetchErrMsg {
                id,
                seq,
                term,
                error: Arc::new(error),
            }) as Msg,
        };
        Some(msg)
    })
}
