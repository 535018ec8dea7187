//! Core types for the suggest component.

use super::fetch::FetchError;
use bubbletea_rs::Msg;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

/// One candidate returned by the suggestion endpoint.
///
/// `id` is what the form submits, `label` (or `value` when there is no
/// label) is what the user sees.
///
/// ```rust
/// use suggest_widget::suggest::Suggestion;
///
/// let s: Vec<Suggestion> = serde_json::from_str(r#"[{"id": 7, "value": "apple"}]"#).unwrap();
/// assert_eq!(s[0].id, "7");
/// assert_eq!(s[0].display(), "apple");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    /// Identifier committed to the hidden form field.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Raw value.
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    /// Human-readable label.
    #[serde(default)]
    pub label: Option<String>,
}

impl Suggestion {
    /// Creates a suggestion without a label.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            label: None,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The text shown in the list and copied into the input on selection.
    pub fn display(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.value,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or a number, found {other}"
        ))),
    }
}

/// The hidden form field that carries the committed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenField {
    /// Form field name.
    pub name: String,
    /// Committed value, the id of the last selected suggestion.
    pub value: String,
}

/// Where the widget is in its type, fetch, pick cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// List hidden and nothing pending.
    Idle,
    /// A debounce timer is pending.
    Typing,
    /// A request is in flight.
    Fetching,
    /// The suggestion list is shown.
    Listing,
}

/// Fired when the debounce delay elapses.
///
/// Only the message carrying the widget's current tag triggers a fetch;
/// older ones belong to timers that were superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceMsg {
    /// Widget the timer belongs to.
    pub id: i64,
    /// Tag current when the timer was started.
    pub tag: u64,
}

/// A successful fetch.
#[derive(Debug, Clone)]
pub struct SuggestionsMsg {
    /// Widget that issued the request.
    pub id: i64,
    /// Sequence number of the request.
    pub seq: u64,
    /// Query term that was sent.
    pub term: String,
    /// Parsed suggestions, in response order.
    pub suggestions: Vec<Suggestion>,
}

/// A failed fetch. Hosts may observe this message to report the failure.
#[derive(Debug, Clone)]
pub struct FetchErrMsg {
    /// Widget that issued the request.
    pub id: i64,
    /// Sequence number of the request.
    pub seq: u64,
    /// Query term that was sent.
    pub term: String,
    /// What went wrong.
    pub error: Arc<FetchError>,
}

impl From<DebounceMsg> for Msg {
    fn from(msg: DebounceMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<SuggestionsMsg> for Msg {
    fn from(msg: SuggestionsMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<FetchErrMsg> for Msg {
    fn from(msg: FetchErrMsg) -> Self {
        Box::new(msg) as Msg
    }
}
