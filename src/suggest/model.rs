//! Core model implementation for the suggest component.

use super::config::{Config, ConfigError};
use super::fetch::{fetch_cmd, FetchError, HttpSource, SuggestionSource};
use super::field::Field;
use super::keymap::{default_key_map, KeyMap};
use super::selection::Selection;
use super::style::Styles;
use super::types::{DebounceMsg, FetchErrMsg, HiddenField, Phase, Suggestion, SuggestionsMsg};
use crate::key::matches_binding;
use crate::Component;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, warn};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A text input with a remotely fetched suggestion list.
///
/// Typing schedules a query once the text reaches the configured minimum
/// length and the user pauses for the debounce delay. The results are
/// shown below the input; arrow keys move the highlight and a confirm key
/// (or a click on a row) copies the row's label into the input and its id
/// into the hidden form field.
///
/// ```rust
/// use suggest_widget::suggest::{new, Config, Phase};
/// use suggest_widget::Component;
///
/// let mut input = new(
///     Config::new("https://example.com/fruit")
///         .with_name("fruit_id")
///         .with_value("3")
///         .with_display_value("Cherry"),
/// );
/// input.focus();
///
/// assert_eq!(input.display_value(), "Cherry");
/// assert_eq!(input.form_field(), ("fruit_id", "3"));
/// assert_eq!(input.phase(), Phase::Idle);
/// ```
pub struct Model {
    /// Prompt drawn before the input.
    pub prompt: String,
    /// Text shown while the input is empty.
    pub placeholder: String,
    /// Width of the input and list in cells. 0 sizes to content.
    pub width: usize,
    /// Visual styles.
    pub styles: Styles,
    /// Key bindings.
    pub key_map: KeyMap,

    pub(super) config: Config,
    pub(super) config_error: Option<ConfigError>,
    pub(super) source: Option<Arc<dyn SuggestionSource>>,

    pub(super) id: i64,
    pub(super) focus: bool,
    pub(super) torn_down: bool,

    pub(super) field: Field,
    pub(super) hidden: HiddenField,
    pub(super) selection: Selection,
    pub(super) list_visible: bool,

    /// Bumped on every schedule; only the latest timer may fire.
    pub(super) debounce_tag: u64,
    pub(super) timer_pending: bool,
    /// Sequence number of the latest issued fetch.
    pub(super) fetch_seq: u64,
    /// Latest fetch still awaiting its answer.
    pub(super) awaiting: Option<u64>,
    /// Answers to fetches up to this sequence number are dropped.
    pub(super) accept_after: u64,
    pub(super) last_error: Option<Arc<FetchError>>,
}

/// Creates a widget from `config`.
///
/// An invalid configuration is logged once and yields an inert widget: it
/// ignores every message and never queries anything. Use [`try_new`] to
/// get the error instead.
pub fn new(config: Config) -> Model {
    let (source, config_error) = match config.endpoint() {
        Ok(endpoint) => (
            Some(Arc::new(HttpSource::new(endpoint)) as Arc<dyn SuggestionSource>),
            None,
        ),
        Err(err) => {
            error!(error = %err, "suggest widget disabled: invalid configuration");
            (None, Some(err))
        }
    };

    Model {
        prompt: "> ".to_string(),
        placeholder: String::new(),
        width: 0,
        styles: Styles::default(),
        key_map: default_key_map(),
        field: Field::new(&config.initial_display),
        hidden: HiddenField {
            name: config.name.clone(),
            value: config.initial_value.clone(),
        },
        config,
        config_error,
        source,
        id: next_id(),
        focus: false,
        torn_down: false,
        selection: Selection::default(),
        list_visible: false,
        debounce_tag: 0,
        timer_pending: false,
        fetch_seq: 0,
        awaiting: None,
        accept_after: 0,
        last_error: None,
    }
}

/// Creates a widget from `config`, failing on an invalid configuration.
pub fn try_new(config: Config) -> Result<Model, ConfigError> {
    config.validate()?;
    Ok(new(config))
}

impl Model {
    /// Replaces the backend the widget queries. Has no effect on an inert
    /// widget.
    pub fn with_source(mut self, source: Arc<dyn SuggestionSource>) -> Self {
        if self.config_error.is_none() {
            self.source = Some(source);
        }
        self
    }

    /// Sets the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Sets the width of the input and list.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Unique id of this widget; carried by its timer and fetch messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The configuration the widget was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Why the widget is inert, if its configuration was rejected.
    pub fn config_error(&self) -> Option<&ConfigError> {
        self.config_error.as_ref()
    }

    /// Whether the widget ignores all input.
    pub fn is_inert(&self) -> bool {
        self.source.is_none() || self.torn_down
    }

    /// The visible text.
    pub fn display_value(&self) -> String {
        self.field.value()
    }

    /// The committed value held in the hidden field.
    pub fn committed_value(&self) -> &str {
        &self.hidden.value
    }

    /// The hidden form field.
    pub fn hidden_field(&self) -> &HiddenField {
        &self.hidden
    }

    /// `(name, committed value)` for form submission.
    pub fn form_field(&self) -> (&str, &str) {
        (&self.hidden.name, &self.hidden.value)
    }

    /// Class name of the suggestion list.
    pub fn list_class(&self) -> &str {
        self.config.list_class()
    }

    /// Suggestions from the latest fetch.
    pub fn suggestions(&self) -> &[Suggestion] {
        self.selection.items()
    }

    /// Index of the highlighted row.
    pub fn active_index(&self) -> Option<usize> {
        self.selection.active()
    }

    /// Whether the list is shown.
    pub fn list_visible(&self) -> bool {
        self.list_visible
    }

    /// The most recent fetch failure, cleared by the next success.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_deref()
    }

    /// Where the widget is in its type, fetch, pick cycle.
    pub fn phase(&self) -> Phase {
        if self.timer_pending {
            Phase::Typing
        } else if self.awaiting.is_some() {
            Phase::Fetching
        } else if self.list_visible {
            Phase::Listing
        } else {
            Phase::Idle
        }
    }

    /// Highlights the next row, wrapping around.
    pub fn next_item(&mut self) {
        if !self.is_inert() && self.list_visible {
            self.selection.next_item();
        }
    }

    /// Highlights the previous row, wrapping around.
    pub fn previous_item(&mut self) {
        if !self.is_inert() && self.list_visible {
            self.selection.previous_item();
        }
    }

    /// Highlights `row` as the pointer moves over it. Returns `false` when
    /// `row` is not a visible row.
    pub fn hover_row(&mut self, row: usize) -> bool {
        if self.is_inert() || !self.list_visible || row >= self.selection.len() {
            return false;
        }
        self.selection.set_active(row as isize);
        true
    }

    /// Selects `row` as if it had been clicked. Returns `false`, changing
    /// nothing, when `row` is not a visible row.
    pub fn click_row(&mut self, row: usize) -> bool {
        if self.is_inert() || !self.list_visible {
            return false;
        }
        self.select_item(row)
    }

    /// Shows `suggestions` as the list, highlighting the first one. An
    /// empty set hides the list. Ignored once the widget is inert.
    pub fn render(&mut self, suggestions: Vec<Suggestion>) {
        if self.is_inert() {
            return;
        }
        self.selection.replace(suggestions);
        self.list_visible = !self.selection.is_empty();
    }

    /// Commits the suggestion at `index`: the input shows its label and
    /// the hidden field takes its id. The list is hidden and anything
    /// pending is cancelled.
    pub fn select_item(&mut self, index: usize) -> bool {
        if self.is_inert() {
            return false;
        }
        let Some(item) = self.selection.items().get(index).cloned() else {
            return false;
        };
        debug!(widget = self.id, id = %item.id, "suggestion selected");
        self.field.set_value(item.display());
        self.hidden.value = item.id;
        self.close();
        true
    }

    /// Empties both the visible text and the committed value.
    pub fn clear(&mut self) {
        if self.is_inert() {
            return;
        }
        debug!(widget = self.id, "cleared");
        self.field.clear();
        self.hidden.value.clear();
        self.close();
    }

    /// Hides the list and drops its items. Values are untouched.
    pub fn dismiss(&mut self) {
        self.list_visible = false;
        self.selection.clear();
    }

    /// Detaches the widget: pending timers and in-flight fetches are
    /// invalidated and every later message is ignored.
    pub fn teardown(&mut self) {
        self.close();
        self.torn_down = true;
    }

    fn close(&mut self) {
        self.dismiss();
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if self.timer_pending {
            self.debounce_tag += 1;
            self.timer_pending = false;
        }
        self.accept_after = self.fetch_seq;
        self.awaiting = None;
    }

    /// Handles key, timer and fetch messages.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if self.is_inert() {
            return None;
        }

        if let Some(debounce) = msg.downcast_ref::<DebounceMsg>() {
            return self.handle_debounce(*debounce);
        }

        if let Some(result) = msg.downcast_ref::<SuggestionsMsg>() {
            self.handle_suggestions(result);
            return None;
        }

        if let Some(failure) = msg.downcast_ref::<FetchErrMsg>() {
            self.handle_fetch_error(failure);
            return None;
        }

        if !self.focus {
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }

        None
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if matches_binding(key_msg, &self.key_map.next_suggestion) {
            self.next_item();
            return None;
        }
        if matches_binding(key_msg, &self.key_map.prev_suggestion) {
            self.previous_item();
            return None;
        }
        if matches_binding(key_msg, &self.key_map.confirm) {
            self.confirm();
            return None;
        }
        if matches_binding(key_msg, &self.key_map.dismiss) {
            self.dismiss();
            return None;
        }

        if self.field.handle_key(key_msg, &self.key_map) {
            debug!(widget = self.id, len = self.field.len(), "text edited");
        }
        self.schedule_fetch()
    }

    fn confirm(&mut self) {
        if self.field.is_empty() {
            self.clear();
            return;
        }
        if !self.list_visible {
            return;
        }
        if let Some(index) = self.selection.active() {
            self.select_item(index);
        }
    }

    /// Restarts the debounce timer, unless the text is too short. A timer
    /// already pending is left alone in that case.
    fn schedule_fetch(&mut self) -> Option<Cmd> {
        if self.field.len() < self.config.min_length {
            return None;
        }

        self.debounce_tag += 1;
        self.timer_pending = true;

        let id = self.id;
        let tag = self.debounce_tag;
        debug!(widget = id, tag, "debounce scheduled");
        Some(bubbletea_tick(self.config.debounce, move |_| {
            Box::new(DebounceMsg { id, tag }) as Msg
        }))
    }

    fn handle_debounce(&mut self, msg: DebounceMsg) -> Option<Cmd> {
        if msg.id != self.id || !self.timer_pending || msg.tag != self.debounce_tag {
            return None;
        }
        self.timer_pending = false;

        let source = self.source.clone()?;
        self.fetch_seq += 1;
        self.awaiting = Some(self.fetch_seq);

        let term = self.field.value();
        debug!(widget = self.id, seq = self.fetch_seq, %term, "fetching suggestions");
        Some(fetch_cmd(source, self.id, self.fetch_seq, term))
    }

    fn handle_suggestions(&mut self, msg: &SuggestionsMsg) {
        if !self.accepts(msg.id, msg.seq) {
            return;
        }
        if self.awaiting == Some(msg.seq) {
            self.awaiting = None;
        }
        if self.config.discard_stale && msg.seq != self.fetch_seq {
            debug!(
                widget = self.id,
                seq = msg.seq,
                latest = self.fetch_seq,
                "discarding stale suggestions"
            );
            return;
        }

        debug!(widget = self.id, seq = msg.seq, count = msg.suggestions.len(), "suggestions received");
        self.last_error = None;
        self.render(msg.suggestions.clone());
    }

    fn handle_fetch_error(&mut self, msg: &FetchErrMsg) {
        if !self.accepts(msg.id, msg.seq) {
            return;
        }
        if self.awaiting == Some(msg.seq) {
            self.awaiting = None;
        }
        if self.config.discard_stale && msg.seq != self.fetch_seq {
            debug!(
                widget = self.id,
                seq = msg.seq,
                latest = self.fetch_seq,
                "discarding stale failure"
            );
            return;
        }

        warn!(widget = self.id, seq = msg.seq, term = %msg.term, error = %msg.error, "suggestion fetch failed");
        self.last_error = Some(Arc::clone(&msg.error));
    }

    fn accepts(&self, id: i64, seq: u64) -> bool {
        id == self.id && seq > self.accept_after
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
