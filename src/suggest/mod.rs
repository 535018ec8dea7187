//! Type-ahead input with remote suggestions.
//!
//! The widget is a single-line input that queries an HTTP endpoint as the
//! user types and shows the answers in a list below the input. It keeps two
//! values apart: the visible text, and a committed value (the id of the
//! chosen suggestion) held in a hidden form field.
//!
//! # Behavior
//!
//! - Typing schedules a query once the text has at least `min_length`
//!   characters. Each keystroke restarts the debounce delay (500 ms by
//!   default), so a burst of typing sends one request with the final text.
//! - `↑`/`↓` move the highlight around the list, wrapping at either end.
//! - `enter`, `tab` and `insert` commit the highlighted suggestion. On an
//!   empty input they clear the committed value instead.
//! - `esc` hides the list.
//!
//! # Basic Usage
//!
//! ```rust
//! use suggest_widget::suggest::{self, Config};
//! use suggest_widget::Component;
//! use bubbletea_rs::{Cmd, Msg};
//!
//! struct Form {
//!     fruit: suggest::Model,
//! }
//!
//! impl Form {
//!     fn new() -> Self {
//!         let mut fruit = suggest::new(
//!             Config::new("https://example.com/fruit").with_name("fruit_id"),
//!         );
//!         fruit.focus();
//!         Self { fruit }
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.fruit.update(msg)
//!     }
//! }
//!
//! let form = Form::new();
//! assert_eq!(form.fruit.form_field(), ("fruit_id", ""));
//! ```
//!
//! # Messages
//!
//! The widget drives itself through [`DebounceMsg`], [`SuggestionsMsg`] and
//! [`FetchErrMsg`]. Route every message to [`Model::update`]; the host may
//! also watch for `FetchErrMsg` to report failed queries.

pub mod config;
pub mod fetch;
mod field;
pub mod keymap;
pub mod model;
pub mod selection;
pub mod style;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError, DEFAULT_DEBOUNCE, DEFAULT_MIN_LENGTH, DEFAULT_STYLE_CLASS};
pub use fetch::{parse_suggestions, FetchError, HttpSource, SourceFuture, SuggestionSource};
pub use keymap::{default_key_map, KeyMap};
pub use model::{new, try_new, Model};
pub use selection::Selection;
pub use style::Styles;
pub use types::{DebounceMsg, FetchErrMsg, HiddenField, Phase, Suggestion, SuggestionsMsg};
