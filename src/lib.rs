#![warn(missing_docs)]

//! # suggest-widget
//!
//! A type-ahead input component for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications. As the user types, the widget queries a remote endpoint,
//! shows the answers in a list below the input, and lets the user pick one
//! with the keyboard or the mouse.
//!
//! ## Overview
//!
//! The component follows the Elm Architecture used by bubbletea-rs: route
//! messages into `update()`, run the commands it returns, and draw
//! `view()`. Everything the widget waits on (the debounce delay, the
//! network request) arrives back as a message, so the widget never blocks.
//!
//! The widget tracks two values:
//!
//! - the **display value**, the text the user sees, and
//! - the **committed value**, the id of the chosen suggestion, held in a
//!   hidden form field and only changed by selecting or clearing.
//!
//! ## Quick Start
//!
//! ```rust
//! use suggest_widget::prelude::*;
//! use bubbletea_rs::{Cmd, Msg};
//!
//! struct App {
//!     city: SuggestInput,
//! }
//!
//! impl App {
//!     fn new() -> Self {
//!         let mut city = suggest_new(
//!             SuggestConfig::new("https://example.com/cities")
//!                 .with_name("city_id")
//!                 .with_min_length(2),
//!         );
//!         city.focus();
//!         Self { city }
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.city.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("City:\n{}", self.city.view())
//!     }
//! }
//!
//! let app = App::new();
//! assert!(app.view().starts_with("City:"));
//! ```
//!
//! ## Endpoint
//!
//! The endpoint is queried with `GET <url>?term=<text>` and must answer
//! with a JSON array of objects carrying `id`, `value` and optionally
//! `label`:
//!
//! ```json
//! [{"id": "1", "value": "oslo", "label": "Oslo"}]
//! ```
//!
//! ## Key Bindings
//!
//! Bindings live in [`suggest::KeyMap`] and use the [`key`] module, so they
//! can be rebound and listed in help views through [`key::KeyMap`].

pub mod key;
pub mod suggest;

use bubbletea_rs::Cmd;

/// Components that take keyboard focus.
///
/// A focused component reacts to key messages; a blurred one ignores them
/// but keeps processing its own timer and fetch messages.
///
/// ```rust
/// use suggest_widget::prelude::*;
///
/// let mut input = suggest_new(SuggestConfig::new("https://example.com/s"));
/// assert!(!input.focused());
///
/// input.focus();
/// assert!(input.focused());
///
/// input.blur();
/// assert!(!input.focused());
/// ```
pub trait Component {
    /// Gives the component focus. May return a command to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes focus.
    fn blur(&mut self);

    /// Whether the component has focus.
    fn focused(&self) -> bool;
}

pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys, with_keys_str,
    Binding, Help as KeyHelp, KeyMap, KeyPress,
};
pub use suggest::{
    new as suggest_new, try_new as suggest_try_new, Config as SuggestConfig,
    ConfigError as SuggestConfigError, FetchError, HttpSource, Model as SuggestInput, Phase,
    Suggestion, SuggestionSource,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use suggest_widget::prelude::*;
/// ```
pub mod prelude {
    pub use crate::key::{
        matches, matches_binding, new_binding, with_disabled, with_help, with_keys, with_keys_str,
        Binding, Help as KeyHelp, KeyMap, KeyPress,
    };
    pub use crate::suggest::{
        new as suggest_new, try_new as suggest_try_new, Config as SuggestConfig,
        ConfigError as SuggestConfigError, DebounceMsg, FetchErrMsg, FetchError, HttpSource,
        KeyMap as SuggestKeyMap, Model as SuggestInput, Phase, Suggestion, SuggestionSource,
        SuggestionsMsg,
    };
    pub use crate::Component;
}
