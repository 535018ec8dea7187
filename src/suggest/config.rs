//! Widget configuration.
//!
//! A [`Config`] is either built directly or read from markup-style
//! attributes with [`Config::from_attributes`]. It is validated once, when
//! the widget is created.

use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

/// Minimum number of characters before a query is scheduled.
pub const DEFAULT_MIN_LENGTH: usize = 2;

/// Delay between the last keystroke and the query.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Class name used for the list when none is configured.
pub const DEFAULT_STYLE_CLASS: &str = "auto-complete-list";

/// Reasons a configuration cannot drive a widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No `url` was given.
    #[error("missing required `url`")]
    MissingUrl,
    /// The `url` does not parse or is not http(s).
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl {
        /// The offending value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// `minlength` is not a non-negative integer.
    #[error("invalid minlength {0:?}")]
    InvalidMinLength(String),
    /// `debounce-ms` is not a non-negative integer.
    #[error("invalid debounce-ms {0:?}")]
    InvalidDebounce(String),
}

/// Options for a suggest widget.
///
/// ```rust
/// use suggest_widget::suggest::Config;
///
/// let config = Config::new("https://example.com/suggest")
///     .with_name("fruit_id")
///     .with_min_length(3);
/// assert!(config.validate().is_ok());
/// assert!(Config::default().validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base endpoint, queried with `?term=<text>`. Required.
    pub url: Option<String>,
    /// Name of the hidden form field.
    pub name: String,
    /// Initial committed value.
    pub initial_value: String,
    /// Initial visible text.
    pub initial_display: String,
    /// Visible text length below which no query is scheduled.
    pub min_length: usize,
    /// Class name for the suggestion list, for hosts that theme by name.
    pub style_class: Option<String>,
    /// Debounce delay.
    pub debounce: Duration,
    /// Drop responses to requests that were superseded by a newer one.
    /// When `false`, whichever response arrives last is shown.
    pub discard_stale: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            name: String::new(),
            initial_value: String::new(),
            initial_display: String::new(),
            min_length: DEFAULT_MIN_LENGTH,
            style_class: None,
            debounce: DEFAULT_DEBOUNCE,
            discard_stale: true,
        }
    }
}

impl Config {
    /// Creates a configuration for `url` with default options.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Sets the hidden field name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the initial committed value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    /// Sets the initial visible text.
    pub fn with_display_value(mut self, display: impl Into<String>) -> Self {
        self.initial_display = display.into();
        self
    }

    /// Sets the minimum query length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Sets the list class name.
    pub fn with_style_class(mut self, class: impl Into<String>) -> Self {
        self.style_class = Some(class.into());
        self
    }

    /// Sets the debounce delay.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the stale response policy.
    pub fn with_discard_stale(mut self, discard: bool) -> Self {
        self.discard_stale = discard;
        self
    }

    /// Reads a configuration from `(attribute, value)` pairs.
    ///
    /// Recognized attributes are `url`, `name`, `value`, `display-value`,
    /// `minlength`, `autocomplete-style` and `debounce-ms`. Names are
    /// case-insensitive and anything else is ignored. A missing `url` is
    /// not reported here; [`Config::validate`] does that.
    ///
    /// ```rust
    /// use suggest_widget::suggest::Config;
    ///
    /// let config = Config::from_attributes([
    ///     ("url", "https://example.com/fruit"),
    ///     ("name", "fruit"),
    ///     ("minlength", "3"),
    /// ])
    /// .unwrap();
    /// assert_eq!(config.min_length, 3);
    /// assert_eq!(config.name, "fruit");
    /// ```
    pub fn from_attributes<I, K, V>(attributes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in attributes {
            let value = value.as_ref();
            match key.as_ref().to_ascii_lowercase().as_str() {
                "url" => config.url = Some(value.to_string()),
                "name" => config.name = value.to_string(),
                "value" => config.initial_value = value.to_string(),
                "display-value" => config.initial_display = value.to_string(),
                "minlength" => {
                    config.min_length = value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidMinLength(value.to_string()))?;
                }
                "autocomplete-style" => config.style_class = Some(value.to_string()),
                "debounce-ms" => {
                    let ms: u64 = value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidDebounce(value.to_string()))?;
                    config.debounce = Duration::from_millis(ms);
                }
                _ => {}
            }
        }
        Ok(config)
    }

    /// Checks that the configuration can drive a widget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint().map(|_| ())
    }

    /// The parsed base endpoint.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let raw = match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => return Err(ConfigError::MissingUrl),
        };
        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ConfigError::InvalidUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme `{scheme}`"),
            }),
        }
    }

    /// The list class name, falling back to [`DEFAULT_STYLE_CLASS`].
    pub fn list_class(&self) -> &str {
        self.style_class.as_deref().unwrap_or(DEFAULT_STYLE_CLASS)
    }
}
