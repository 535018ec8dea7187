//! Styles for the suggest component.

use lipgloss_extras::prelude::*;

/// Marker drawn in front of the active row.
pub const ACTIVE_MARKER: &str = "▸ ";

/// Marker drawn in front of every other row.
pub const INACTIVE_MARKER: &str = "  ";

/// Truncation mark for rows wider than the list.
pub const ELLIPSIS: &str = "…";

/// Visual styles for the input line and the suggestion list.
#[derive(Debug, Clone)]
pub struct Styles {
    /// The prompt before the input.
    pub prompt: Style,
    /// Typed text.
    pub text: Style,
    /// Placeholder shown while the input is empty.
    pub placeholder: Style,
    /// The character under the cursor.
    pub cursor: Style,
    /// Inactive rows.
    pub item: Style,
    /// The active row.
    pub active_item: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let normal = AdaptiveColor {
            Light: "#1a1a1a",
            Dark: "#dddddd",
        };
        let subdued = AdaptiveColor {
            Light: "#A49FA5",
            Dark: "#777777",
        };
        let highlight = AdaptiveColor {
            Light: "#EE6FF8",
            Dark: "#EE6FF8",
        };

        Self {
            prompt: Style::new(),
            text: Style::new(),
            placeholder: Style::new().foreground(subdued),
            cursor: Style::new()
                .foreground(Color::from("0"))
                .background(Color::from("7")),
            item: Style::new().foreground(normal),
            active_item: Style::new().foreground(highlight).bold(true),
        }
    }
}
