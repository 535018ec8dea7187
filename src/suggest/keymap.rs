//! Key bindings for the suggest component.

use crate::key::{self, new_binding, with_help, with_keys_str, Binding};

/// Bindings for list navigation, confirmation and text editing.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Highlight the next suggestion.
    pub next_suggestion: Binding,
    /// Highlight the previous suggestion.
    pub prev_suggestion: Binding,
    /// Commit the highlighted suggestion, or clear an empty input.
    pub confirm: Binding,
    /// Hide the list without changing any value.
    pub dismiss: Binding,
    /// Move the cursor one character right.
    pub character_forward: Binding,
    /// Move the cursor one character left.
    pub character_backward: Binding,
    /// Delete the character before the cursor.
    pub delete_character_backward: Binding,
    /// Delete the character under the cursor.
    pub delete_character_forward: Binding,
    /// Delete everything before the cursor.
    pub delete_before_cursor: Binding,
    /// Delete everything after the cursor.
    pub delete_after_cursor: Binding,
    /// Move to the start of the input.
    pub line_start: Binding,
    /// Move to the end of the input.
    pub line_end: Binding,
}

/// The default bindings.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        next_suggestion: new_binding(vec![with_keys_str(&["down"]), with_help("↓", "next")]),
        prev_suggestion: new_binding(vec![with_keys_str(&["up"]), with_help("↑", "previous")]),
        confirm: new_binding(vec![
            with_keys_str(&["enter", "tab", "insert"]),
            with_help("enter", "select"),
        ]),
        dismiss: new_binding(vec![with_keys_str(&["esc"]), with_help("esc", "close")]),
        character_forward: new_binding(vec![with_keys_str(&["right", "ctrl+f"])]),
        character_backward: new_binding(vec![with_keys_str(&["left", "ctrl+b"])]),
        delete_character_backward: new_binding(vec![with_keys_str(&["backspace", "ctrl+h"])]),
        delete_character_forward: new_binding(vec![with_keys_str(&["delete", "ctrl+d"])]),
        delete_before_cursor: new_binding(vec![with_keys_str(&["ctrl+u"])]),
        delete_after_cursor: new_binding(vec![with_keys_str(&["ctrl+k"])]),
        line_start: new_binding(vec![with_keys_str(&["home", "ctrl+a"])]),
        line_end: new_binding(vec![with_keys_str(&["end", "ctrl+e"])]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.prev_suggestion, &self.next_suggestion, &self.confirm]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.prev_suggestion, &self.next_suggestion],
            vec![&self.confirm, &self.dismiss],
        ]
    }
}
