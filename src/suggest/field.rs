//! The visible text field.
//!
//! Single-line editing only: insert, delete and cursor movement. Anything
//! richer belongs to a full text input component.

use super::keymap::KeyMap;
use crate::key::matches_binding;
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Field {
    value: Vec<char>,
    pos: usize,
}

impl Field {
    pub(super) fn new(s: &str) -> Self {
        let mut field = Self::default();
        field.set_value(s);
        field
    }

    pub(super) fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub(super) fn chars(&self) -> &[char] {
        &self.value
    }

    /// Length in characters.
    pub(super) fn len(&self) -> usize {
        self.value.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub(super) fn position(&self) -> usize {
        self.pos
    }

    /// Replaces the text and moves the cursor to the end.
    pub(super) fn set_value(&mut self, s: &str) {
        self.value = s.chars().collect();
        self.pos = self.value.len();
    }

    pub(super) fn clear(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    /// Applies an editing key. Returns whether the text changed.
    pub(super) fn handle_key(&mut self, msg: &KeyMsg, keys: &KeyMap) -> bool {
        if matches_binding(msg, &keys.delete_character_backward) {
            if self.pos == 0 {
                return false;
            }
            self.pos -= 1;
            self.value.remove(self.pos);
            return true;
        }
        if matches_binding(msg, &keys.delete_character_forward) {
            if self.pos >= self.value.len() {
                return false;
            }
            self.value.remove(self.pos);
            return true;
        }
        if matches_binding(msg, &keys.delete_before_cursor) {
            let changed = self.pos > 0;
            self.value.drain(..self.pos);
            self.pos = 0;
            return changed;
        }
        if matches_binding(msg, &keys.delete_after_cursor) {
            let changed = self.pos < self.value.len();
            self.value.truncate(self.pos);
            return changed;
        }
        if matches_binding(msg, &keys.character_backward) {
            self.pos = self.pos.saturating_sub(1);
            return false;
        }
        if matches_binding(msg, &keys.character_forward) {
            self.pos = (self.pos + 1).min(self.value.len());
            return false;
        }
        if matches_binding(msg, &keys.line_start) {
            self.pos = 0;
            return false;
        }
        if matches_binding(msg, &keys.line_end) {
            self.pos = self.value.len();
            return false;
        }

        match msg.key {
            KeyCode::Char(c)
                if !msg
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && !c.is_control() =>
            {
                self.value.insert(self.pos, c);
                self.pos += 1;
                true
            }
            _ => false,
        }
    }
}
