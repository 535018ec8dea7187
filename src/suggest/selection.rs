//! Suggestion list state: the items and which one is active.

use super::types::Suggestion;

/// Items shown in the list and the active (highlighted) index.
///
/// The active index always points at an item while there are items.
/// Moving past either end wraps around.
///
/// ```rust
/// use suggest_widget::suggest::{Selection, Suggestion};
///
/// let mut sel = Selection::default();
/// sel.replace(vec![Suggestion::new("1", "a"), Suggestion::new("2", "b")]);
/// sel.previous_item();
/// assert_eq!(sel.active(), Some(1));
/// sel.next_item();
/// assert_eq!(sel.active(), Some(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<Suggestion>,
    active: usize,
}

impl Selection {
    /// Replaces the items and resets the active index to the first one.
    pub fn replace(&mut self, items: Vec<Suggestion>) {
        self.items = items;
        self.active = 0;
    }

    /// Drops all items.
    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// The items, in display order.
    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The active index, or `None` when there are no items.
    pub fn active(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.active)
    }

    /// The active item.
    pub fn active_item(&self) -> Option<&Suggestion> {
        self.items.get(self.active)
    }

    /// Moves to the next item, wrapping to the first.
    pub fn next_item(&mut self) {
        self.set_active(self.active as isize + 1);
    }

    /// Moves to the previous item, wrapping to the last.
    pub fn previous_item(&mut self) {
        self.set_active(self.active as isize - 1);
    }

    /// Sets the active index, normalized into range. No-op without items.
    pub fn set_active(&mut self, index: isize) {
        if let Some(index) = normalize(index, self.items.len()) {
            self.active = index;
        }
    }
}

/// `index >= len` becomes 0, `index < 0` becomes `len - 1`.
fn normalize(index: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if index < 0 {
        Some(len - 1)
    } else if index as usize >= len {
        Some(0)
    } else {
        Some(index as usize)
    }
}
