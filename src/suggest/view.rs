//! View rendering for the suggest component.

use super::model::Model;
use super::style::{ACTIVE_MARKER, ELLIPSIS, INACTIVE_MARKER};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

impl Model {
    /// Renders the input line and, when shown, the list directly below it.
    pub fn view(&self) -> String {
        let mut out = self.input_view();
        for line in self.list_lines() {
            out.push('\n');
            out.push_str(&line);
        }
        out
    }

    /// Renders the input line alone.
    pub fn input_view(&self) -> String {
        let prompt = self.styles.prompt.render(&self.prompt);

        if self.field.is_empty() && !self.placeholder.is_empty() {
            let mut chars = self.placeholder.chars();
            let first = chars.next().map(String::from).unwrap_or_default();
            let rest: String = chars.collect();
            let head = if self.focus {
                self.styles.cursor.render(&first)
            } else {
                self.styles.placeholder.render(&first)
            };
            return format!("{prompt}{head}{}", self.styles.placeholder.render(&rest));
        }

        let chars = self.field.chars();
        let pos = self.field.position().min(chars.len());
        let before: String = chars[..pos].iter().collect();

        let mut v = self.styles.text.render(&before);
        if self.focus {
            let under = chars.get(pos).map(|c| c.to_string()).unwrap_or_else(|| " ".into());
            v.push_str(&self.styles.cursor.render(&under));
            if pos + 1 < chars.len() {
                let after: String = chars[pos + 1..].iter().collect();
                v.push_str(&self.styles.text.render(&after));
            }
        } else if pos < chars.len() {
            let after: String = chars[pos..].iter().collect();
            v.push_str(&self.styles.text.render(&after));
        }

        format!("{prompt}{v}")
    }

    /// One rendered line per suggestion, or nothing while the list is
    /// hidden. Rows are cut to the list width.
    pub fn list_lines(&self) -> Vec<String> {
        if !self.list_visible {
            return Vec::new();
        }

        let width = self.list_width();
        let active = self.selection.active();
        self.selection
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let (marker, style) = if Some(i) == active {
                    (ACTIVE_MARKER, &self.styles.active_item)
                } else {
                    (INACTIVE_MARKER, &self.styles.item)
                };
                let room = width.saturating_sub(marker.width());
                style.render(&format!("{marker}{}", truncate(item.display(), room)))
            })
            .collect()
    }

    /// The list is as wide as the input: the configured width, or the
    /// prompt plus text and the widest row when sized to content.
    fn list_width(&self) -> usize {
        if self.width > 0 {
            return self.width;
        }
        let input = self.prompt.width() + self.field.value().width() + 1;
        let widest = self
            .selection
            .items()
            .iter()
            .map(|s| s.display().width() + ACTIVE_MARKER.width())
            .max()
            .unwrap_or(0);
        input.max(widest)
    }
}

/// Cuts `s` to at most `max` cells, ending in an ellipsis when cut.
fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(ELLIPSIS.width());
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max >= ELLIPSIS.width() {
        out.push_str(ELLIPSIS);
    }
    out
}
