//! Caret and focus state of a single-line text field.
//!
//! The caret is a byte index into the text and always sits on a character
//! boundary. Only printable ASCII is ever inserted.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TextEditor {
    caret: usize,
    focused: bool,
    blink_epoch: Instant,
}

impl TextEditor {
    pub fn new(now: Instant) -> Self {
        Self {
            caret: 0,
            focused: false,
            blink_epoch: now,
        }
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool, now: Instant) {
        self.focused = focused;
        self.restart_blink(now);
    }

    /// Moves the caret to `index`, clamped to the text and snapped back to a
    /// character boundary.
    pub fn set_caret(&mut self, text: &str, index: usize) {
        let mut index = index.min(text.len());
        while !text.is_char_boundary(index) {
            index -= 1;
        }
        self.caret = index;
    }

    /// Re-validates the caret after the text was replaced from outside.
    pub fn clamp(&mut self, text: &str) {
        self.set_caret(text, self.caret);
    }

    /// Inserts `ch` at the caret if it is printable ASCII.
    pub fn insert(&mut self, text: &mut String, ch: char) -> bool {
        if !is_insertable(ch) {
            return false;
        }
        self.clamp(text);
        text.insert(self.caret, ch);
        self.caret += ch.len_utf8();
        true
    }

    /// Removes the character before the caret.
    pub fn backspace(&mut self, text: &mut String) -> bool {
        self.clamp(text);
        let Some(prev) = prev_boundary(text, self.caret) else {
            return false;
        };
        text.replace_range(prev..self.caret, "");
        self.caret = prev;
        true
    }

    /// Removes the character after the caret.
    pub fn delete(&mut self, text: &mut String) -> bool {
        self.clamp(text);
        let Some(next) = next_boundary(text, self.caret) else {
            return false;
        };
        text.replace_range(self.caret..next, "");
        true
    }

    pub fn move_left(&mut self, text: &str) -> bool {
        self.clamp(text);
        match prev_boundary(text, self.caret) {
            Some(prev) => {
                self.caret = prev;
                true
            }
            None => false,
        }
    }

    pub fn move_right(&mut self, text: &str) -> bool {
        self.clamp(text);
        match next_boundary(text, self.caret) {
            Some(next) => {
                self.caret = next;
                true
            }
            None => false,
        }
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.caret != 0;
        self.caret = 0;
        moved
    }

    pub fn move_end(&mut self, text: &str) -> bool {
        let moved = self.caret != text.len();
        self.caret = text.len();
        moved
    }

    /// Caret index for a press `offset` pixels right of the text origin.
    ///
    /// Returns the first prefix end whose measured width reaches the offset,
    /// or the text length when the press is past the end.
    pub fn index_at(text: &str, offset: f32, mut measure: impl FnMut(&str) -> f32) -> usize {
        if offset <= 0.0 {
            return 0;
        }
        text.char_indices()
            .map(|(start, ch)| start + ch.len_utf8())
            .find(|&end| measure(&text[..end]) >= offset)
            .unwrap_or(text.len())
    }

    pub fn restart_blink(&mut self, now: Instant) {
        self.blink_epoch = now;
    }

    /// Whether the caret is in its visible phase at `now`.
    pub fn caret_visible(&self, now: Instant, interval: Duration) -> bool {
        let elapsed = now.saturating_duration_since(self.blink_epoch).as_millis();
        let period = interval.as_millis().max(1);
        (elapsed / period) % 2 == 0
    }
}

pub fn is_insertable(ch: char) -> bool {
    ch.is_ascii() && !ch.is_ascii_control()
}

fn prev_boundary(text: &str, index: usize) -> Option<usize> {
    text[..index].char_indices().next_back().map(|(i, _)| i)
}

fn next_boundary(text: &str, index: usize) -> Option<usize> {
    text[index..].chars().next().map(|ch| index + ch.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> TextEditor {
        TextEditor::new(Instant::now())
    }

    #[test]
    fn test_insert_advances_caret() {
        let mut ed = editor();
        let mut text = String::new();
        for ch in "hey".chars() {
            assert!(ed.insert(&mut text, ch));
        }
        assert_eq!(text, "hey");
        assert_eq!(ed.caret(), 3);

        ed.move_left(&text);
        ed.insert(&mut text, 'X');
        assert_eq!(text, "heXy");
        assert_eq!(ed.caret(), 3);
    }

    #[test]
    fn test_control_and_non_ascii_are_rejected() {
        let mut ed = editor();
        let mut text = String::from("a");
        ed.move_end(&text);
        assert!(!ed.insert(&mut text, '\u{7}'));
        assert!(!ed.insert(&mut text, 'é'));
        assert_eq!(text, "a");
        assert_eq!(ed.caret(), 1);
    }

    #[test]
    fn test_insert_then_backspace_restores() {
        let mut ed = editor();
        let mut text = String::from("abc");
        ed.set_caret(&text, 1);
        ed.insert(&mut text, 'z');
        ed.backspace(&mut text);
        assert_eq!(text, "abc");
        assert_eq!(ed.caret(), 1);
    }

    #[test]
    fn test_backspace_at_start_and_delete_at_end_do_nothing() {
        let mut ed = editor();
        let mut text = String::from("ab");
        assert!(!ed.backspace(&mut text));
        ed.move_end(&text);
        assert!(!ed.delete(&mut text));
        assert_eq!(text, "ab");
    }

    #[test]
    fn test_delete_keeps_caret() {
        let mut ed = editor();
        let mut text = String::from("abc");
        ed.set_caret(&text, 1);
        assert!(ed.delete(&mut text));
        assert_eq!(text, "ac");
        assert_eq!(ed.caret(), 1);
    }

    #[test]
    fn test_movement_is_clamped() {
        let mut ed = editor();
        let text = "ab";
        assert!(!ed.move_left(text));
        assert!(ed.move_right(text));
        assert!(ed.move_right(text));
        assert!(!ed.move_right(text));
        assert_eq!(ed.caret(), 2);
        assert!(ed.move_home());
        assert_eq!(ed.caret(), 0);
    }

    #[test]
    fn test_caret_snaps_to_char_boundary() {
        let mut ed = editor();
        let text = "aé";
        ed.set_caret(text, 2);
        assert_eq!(ed.caret(), 1);
        ed.set_caret(text, 99);
        assert_eq!(ed.caret(), 3);
        ed.move_left(text);
        assert_eq!(ed.caret(), 1);
    }

    #[test]
    fn test_index_at() {
        let measure = |s: &str| s.len() as f32 * 8.0;
        assert_eq!(TextEditor::index_at("hello", -3.0, measure), 0);
        assert_eq!(TextEditor::index_at("hello", 0.0, measure), 0);
        assert_eq!(TextEditor::index_at("hello", 1.0, measure), 1);
        assert_eq!(TextEditor::index_at("hello", 16.0, measure), 2);
        assert_eq!(TextEditor::index_at("hello", 17.0, measure), 3);
        assert_eq!(TextEditor::index_at("hello", 500.0, measure), 5);
    }

    #[test]
    fn test_blink_phases() {
        let start = Instant::now();
        let ed = TextEditor::new(start);
        let interval = Duration::from_millis(500);
        assert!(ed.caret_visible(start, interval));
        assert!(ed.caret_visible(start + Duration::from_millis(499), interval));
        assert!(!ed.caret_visible(start + Duration::from_millis(500), interval));
        assert!(!ed.caret_visible(start + Duration::from_millis(999), interval));
        assert!(ed.caret_visible(start + Duration::from_millis(1000), interval));
    }
}
