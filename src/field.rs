use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

/// Kind of form field. Only text, number and password fields become cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Password,
    Hidden,
}

impl FieldKind {
    pub fn is_cell(self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Number | FieldKind::Password)
    }
}

/// Primitives a group needs from each bound field.
///
/// Offsets are in characters. `selection` returns `None` when the field
/// does not report a caret (number fields never do).
pub trait Field {
    fn text(&self) -> &str;
    fn set_text(&mut self, text: &str);
    fn selection(&self) -> Option<(usize, usize)>;
    fn set_caret(&mut self, pos: usize);
    fn select_all(&mut self);
    fn focus(&mut self);
    fn blur(&mut self);
}

/// In-memory single-line field with a caret and a selection anchor.
#[derive(Debug, Clone)]
pub struct InputField {
    kind: FieldKind,
    text: String,
    caret: usize,
    anchor: usize,
    focused: bool,
}

impl InputField {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            text: String::new(),
            caret: 0,
            anchor: 0,
            focused: false,
        }
    }

    pub fn with_text(kind: FieldKind, text: &str) -> Self {
        let mut field = Self::new(kind);
        field.set_text(text);
        field
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn range(&self) -> (usize, usize) {
        (self.caret.min(self.anchor), self.caret.max(self.anchor))
    }

    fn has_selection(&self) -> bool {
        self.caret != self.anchor
    }

    /// Replace the current selection (or insert at the caret) with `s`.
    pub fn insert_str(&mut self, s: &str) {
        let (start, end) = self.range();
        let start_byte = byte_pos(&self.text, start);
        let end_byte = byte_pos(&self.text, end);
        self.text.replace_range(start_byte..end_byte, s);
        self.caret = start + s.chars().count();
        self.anchor = self.caret;
    }

    fn delete_selection(&mut self) {
        self.insert_str("");
    }

    /// Apply the field's own editing for `code`. Returns true when the
    /// text changed.
    pub fn apply_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) => {
                let mut buf = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut buf));
                true
            }
            KeyCode::Backspace => {
                if self.has_selection() {
                    self.delete_selection();
                    return true;
                }
                if self.caret == 0 {
                    return false;
                }
                self.caret -= 1;
                self.text.remove(byte_pos(&self.text, self.caret));
                self.anchor = self.caret;
                true
            }
            KeyCode::Delete => {
                if self.has_selection() {
                    self.delete_selection();
                    return true;
                }
                if self.caret >= self.char_len() {
                    return false;
                }
                self.text.remove(byte_pos(&self.text, self.caret));
                true
            }
            KeyCode::Left => {
                let (start, _) = self.range();
                self.caret = if self.has_selection() {
                    start
                } else {
                    self.caret.saturating_sub(1)
                };
                self.anchor = self.caret;
                false
            }
            KeyCode::Right => {
                let (_, end) = self.range();
                self.caret = if self.has_selection() {
                    end
                } else {
                    (self.caret + 1).min(self.char_len())
                };
                self.anchor = self.caret;
                false
            }
            KeyCode::Home => {
                self.set_caret(0);
                false
            }
            KeyCode::End => {
                self.set_caret(self.char_len());
                false
            }
            _ => false,
        }
    }
}

impl Field for InputField {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.caret = self.char_len();
        self.anchor = self.caret;
    }

    fn selection(&self) -> Option<(usize, usize)> {
        match self.kind {
            FieldKind::Number => None,
            _ => Some(self.range()),
        }
    }

    fn set_caret(&mut self, pos: usize) {
        self.caret = pos.min(self.char_len());
        self.anchor = self.caret;
    }

    fn select_all(&mut self) {
        self.anchor = 0;
        self.caret = self.char_len();
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }
}

/// Convert a char-index position to a byte offset.
fn byte_pos(s: &str, pos: usize) -> usize {
    s.char_indices().nth(pos).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(text: &str) -> InputField {
        InputField::with_text(FieldKind::Text, text)
    }

    #[test]
    fn set_text_moves_caret_to_end() {
        let f = text_field("12");
        assert_eq!(f.selection(), Some((2, 2)));
    }

    #[test]
    fn typing_replaces_selection() {
        let mut f = text_field("5");
        f.select_all();
        assert!(f.apply_key(KeyCode::Char('7')));
        assert_eq!(f.text(), "7");
        assert_eq!(f.caret(), 1);
    }

    #[test]
    fn typing_at_end_appends() {
        let mut f = text_field("5");
        f.apply_key(KeyCode::Char('7'));
        assert_eq!(f.text(), "57");
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut f = text_field("5");
        f.set_caret(0);
        assert!(!f.apply_key(KeyCode::Backspace));
        assert_eq!(f.text(), "5");
    }

    #[test]
    fn delete_removes_char_at_caret() {
        let mut f = text_field("56");
        f.apply_key(KeyCode::Home);
        assert!(f.apply_key(KeyCode::Delete));
        assert_eq!(f.text(), "6");
        assert_eq!(f.caret(), 0);
    }

    #[test]
    fn left_collapses_selection_to_start() {
        let mut f = text_field("56");
        f.select_all();
        f.apply_key(KeyCode::Left);
        assert_eq!(f.selection(), Some((0, 0)));
    }

    #[test]
    fn number_field_reports_no_selection() {
        let f = InputField::with_text(FieldKind::Number, "4");
        assert_eq!(f.selection(), None);
    }

    #[test]
    fn paste_inserts_at_caret() {
        let mut f = text_field("");
        f.insert_str("1234");
        assert_eq!(f.text(), "1234");
        assert_eq!(f.caret(), 4);
    }

    #[test]
    fn hidden_fields_are_not_cells() {
        assert!(FieldKind::Password.is_cell());
        assert!(!FieldKind::Hidden.is_cell());
    }
}
