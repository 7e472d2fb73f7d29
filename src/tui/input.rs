//! Text input buffer for the text and count fields.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key did to a [`TextInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Content changed
    Edited,
    /// Only the cursor moved (or an edit was refused)
    Moved,
    /// Key not handled by the input
    Ignored,
}

/// Single-line editable text with a cursor and optional length limit.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The text content
    content: String,
    /// Cursor position (byte offset, always on a char boundary)
    cursor: usize,
    /// Maximum length in characters
    max_chars: Option<usize>,
}

impl TextInput {
    /// Create a new empty text input
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial content, cursor at the end
    pub fn with_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            cursor: content.len(),
            max_chars: None,
        }
    }

    /// Limit the content to `max_chars` characters
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in characters, for placing the terminal cursor
    pub fn cursor_column(&self) -> usize {
        self.content[..self.cursor].chars().count()
    }

    /// Insert a character at the cursor. Returns false when the limit is reached.
    pub fn insert(&mut self, c: char) -> bool {
        if let Some(max) = self.max_chars
            && self.content.chars().count() >= max
        {
            return false;
        }
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_char_boundary(self.cursor);
        self.content.remove(prev);
        self.cursor = prev;
        true
    }

    /// Delete the character at the cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }
        self.content.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_char_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor = self.next_char_boundary(self.cursor);
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Clear the content
    pub fn clear(&mut self) -> bool {
        let had_content = !self.content.is_empty();
        self.content.clear();
        self.cursor = 0;
        had_content
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: &KeyEvent) -> InputResult {
        let edited = match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => self.clear(),
            KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                return InputResult::Ignored;
            }
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.move_home();
                false
            }
            KeyCode::End => {
                self.move_end();
                false
            }
            _ => return InputResult::Ignored,
        };

        if edited { InputResult::Edited } else { InputResult::Moved }
    }

    fn prev_char_boundary(&self, pos: usize) -> usize {
        let mut idx = pos.saturating_sub(1);
        while idx > 0 && !self.content.is_char_boundary(idx) {
            idx -= 1;
        }
        idx
    }

    fn next_char_boundary(&self, pos: usize) -> usize {
        let mut idx = pos + 1;
        while idx < self.content.len() && !self.content.is_char_boundary(idx) {
            idx += 1;
        }
        idx.min(self.content.len())
    }
}
