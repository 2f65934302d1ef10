use crossterm::event::KeyCode;

/// A text input field with encapsulated state.
///
/// Wraps the text and a char-indexed cursor position. Inputs accept any
/// printable character (post drafts are frequently Japanese), so all cursor
/// arithmetic is in chars, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    /// Create a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text input with initial text, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Get the current text as a string slice.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the current cursor position (in chars).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the trimmed text.
    pub fn text_trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Number of chars after trimming surrounding whitespace.
    pub fn trimmed_len(&self) -> usize {
        self.text.trim().chars().count()
    }

    /// Check if the text is empty (ignoring whitespace).
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Set the text and move cursor to end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    /// Clear the text and reset cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let byte_index = self
            .text
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.text.len());
        self.text.insert(byte_index, c);
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let before = self.text.chars().take(self.cursor - 1);
            let after = self.text.chars().skip(self.cursor);
            self.text = before.chain(after).collect();
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let before = self.text.chars().take(self.cursor);
            let after = self.text.chars().skip(self.cursor + 1);
            self.text = before.chain(after).collect();
        }
    }

    /// Move the cursor left.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Handle a key code event.
    ///
    /// Returns true if the key was handled.
    pub fn handle_key(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}
