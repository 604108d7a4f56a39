//! Single-line text field.
//!
//! Holds the value and cursor for the search bar and the add-addon URL
//! field. The cursor is a byte offset that always sits on a char boundary.

/// Maximum accepted input length in bytes.
pub const MAX_INPUT_LEN: usize = 64 * 1024;

/// Single-line text input state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    /// Current text.
    value: String,
    /// Cursor position (byte offset).
    cursor: usize,
    /// Placeholder shown while empty.
    placeholder: &'static str,
}

impl TextInput {
    /// Creates an empty input with a placeholder.
    #[must_use]
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder,
        }
    }

    /// Returns the current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the placeholder.
    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    /// Returns the cursor byte offset.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true if the input is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the text and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let mut value = value.into();
        truncate_to_boundary(&mut value, MAX_INPUT_LEN);
        self.cursor = value.len();
        self.value = value;
    }

    /// Clears the text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Inserts a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        if self.value.len() + c.len_utf8() > MAX_INPUT_LEN {
            return;
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Inserts a string at the cursor, dropping line breaks.
    ///
    /// Returns false if the text was clipped at `MAX_INPUT_LEN`.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let mut complete = true;
        for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            if self.value.len() + c.len_utf8() > MAX_INPUT_LEN {
                complete = false;
                break;
            }
            self.insert_char(c);
        }
        complete
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some(c) = self.value[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.value.remove(self.cursor);
        }
    }

    /// Deletes the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    /// Moves the cursor one character left.
    pub fn move_left(&mut self) {
        if let Some(c) = self.value[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    /// Moves the cursor one character right.
    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Moves the cursor to the start.
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end.
    pub fn move_to_end(&mut self) {
        self.cursor = self.value.len();
    }
}

/// Truncates `s` to at most `max` bytes on a char boundary.
fn truncate_to_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut input = TextInput::new("Search addons...");
        for c in "subs".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value(), "subs");
        input.backspace();
        assert_eq!(input.value(), "sub");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut input = TextInput::default();
        input.insert_str("añb");
        input.move_left();
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "ñb");
        input.move_right();
        input.insert_char('x');
        assert_eq!(input.value(), "ñxb");
    }

    #[test]
    fn test_insert_str_drops_newlines() {
        let mut input = TextInput::default();
        input.insert_str("https://a/manifest.json\r\n");
        assert_eq!(input.value(), "https://a/manifest.json");
    }

    #[test]
    fn test_delete_and_movement() {
        let mut input = TextInput::default();
        input.set_value("abc");
        input.move_to_start();
        input.delete();
        assert_eq!(input.value(), "bc");
        input.move_to_end();
        input.delete();
        assert_eq!(input.value(), "bc");
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_long_pasted_url_kept_whole() {
        let url = format!("https://cfg.example.com/{}/manifest.json", "a".repeat(4000));
        let mut input = TextInput::default();
        assert!(input.insert_str(&url));
        assert_eq!(input.value(), url);
        assert_eq!(input.cursor(), url.len());
    }

    #[test]
    fn test_insert_str_reports_clipping() {
        let mut input = TextInput::default();
        input.set_value("x".repeat(MAX_INPUT_LEN - 2));
        assert!(!input.insert_str("abcd"));
        assert_eq!(input.value().len(), MAX_INPUT_LEN);
        assert!(input.value().ends_with("ab"));
    }

    #[test]
    fn test_length_limit() {
        let mut input = TextInput::default();
        input.set_value("x".repeat(MAX_INPUT_LEN + 10));
        assert_eq!(input.value().len(), MAX_INPUT_LEN);
        input.insert_char('y');
        assert_eq!(input.value().len(), MAX_INPUT_LEN);
    }
}
