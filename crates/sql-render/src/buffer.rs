/// Append-only text buffer the renderer writes into.
#[derive(Debug, Default, Clone)]
pub struct SqlBuffer {
    text: String,
}

impl SqlBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Cuts the text back to `len` bytes, a length taken earlier.
    pub fn truncate(&mut self, len: usize) {
        self.text.truncate(len);
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    /// True for an empty buffer as well.
    pub fn ends_with_whitespace(&self) -> bool {
        self.last_char().is_none_or(char::is_whitespace)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}
