use crate::commands::CommandRegistry;

/// Byte span of the first whitespace-delimited word of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FirstToken {
    /// End of the leading whitespace run; the token starts here.
    pub start: usize,
    /// Next whitespace after `start`, or the end of the line.
    pub end: usize,
}

impl FirstToken {
    pub fn scan(line: &str) -> Self {
        let start = line
            .char_indices()
            .find(|(_, ch)| !ch.is_whitespace())
            .map(|(idx, _)| idx)
            .unwrap_or(line.len());
        let end = line[start..]
            .char_indices()
            .find(|(_, ch)| ch.is_whitespace())
            .map(|(offset, _)| start + offset)
            .unwrap_or(line.len());
        Self { start, end }
    }
}

/// The single-line buffer behind the prompt. `cursor` is a byte offset kept on
/// a char boundary.
#[derive(Clone, Debug, Default)]
pub struct LineEditor {
    buffer: String,
    cursor: usize,
    suggestion: String,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clamp_cursor_to_boundary_left(&self, mut idx: usize) -> usize {
        idx = idx.min(self.buffer.len());
        while idx > 0 && !self.buffer.is_char_boundary(idx) {
            idx -= 1;
        }
        idx
    }

    pub fn prev_char_boundary(&self, idx: usize) -> usize {
        let i = self.clamp_cursor_to_boundary_left(idx);
        self.buffer[..i]
            .char_indices()
            .last()
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

    pub fn next_char_boundary(&self, idx: usize) -> usize {
        let i = self.clamp_cursor_to_boundary_left(idx);
        match self.buffer[i..].chars().next() {
            Some(ch) => i + ch.len_utf8(),
            None => self.buffer.len(),
        }
    }

    /// Reads the caret back after a buffer write: clamps it into the buffer and
    /// onto a char boundary, then recomputes the suggestion from the result.
    pub fn sync_caret(&mut self, registry: &CommandRegistry) {
        self.cursor = self.clamp_cursor_to_boundary_left(self.cursor);
        self.suggestion = compute_suggestion(&self.buffer, self.cursor, registry);
    }

    pub fn clear_suggestion(&mut self) {
        self.suggestion.clear();
    }

    /// Replaces the line and parks the caret at `cursor`.
    pub fn set(&mut self, buffer: String, cursor: usize) {
        self.buffer = buffer;
        self.cursor = cursor;
    }

    pub fn set_buffer_to_end(&mut self, buffer: String) {
        self.cursor = buffer.len();
        self.buffer = buffer;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.suggestion.clear();
    }

    pub fn insert_str(&mut self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        let cursor = self.clamp_cursor_to_boundary_left(self.cursor);
        self.buffer.insert_str(cursor, value);
        self.cursor = cursor + value.len();
        true
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let cursor = self.clamp_cursor_to_boundary_left(self.cursor);
        self.buffer.insert(cursor, ch);
        self.cursor = cursor + ch.len_utf8();
        true
    }

    pub fn backspace(&mut self) -> bool {
        let end = self.clamp_cursor_to_boundary_left(self.cursor);
        if end == 0 {
            return false;
        }
        let start = self.prev_char_boundary(end);
        self.buffer.replace_range(start..end, "");
        self.cursor = start;
        true
    }

    pub fn delete(&mut self) -> bool {
        let start = self.clamp_cursor_to_boundary_left(self.cursor);
        if start >= self.buffer.len() {
            return false;
        }
        let end = self.next_char_boundary(start);
        self.buffer.replace_range(start..end, "");
        self.cursor = start;
        true
    }

    pub fn kill_to_start(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary_left(self.cursor);
        if cursor == 0 {
            return false;
        }
        self.buffer.replace_range(..cursor, "");
        self.cursor = 0;
        true
    }

    pub fn kill_to_end(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary_left(self.cursor);
        if cursor >= self.buffer.len() {
            return false;
        }
        self.buffer.truncate(cursor);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_char_boundary(self.cursor);
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_char_boundary(self.cursor);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }
}

/// Rest of the first command name extending the word under the caret. Only
/// offered while the caret sits exactly at the end of the first word.
pub fn compute_suggestion(line: &str, cursor: usize, registry: &CommandRegistry) -> String {
    let token = FirstToken::scan(line);
    if cursor != token.end {
        return String::new();
    }
    let partial = &line[token.start..cursor];
    if partial.is_empty() {
        return String::new();
    }
    let partial = partial.to_lowercase();
    registry
        .first_match(&partial)
        .map(|name| name[partial.len()..].to_string())
        .unwrap_or_default()
}
