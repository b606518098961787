/// A Tab-cycling session. Lives while the user presses Tab repeatedly on an
/// unchanged first word; any other key resets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabCompletion {
    matches: Option<Vec<String>>,
    index: usize,
    last_partial: String,
}

impl TabCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.matches.is_some()
    }

    pub fn last_partial(&self) -> &str {
        &self.last_partial
    }

    /// Match currently applied to the line, if a session is active.
    pub fn current(&self) -> Option<&str> {
        self.matches
            .as_ref()
            .and_then(|matches| matches.get(self.index))
            .map(String::as_str)
    }

    /// Starts a session over `matches` and returns the first one.
    pub fn start(&mut self, partial: &str, matches: Vec<String>) -> Option<&str> {
        if matches.is_empty() {
            self.reset();
            return None;
        }
        self.matches = Some(matches);
        self.index = 0;
        self.last_partial = partial.to_string();
        self.current()
    }

    /// Moves to the next match, wrapping around.
    pub fn advance(&mut self) -> Option<&str> {
        let len = self.matches.as_ref().map_or(0, Vec::len);
        if len == 0 {
            return None;
        }
        self.index = (self.index + 1) % len;
        self.current()
    }

    pub fn reset(&mut self) {
        self.matches = None;
        self.index = 0;
        self.last_partial.clear();
    }
}
