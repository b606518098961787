/// Previously submitted lines, oldest first, plus up/down recall state.
#[derive(Debug, Clone, Default)]
pub struct InvocationHistory {
    entries: Vec<String>,
    index: Option<usize>,
    saved_input: Option<String>,
}

impl InvocationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_navigating(&self) -> bool {
        self.index.is_some()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    /// Leaves navigation without restoring the saved line; the recalled (and
    /// possibly edited) line stays as the working line.
    pub fn stop_navigating(&mut self) {
        self.index = None;
        self.saved_input = None;
    }

    /// Returns the line to show, or `None` when nothing changes.
    pub fn up(&mut self, current_input: &str) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        let next_index = match self.index {
            None => {
                self.saved_input = Some(current_input.to_string());
                self.entries.len() - 1
            }
            Some(current) => current.saturating_sub(1),
        };
        self.index = Some(next_index);
        Some(self.entries[next_index].clone())
    }

    /// Returns the line to show, or `None` when not navigating.
    pub fn down(&mut self) -> Option<String> {
        let current = self.index?;
        if self.entries.is_empty() {
            self.stop_navigating();
            return None;
        }

        if current + 1 < self.entries.len() {
            let next_index = current + 1;
            self.index = Some(next_index);
            return Some(self.entries[next_index].clone());
        }

        self.index = None;
        Some(self.saved_input.take().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(lines: &[&str]) -> InvocationHistory {
        let mut history = InvocationHistory::new();
        for line in lines {
            history.push(*line);
        }
        history
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = InvocationHistory::new();
        assert_eq!(history.up("typed"), None);
        assert_eq!(history.down(), None);
        assert!(!history.is_navigating());
    }

    #[test]
    fn test_up_clamps_at_oldest_and_down_restores_saved_line() {
        let mut history = history(&["a", "b", "c"]);
        assert_eq!(history.up("draft").as_deref(), Some("c"));
        assert_eq!(history.up("c").as_deref(), Some("b"));
        assert_eq!(history.up("b").as_deref(), Some("a"));
        assert_eq!(history.up("a").as_deref(), Some("a"));
        assert!(history.is_navigating());

        assert_eq!(history.down().as_deref(), Some("b"));
        assert_eq!(history.down().as_deref(), Some("c"));
        assert_eq!(history.down().as_deref(), Some("draft"));
        assert!(!history.is_navigating());
        assert_eq!(history.down(), None);
    }

    #[test]
    fn test_down_while_idle_is_noop() {
        let mut history = history(&["a"]);
        assert_eq!(history.down(), None);
    }

    #[test]
    fn test_stop_navigating_drops_saved_line() {
        let mut history = history(&["a", "b"]);
        history.up("draft");
        history.stop_navigating();
        assert!(!history.is_navigating());

        assert_eq!(history.up("edited").as_deref(), Some("b"));
        assert_eq!(history.down().as_deref(), Some("edited"));
    }
}
