use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrollbackEntry {
    pub text: String,
    /// Echoed command line; rendered with the prompt prefix split out.
    pub is_command: bool,
    /// Banner shown before anything was typed.
    #[serde(default)]
    pub is_placeholder: bool,
}

impl ScrollbackEntry {
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_command: false,
            is_placeholder: false,
        }
    }

    pub fn command(prompt: &str, line: &str) -> Self {
        Self {
            text: format!("{prompt} {line}"),
            is_command: true,
            is_placeholder: false,
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_command: false,
            is_placeholder: true,
        }
    }

    /// Splits a command entry into `(prompt, rest)`. Output entries, and
    /// command entries that do not start with `prompt`, have no prefix.
    pub fn split_prompt<'a>(&'a self, prompt: &str) -> (&'a str, &'a str) {
        if !self.is_command {
            return ("", &self.text);
        }
        match self.text.strip_prefix(prompt) {
            Some(rest) => (&self.text[..prompt.len()], rest),
            None => ("", &self.text),
        }
    }
}

/// Append-only list of rendered lines. The only removals are full resets.
#[derive(Debug, Clone)]
pub struct Scrollback {
    entries: Vec<ScrollbackEntry>,
    welcome: String,
    revision: u64,
}

impl Scrollback {
    pub fn new(welcome: impl Into<String>) -> Self {
        let welcome = welcome.into();
        Self {
            entries: vec![ScrollbackEntry::placeholder(welcome.clone())],
            welcome,
            revision: 0,
        }
    }

    pub fn entries(&self) -> &[ScrollbackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bumped on every mutation so the view knows when to follow the bottom.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = ScrollbackEntry>) {
        self.entries.extend(entries);
        self.revision += 1;
    }

    /// Empties the scrollback; no banner is restored.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.revision += 1;
    }

    /// Back to the single welcome entry.
    pub fn reset_to_welcome(&mut self) {
        self.entries.clear();
        self.entries
            .push(ScrollbackEntry::placeholder(self.welcome.clone()));
        self.revision += 1;
    }
}
