use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::util::{is_single_line, parse_bool_str};

pub const DEFAULT_PROMPT: &str = "~";
pub const DEFAULT_WELCOME: &str =
    "Welcome to my terminal! Type 'help' to see available commands.";
pub const DEFAULT_ABOUT: &str = "My name is Zakary. I am a software engineer and designer.";
pub const DEFAULT_SOCIALS: &str = "You can find me on GitHub: https://github.com/your-username and LinkedIn: https://linkedin.com/in/your-username";
pub const DEFAULT_BLINK_MS: u64 = 500;

const MIN_BLINK_MS: u64 = 50;
const MAX_BLINK_MS: u64 = 5000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub prompt: String,
    pub welcome: String,
    pub about: String,
    pub socials: String,
    pub blink_ms: u64,
    pub smooth_scroll: bool,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            welcome: DEFAULT_WELCOME.to_string(),
            about: DEFAULT_ABOUT.to_string(),
            socials: DEFAULT_SOCIALS.to_string(),
            blink_ms: DEFAULT_BLINK_MS,
            smooth_scroll: true,
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let blink_ms = match non_empty_var("TILDE_BLINK_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("TILDE_BLINK_MS '{raw}' is not a number"))?,
            None => defaults.blink_ms,
        };
        let smooth_scroll = match non_empty_var("TILDE_SMOOTH_SCROLL") {
            Some(raw) => match parse_bool_str(&raw) {
                Some(value) => value,
                None => bail!("TILDE_SMOOTH_SCROLL '{raw}': expected true/false"),
            },
            None => defaults.smooth_scroll,
        };

        Ok(Self {
            prompt: non_empty_var("TILDE_PROMPT").unwrap_or(defaults.prompt),
            welcome: non_empty_var("TILDE_WELCOME").unwrap_or(defaults.welcome),
            about: non_empty_var("TILDE_ABOUT").unwrap_or(defaults.about),
            socials: non_empty_var("TILDE_SOCIALS").unwrap_or(defaults.socials),
            blink_ms,
            smooth_scroll,
            log_path: non_empty_var("TILDE_LOG_PATH").map(PathBuf::from),
            log_filter: non_empty_var("TILDE_LOG").unwrap_or(defaults.log_filter),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            bail!("TILDE_PROMPT must not be blank");
        }
        if !is_single_line(&self.prompt) {
            bail!("TILDE_PROMPT must fit on one line: '{}'", self.prompt.escape_debug());
        }
        if !is_single_line(&self.welcome) {
            bail!("TILDE_WELCOME must fit on one line");
        }
        if !(MIN_BLINK_MS..=MAX_BLINK_MS).contains(&self.blink_ms) {
            bail!(
                "Invalid TILDE_BLINK_MS {}: expected {MIN_BLINK_MS}..={MAX_BLINK_MS}",
                self.blink_ms
            );
        }
        Ok(())
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_ms)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
