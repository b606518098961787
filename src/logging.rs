use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const DEFAULT_LOG_PATH: &str = "/tmp/tilde.log";

/// Outcome of the one subscriber install attempt, replayed to later callers.
static SUBSCRIBER_INSTALLED: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Installs the global tracing subscriber. The TUI owns stdout, so events go to
/// a file whenever one can be resolved and to stderr otherwise.
pub fn init(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("Invalid TILDE_LOG filter '{}'", config.log_filter))?;

    if let Some(outcome) = SUBSCRIBER_INSTALLED.get() {
        return outcome.clone().map_err(anyhow::Error::msg);
    }

    let file = match resolve_log_path(config.log_path.as_deref()) {
        Some(path) => Some(open_log_file(&path)?),
        None => None,
    };

    let outcome = SUBSCRIBER_INSTALLED.get_or_init(|| {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(false);
        let installed = match file {
            Some(file) => builder.with_writer(Mutex::new(file)).try_init(),
            None => builder.with_writer(std::io::stderr).try_init(),
        };
        installed.map_err(|err| format!("Failed to install log subscriber: {err}"))
    });
    outcome.clone().map_err(anyhow::Error::msg)
}

fn resolve_log_path(configured: Option<&Path>) -> Option<PathBuf> {
    configured.map(Path::to_path_buf).or_else(|| {
        if std::io::stderr().is_terminal() {
            Some(PathBuf::from(DEFAULT_LOG_PATH))
        } else {
            None
        }
    })
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_log_path_prefers_configured_path() {
        let configured = PathBuf::from("/tmp/test-tilde.log");
        assert_eq!(
            resolve_log_path(Some(&configured)),
            Some(PathBuf::from("/tmp/test-tilde.log"))
        );
    }

    #[test]
    fn test_open_log_file_appends() {
        use std::io::Write;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tilde.log");
        {
            let mut file = open_log_file(&path).expect("open");
            file.write_all(b"first\n").expect("write");
        }
        {
            let mut file = open_log_file(&path).expect("reopen");
            file.write_all(b"second\n").expect("write");
        }
        let contents = std::fs::read_to_string(&path).expect("read");
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn test_init_rejects_bad_filter() {
        let config = Config {
            log_filter: "tilde=loud".to_string(),
            ..Config::default()
        };
        assert!(init(&config).is_err());
    }

    #[test]
    fn test_init_reports_existing_global_subscriber() {
        let _ = tracing::subscriber::set_global_default(tracing_subscriber::registry());

        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            log_path: Some(dir.path().join("tilde.log")),
            ..Config::default()
        };
        let err = init(&config).expect_err("second global subscriber must be refused");
        assert!(err.to_string().contains("Failed to install log subscriber"));
        assert!(init(&config).is_err());
    }
}
