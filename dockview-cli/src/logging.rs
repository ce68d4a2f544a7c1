//! Tracing setup.
//!
//! The TUI owns the terminal, so its logs go to a file. One-shot commands
//! log warnings to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use dockview_core::config::LogSettings;

const LOG_FILE_NAME: &str = "dockview.log";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    File,
    Stderr,
}

/// `$XDG_STATE_HOME/dockview/dockview.log`, falling back to
/// `~/.local/state` and then the temp dir.
pub fn default_log_path() -> PathBuf {
    let state_dir = std::env::var_os("XDG_STATE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|v| !v.is_empty())
                .map(|home| PathBuf::from(home).join(".local").join("state"))
        })
        .unwrap_or_else(std::env::temp_dir);

    state_dir.join("dockview").join(LOG_FILE_NAME)
}

/// Level used when `RUST_LOG` is unset.
fn default_level<'a>(settings: &'a LogSettings, target: Target) -> &'a str {
    match target {
        Target::File => &settings.level,
        Target::Stderr => "warn",
    }
}

/// Splits a log path into the directory to create and the file name.
fn split_path(path: &Path) -> (PathBuf, String) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| LOG_FILE_NAME.to_string());
    (dir, name)
}

/// Installs the global subscriber. Returns the log file path when logging
/// to a file.
pub fn init(settings: &LogSettings, target: Target) -> Result<Option<PathBuf>> {
    if target == Target::File && (!settings.enabled || settings.level == "off") {
        return Ok(None);
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(settings, target)))
        .context("invalid log filter")?;

    match target {
        Target::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .try_init()?;
            Ok(None)
        }
        Target::File => {
            let path = settings.file.clone().unwrap_or_else(default_log_path);
            let (dir, name) = split_path(&path);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(name)
                .build(&dir)
                .with_context(|| format!("failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(appender)
                        .with_ansi(false)
                        .with_target(true),
                )
                .try_init()?;

            tracing::info!(path = %path.display(), "logging initialized");
            Ok(Some(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        let (dir, name) = split_path(Path::new("/var/log/dockview/run.log"));
        assert_eq!(dir, PathBuf::from("/var/log/dockview"));
        assert_eq!(name, "run.log");

        let (dir, name) = split_path(Path::new("run.log"));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "run.log");
    }

    #[test]
    fn test_default_level_by_target() {
        let settings = LogSettings {
            level: "debug".into(),
            ..Default::default()
        };
        assert_eq!(default_level(&settings, Target::File), "debug");
        assert_eq!(default_level(&settings, Target::Stderr), "warn");
    }

    #[test]
    fn test_default_log_path_file_name() {
        let path = default_log_path();
        assert!(path.ends_with("dockview/dockview.log"));
    }

    #[test]
    fn test_disabled_file_logging_is_noop() {
        let settings = LogSettings {
            enabled: false,
            ..Default::default()
        };
        assert_eq!(init(&settings, Target::File).unwrap(), None);
    }
}
