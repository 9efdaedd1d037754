//! Diagnostics setup via `tracing-subscriber`.
//!
//! The filter comes from `CALCDESK_LOG` when set, otherwise from
//! `[logging].level`. The full-screen interface owns the terminal, so it logs
//! to a file; one-shot commands and line mode log to stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "CALCDESK_LOG";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

/// Pick the filter directive: the environment wins over the configured level.
pub fn filter_directive(env_value: Option<String>, configured_level: &str) -> String {
    env_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| configured_level.trim().to_string())
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("warning: ignoring invalid log filter `{directive}`: {err}");
        EnvFilter::new("warn")
    })
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(configured_level: &str, target: LogTarget<'_>) -> std::io::Result<()> {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), configured_level);
    let filter = build_filter(&directive);

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact()
                .try_init();
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_directive_overrides_configured_level() {
        assert_eq!(
            filter_directive(Some("calcdesk=debug".into()), "warn"),
            "calcdesk=debug"
        );
    }

    #[test]
    fn blank_env_falls_back_to_config() {
        assert_eq!(filter_directive(Some("  ".into()), "info"), "info");
        assert_eq!(filter_directive(None, " error "), "error");
    }

    #[test]
    fn invalid_directive_degrades_to_warn() {
        let filter = build_filter("calcdesk=bogus");
        assert_eq!(filter.to_string(), "warn");
    }
}
