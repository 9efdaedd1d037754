//! Default configuration constants.
//!
//! Callers share these constants instead of duplicating literals.

/// Embedded default `calcdesk.toml` template written by `calcdesk init`.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/calcdesk.toml");
/// Config file name used for local and global lookups.
pub(super) const CONFIG_FILE_NAME: &str = "calcdesk.toml";
/// Directory name under the config root.
pub(super) const CONFIG_DIR_NAME: &str = "calcdesk";
/// Log file name used by the interactive front end.
pub(super) const LOG_FILE_NAME: &str = "calcdesk.log";
/// Flask's default development address, where the calculator service listens.
pub(super) const DEFAULT_SERVICE_BASE_URL: &str = "http://127.0.0.1:5000";
/// Default timeout for one service request.
pub(super) const DEFAULT_SERVICE_TIMEOUT_SECS: u64 = 10;
/// Default tracing filter directive.
pub(super) const DEFAULT_LOG_LEVEL: &str = "warn";
