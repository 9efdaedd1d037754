//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. CLI flags (applied by the binary after loading)
//! 2. Environment variables (`CALCDESK_BASE_URL`, `CALCDESK_TIMEOUT_SECS`,
//!    `CALCDESK_THEME`)
//! 3. TOML file specified via --config CLI flag
//! 4. ./calcdesk.toml in the current directory
//! 5. $XDG_CONFIG_HOME/calcdesk/calcdesk.toml (or ~/.config/calcdesk/calcdesk.toml)
//! 6. Built-in defaults

mod defaults;
mod env;
mod init;
mod loader;
mod persist;
mod sources;
mod types;

pub use env::{ENV_BASE_URL, ENV_THEME, ENV_TIMEOUT_SECS};
pub use init::{
    config_root_dir, default_global_config_path, default_log_path, initialize_global_config,
};
pub use loader::{apply_cli_overrides, load_config, CliOverrides};
pub use persist::{persist_display_theme, read_display_theme};
pub use types::{Config, ConfigInitResult, DisplayConfig, LoggingConfig, ServiceConfig, Theme};
