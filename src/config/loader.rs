//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::env::apply_env_overrides;
use super::init::config_root_dir;
use super::sources::{read_config_text_with_sources, ConfigSource};
use super::{Config, Theme};

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    if source != ConfigSource::BuiltInDefaults {
        tracing::debug!(?source, "loaded config file");
    }
    let mut config: Config = toml::from_str(&config_text)?;
    apply_env_overrides(&mut config, &env_lookup)?;
    normalize(&mut config)?;
    Ok(config)
}

/// Command-line overrides, applied after file and environment sources.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub no_color: bool,
    pub theme: Option<Theme>,
}

/// Apply CLI flags on top of a loaded config and re-validate it.
pub fn apply_cli_overrides(
    config: &mut Config,
    overrides: &CliOverrides<'_>,
) -> Result<(), ConfigError> {
    if let Some(url) = overrides.base_url {
        config.service.base_url = url.to_string();
    }
    if overrides.no_color {
        config.display.color = false;
    }
    if let Some(theme) = overrides.theme {
        config.display.theme = theme;
    }
    normalize(config)
}

fn normalize(config: &mut Config) -> Result<(), ConfigError> {
    let base_url = config.service.base_url.trim().trim_end_matches('/');
    if base_url.is_empty() {
        return Err(ConfigError::Invalid(
            "service.base_url cannot be empty".to_string(),
        ));
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Invalid(format!(
            "service.base_url `{base_url}` must start with http:// or https://"
        )));
    }
    config.service.base_url = base_url.to_string();
    // Clamp to at least 1 second.
    config.service.timeout_secs = config.service.timeout_secs.max(1);
    if config.logging.level.trim().is_empty() {
        config.logging.level = super::defaults::DEFAULT_LOG_LEVEL.to_string();
    }
    Ok(())
}
