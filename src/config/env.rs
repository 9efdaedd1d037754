//! Environment-variable overrides applied after the config file is parsed.

use crate::error::ConfigError;

use super::Config;

/// Env var overriding `service.base_url`.
pub const ENV_BASE_URL: &str = "CALCDESK_BASE_URL";
/// Env var overriding `service.timeout_secs`.
pub const ENV_TIMEOUT_SECS: &str = "CALCDESK_TIMEOUT_SECS";
/// Env var overriding `display.theme`.
pub const ENV_THEME: &str = "CALCDESK_THEME";

pub(super) fn apply_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(url) = non_empty(env_lookup(ENV_BASE_URL)) {
        config.service.base_url = url;
    }
    if let Some(timeout) = non_empty(env_lookup(ENV_TIMEOUT_SECS)) {
        let parsed = timeout.parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_TIMEOUT_SECS} value `{timeout}`: expected positive integer seconds"
            ))
        })?;
        config.service.timeout_secs = parsed;
    }
    if let Some(theme) = non_empty(env_lookup(ENV_THEME)) {
        config.display.theme = theme.parse().map_err(|bad| {
            ConfigError::Invalid(format!(
                "invalid {ENV_THEME} value `{bad}`: expected `light` or `dark`"
            ))
        })?;
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
