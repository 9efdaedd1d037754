//! Narrow in-place config updates.
//!
//! Only the targeted key is rewritten; comments and unrelated settings in the
//! file are preserved line for line.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::CONFIG_FILE_NAME;
use super::init::{default_global_config_path, write_template_if_absent};
use super::Theme;

/// Persist `[display].theme` to the effective config file and return that path.
pub fn persist_display_theme(
    path_override: Option<&Path>,
    theme: Theme,
) -> Result<PathBuf, ConfigError> {
    let path = resolve_persist_path(path_override)?;
    if !path.exists() {
        write_template_if_absent(&path)?;
    }
    let existing = std::fs::read_to_string(&path).unwrap_or_default();
    let updated = upsert_section_value(&existing, "display", "theme", theme.as_str());
    std::fs::write(&path, updated)?;
    Ok(path)
}

/// Read `[display].theme` from the file `persist_display_theme` would write.
///
/// `Ok(None)` when the file or the key is absent; env and defaults are not
/// consulted.
pub fn read_display_theme(path_override: Option<&Path>) -> Result<Option<Theme>, ConfigError> {
    let path = resolve_persist_path(path_override)?;
    if !path.exists() {
        return Ok(None);
    }
    let table: toml::Table = toml::from_str(&std::fs::read_to_string(&path)?)?;
    let Some(value) = table.get("display").and_then(|display| display.get("theme")) else {
        return Ok(None);
    };
    let text = value
        .as_str()
        .ok_or_else(|| ConfigError::Invalid("display.theme must be a string".to_string()))?;
    text.parse::<Theme>()
        .map(Some)
        .map_err(|other| ConfigError::Invalid(format!("unknown theme: {other}")))
}

/// Resolve the config file that should receive persisted updates.
pub(crate) fn resolve_persist_path(path_override: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path_override {
        return Ok(path.to_path_buf());
    }
    if Path::new(CONFIG_FILE_NAME).exists() {
        return Ok(PathBuf::from(CONFIG_FILE_NAME));
    }
    default_global_config_path().ok_or_else(|| {
        ConfigError::Invalid("unable to resolve a config path for theme persistence".to_string())
    })
}

/// Set `key = "value"` inside `[section]`, creating either when missing.
fn upsert_section_value(input: &str, section: &str, key: &str, value: &str) -> String {
    let mut lines = input.lines().map(str::to_string).collect::<Vec<_>>();
    let header = format!("[{section}]");
    let assignment = format!("{key} = \"{value}\"");

    let Some(start) = lines
        .iter()
        .position(|line| line.trim().eq_ignore_ascii_case(&header))
    else {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(header);
        lines.push(assignment);
        return with_trailing_newline(lines.join("\n"));
    };

    let end = lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| {
            let trimmed = line.trim();
            trimmed.starts_with('[') && trimmed.ends_with(']')
        })
        .map(|(idx, _)| idx)
        .unwrap_or(lines.len());

    match (start + 1..end).find(|idx| is_assignment_key(&lines[*idx], key)) {
        Some(idx) => lines[idx] = assignment,
        None => lines.insert(start + 1, assignment),
    }
    with_trailing_newline(lines.join("\n"))
}

/// True when `line` assigns to `key` (e.g. `key = ...`), ignoring comments.
fn is_assignment_key(line: &str, key: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix(key) else {
        return false;
    };
    rest.trim_start().starts_with('=')
}

fn with_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
