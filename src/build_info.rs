//! Compile-time build metadata for `--version` and the interactive banner.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured by `build.rs`.
pub const GIT_COMMIT: &str = env!("CALCDESK_BUILD_GIT_HASH");

/// Build timestamp captured by `build.rs`.
pub const BUILD_TIMESTAMP: &str = env!("CALCDESK_BUILD_TIMESTAMP");

/// One-line version string shown in the interactive header.
pub fn banner_line() -> String {
    format!("calcdesk v{VERSION} ({GIT_COMMIT})")
}

/// Multi-line text printed by `calcdesk --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("CALCDESK_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("CALCDESK_BUILD_TIMESTAMP")
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_names_version_and_commit() {
        let text = banner_line();
        assert!(text.starts_with("calcdesk v"));
        assert!(text.contains(GIT_COMMIT));
    }

    #[test]
    fn version_text_lists_metadata() {
        let text = LONG_VERSION;
        assert!(text.starts_with(VERSION));
        assert!(text.contains(BUILD_TIMESTAMP));
        assert!(text.contains("commit:"));
        assert!(text.contains("built:"));
    }
}
