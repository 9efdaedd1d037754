//! Unified error types for calcdesk.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading, parsing, or persisting configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Errors from the remote calculator service.
#[derive(Debug)]
pub enum ApiError {
    /// Network / reqwest-level error (connect, timeout, body read).
    Http(reqwest::Error),
    /// Non-2xx status from the service.
    Status { code: u16, body: String },
    /// A 2xx response whose payload did not match the expected shape.
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status code, when the service answered with one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status { code, body } => write!(f, "status {code}: {body}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// ControllerError
// ---------------------------------------------------------------------------

/// Rejections raised by the input/history controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// A buffer mutation was attempted while an evaluation is outstanding.
    EvaluationInFlight,
    /// History activation referenced an index outside the current list.
    NoSuchEntry(usize),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvaluationInFlight => write!(f, "evaluation in progress"),
            Self::NoSuchEntry(index) => write!(f, "no history entry at position {index}"),
        }
    }
}

impl std::error::Error for ControllerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("file not found"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn api_status_error_exposes_code() {
        let err = ApiError::Status {
            code: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.status_code(), Some(502));
        assert_eq!(err.to_string(), "status 502: bad gateway");
        assert_eq!(ApiError::InvalidResponse("x".into()).status_code(), None);
    }

    #[test]
    fn controller_error_display() {
        assert_eq!(
            ControllerError::EvaluationInFlight.to_string(),
            "evaluation in progress"
        );
        assert_eq!(
            ControllerError::NoSuchEntry(3).to_string(),
            "no history entry at position 3"
        );
    }
}
