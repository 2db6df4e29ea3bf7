// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Status(StatusError),
}

/// Caller-misuse faults raised by the status subsystem.
///
/// Environment faults (a detached surface, a failed verification) never
/// surface as this type; they are logged and turned into `false` results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// The message passed to `show_status` was the empty string.
    EmptyMessage,

    /// The manager was destroyed while a queue drain was still running.
    Destroyed,

    /// A queue handler failed; the drain stops and the rest stays queued.
    Handler(String),
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusError::EmptyMessage => write!(f, "status message must be a non-empty string"),
            StatusError::Destroyed => write!(f, "status manager has been destroyed"),
            StatusError::Handler(msg) => write!(f, "queue handler failed: {}", msg),
        }
    }
}

impl std::error::Error for StatusError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Status(e) => write!(f, "Status Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<StatusError> for Error {
    fn from(err: StatusError) -> Self {
        Error::Status(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn from_toml_error_produces_config_variant() {
        let toml_error = toml::from_str::<toml::Table>("not = valid = toml").unwrap_err();
        let err: Error = toml_error.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn status_error_wraps_into_crate_error() {
        let err: Error = StatusError::EmptyMessage.into();
        assert_eq!(err, Error::Status(StatusError::EmptyMessage));
        assert!(format!("{}", err).contains("non-empty"));
    }

    #[test]
    fn handler_error_display_carries_reason() {
        let err = StatusError::Handler("surface vanished".to_string());
        assert_eq!(format!("{}", err), "queue handler failed: surface vanished");
    }
}
