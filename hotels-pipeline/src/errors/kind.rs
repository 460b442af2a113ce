use std::fmt;

use tracing::Level;

/// Classification shared by all pipeline errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Expected failure of an external data source (unreachable, malformed).
    Remote,
    /// A flaw in our own logic or environment.
    Unexpected,
    /// Malformed client-supplied filter or sort request.
    Validation,
    /// Missing required argument. Raised before any I/O.
    InvalidInput,
}

impl ErrorKind {
    /// Log level used when an error of this kind is reported.
    pub fn severity(&self) -> Level {
        match self {
            ErrorKind::Remote => Level::WARN,
            ErrorKind::Unexpected => Level::ERROR,
            ErrorKind::Validation => Level::INFO,
            ErrorKind::InvalidInput => Level::WARN,
        }
    }

    /// Whether repeating the same operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Remote | ErrorKind::Unexpected)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Remote => "remote",
            ErrorKind::Unexpected => "unexpected",
            ErrorKind::Validation => "validation",
            ErrorKind::InvalidInput => "invalid-input",
        })
    }
}

/// Emits a tracing event at the severity of the given [`ErrorKind`].
///
/// ```ignore
/// log_by_kind!(err.kind(), hotel_address = %address, error = %err, "Hotel sync failed");
/// ```
#[macro_export]
macro_rules! log_by_kind {
    ($kind:expr, $($arg:tt)+) => {{
        let level = $crate::errors::ErrorKind::severity(&$kind);
        if level == ::tracing::Level::ERROR {
            ::tracing::error!($($arg)+);
        } else if level == ::tracing::Level::WARN {
            ::tracing::warn!($($arg)+);
        } else if level == ::tracing::Level::INFO {
            ::tracing::info!($($arg)+);
        } else {
            ::tracing::debug!($($arg)+);
        }
    }};
}
