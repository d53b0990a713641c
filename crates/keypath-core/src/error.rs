use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; intended for internal use and may change without notice.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    /// Construct an InternalError from its classification parts.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a planner-origin invariant violation.
    pub(crate) fn planner_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Planner,
            message.into(),
        )
    }

    /// Construct a scan-origin invariant violation.
    pub(crate) fn scan_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Scan,
            message.into(),
        )
    }

    /// Construct a cursor-origin invariant violation.
    pub(crate) fn cursor_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Cursor,
            message.into(),
        )
    }

    /// Construct a scan-origin unsupported error.
    pub(crate) fn scan_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Scan, message.into())
    }

    /// Construct a lowering-origin unsupported error.
    pub(crate) fn lowering_unsupported(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::Unsupported,
            ErrorOrigin::Lowering,
            message.into(),
        )
    }

    /// Construct a cursor-origin storage failure.
    ///
    /// Cursor implementations backed by real storage report their I/O failures
    /// through this constructor; scans propagate them unchanged.
    pub fn cursor_io(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Io, ErrorOrigin::Cursor, message.into())
    }

    /// Construct a config-origin internal error.
    pub(crate) fn config_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Config, message.into())
    }

    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self.class, ErrorClass::InvariantViolation)
    }

    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self.class, ErrorClass::Io)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Internal,
    InvariantViolation,
    Unsupported,
    Io,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Internal => "internal",
            Self::InvariantViolation => "invariant_violation",
            Self::Unsupported => "unsupported",
            Self::Io => "io",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Planner,
    Lowering,
    Scan,
    Cursor,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Planner => "planner",
            Self::Lowering => "lowering",
            Self::Scan => "scan",
            Self::Cursor => "cursor",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
