use crate::encoding::{KeyDecodeError, KeyEncodeError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured span-building error with a stable internal classification.
/// Callers branch on `class`; `message` is for humans only.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    /// Construct an InternalError from its parts.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a schema-origin configuration error.
    pub(crate) fn schema_configuration(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::Configuration,
            ErrorOrigin::Schema,
            message.into(),
        )
    }

    /// Construct an encoding-origin rejection of a value/direction pair.
    pub(crate) fn encoding(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Encoding, ErrorOrigin::Encoding, message.into())
    }

    /// Construct an encoding-origin corruption error for undecodable bytes.
    pub(crate) fn encoding_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Encoding, message.into())
    }

    /// Construct a builder-origin invariant violation.
    ///
    /// These are assertion failures: a broken precondition upstream, never a
    /// user error. Callers must fail the request.
    pub(crate) fn builder_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Builder,
            message.into(),
        )
    }

    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self.class, ErrorClass::InvariantViolation)
    }

    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.class, ErrorClass::Configuration)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<KeyEncodeError> for InternalError {
    fn from(err: KeyEncodeError) -> Self {
        Self::encoding(format!("value is not key-encodable: {err}"))
    }
}

impl From<KeyDecodeError> for InternalError {
    fn from(err: KeyDecodeError) -> Self {
        Self::encoding_corruption(format!("encoded key datum is corrupt: {err}"))
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Configuration,
    Encoding,
    Corruption,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Encoding => "encoding",
            Self::Corruption => "corruption",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Schema,
    Encoding,
    Builder,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Schema => "schema",
            Self::Encoding => "encoding",
            Self::Builder => "builder",
        };
        write!(f, "{label}")
    }
}
