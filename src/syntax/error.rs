//! Error type for syntax configuration faults.

use std::fmt;

/// Errors raised by syntax configuration operations.
///
/// Configuration misuse is a programming error, so unlike lexing and
/// resolution failures it is reported as a fault rather than a sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The character is already bound to an incompatible role.
    ValueInUse { role: &'static str, value: char },
    /// The character is not usable for this role (wildcard or escape).
    InvalidValue { role: &'static str, value: char },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::ValueInUse { role, value } => {
                write!(f, "{}: '{}' already in use", role, value)
            }
            SyntaxError::InvalidValue { role, value } => {
                write!(f, "{}: '{}' is not a valid value", role, value)
            }
        }
    }
}

impl std::error::Error for SyntaxError {}
