//! Recurrence-rule error types.

use std::fmt;
use thiserror::Error;

/// Result type for rule parsing and construction.
pub type RuleResult<T> = Result<T, RuleError>;

/// An error raised while parsing or constructing a recurrence rule.
///
/// Everything except [`RuleErrorKind::OperandOutOfRange`] is a malformed
/// rule (bad grammar or structure); `OperandOutOfRange` flags a value
/// outside the legal range for its by-part.
#[derive(Debug, Error)]
#[error("{kind}: {detail}")]
pub struct RuleError {
    kind: RuleErrorKind,
    detail: String,
}

impl RuleError {
    #[must_use]
    pub fn new(kind: RuleErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Creates an out-of-range operand error.
    #[must_use]
    pub fn operand(part: &'static str, value: impl fmt::Display) -> Self {
        Self::new(
            RuleErrorKind::OperandOutOfRange,
            format!("{part}={value}"),
        )
    }

    #[must_use]
    pub const fn kind(&self) -> RuleErrorKind {
        self.kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleErrorKind {
    /// A key not defined by RFC 5545 §3.3.10.
    UnknownKey,
    /// A key occurring more than once.
    DuplicateKey,
    /// FREQ is required but absent.
    MissingFrequency,
    /// Unrecognized FREQ value.
    InvalidFrequency,
    /// A value that must be an integer is not one.
    InvalidInteger,
    /// Unrecognized two-letter weekday code.
    InvalidWeekday,
    /// UNTIL is neither `YYYYMMDD` nor `YYYYMMDDTHHMMSSZ`.
    InvalidUntil,
    /// COUNT and UNTIL are mutually exclusive.
    CountUntilConflict,
    /// A token does not match the key=value grammar.
    Malformed,
    /// A by-part value outside its legal range.
    OperandOutOfRange,
}

impl fmt::Display for RuleErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UnknownKey => "unknown rule part",
            Self::DuplicateKey => "repeated rule part",
            Self::MissingFrequency => "missing FREQ",
            Self::InvalidFrequency => "invalid FREQ value",
            Self::InvalidInteger => "invalid integer",
            Self::InvalidWeekday => "invalid weekday code",
            Self::InvalidUntil => "invalid UNTIL value",
            Self::CountUntilConflict => "COUNT and UNTIL are mutually exclusive",
            Self::Malformed => "malformed rule",
            Self::OperandOutOfRange => "operand out of range",
        };
        f.write_str(s)
    }
}
