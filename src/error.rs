//! Error types for claims validation
//!
//! Two layers are defined here. [`ClaimError`] names a single failed check.
//! [`ValidationError`] is the aggregate outcome of the time-based checks: it
//! records every failing check in a [`ValidationErrorKind`] bitmask and keeps
//! the [`ClaimError`] of the last one evaluated.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use thiserror::Error;

/// A single failed claim check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("token is expired")]
    Expired,

    #[error("token used before issued")]
    UsedBeforeIssued,

    #[error("token is not valid yet")]
    NotValidYet,

    #[error("token audience mismatch: expected '{expected}'")]
    AudienceMismatch { expected: String },

    #[error("token issuer mismatch: expected '{expected}'")]
    IssuerMismatch { expected: String },
}

/// Classification bits carried by a [`ValidationError`]
///
/// Bit positions leave room for a surrounding verification pipeline to OR in
/// its own bits (malformed token, bad signature, ...). Only the three bits
/// below are ever produced by this crate.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValidationErrorKind(u32);

impl ValidationErrorKind {
    /// `exp` check failed
    pub const EXPIRED: Self = Self(1 << 4);
    /// `iat` check failed
    pub const ISSUED_AT: Self = Self(1 << 5);
    /// `nbf` check failed
    pub const NOT_VALID_YET: Self = Self(1 << 7);

    const NAMED: [(Self, &'static str); 3] = [
        (Self::EXPIRED, "EXPIRED"),
        (Self::ISSUED_AT, "ISSUED_AT"),
        (Self::NOT_VALID_YET, "NOT_VALID_YET"),
    ];

    /// No bits set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Wrap raw bits, keeping any bits this crate does not define
    pub const fn from_bits_retain(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if every bit of `other` is set in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl BitOr for ValidationErrorKind {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ValidationErrorKind {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl fmt::Debug for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        let mut rest = self.0;
        for (flag, name) in Self::NAMED {
            if self.contains(flag) {
                names.push(name.to_string());
                rest &= !flag.0;
            }
        }
        if rest != 0 {
            names.push(format!("{rest:#x}"));
        }
        write!(f, "ValidationErrorKind({})", names.join(" | "))
    }
}

/// Aggregate outcome of the time-based claim checks
///
/// The bitmask lists every check that failed; the message describes only the
/// last one in evaluation order (exp, iat, nbf). Callers that need a full
/// diagnosis should run the individual verifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{inner}")]
pub struct ValidationError {
    kind: ValidationErrorKind,
    inner: ClaimError,
}

impl ValidationError {
    /// Built only by the aggregate checks, which always set at least one bit
    pub(crate) fn new(kind: ValidationErrorKind, inner: ClaimError) -> Self {
        debug_assert!(!kind.is_empty(), "validation error without a kind bit");
        Self { kind, inner }
    }

    pub fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    /// The last failing check
    pub fn inner(&self) -> &ClaimError {
        &self.inner
    }

    pub fn is_expired(&self) -> bool {
        self.kind.contains(ValidationErrorKind::EXPIRED)
    }

    pub fn is_issued_at_invalid(&self) -> bool {
        self.kind.contains(ValidationErrorKind::ISSUED_AT)
    }

    pub fn is_not_valid_yet(&self) -> bool {
        self.kind.contains(ValidationErrorKind::NOT_VALID_YET)
    }
}

/// Result type alias for aggregate claims validation
pub type Result<T> = std::result::Result<T, ValidationError>;
