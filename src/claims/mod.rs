//! Registered claims and their verification
//!
//! Two claim containers share one set of checks through the [`Claims`]
//! trait: [`MapClaims`], a dynamic map over `serde_json` values, and
//! [`StandardClaims`], a typed struct for the RFC 7519 registered claims.

mod map;
mod standard;
mod validator;
pub(crate) mod verify;

pub use map::MapClaims;
pub use standard::{Audience, StandardClaims};
pub use validator::ValidationConfig;

use crate::clock::{Clock, SystemClock};
use crate::error::{ClaimError, Result, ValidationError, ValidationErrorKind};
use serde_json::Value;
use std::time::Duration;

/// Clock tolerance in whole seconds
///
/// Subtracted from the `iat` and `nbf` thresholds. Expiry ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Leeway(i64);

impl Leeway {
    pub const ZERO: Self = Self(0);

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Whole seconds of `duration`; sub-second parts are dropped
    pub fn from_duration(duration: Duration) -> Self {
        Self(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
    }

    pub const fn as_secs(self) -> i64 {
        self.0
    }
}

impl From<Duration> for Leeway {
    fn from(duration: Duration) -> Self {
        Self::from_duration(duration)
    }
}

impl From<i64> for Leeway {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}

/// A time claim as it may arrive from a decoder
///
/// JSON numbers come through as [`Integer`](Self::Integer) or
/// [`Float`](Self::Float); a string is taken as decimal text. Every shape is
/// read as whole seconds, truncating toward zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericDate<'a> {
    Integer(i64),
    Float(f64),
    Decimal(&'a str),
}

impl<'a> NumericDate<'a> {
    /// `None` for shapes that cannot hold a time (bool, null, array, object)
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::Decimal(s.as_str())),
            _ => None,
        }
    }

    /// Seconds since the epoch, or `None` if the value is not a finite number
    pub fn seconds(self) -> Option<i64> {
        match self {
            Self::Integer(secs) => Some(secs),
            Self::Float(secs) => truncate(secs),
            Self::Decimal(text) => text
                .parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(truncate)),
        }
    }
}

fn truncate(secs: f64) -> Option<i64> {
    // `as` saturates at the i64 bounds
    secs.is_finite().then(|| secs.trunc() as i64)
}

/// Checks over the registered claims
///
/// Each `verify_*` method is a pure predicate. `required` decides what an
/// absent (or unreadable) claim means: `true` fails, `false` passes.
///
/// The provided `valid*` methods aggregate the three time checks.
pub trait Claims {
    /// `true` if `expected` is one of the `aud` values
    fn verify_audience(&self, expected: &str, required: bool) -> bool;

    /// `true` if `now <= exp`
    fn verify_expires_at(&self, now: i64, required: bool) -> bool;

    /// `true` if `now >= iat - leeway`
    fn verify_issued_at(&self, now: i64, required: bool) -> bool;

    /// `true` if `now >= nbf - leeway`
    fn verify_not_before(&self, now: i64, required: bool) -> bool;

    /// `true` if `iss == expected`; an empty issuer also passes when not required
    fn verify_issuer(&self, expected: &str, required: bool) -> bool;

    fn leeway(&self) -> Leeway;

    /// Check `exp`, `iat` and `nbf` at `now`, none of them required
    ///
    /// Every failing check sets its bit. The message is the one of the last
    /// failing check in the order exp, iat, nbf.
    fn valid_at(&self, now: i64) -> Result<()> {
        let mut kind = ValidationErrorKind::empty();
        let mut last = None;
        let leeway = self.leeway().as_secs();

        if !self.verify_expires_at(now, false) {
            tracing::debug!(claim = "exp", now, "token is expired");
            kind |= ValidationErrorKind::EXPIRED;
            last = Some(ClaimError::Expired);
        }

        if !self.verify_issued_at(now, false) {
            tracing::debug!(claim = "iat", now, leeway, "token used before issued");
            kind |= ValidationErrorKind::ISSUED_AT;
            last = Some(ClaimError::UsedBeforeIssued);
        }

        if !self.verify_not_before(now, false) {
            tracing::debug!(claim = "nbf", now, leeway, "token is not valid yet");
            kind |= ValidationErrorKind::NOT_VALID_YET;
            last = Some(ClaimError::NotValidYet);
        }

        match last {
            None => Ok(()),
            Some(inner) => Err(ValidationError::new(kind, inner)),
        }
    }

    /// [`valid_at`](Self::valid_at) with `now` read once from `clock`
    fn valid_with(&self, clock: &dyn Clock) -> Result<()> {
        self.valid_at(clock.now())
    }

    /// [`valid_at`](Self::valid_at) against the system clock
    fn valid(&self) -> Result<()> {
        self.valid_with(&SystemClock)
    }
}
