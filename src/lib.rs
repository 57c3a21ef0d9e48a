//! # jwtclaims - Registered Claim Validation
//!
//! Checks the registered claims of a JWT payload that has already been
//! decoded and whose signature has already been verified: expiration (`exp`),
//! issued-at (`iat`), not-before (`nbf`), audience (`aud`) and issuer (`iss`).
//!
//! ## Overview
//!
//! Claims arrive either as a dynamic [`MapClaims`] (any JSON object) or as the
//! typed [`StandardClaims`]. Both implement [`Claims`], which exposes one
//! predicate per claim:
//!
//! ```text
//! verify_expires_at(now, required)    now <= exp
//! verify_issued_at(now, required)     now >= iat - leeway
//! verify_not_before(now, required)    now >= nbf - leeway
//! verify_audience(expected, required) expected is one of aud
//! verify_issuer(expected, required)   iss == expected
//! ```
//!
//! `required` is the policy for a missing claim: `true` fails, `false`
//! passes. A claim with an unreadable shape counts as missing.
//!
//! ## Quick Start
//!
//! ```
//! use jwtclaims::{Claims, FixedClock, Leeway, MapClaims, ValidationErrorKind};
//! use serde_json::json;
//!
//! let now = 1_700_000_000;
//! let claims: MapClaims = serde_json::from_value(json!({
//!     "iss": "https://issuer.example.com",
//!     "aud": "my-api",
//!     "exp": now - 10,
//! }))
//! .unwrap();
//!
//! let claims = claims.with_leeway(Leeway::from_secs(30));
//! assert!(claims.verify_audience("my-api", true));
//!
//! let err = claims.valid_with(&FixedClock(now)).unwrap_err();
//! assert_eq!(err.kind(), ValidationErrorKind::EXPIRED);
//! assert_eq!(err.to_string(), "token is expired");
//! ```
//!
//! ## Time-based Validation
//!
//! [`Claims::valid`] checks `exp`, `iat` and `nbf` (none required) against
//! one reading of the clock. The returned [`ValidationError`] carries a bit
//! for every failing check and the message of the last one. Use
//! [`Claims::valid_with`] or [`Claims::valid_at`] to supply time explicitly.
//!
//! Leeway only widens the `iat` and `nbf` windows. Expiry is exact.
//!
//! ## Policy Validation
//!
//! [`ValidationConfig`] runs all five checks with configurable `required`
//! flags and expected audience/issuer, returning the first [`ClaimError`].
//!
//! ## References
//!
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) - JSON Web Token (JWT)

// Core modules
pub mod clock;
pub mod error;

// Claims and validation
pub mod claims;

pub use claims::{
    Audience, Claims, Leeway, MapClaims, NumericDate, StandardClaims, ValidationConfig,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ClaimError, Result, ValidationError, ValidationErrorKind};
