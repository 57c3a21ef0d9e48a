//! End-to-end claims validation through the public API
//!
//! Covers the boundary behavior of each verifier and the aggregate outcome
//! of the time-based checks.

use jwtclaims::*;
use serde_json::{Value, json};
use std::time::Duration;

const NOW: i64 = 1_700_000_000;

fn map_claims(value: Value) -> MapClaims {
    serde_json::from_value(value).unwrap()
}

// ============================================================================
// Expiry
// ============================================================================

#[test]
fn test_exp_boundary_inclusive() {
    let claims = map_claims(json!({ "exp": NOW }));
    assert!(claims.verify_expires_at(NOW, true));
    assert!(claims.verify_expires_at(NOW, false));
}

#[test]
fn test_exp_one_second_late() {
    let claims = map_claims(json!({ "exp": NOW }));
    assert!(!claims.verify_expires_at(NOW + 1, false));
    assert!(!claims.verify_expires_at(NOW + 1, true));
}

#[test]
fn test_exp_float_is_truncated() {
    let claims = map_claims(json!({ "exp": NOW as f64 + 0.999 }));
    assert!(claims.verify_expires_at(NOW, true));
    assert!(!claims.verify_expires_at(NOW + 1, true));
}

// ============================================================================
// Issued-at / not-before with leeway
// ============================================================================

#[test]
fn test_iat_leeway_boundary() {
    for leeway in [0, 1, 60, 3600] {
        let claims =
            map_claims(json!({ "iat": NOW })).with_leeway(Leeway::from_secs(leeway));
        assert!(claims.verify_issued_at(NOW - leeway, true), "leeway {leeway}");
        assert!(!claims.verify_issued_at(NOW - leeway - 1, true), "leeway {leeway}");
    }
}

#[test]
fn test_nbf_leeway_from_duration() {
    let claims = map_claims(json!({ "nbf": NOW })).with_leeway(Duration::from_secs(120));
    assert!(claims.verify_not_before(NOW - 120, true));
    assert!(!claims.verify_not_before(NOW - 121, true));
}

#[test]
fn test_missing_time_claims_follow_required() {
    let claims = MapClaims::new();
    assert!(claims.verify_expires_at(NOW, false));
    assert!(claims.verify_issued_at(NOW, false));
    assert!(claims.verify_not_before(NOW, false));
    assert!(!claims.verify_expires_at(NOW, true));
    assert!(!claims.verify_issued_at(NOW, true));
    assert!(!claims.verify_not_before(NOW, true));
}

// ============================================================================
// Audience / issuer
// ============================================================================

#[test]
fn test_audience_optional() {
    assert!(MapClaims::new().verify_audience("x", false));
    assert!(!map_claims(json!({ "aud": ["y"] })).verify_audience("x", false));
    assert!(map_claims(json!({ "aud": ["x", "y"] })).verify_audience("x", false));
    assert!(map_claims(json!({ "aud": "x" })).verify_audience("x", false));
}

#[test]
fn test_audience_is_case_sensitive() {
    assert!(!map_claims(json!({ "aud": "X" })).verify_audience("x", true));
}

#[test]
fn test_issuer_optional() {
    assert!(MapClaims::new().verify_issuer("a", false));
    assert!(!map_claims(json!({ "iss": "b" })).verify_issuer("a", false));
    assert!(map_claims(json!({ "iss": "a" })).verify_issuer("a", false));
}

#[test]
fn test_issuer_required() {
    assert!(!MapClaims::new().verify_issuer("a", true));
    assert!(map_claims(json!({ "iss": "a" })).verify_issuer("a", true));
}

// ============================================================================
// Aggregate outcome
// ============================================================================

#[test]
fn test_expired_only() {
    let claims = map_claims(json!({ "exp": NOW - 10 }));
    let err = claims.valid_with(&FixedClock(NOW)).unwrap_err();

    assert_eq!(err.kind(), ValidationErrorKind::EXPIRED);
    assert_eq!(err.inner(), &ClaimError::Expired);
    assert_eq!(err.to_string(), "token is expired");
}

#[test]
fn test_all_time_claims_valid() {
    let claims = map_claims(json!({
        "exp": NOW + 3600,
        "iat": NOW - 5,
        "nbf": NOW - 5,
    }));
    assert_eq!(claims.valid_with(&FixedClock(NOW)), Ok(()));
}

#[test]
fn test_not_yet_valid() {
    let claims = map_claims(json!({ "nbf": NOW + 3600 })).with_leeway(Leeway::ZERO);
    let err = claims.valid_with(&FixedClock(NOW)).unwrap_err();

    assert!(err.kind().contains(ValidationErrorKind::NOT_VALID_YET));
    assert_eq!(err.to_string(), "token is not valid yet");
}

#[test]
fn test_used_before_issued_overwrites_expired_message() {
    let claims = map_claims(json!({ "exp": NOW - 1, "iat": NOW + 60 }));
    let err = claims.valid_with(&FixedClock(NOW)).unwrap_err();

    assert_eq!(
        err.kind(),
        ValidationErrorKind::EXPIRED | ValidationErrorKind::ISSUED_AT
    );
    assert_eq!(err.to_string(), "token used before issued");
}

#[test]
fn test_valid_is_idempotent() {
    let claims = map_claims(json!({ "exp": NOW - 1, "nbf": NOW + 1 }));
    let clock = FixedClock(NOW);
    assert_eq!(claims.valid_with(&clock), claims.valid_with(&clock));
}

#[test]
fn test_valid_against_system_clock() {
    let now = SystemClock.now();
    let fresh = map_claims(json!({ "exp": now + 3600, "iat": now - 5, "nbf": now - 5 }));
    assert!(fresh.valid().is_ok());

    let stale = map_claims(json!({ "exp": now - 3600 }));
    assert!(stale.valid().unwrap_err().is_expired());
}

#[test]
fn test_audience_and_issuer_never_reach_the_bitmask() {
    let claims = map_claims(json!({ "aud": "someone-else", "iss": "someone-else" }));
    assert_eq!(claims.valid_at(NOW), Ok(()));
    assert!(!claims.verify_audience("me", true));
    assert!(!claims.verify_issuer("me", true));
}

#[test]
fn test_map_and_standard_claims_agree() {
    let payload = json!({
        "iss": "https://issuer",
        "aud": ["a", "b"],
        "exp": NOW + 10,
        "iat": NOW + 20,
    });
    let map: MapClaims = serde_json::from_value(payload.clone()).unwrap();
    let standard: StandardClaims = serde_json::from_value(payload).unwrap();

    for claims in [&map as &dyn Claims, &standard as &dyn Claims] {
        assert!(claims.verify_audience("b", true));
        assert!(claims.verify_issuer("https://issuer", true));
        let err = claims.valid_at(NOW).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::ISSUED_AT);
    }
}

#[test]
fn test_malformed_shapes_degrade_alike() {
    let payload = json!({
        "iss": 12,
        "aud": ["a", 7],
        "exp": NOW as f64 - 0.5,
        "nbf": "1700000000.9",
        "iat": true,
    });
    let map: MapClaims = serde_json::from_value(payload.clone()).unwrap();
    let standard: StandardClaims = serde_json::from_value(payload).unwrap();

    for claims in [&map as &dyn Claims, &standard as &dyn Claims] {
        assert!(claims.verify_audience("a", false));
        assert!(!claims.verify_audience("a", true));
        assert!(!claims.verify_issuer("https://issuer", true));
        assert!(!claims.verify_issued_at(NOW, true));
        assert!(claims.verify_not_before(NOW, true));
        assert_eq!(
            claims.valid_at(NOW).unwrap_err().kind(),
            ValidationErrorKind::EXPIRED
        );
    }
}

#[test]
fn test_standard_claims_builder() {
    let claims = StandardClaims::new()
        .with_issuer("https://issuer")
        .with_audience("api")
        .with_not_before(NOW + 30)
        .with_leeway(Duration::from_secs(30));

    assert!(claims.verify_issuer("https://issuer", true));
    assert!(claims.valid_at(NOW).is_ok());

    let config = ValidationConfig::new()
        .require_nbf()
        .require_audience("api")
        .require_issuer("https://issuer");
    assert!(config.validate(&claims, &FixedClock(NOW)).is_ok());
    assert!(config.validate(&claims, &FixedClock(NOW - 1)).is_err());
}
