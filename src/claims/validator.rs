use crate::claims::Claims;
use crate::clock::Clock;
use crate::error::ClaimError;

/// Policy for checking all five registered claims in one call
///
/// Time claims are always checked; the `require_*` flags decide whether a
/// missing claim fails. Audience and issuer are checked only once a target
/// is configured.
///
/// ```
/// use jwtclaims::{FixedClock, MapClaims, ValidationConfig};
/// use serde_json::json;
///
/// let config = ValidationConfig::default()
///     .require_exp()
///     .require_audience("api")
///     .require_issuer("https://issuer.example.com");
///
/// let claims: MapClaims = serde_json::from_value(json!({
///     "iss": "https://issuer.example.com",
///     "aud": "api",
///     "exp": 1_700_003_600,
/// }))
/// .unwrap();
///
/// assert!(config.validate(&claims, &FixedClock(1_700_000_000)).is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Fail when `exp` is missing
    pub require_exp: bool,

    /// Fail when `iat` is missing
    pub require_iat: bool,

    /// Fail when `nbf` is missing
    pub require_nbf: bool,

    /// Expected audience value
    pub audience: Option<String>,

    /// Fail when `aud` is missing (only with `audience` set)
    pub audience_required: bool,

    /// Expected issuer
    pub issuer: Option<String>,

    /// Fail when `iss` is missing (only with `issuer` set)
    pub issuer_required: bool,
}

impl ValidationConfig {
    /// Create a new validation config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_exp(mut self) -> Self {
        self.require_exp = true;
        self
    }

    pub fn require_iat(mut self) -> Self {
        self.require_iat = true;
        self
    }

    pub fn require_nbf(mut self) -> Self {
        self.require_nbf = true;
        self
    }

    /// Require a specific audience
    pub fn require_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self.audience_required = true;
        self
    }

    /// Accept tokens without `aud`; a present `aud` must still match
    pub fn allow_missing_audience(mut self) -> Self {
        self.audience_required = false;
        self
    }

    /// Require a specific issuer
    pub fn require_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self.issuer_required = true;
        self
    }

    /// Accept tokens without `iss`; a present `iss` must still match
    pub fn allow_missing_issuer(mut self) -> Self {
        self.issuer_required = false;
        self
    }

    /// Validate claims according to configuration, reading `now` once from `clock`
    ///
    /// Checks run in the order exp, iat, nbf, aud, iss and the first failure
    /// is returned.
    pub fn validate<C>(&self, claims: &C, clock: &dyn Clock) -> Result<(), ClaimError>
    where
        C: Claims + ?Sized,
    {
        self.validate_at(claims, clock.now())
    }

    /// Validate claims according to configuration at `now`
    pub fn validate_at<C>(&self, claims: &C, now: i64) -> Result<(), ClaimError>
    where
        C: Claims + ?Sized,
    {
        let result = self.check(claims, now);
        if let Err(err) = &result {
            tracing::debug!(now, error = %err, "claims rejected");
        }
        result
    }

    fn check<C>(&self, claims: &C, now: i64) -> Result<(), ClaimError>
    where
        C: Claims + ?Sized,
    {
        if !claims.verify_expires_at(now, self.require_exp) {
            return Err(ClaimError::Expired);
        }

        if !claims.verify_issued_at(now, self.require_iat) {
            return Err(ClaimError::UsedBeforeIssued);
        }

        if !claims.verify_not_before(now, self.require_nbf) {
            return Err(ClaimError::NotValidYet);
        }

        if let Some(expected) = &self.audience {
            if !claims.verify_audience(expected, self.audience_required) {
                return Err(ClaimError::AudienceMismatch {
                    expected: expected.clone(),
                });
            }
        }

        if let Some(expected) = &self.issuer {
            if !claims.verify_issuer(expected, self.issuer_required) {
                return Err(ClaimError::IssuerMismatch {
                    expected: expected.clone(),
                });
            }
        }

        Ok(())
    }
}
