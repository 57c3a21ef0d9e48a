use crate::claims::verify::{verify_aud, verify_exp, verify_iat, verify_iss, verify_nbf};
use crate::claims::{Claims, Leeway, NumericDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Standard JWT claims as defined in RFC 7519 Section 4.1
///
/// The typed counterpart of [`MapClaims`](crate::MapClaims), read the same
/// way: a float or decimal-text time is truncated to whole seconds, and a
/// claim of the wrong shape (`"exp": true`, `"aud": 5`, `"iss": 12`)
/// deserializes as absent instead of failing the whole payload.
///
/// ```
/// use jwtclaims::{Claims, StandardClaims};
///
/// let claims: StandardClaims = serde_json::from_str(
///     r#"{"iss":"https://issuer.example.com","aud":"api","exp":1700003600.5}"#,
/// )
/// .unwrap();
///
/// assert_eq!(claims.expiration, Some(1_700_003_600));
/// assert!(claims.verify_issuer("https://issuer.example.com", true));
/// assert!(claims.valid_at(1_700_000_000).is_ok());
/// ```
///
/// Built directly:
///
/// ```
/// use jwtclaims::{Claims, StandardClaims};
///
/// let claims = StandardClaims::new()
///     .with_subject("user-1")
///     .with_audience("api")
///     .with_expiration(1_700_003_600);
///
/// assert!(claims.verify_audience("api", true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardClaims {
    /// Issuer (iss) - identifies the principal that issued the JWT
    #[serde(
        rename = "iss",
        default,
        deserialize_with = "string",
        skip_serializing_if = "Option::is_none"
    )]
    pub issuer: Option<String>,

    /// Subject (sub) - identifies the principal that is the subject of the JWT
    #[serde(
        rename = "sub",
        default,
        deserialize_with = "string",
        skip_serializing_if = "Option::is_none"
    )]
    pub subject: Option<String>,

    /// Audience (aud) - identifies the recipients that the JWT is intended for
    #[serde(
        rename = "aud",
        default,
        deserialize_with = "audience",
        skip_serializing_if = "Option::is_none"
    )]
    pub audience: Option<Audience>,

    /// Expiration Time (exp) - seconds since Unix epoch
    #[serde(
        rename = "exp",
        default,
        deserialize_with = "numeric_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration: Option<i64>,

    /// Not Before (nbf) - identifies the time before which the JWT MUST NOT be accepted
    #[serde(
        rename = "nbf",
        default,
        deserialize_with = "numeric_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub not_before: Option<i64>,

    /// Issued At (iat) - identifies the time at which the JWT was issued
    #[serde(
        rename = "iat",
        default,
        deserialize_with = "numeric_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub issued_at: Option<i64>,

    /// JWT ID (jti) - provides a unique identifier for the JWT
    #[serde(
        rename = "jti",
        default,
        deserialize_with = "string",
        skip_serializing_if = "Option::is_none"
    )]
    pub jwt_id: Option<String>,

    #[serde(skip)]
    leeway: Leeway,
}

impl StandardClaims {
    /// Empty claims with zero leeway
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<Audience>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.expiration = Some(exp);
        self
    }

    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.not_before = Some(nbf);
        self
    }

    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.issued_at = Some(iat);
        self
    }

    pub fn with_jwt_id(mut self, jti: impl Into<String>) -> Self {
        self.jwt_id = Some(jti.into());
        self
    }

    /// Return the claims with `leeway` applied to the `iat` and `nbf` checks
    pub fn with_leeway(mut self, leeway: impl Into<Leeway>) -> Self {
        self.leeway = leeway.into();
        self
    }

    pub fn leeway(&self) -> Leeway {
        self.leeway
    }
}

// Field decoders. Each takes any JSON value and keeps it only when it has
// the claim's shape.

fn numeric_date<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(NumericDate::from_value(&value).and_then(NumericDate::seconds))
}

fn audience<'de, D>(deserializer: D) -> Result<Option<Audience>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Audience::deserialize(value).ok())
}

fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// The `aud` claim, either a single string or an array of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            Audience::Single(aud) => std::slice::from_ref(aud),
            Audience::Many(auds) => auds,
        };
        values.iter().map(String::as_str)
    }

    pub fn contains(&self, audience: &str) -> bool {
        self.iter().any(|aud| aud == audience)
    }

    /// `true` for an empty array
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl From<&str> for Audience {
    fn from(aud: &str) -> Self {
        Audience::Single(aud.to_string())
    }
}

impl From<String> for Audience {
    fn from(aud: String) -> Self {
        Audience::Single(aud)
    }
}

impl From<Vec<String>> for Audience {
    fn from(auds: Vec<String>) -> Self {
        Audience::Many(auds)
    }
}

impl Claims for StandardClaims {
    fn verify_audience(&self, expected: &str, required: bool) -> bool {
        verify_aud(self.audience.iter().flat_map(Audience::iter), expected, required)
    }

    fn verify_expires_at(&self, now: i64, required: bool) -> bool {
        verify_exp(self.expiration, now, required)
    }

    fn verify_issued_at(&self, now: i64, required: bool) -> bool {
        verify_iat(self.issued_at, self.leeway, now, required)
    }

    fn verify_not_before(&self, now: i64, required: bool) -> bool {
        verify_nbf(self.not_before, self.leeway, now, required)
    }

    fn verify_issuer(&self, expected: &str, required: bool) -> bool {
        verify_iss(self.issuer.as_deref().unwrap_or_default(), expected, required)
    }

    fn leeway(&self) -> Leeway {
        self.leeway
    }
}
