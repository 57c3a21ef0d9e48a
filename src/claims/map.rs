use crate::claims::verify::{verify_aud, verify_exp, verify_iat, verify_iss, verify_nbf};
use crate::claims::{Claims, Leeway, NumericDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dynamic claim set over `serde_json` values
///
/// Values are stored as decoded; shapes are interpreted only when a check
/// reads them, and an unreadable shape counts as an absent claim.
///
/// ```
/// use jwtclaims::{Claims, Leeway, MapClaims};
/// use serde_json::json;
///
/// let claims: MapClaims = serde_json::from_value(json!({
///     "iss": "https://issuer.example.com",
///     "aud": ["api", "admin"],
///     "nbf": 1_700_000_030,
/// }))
/// .unwrap();
///
/// let claims = claims.with_leeway(Leeway::from_secs(60));
/// assert!(claims.verify_not_before(1_700_000_000, true));
/// assert!(claims.verify_audience("api", true));
/// ```
///
/// Serializes as the bare claim object; the leeway stays local.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct MapClaims {
    claims: Map<String, Value>,
    leeway: Leeway,
}

impl MapClaims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.claims.get(key)
    }

    /// Set a claim and return the updated set
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }

    /// Set a claim in place, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.claims.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.claims.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.claims.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.claims.iter()
    }

    /// Return the set with `leeway` applied to the `iat` and `nbf` checks
    ///
    /// Replaces any earlier leeway.
    pub fn with_leeway(mut self, leeway: impl Into<Leeway>) -> Self {
        self.leeway = leeway.into();
        self
    }

    pub fn leeway(&self) -> Leeway {
        self.leeway
    }

    /// `exp` in whole seconds
    pub fn expires_at(&self) -> Option<i64> {
        self.numeric_date("exp")
    }

    /// `iat` in whole seconds
    pub fn issued_at(&self) -> Option<i64> {
        self.numeric_date("iat")
    }

    /// `nbf` in whole seconds
    pub fn not_before(&self) -> Option<i64> {
        self.numeric_date("nbf")
    }

    /// `aud` values
    ///
    /// A string is a single audience. An array counts only if every element
    /// is a string; anything else reads as no audience.
    pub fn audience(&self) -> Vec<&str> {
        match self.get("aud") {
            Some(Value::String(aud)) => vec![aud.as_str()],
            Some(Value::Array(items)) => items
                .iter()
                .map(Value::as_str)
                .collect::<Option<Vec<_>>>()
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// `iss`, or `""` when missing or not a string
    pub fn issuer(&self) -> &str {
        self.get("iss").and_then(Value::as_str).unwrap_or_default()
    }

    fn numeric_date(&self, key: &str) -> Option<i64> {
        self.get(key)
            .and_then(NumericDate::from_value)
            .and_then(NumericDate::seconds)
    }
}

impl Claims for MapClaims {
    fn verify_audience(&self, expected: &str, required: bool) -> bool {
        verify_aud(self.audience(), expected, required)
    }

    fn verify_expires_at(&self, now: i64, required: bool) -> bool {
        verify_exp(self.expires_at(), now, required)
    }

    fn verify_issued_at(&self, now: i64, required: bool) -> bool {
        verify_iat(self.issued_at(), self.leeway, now, required)
    }

    fn verify_not_before(&self, now: i64, required: bool) -> bool {
        verify_nbf(self.not_before(), self.leeway, now, required)
    }

    fn verify_issuer(&self, expected: &str, required: bool) -> bool {
        verify_iss(self.issuer(), expected, required)
    }

    fn leeway(&self) -> Leeway {
        self.leeway
    }
}

impl From<Map<String, Value>> for MapClaims {
    fn from(claims: Map<String, Value>) -> Self {
        Self {
            claims,
            leeway: Leeway::ZERO,
        }
    }
}

impl From<MapClaims> for Map<String, Value> {
    fn from(claims: MapClaims) -> Self {
        claims.claims
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MapClaims {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect::<Map<_, _>>()
            .into()
    }
}
