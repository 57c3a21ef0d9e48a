//! Claim predicates shared by every claims type
//!
//! Absent claims arrive as `None` (or an empty audience / issuer) and resolve
//! to `!required`.

use crate::claims::Leeway;

pub(crate) fn verify_exp(exp: Option<i64>, now: i64, required: bool) -> bool {
    match exp {
        Some(exp) => now <= exp,
        None => !required,
    }
}

pub(crate) fn verify_iat(iat: Option<i64>, leeway: Leeway, now: i64, required: bool) -> bool {
    match iat {
        Some(iat) => now >= iat.saturating_sub(leeway.as_secs()),
        None => !required,
    }
}

pub(crate) fn verify_nbf(nbf: Option<i64>, leeway: Leeway, now: i64, required: bool) -> bool {
    match nbf {
        Some(nbf) => now >= nbf.saturating_sub(leeway.as_secs()),
        None => !required,
    }
}

pub(crate) fn verify_aud<'a, I>(aud: I, expected: &str, required: bool) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut aud = aud.into_iter().peekable();
    if aud.peek().is_none() {
        return !required;
    }
    aud.any(|value| value == expected)
}

pub(crate) fn verify_iss(iss: &str, expected: &str, required: bool) -> bool {
    if iss == expected {
        return true;
    }
    !required && iss.is_empty()
}
