//! Unverified inspection of bearer tokens.
//!
//! The client never checks signatures; it only reads the `exp` claim to
//! decide whether a stored session is still worth presenting. Anything it
//! cannot read counts as expired.

use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    Engine as _,
};
use serde_json::Value;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has no payload segment")]
    MissingPayload,
    #[error("Token payload is not valid base64")]
    InvalidEncoding,
    #[error("Token payload is not a JSON object")]
    InvalidJson,
    #[error("Token has no numeric exp claim")]
    MissingExpiry,
}

/// Decodes the claims object from the second dot-separated segment.
pub fn decode_claims(token: &str) -> Result<serde_json::Map<String, Value>, TokenError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next()) {
        (Some(_), Some(payload)) if !payload.is_empty() => payload,
        _ => return Err(TokenError::MissingPayload),
    };

    let bytes = URL_SAFE_LENIENT
        .decode(payload)
        .or_else(|_| STANDARD_LENIENT.decode(payload))
        .map_err(|_| TokenError::InvalidEncoding)?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(claims)) => Ok(claims),
        _ => Err(TokenError::InvalidJson),
    }
}

/// `exp` claim in seconds since the epoch.
pub fn expiration(token: &str) -> Result<f64, TokenError> {
    decode_claims(token)?
        .get("exp")
        .and_then(Value::as_f64)
        .ok_or(TokenError::MissingExpiry)
}

/// True when the token is absent, unreadable, lacks `exp`, or `exp` is
/// before `now` (seconds since the epoch).
pub fn is_expired_at(token: Option<&str>, now: f64) -> bool {
    match token.map(expiration) {
        Some(Ok(exp)) => exp < now,
        _ => true,
    }
}

/// Current time in fractional seconds since the epoch.
pub fn now_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::{token_with_claims, token_with_exp};
    use base64::Engine as _;
    use serde_json::json;

    #[test]
    fn reads_exp_from_url_safe_payload() {
        let token = token_with_exp(1_900_000_000);
        assert_eq!(expiration(&token), Ok(1_900_000_000.0));
        assert!(!is_expired_at(Some(&token), 1_800_000_000.0));
        assert!(is_expired_at(Some(&token), 1_900_000_001.0));
    }

    #[test]
    fn accepts_padded_standard_payload() {
        let payload = base64::engine::general_purpose::STANDARD.encode(br#"{"exp":100,"sub":"1"}"#);
        let token = format!("h.{payload}.s");
        assert_eq!(expiration(&token), Ok(100.0));
    }

    #[test]
    fn fails_closed_on_anything_unreadable() {
        let now = 1_000.0;
        assert!(is_expired_at(None, now));
        assert!(is_expired_at(Some(""), now));
        assert!(is_expired_at(Some("not-a-jwt"), now));
        assert!(is_expired_at(Some("a.!!!.c"), now));
        assert!(is_expired_at(Some(&token_with_claims(json!({"sub": "1"}))), now));
        assert!(is_expired_at(Some(&token_with_claims(json!({"exp": "soon"}))), now));
        assert!(is_expired_at(Some(&token_with_claims(json!([1, 2]))), now));
    }

    #[test]
    fn classifies_decode_failures() {
        assert_eq!(decode_claims("abc"), Err(TokenError::MissingPayload));
        assert_eq!(decode_claims("a..c"), Err(TokenError::MissingPayload));
        assert_eq!(decode_claims("a.@@.c"), Err(TokenError::InvalidEncoding));
        let not_json = URL_SAFE_LENIENT.encode(b"hello");
        assert_eq!(decode_claims(&format!("a.{not_json}.c")), Err(TokenError::InvalidJson));
    }
}
