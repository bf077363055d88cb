//! Unverified reading of JWT claims.
//!
//! Only the `exp` claim is read, to decide whether a refresh is due. The
//! signature is not checked; the backend stays the only authority on
//! whether a token is accepted.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

#[derive(Deserialize)]
struct Claims {
    exp: Option<f64>,
}

/// Decoding rules for reading claims only: no signature, audience or
/// expiry checks.
fn unverified() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
}

/// Expiry of `token` in seconds since the epoch, if it can be read.
pub fn expiry(token: &str) -> Option<f64> {
    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &unverified())
        .ok()?
        .claims
        .exp
}

/// A token is expired once `exp <= now`. Unreadable tokens count as expired.
pub fn is_expired(token: &str, now: i64) -> bool {
    match expiry(token) {
        Some(exp) => exp <= now as f64,
        None => true,
    }
}

/// `abcd*********wxyz` for log lines; short tokens are fully masked.
pub fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < 16 {
        return "*".repeat(chars.len().max(3));
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{jwt_with_claims, jwt_with_exp};
    use serde_json::json;

    #[test]
    fn test_expiry_reads_exp_claim() {
        assert_eq!(expiry(&jwt_with_exp(100)), Some(100.0));
        assert_eq!(expiry(&jwt_with_exp(1_900_000_000)), Some(1_900_000_000.0));
    }

    #[test]
    fn test_expiry_ignores_signature_and_audience() {
        let token = jwt_with_claims(&json!({"exp": 42, "aud": "bookstore", "iss": "api"}));
        let (unsigned, _) = token.rsplit_once('.').unwrap();
        assert_eq!(expiry(&format!("{}.forged", unsigned)), Some(42.0));
    }

    #[test]
    fn test_fractional_exp_keeps_its_precision() {
        let token = jwt_with_claims(&json!({"exp": 150.5}));
        assert_eq!(expiry(&token), Some(150.5));
        assert!(!is_expired(&token, 150));
        assert!(is_expired(&token, 151));
    }

    #[test]
    fn test_expiry_of_malformed_tokens() {
        assert_eq!(expiry(""), None);
        assert_eq!(expiry("not-a-jwt"), None);
        assert_eq!(expiry("a.%%%.c"), None);
        assert_eq!(expiry(&jwt_with_claims(&json!({"sub": "admin"}))), None);
    }

    #[test]
    fn test_is_expired_boundary() {
        let token = jwt_with_exp(100);
        assert!(!is_expired(&token, 99));
        assert!(is_expired(&token, 100));
        assert!(is_expired(&token, 150));
    }

    #[test]
    fn test_unreadable_token_counts_as_expired() {
        assert!(is_expired("garbage", 0));
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("abcdefghijklmnopqrstuvwxyz"), "abcd*********wxyz");
        assert_eq!(mask("short"), "*****");
        assert_eq!(mask(""), "***");
    }
}
