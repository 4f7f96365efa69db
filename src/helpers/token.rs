//! Compact HS256 session tokens carried in the `userToken`, `sellerToken`
//! and `adminToken` cookies.
//!
//! Format: `base64url(header).base64url(claims).base64url(hmac_sha256(header.claims))`.

use crate::models::Role;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// id of the user or seller; admins are claim-only and carry 0
    pub sub: i32,
    pub email: String,
    pub role: Role,
    pub exp: i64,
}

impl Claims {
    pub fn new(sub: i32, email: String, role: Role, ttl_hours: i64) -> Self {
        let exp = (chrono::Utc::now() + chrono::Duration::hours(ttl_hours)).timestamp();
        Self {
            sub,
            email,
            role,
            exp,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TokenError {
    #[error("invalid token format: expected header.claims.signature")]
    Malformed,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token expired (exp: {0})")]
    Expired(i64),
    #[error("failed to read token claims: {0}")]
    Claims(String),
    #[error("signing key is not usable")]
    Key,
}

fn sign(secret: &str, signing_input: &str) -> Result<HmacSha256, TokenError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| TokenError::Key)?;
    mac.update(signing_input.as_bytes());
    Ok(mac)
}

pub fn issue(secret: &str, claims: &Claims) -> Result<String, TokenError> {
    let header = URL_SAFE_NO_PAD.encode(HEADER);
    let payload = serde_json::to_vec(claims).map_err(|err| TokenError::Claims(err.to_string()))?;
    let payload = URL_SAFE_NO_PAD.encode(payload);

    let signing_input = format!("{}.{}", header, payload);
    let signature = sign(secret, &signing_input)?.finalize().into_bytes();

    Ok(format!(
        "{}.{}",
        signing_input,
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

pub fn verify(secret: &str, token: &str) -> Result<Claims, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(TokenError::Malformed);
    }

    let signature = URL_SAFE_NO_PAD
        .decode(parts[2])
        .map_err(|_| TokenError::Malformed)?;
    let signing_input = format!("{}.{}", parts[0], parts[1]);
    sign(secret, &signing_input)?
        .verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|_| TokenError::Malformed)?;
    let claims: Claims =
        serde_json::from_slice(&payload).map_err(|err| TokenError::Claims(err.to_string()))?;

    if claims.exp < chrono::Utc::now().timestamp() {
        return Err(TokenError::Expired(claims.exp));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_verifies() {
        let claims = Claims::new(12, "ann@example.com".to_string(), Role::User, 1);
        let token = issue(SECRET, &claims).unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert_eq!(verify(SECRET, &token).unwrap(), claims);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims::new(12, "ann@example.com".to_string(), Role::Seller, 1);
        let token = issue(SECRET, &claims).unwrap();

        assert_eq!(verify("other", &token), Err(TokenError::BadSignature));
    }

    #[test]
    fn tampered_claims_are_rejected() {
        let claims = Claims::new(12, "ann@example.com".to_string(), Role::User, 1);
        let token = issue(SECRET, &claims).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged = Claims { role: Role::Admin, ..claims };
        let forged = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        let token = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert_eq!(verify(SECRET, &token), Err(TokenError::BadSignature));
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims::new(3, "old@example.com".to_string(), Role::User, -1);
        let token = issue(SECRET, &claims).unwrap();

        assert!(matches!(verify(SECRET, &token), Err(TokenError::Expired(_))));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(verify(SECRET, "not-a-token"), Err(TokenError::Malformed));
        assert_eq!(verify(SECRET, "a.b.!!!"), Err(TokenError::Malformed));
    }
}
