use std::time::Duration;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::role::Role;
use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// JWT payload carried by every bearer token. The token is self-contained:
/// whatever was embedded at issuance is what validation yields, regardless
/// of later changes to the user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    /// Exact-match role gate. `denial` is the message returned on mismatch.
    pub fn require_role(&self, required: Role, denial: &str) -> Result<(), ApiError> {
        if self.role == required {
            Ok(())
        } else {
            Err(ApiError::Forbidden(denial.to_string()))
        }
    }
}

/// Signing and verification keys plus the claim constants. Built from
/// config so tests can run with their own secrets.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::from_secs((config.ttl_hours as u64) * 3600),
        }
    }

    pub fn sign(&self, user_id: Uuid, email: &str, role: Role) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(%user_id, %role, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(user_id = %data.claims.sub, "jwt verified");
                Ok(data.claims)
            }
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                Err(ApiError::ExpiredToken)
            }
            Err(e) => {
                warn!(error = %e, "jwt rejected");
                Err(ApiError::InvalidToken)
            }
        }
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::new(&state.config.jwt)
    }
}

/// Extracts and validates the bearer token, yielding the embedded claims.
/// The single gate in front of every non-public route.
pub struct AuthUser(pub Claims);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or(ApiError::InvalidToken)?;

        let claims = keys.verify(token)?;
        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "dev-secret".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_hours: 12,
        }
    }

    fn make_keys() -> JwtKeys {
        JwtKeys::new(&test_config())
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id, "a@x.edu", Role::Staff).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@x.edu");
        assert_eq!(claims.role, Role::Staff);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert!(claims.iat < claims.exp);
    }

    #[test]
    fn repeated_validation_yields_same_claims() {
        let keys = make_keys();
        let token = keys.sign(Uuid::new_v4(), "a@x.edu", Role::Student).unwrap();
        let first = keys.verify(&token).unwrap();
        let second = keys.verify(&token).unwrap();
        assert_eq!(first.sub, second.sub);
        assert_eq!(first.exp, second.exp);
    }

    #[test]
    fn verify_rejects_token_signed_with_other_secret() {
        let keys = make_keys();
        let other = JwtKeys::new(&JwtConfig {
            secret: "other-secret".into(),
            ..test_config()
        });
        let token = other.sign(Uuid::new_v4(), "a@x.edu", Role::Student).unwrap();
        assert!(matches!(keys.verify(&token), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn verify_rejects_malformed_token() {
        let keys = make_keys();
        assert!(matches!(keys.verify("not-a-token"), Err(ApiError::InvalidToken)));
        assert!(matches!(keys.verify(""), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn verify_rejects_tampered_signature() {
        let keys = make_keys();
        let token = keys.sign(Uuid::new_v4(), "a@x.edu", Role::Student).unwrap();
        let (head, sig) = token.rsplit_once('.').unwrap();
        let mut sig: Vec<char> = sig.chars().collect();
        sig[10] = if sig[10] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}", head, sig.into_iter().collect::<String>());
        assert!(matches!(keys.verify(&tampered), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_classified_as_expired() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc();
        // Issued 13 hours ago with a 12-hour lifetime.
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@x.edu".into(),
            role: Role::Staff,
            iat: (now - TimeDuration::hours(13)).unix_timestamp() as usize,
            exp: (now - TimeDuration::hours(1)).unix_timestamp() as usize,
            iss: "test-issuer".into(),
            aud: "test-aud".into(),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();
        assert!(matches!(keys.verify(&token), Err(ApiError::ExpiredToken)));
    }

    #[test]
    fn token_still_valid_before_expiry() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc();
        // Issued 11 hours ago with a 12-hour lifetime.
        let user_id = Uuid::new_v4();
        let claims = Claims {
            sub: user_id,
            email: "a@x.edu".into(),
            role: Role::Staff,
            iat: (now - TimeDuration::hours(11)).unix_timestamp() as usize,
            exp: (now + TimeDuration::hours(1)).unix_timestamp() as usize,
            iss: "test-issuer".into(),
            aud: "test-aud".into(),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();
        let verified = keys.verify(&token).expect("still within lifetime");
        assert_eq!(verified.sub, user_id);
        assert_eq!(verified.role, Role::Staff);
    }

    #[test]
    fn verify_rejects_wrong_audience() {
        let keys = make_keys();
        let other = JwtKeys::new(&JwtConfig {
            audience: "someone-else".into(),
            ..test_config()
        });
        let token = other.sign(Uuid::new_v4(), "a@x.edu", Role::Student).unwrap();
        assert!(matches!(keys.verify(&token), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn require_role_is_exact_match() {
        let keys = make_keys();
        let token = keys.sign(Uuid::new_v4(), "a@x.edu", Role::Student).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert!(claims.require_role(Role::Student, "students only").is_ok());
        let err = claims
            .require_role(Role::Staff, "Only staff can create questions")
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(ref m) if m == "Only staff can create questions"));
    }
}
