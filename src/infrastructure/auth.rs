use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::domain::DomainError;

const TOKEN_LIFETIME_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // staff username
    pub role: String,
    pub exp: usize,
}

/// Bearer token required on every admin route
#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                DomainError::Unauthorized("Authentication credentials were not provided.".into())
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            DomainError::Unauthorized("Invalid Authorization header format".into())
        })?;

        decode_jwt(token)
    }
}

pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DomainError::Internal(e.to_string()))?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, DomainError> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| DomainError::Internal(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn get_jwt_secret() -> Result<String, DomainError> {
    match env::var("JWT_SECRET") {
        Ok(secret) => Ok(secret),
        Err(_) if cfg!(debug_assertions) => Ok("secret".to_string()),
        Err(_) => Err(DomainError::Internal(
            "JWT_SECRET environment variable must be set in production".to_string(),
        )),
    }
}

pub fn create_jwt(username: &str, role: &str) -> Result<String, DomainError> {
    let secret = get_jwt_secret()?;
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_LIFETIME_HOURS))
        .ok_or_else(|| DomainError::Internal("token expiry overflow".to_string()))?
        .timestamp();

    let claims = Claims {
        sub: username.to_owned(),
        role: role.to_owned(),
        exp: expiration as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| DomainError::Internal(e.to_string()))
}

pub fn decode_jwt(token: &str) -> Result<Claims, DomainError> {
    let secret = get_jwt_secret()?;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| DomainError::Unauthorized("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("espresso").unwrap();
        assert!(verify_password("espresso", &hash).unwrap());
        assert!(!verify_password("ristretto", &hash).unwrap());
    }

    #[test]
    fn token_carries_username_and_role() {
        let token = create_jwt("barista", "staff").unwrap();
        let claims = decode_jwt(&token).unwrap();
        assert_eq!(claims.sub, "barista");
        assert_eq!(claims.role, "staff");
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        assert!(matches!(
            decode_jwt("not-a-token"),
            Err(DomainError::Unauthorized(_))
        ));
    }
}
