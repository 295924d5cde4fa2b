/// JWT token generation and validation
///
/// Bearer tokens signed with HS256. Two token types: short-lived access
/// tokens for API calls and long-lived refresh tokens used to mint new
/// access tokens.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC-SHA256)
/// - **Expiration**: 24 hours access, 30 days refresh
/// - **Validation**: signature, expiration, and issuer checks
/// - Secrets should be at least 32 bytes
///
/// # Example
///
/// ```
/// use teamflow_shared::auth::jwt::{create_token, validate_access_token, Claims, TokenType};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let claims = Claims::new(user_id, TokenType::Access);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
///
/// let validated = validate_access_token(&token, "secret-key-at-least-32-bytes-long!!")?;
/// assert_eq!(validated.sub, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token issuer claim value
const ISSUER: &str = "teamflow";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Wrong token type for the operation (e.g. refresh where access expected)
    #[error("Wrong token type: expected {0}")]
    WrongType(&'static str),
}

/// Token type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token (24 hours)
    Access,

    /// Refresh token (30 days)
    Refresh,
}

impl TokenType {
    /// Default expiration for the token type
    pub fn default_expiration(&self) -> Duration {
        match self {
            TokenType::Access => Duration::hours(24),
            TokenType::Refresh => Duration::days(30),
        }
    }
}

/// JWT claims
///
/// Standard claims (`sub`, `iss`, `iat`, `exp`, `nbf`) plus the token type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer - always "teamflow"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Token type (custom claim)
    pub token_type: TokenType,
}

impl Claims {
    /// Creates claims with the default expiration for the token type
    pub fn new(user_id: Uuid, token_type: TokenType) -> Self {
        let now = Utc::now();
        let expiration = now + token_type.default_expiration();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            token_type,
        }
    }
}

/// Signs claims into a token string
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Validates a token's signature, expiration, and issuer
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(e.to_string()),
    })?;

    Ok(data.claims)
}

/// Validates a token and requires it to be an access token
pub fn validate_access_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;
    if claims.token_type != TokenType::Access {
        return Err(JwtError::WrongType("access"));
    }
    Ok(claims)
}

/// Validates a token and requires it to be a refresh token
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;
    if claims.token_type != TokenType::Refresh {
        return Err(JwtError::WrongType("refresh"));
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_round_trip_access_token() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, TokenType::Access);
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_access_token(&token, SECRET).unwrap();
        assert_eq!(validated.sub, user_id);
        assert_eq!(validated.iss, "teamflow");
    }

    #[test]
    fn test_wrong_secret_fails() {
        let claims = Claims::new(Uuid::new_v4(), TokenType::Access);
        let token = create_token(&claims, SECRET).unwrap();

        let err = validate_token(&token, "a-completely-different-secret-value!!").unwrap_err();
        assert!(matches!(err, JwtError::ValidationError(_)));
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let claims = Claims::new(Uuid::new_v4(), TokenType::Refresh);
        let token = create_token(&claims, SECRET).unwrap();

        assert!(matches!(
            validate_access_token(&token, SECRET),
            Err(JwtError::WrongType("access"))
        ));
        assert!(validate_refresh_token(&token, SECRET).is_ok());
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(validate_token("not.a.token", SECRET).is_err());
    }
}
