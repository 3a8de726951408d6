//! Session token service
//!
//! One signed-session mechanism for every authenticated role: HS256 tokens
//! carrying the identity descriptor plus a role claim, delivered as an
//! HTTP-only cookie. Admin sessions go through the same path as user sessions.

use anyhow::Result;
use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Secret used to sign and verify session tokens
    pub secret: String,
    /// Session lifetime in seconds (default: 7 days)
    pub ttl_seconds: u64,
}

impl SessionConfig {
    /// Create a new SessionConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: signing secret (required)
    /// - `SESSION_TTL`: session lifetime in seconds (default: 604800)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let ttl_seconds = std::env::var("SESSION_TTL")
            .unwrap_or_else(|_| "604800".to_string()) // 7 days
            .parse()
            .unwrap_or(604_800);

        Ok(SessionConfig {
            secret,
            ttl_seconds,
        })
    }
}

/// Role carried by a session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id, or the admin email on the env-credential path
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: &SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            ttl_seconds: config.ttl_seconds,
        }
    }

    /// Issue a session token for an identity
    pub fn issue(&self, sub: &str, email: &str, name: Option<&str>, role: Role) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            name: name.map(String::from),
            role,
            iat: now,
            exp: now + self.ttl_seconds,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Get the session lifetime in seconds
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}

/// Build the HTTP-only session cookie carrying a freshly issued token
pub fn session_cookie(token: String, ttl_seconds: u64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_seconds as i64))
        .build()
}

/// Build the cleared session cookie used by logout: empty value, zero max-age
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(&SessionConfig {
            secret: "test-secret".to_string(),
            ttl_seconds: 3600,
        })
    }

    #[test]
    fn issued_tokens_round_trip_their_claims() {
        let service = service();
        let token = service
            .issue("u-1", "ada@example.com", Some("Ada"), Role::User)
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.name.as_deref(), Some("Ada"));
        assert_eq!(claims.role, Role::User);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn admin_role_claim_survives_the_round_trip() {
        let service = service();
        let token = service
            .issue("admin@example.com", "admin@example.com", None, Role::Admin)
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.name, None);
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let service = service();
        let token = service
            .issue("u-1", "ada@example.com", None, Role::User)
            .unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(service.validate_token(&tampered).is_err());

        let other = JwtService::new(&SessionConfig {
            secret: "different-secret".to_string(),
            ttl_seconds: 3600,
        });
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let service = service();

        // Encode with the same key but an exp far in the past, beyond any
        // validation leeway.
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            sub: "u-1".to_string(),
            email: "ada@example.com".to_string(),
            name: None,
            role: Role::User,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn session_cookie_shape() {
        let cookie = session_cookie("abc".to_string(), 604_800);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(604_800))
        );

        let cleared = expired_session_cookie();
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.max_age(), Some(time::Duration::ZERO));
    }
}
