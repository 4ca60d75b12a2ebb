use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use healthtranslate_types::api::{Claims, CurrentUser};

use crate::error::{ApiError, ApiResult};

/// Lifetime of every issued token.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// Issues and verifies stateless HS256 bearer tokens.
///
/// There is no revocation list: a token is valid until its `exp`.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::minutes(ACCESS_TOKEN_TTL_MINUTES))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn issue(&self, email: &str, username: &str) -> ApiResult<String> {
        self.issue_at(email, username, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(&self, email: &str, username: &str, issued_at: DateTime<Utc>) -> ApiResult<String> {
        let claims = Claims {
            sub: email.to_string(),
            username: username.to_string(),
            iat: issued_at.timestamp().max(0) as usize,
            exp: (issued_at + self.ttl).timestamp().max(0) as usize,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(anyhow::Error::from)?;
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> ApiResult<CurrentUser> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| ApiError::InvalidToken)?;

        Ok(CurrentUser {
            username: data.claims.username,
            email: data.claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "fixture-secret";

    #[test]
    fn verify_returns_issued_identity() {
        let tokens = TokenService::new(SECRET);
        let token = tokens.issue("test@example.com", "testuser").unwrap();

        let user = tokens.verify(&token).unwrap();
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.username, "testuser");
    }

    #[test]
    fn expiry_is_thirty_minutes_after_issue() {
        let tokens = TokenService::new(SECRET);
        let issued_at = Utc::now();
        let token = tokens.issue_at("a@x.com", "a", issued_at).unwrap();

        let data = decode::<Claims>(&token, &tokens.decoding, &tokens.validation).unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 30 * 60);
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = TokenService::new(SECRET);
        let issued_at = Utc::now() - Duration::minutes(ACCESS_TOKEN_TTL_MINUTES) - Duration::seconds(5);
        let token = tokens.issue_at("a@x.com", "a", issued_at).unwrap();

        assert!(matches!(tokens.verify(&token), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn token_just_inside_ttl_is_accepted() {
        let tokens = TokenService::new(SECRET);
        let issued_at = Utc::now() - Duration::minutes(ACCESS_TOKEN_TTL_MINUTES - 1);
        let token = tokens.issue_at("a@x.com", "a", issued_at).unwrap();

        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = TokenService::new(SECRET).issue("a@x.com", "a").unwrap();
        let other = TokenService::new("another-secret");

        assert!(matches!(other.verify(&token), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let tokens = TokenService::new(SECRET);
        let mut token = tokens.issue("a@x.com", "a").unwrap();
        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        assert!(tokens.verify(&token).is_err());
        assert!(tokens.verify("not.a.token").is_err());
    }

    #[test]
    fn missing_username_claim_is_rejected() {
        #[derive(serde::Serialize)]
        struct Partial {
            sub: String,
            exp: usize,
        }

        let tokens = TokenService::new(SECRET);
        let exp = (Utc::now() + Duration::minutes(5)).timestamp() as usize;
        let token = encode(
            &Header::default(),
            &Partial { sub: "a@x.com".into(), exp },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(tokens.verify(&token), Err(ApiError::InvalidToken)));
    }
}
