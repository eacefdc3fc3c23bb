//! Signed token utilities for stateless authentication.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use roster_config::AuthConfig;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::AccountError;

/// Token claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (public user id)
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at
    pub iss: String, // Issuer
    pub jti: String, // Token ID
}

/// Signs and validates the service's bearer tokens (HS256)
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    token_ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, issuer: String, token_ttl: Duration) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        Self {
            encoding_key,
            decoding_key,
            issuer,
            token_ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.token_secret,
            config.issuer.clone(),
            Duration::from_secs(config.token_ttl_seconds),
        )
    }

    /// Issue a token for the given user
    pub fn issue(&self, public_id: &str) -> Result<String, AccountError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AccountError::TokenCreationFailed("system time error".to_string()))?;

        let exp = now + self.token_ttl;

        let claims = Claims {
            sub: public_id.to_string(),
            exp: exp.as_secs() as usize,
            iat: now.as_secs() as usize,
            iss: self.issuer.clone(),
            jti: cuid2::cuid(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AccountError::TokenCreationFailed(e.to_string()))
    }

    /// Validate a token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AccountError> {
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AccountError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_signer() -> TokenSigner {
        TokenSigner::new(
            "test_secret_key_that_is_long_enough_for_hs256",
            "roster-test".to_string(),
            Duration::from_secs(3600),
        )
    }

    #[test]
    fn test_issue_and_verify() {
        let signer = create_test_signer();

        let token = signer.issue("user_abc").unwrap();
        assert!(!token.is_empty());

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.sub, "user_abc");
        assert_eq!(claims.iss, "roster-test");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let signer = create_test_signer();

        let result = signer.verify("invalid.token.here");
        assert!(matches!(result, Err(AccountError::InvalidToken(_))));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let signer = create_test_signer();
        let other = TokenSigner::new(
            "a_completely_different_secret_value_here",
            "roster-test".to_string(),
            Duration::from_secs(3600),
        );

        let token = signer.issue("user_abc").unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let signer = create_test_signer();
        let other = TokenSigner::new(
            "test_secret_key_that_is_long_enough_for_hs256",
            "someone-else".to_string(),
            Duration::from_secs(3600),
        );

        let token = signer.issue("user_abc").unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let signer = TokenSigner::new(
            "test_secret_key_that_is_long_enough_for_hs256",
            "roster-test".to_string(),
            Duration::from_secs(0),
        );

        let token = signer.issue("user_abc").unwrap();
        // jsonwebtoken applies default leeway; disable it for the check.
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.set_issuer(&["roster-test"]);
        validation.leeway = 0;
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test_secret_key_that_is_long_enough_for_hs256".as_ref()),
            &validation,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_tokens_carry_unique_ids() {
        let signer = create_test_signer();

        let first = signer.verify(&signer.issue("user_abc").unwrap()).unwrap();
        let second = signer.verify(&signer.issue("user_abc").unwrap()).unwrap();

        assert_ne!(first.jti, second.jti);
    }
}
