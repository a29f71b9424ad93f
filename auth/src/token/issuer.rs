use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::crypto;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::identity::Identity;

/// Validity window of an issued token unless configured otherwise.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 72;

/// Stateless signed-token issuer and verifier.
///
/// Tokens are compact JWS strings signed with HS256 over the process-wide
/// secret. Nothing is stored server side, so a token stays valid until its
/// expiry even after logout.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a new token issuer with a secret key and the default TTL.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Rotating the secret invalidates every outstanding token
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Override the validity window of newly issued tokens.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user_id` expiring `ttl` after `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed, or the expiry is out of range
    pub fn issue(&self, user_id: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);
        let claims = Claims::for_user(user_id, now, self.ttl)
            .ok_or_else(|| TokenError::EncodingFailed("token expiry out of range".to_string()))?;

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return the identity it asserts.
    ///
    /// The signature is checked over the raw `header.payload` text before
    /// anything is decoded, so any alteration of a well-formed token is
    /// reported as a bad signature.
    ///
    /// # Errors
    /// * `Malformed` - Token is not three non-empty dot separated segments, or
    ///   its signed payload is not a claims object
    /// * `BadSignature` - Signature does not verify against the secret
    /// * `Expired` - `now` is at or past the token expiry
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let (message, signature) = split_token(token)?;

        match crypto::verify(signature, message.as_bytes(), &self.decoding_key, self.algorithm) {
            Ok(true) => {}
            Ok(false) | Err(_) => return Err(TokenError::BadSignature),
        }

        let claims = self.decode_claims(token)?;
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims.identity())
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the caller supplied clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| TokenError::Malformed)
    }
}

fn split_token(token: &str) -> Result<(&str, &str), TokenError> {
    let (message, signature) = token.rsplit_once('.').ok_or(TokenError::Malformed)?;
    let (header, payload) = message.split_once('.').ok_or(TokenError::Malformed)?;

    if header.is_empty() || payload.is_empty() || signature.is_empty() || payload.contains('.') {
        return Err(TokenError::Malformed);
    }

    Ok((message, signature))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::Serialize;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(SECRET);

        let token = issuer.issue("alice", t0()).expect("Failed to issue token");
        assert!(!token.is_empty());

        let identity = issuer
            .verify(&token, t0() + Duration::hours(1))
            .expect("Failed to verify token");
        assert_eq!(identity.user_id(), "alice");
    }

    #[test]
    fn test_default_ttl_is_72_hours() {
        assert_eq!(TokenIssuer::new(SECRET).ttl(), Duration::hours(72));
    }

    #[test]
    fn test_expiry_boundary() {
        let issuer = TokenIssuer::new(SECRET);
        let token = issuer.issue("alice", t0()).expect("Failed to issue token");
        let ttl = issuer.ttl();

        let just_before = t0() + ttl - Duration::seconds(1);
        assert_eq!(
            issuer.verify(&token, just_before).map(|i| i.user_id().to_string()),
            Ok("alice".to_string())
        );
        assert_eq!(issuer.verify(&token, t0() + ttl), Err(TokenError::Expired));
        assert_eq!(
            issuer.verify(&token, t0() + ttl + Duration::days(30)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_custom_ttl() {
        let issuer = TokenIssuer::new(SECRET).with_ttl(Duration::minutes(5));
        let token = issuer.issue("alice", t0()).expect("Failed to issue token");

        assert!(issuer.verify(&token, t0() + Duration::minutes(4)).is_ok());
        assert_eq!(
            issuer.verify(&token, t0() + Duration::minutes(5)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_oversized_ttl_fails_to_issue() {
        let issuer = TokenIssuer::new(SECRET).with_ttl(Duration::hours(3_000_000_000));

        assert!(matches!(
            issuer.issue("alice", t0()),
            Err(TokenError::EncodingFailed(_))
        ));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer1 = TokenIssuer::new(b"secret1_at_least_32_bytes_long_key!");
        let issuer2 = TokenIssuer::new(b"secret2_at_least_32_bytes_long_key!");

        let token = issuer1.issue("alice", t0()).expect("Failed to issue token");

        assert_eq!(issuer2.verify(&token, t0()), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_every_single_character_tamper_is_rejected() {
        let issuer = TokenIssuer::new(SECRET);
        let token = issuer.issue("alice", t0()).expect("Failed to issue token");

        for (index, original) in token.char_indices() {
            for replacement in ['A', 'B', 'z', '.'] {
                if replacement == original {
                    continue;
                }
                let mut tampered = token.clone();
                tampered.replace_range(index..index + 1, &replacement.to_string());

                // Adding or removing a dot breaks the three segment shape.
                let expected = if tampered.split('.').count() == 3 {
                    TokenError::BadSignature
                } else {
                    TokenError::Malformed
                };
                assert_eq!(
                    issuer.verify(&tampered, t0()),
                    Err(expected),
                    "writing {:?} at byte {} was not rejected as expected",
                    replacement,
                    index
                );
            }
        }
    }

    #[test]
    fn test_forged_payload_is_rejected() {
        let issuer = TokenIssuer::new(SECRET);
        let token = issuer.issue("alice", t0()).expect("Failed to issue token");
        let forged_issuer = TokenIssuer::new(b"attacker_secret_at_least_32_bytes!");
        let forged = forged_issuer.issue("mallory", t0()).expect("Failed to issue token");

        // Genuine header and signature around an attacker chosen payload.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(issuer.verify(&spliced, t0()), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_malformed_tokens() {
        let issuer = TokenIssuer::new(SECRET);

        for token in ["", "not-a-token", "only.two", "a..c", ".b.c", "a.b.", "a.b.c.d"] {
            assert_eq!(
                issuer.verify(token, t0()),
                Err(TokenError::Malformed),
                "{:?} should be malformed",
                token
            );
        }
    }

    #[test]
    fn test_signed_payload_without_claims_is_malformed() {
        #[derive(Serialize)]
        struct Other {
            role: String,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &Other {
                role: "admin".to_string(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .expect("Failed to encode token");

        let issuer = TokenIssuer::new(SECRET);
        assert_eq!(issuer.verify(&token, t0()), Err(TokenError::Malformed));
    }
}
