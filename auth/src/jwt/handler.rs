use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::claims::Claims;
use super::errors::JwtError;

/// A freshly signed token together with the expiration stamped into it.
#[derive(Debug, Clone)]
pub struct SignedToken {
    /// Encoded JWT string
    pub token: String,
    /// Expiration time (Unix timestamp)
    pub expires_at: i64,
}

/// JWT token handler for issuing and validating tokens.
///
/// Signs with a shared secret. Uses HS256 (HMAC with SHA-256) by default;
/// another algorithm can be selected with [`JwtHandler::with_algorithm`].
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Select the signing algorithm.
    ///
    /// The handler is built from a shared secret, so only the HMAC family
    /// (HS256/HS384/HS512) is meaningful here.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sign claims with an expiration `ttl` from now.
    ///
    /// Stamps `exp = now + ttl` (Unix seconds) into the claims before signing
    /// and returns the encoded token alongside that timestamp.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, claims: Claims, ttl: Duration) -> Result<SignedToken, JwtError> {
        let expires_at = (Utc::now() + ttl).timestamp();
        let token = self.encode(&claims.with_expiration(expires_at))?;

        Ok(SignedToken { token, expires_at })
    }

    /// Encode claims into a JWT token.
    ///
    /// Signs whatever claims it is given; use [`JwtHandler::issue`] to stamp
    /// an expiration automatically.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// Validation is strict: the signature must verify, the `exp` claim must
    /// be present, and expiry is checked with zero leeway.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `DecodingFailed` - Token is malformed, unsigned, or missing `exp`
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
