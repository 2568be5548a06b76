use serde::Deserialize;
use serde::Serialize;

/// Distinguishes refresh tokens from access tokens.
///
/// Serialized into the `type` claim. Access tokens omit the claim entirely,
/// so any token without a `type` claim is treated as an access token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by access and refresh tokens.
///
/// All fields are optional so that deserialization accepts any well-signed
/// token; callers decide which claims they require after decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (the username the token was issued to)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Token kind, omitted for access tokens
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TokenKind>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for an access token issued to `subject`.
    ///
    /// The `type` claim is left out; tokens without it count as access tokens.
    pub fn access(subject: impl ToString) -> Self {
        Self {
            sub: Some(subject.to_string()),
            exp: None,
            kind: None,
        }
    }

    /// Create claims for a refresh token issued to `subject`.
    pub fn refresh(subject: impl ToString) -> Self {
        Self {
            sub: Some(subject.to_string()),
            exp: None,
            kind: Some(TokenKind::Refresh),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set token kind.
    pub fn with_kind(mut self, kind: TokenKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Check whether the `type` claim marks this as a refresh token.
    pub fn is_refresh(&self) -> bool {
        self.kind == Some(TokenKind::Refresh)
    }

    /// Check if the token is expired (strict comparison).
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp < current_timestamp)
    }
}

impl Default for Claims {
    fn default() -> Self {
        Self {
            sub: None,
            exp: None,
            kind: None,
        }
    }
}
