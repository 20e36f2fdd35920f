//! Token entities shared by the signed and opaque strategies.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::subject::Subject;
use crate::errors::ValidationError;

/// Lifetime applied when the caller does not ask for one (1 hour)
pub const DEFAULT_TTL_SECONDS: i64 = 3600;

/// Claims structure for the signed token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Subject the token was issued for
    pub sub: Subject,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates the claim set for a token issued at `issued_at` living `ttl_seconds`
    ///
    /// `iat` is rounded down and `exp` rounded up to whole seconds, so the
    /// token lives at least `ttl_seconds`.
    pub fn new(
        id: String,
        subject: Subject,
        issued_at: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> Result<Self, ValidationError> {
        let expires_at = round_up_to_seconds(expiry_after(issued_at, ttl_seconds)?)?;
        let issued_at = truncate_to_seconds(issued_at);

        Ok(Self {
            jti: id,
            sub: subject,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// `true` once `now` has reached the expiration timestamp
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Server-side record of an opaque token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveToken {
    pub subject: Subject,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ActiveToken {
    pub fn new(
        subject: Subject,
        issued_at: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> Result<Self, ValidationError> {
        let expires_at = expiry_after(issued_at, ttl_seconds)?;
        Ok(Self {
            subject,
            issued_at,
            expires_at,
        })
    }

    /// `true` once `now` has reached `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Result of a successful issuance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The credential handed to the caller
    pub token: String,
    /// Unique token id (`jti` for signed tokens, the token itself for opaque ones)
    pub id: String,
    pub subject: Subject,
    /// Effective lifetime in seconds
    pub expires_in: i64,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedToken {
    pub id: String,
    pub subject: Subject,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<Claims> for VerifiedToken {
    fn from(claims: Claims) -> Self {
        Self {
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
            id: claims.jti,
            subject: claims.sub,
        }
    }
}

/// Result of a successful revocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// The token can no longer be verified
    Revoked { id: String, subject: Subject },
    /// The signed token had already expired; nothing was recorded
    AlreadyExpired { id: String, subject: Subject },
}

impl RevokeOutcome {
    pub fn id(&self) -> &str {
        match self {
            RevokeOutcome::Revoked { id, .. } | RevokeOutcome::AlreadyExpired { id, .. } => id,
        }
    }

    pub fn subject(&self) -> &Subject {
        match self {
            RevokeOutcome::Revoked { subject, .. }
            | RevokeOutcome::AlreadyExpired { subject, .. } => subject,
        }
    }
}

fn truncate_to_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(instant.timestamp(), 0).unwrap_or(instant)
}

fn round_up_to_seconds(instant: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
    let seconds = if instant.timestamp_subsec_nanos() > 0 {
        instant.timestamp().checked_add(1)
    } else {
        Some(instant.timestamp())
    };
    seconds
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "expires_in".to_string(),
        })
}

/// `issued_at + ttl_seconds`, rejecting non-positive or overflowing lifetimes
fn expiry_after(issued_at: DateTime<Utc>, ttl_seconds: i64) -> Result<DateTime<Utc>, ValidationError> {
    if ttl_seconds <= 0 {
        return Err(ValidationError::NonPositive {
            field: "expires_in".to_string(),
        });
    }
    Duration::try_seconds(ttl_seconds)
        .and_then(|ttl| issued_at.checked_add_signed(ttl))
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "expires_in".to_string(),
        })
}
