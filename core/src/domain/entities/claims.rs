//! Session claim types.
//!
//! A session token carries a small set of registered claims plus
//! account-specific fields. The registered part is its own struct and the
//! extension embeds it explicitly; `#[serde(flatten)]` keeps the wire shape
//! flat.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Registered claims every session token carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseClaims {
    /// Subject (user id as a string)
    pub sub: String,
    /// Expiry as a unix timestamp in seconds
    pub exp: i64,
}

impl BaseClaims {
    pub fn new(subject: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: subject.into(),
            exp: expires_at.timestamp(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Claims of a logged-in user session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    #[serde(flatten)]
    pub base: BaseClaims,
    pub uid: i64,
    /// User agent the session was issued to
    pub user_agent: String,
}

impl UserClaims {
    pub fn new(uid: i64, user_agent: impl Into<String>, ttl: Duration) -> Self {
        Self::issued_at(uid, user_agent, Utc::now(), ttl)
    }

    pub fn issued_at(
        uid: i64,
        user_agent: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            base: BaseClaims::new(uid.to_string(), now + ttl),
            uid,
            user_agent: user_agent.into(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.base.is_expired_at(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_claims_serialize_flat() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let claims = UserClaims::issued_at(7, "curl/8.0", now, Duration::minutes(30));

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["sub"], "7");
        assert_eq!(value["exp"], now.timestamp() + 1800);
        assert_eq!(value["uid"], 7);
        assert_eq!(value["user_agent"], "curl/8.0");
        assert!(value.get("base").is_none());

        let back: UserClaims = serde_json::from_value(value).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn test_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let claims = UserClaims::issued_at(1, "ua", now, Duration::minutes(1));
        assert!(!claims.is_expired_at(now));
        assert!(claims.is_expired_at(now + Duration::minutes(1)));
    }
}
