//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Third-party (WeChat) identity linked to an account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WechatInfo {
    /// Per-application user identifier
    pub open_id: String,
    /// Identifier shared across applications of the same vendor account
    pub union_id: String,
}

impl WechatInfo {
    pub fn new(open_id: impl Into<String>, union_id: impl Into<String>) -> Self {
        Self {
            open_id: open_id.into(),
            union_id: union_id.into(),
        }
    }
}

/// User entity
///
/// Empty strings mean "not set"; the storage layer turns them into NULL so
/// that the unique indexes on email, phone and open id ignore them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store (0 before insert)
    pub id: i64,

    pub email: String,

    /// Password hash, never the plaintext once persisted
    pub password: String,

    pub nickname: String,

    pub birthday: Option<DateTime<Utc>>,

    /// Free-text self introduction
    pub about_me: String,

    pub phone: String,

    pub wechat_info: WechatInfo,

    /// Timestamp when the user was created
    pub ctime: DateTime<Utc>,
}

impl User {
    /// Account created through SMS login
    pub fn with_phone(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..Default::default()
        }
    }

    /// Account created through email signup
    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Account created through WeChat login
    pub fn with_wechat(info: WechatInfo) -> Self {
        Self {
            wechat_info: info,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_constructors_leave_other_fields_empty() {
        let user = User::with_phone("+8613800000000");
        assert_eq!(user.phone, "+8613800000000");
        assert!(user.email.is_empty());
        assert_eq!(user.id, 0);

        let user = User::with_wechat(WechatInfo::new("open-1", "union-1"));
        assert_eq!(user.wechat_info.open_id, "open-1");
        assert!(user.phone.is_empty());
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        let user = User {
            id: 42,
            email: "a@example.com".to_string(),
            password: "$2b$12$hash".to_string(),
            nickname: "ann".to_string(),
            birthday: Some(Utc.with_ymd_and_hms(1990, 5, 17, 0, 0, 0).unwrap()),
            about_me: "hello".to_string(),
            phone: "+8613800000000".to_string(),
            wechat_info: WechatInfo::new("o", "u"),
            ctime: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
