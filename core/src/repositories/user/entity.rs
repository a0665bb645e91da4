//! Storage record for the `users` table and its mapping to the domain entity.

use chrono::{DateTime, Utc};

use crate::domain::entities::user::{User, WechatInfo};

/// Row of the `users` table
///
/// Unique columns are nullable so that unset values do not collide.
/// Timestamps are unix milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserEntity {
    pub id: i64,
    pub email: Option<String>,
    pub password: String,
    pub nickname: String,
    pub birthday: Option<i64>,
    pub about_me: String,
    pub phone: Option<String>,
    pub ctime: i64,
    pub utime: i64,
    pub wechat_open_id: Option<String>,
    pub wechat_union_id: Option<String>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        User {
            id: entity.id,
            email: entity.email.unwrap_or_default(),
            password: entity.password,
            nickname: entity.nickname,
            birthday: entity.birthday.and_then(DateTime::<Utc>::from_timestamp_millis),
            about_me: entity.about_me,
            phone: entity.phone.unwrap_or_default(),
            wechat_info: WechatInfo {
                open_id: entity.wechat_open_id.unwrap_or_default(),
                union_id: entity.wechat_union_id.unwrap_or_default(),
            },
            ctime: DateTime::<Utc>::from_timestamp_millis(entity.ctime).unwrap_or_default(),
        }
    }
}

impl From<User> for UserEntity {
    fn from(user: User) -> Self {
        UserEntity {
            id: user.id,
            email: non_empty(user.email),
            password: user.password,
            nickname: user.nickname,
            birthday: user.birthday.map(|b| b.timestamp_millis()),
            about_me: user.about_me,
            phone: non_empty(user.phone),
            ctime: user.ctime.timestamp_millis(),
            utime: 0,
            wechat_open_id: non_empty(user.wechat_info.open_id),
            wechat_union_id: non_empty(user.wechat_info.union_id),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
