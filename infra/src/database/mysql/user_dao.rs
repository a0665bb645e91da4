//! MySQL implementation of the UserDao trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::{debug, error};
use wb_core::errors::{DomainError, DomainResult};
use wb_core::repositories::{UserDao, UserEntity};

const SELECT_COLUMNS: &str = "SELECT id, email, password, nickname, birthday, about_me, phone, \
                              ctime, utime, wechat_open_id, wechat_union_id FROM users";

/// MySQL implementation of UserDao over the `users` table
#[derive(Clone)]
pub struct MySqlUserDao {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserDao {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to UserEntity
    fn row_to_entity(row: &MySqlRow) -> DomainResult<UserEntity> {
        Ok(UserEntity {
            id: row.try_get("id").map_err(column_error)?,
            email: row.try_get("email").map_err(column_error)?,
            password: row.try_get("password").map_err(column_error)?,
            nickname: row.try_get("nickname").map_err(column_error)?,
            birthday: row.try_get("birthday").map_err(column_error)?,
            about_me: row.try_get("about_me").map_err(column_error)?,
            phone: row.try_get("phone").map_err(column_error)?,
            ctime: row.try_get("ctime").map_err(column_error)?,
            utime: row.try_get("utime").map_err(column_error)?,
            wechat_open_id: row.try_get("wechat_open_id").map_err(column_error)?,
            wechat_union_id: row.try_get("wechat_union_id").map_err(column_error)?,
        })
    }

    /// Fetch the single row matching `column = value`
    async fn find_one<T>(&self, column: &str, value: T) -> DomainResult<UserEntity>
    where
        T: for<'q> sqlx::Encode<'q, sqlx::MySql> + sqlx::Type<sqlx::MySql> + Send,
    {
        let query = format!("{} WHERE {} = ? LIMIT 1", SELECT_COLUMNS, column);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("select", e))?;

        match row {
            Some(row) => Self::row_to_entity(&row),
            None => {
                debug!(column, "No user row matched");
                Err(DomainError::user_not_found())
            }
        }
    }
}

#[async_trait]
impl UserDao for MySqlUserDao {
    async fn insert(&self, user: UserEntity) -> DomainResult<()> {
        let now = Utc::now().timestamp_millis();

        let query = r#"
            INSERT INTO users (email, password, nickname, birthday, about_me, phone,
                               ctime, utime, wechat_open_id, wechat_union_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.nickname)
            .bind(user.birthday)
            .bind(&user.about_me)
            .bind(&user.phone)
            .bind(now)
            .bind(now)
            .bind(&user.wechat_open_id)
            .bind(&user.wechat_union_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return DomainError::DuplicateKey {
                            message: db_err.message().to_string(),
                        };
                    }
                }
                query_error("insert", e)
            })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<UserEntity> {
        self.find_one("email", email).await
    }

    async fn find_by_id(&self, uid: i64) -> DomainResult<UserEntity> {
        self.find_one("id", uid).await
    }

    async fn find_by_phone(&self, phone: &str) -> DomainResult<UserEntity> {
        self.find_one("phone", phone).await
    }

    async fn find_by_wechat(&self, open_id: &str) -> DomainResult<UserEntity> {
        self.find_one("wechat_open_id", open_id).await
    }

    async fn update_by_id(&self, user: UserEntity) -> DomainResult<()> {
        let query = r#"
            UPDATE users
            SET nickname = ?, birthday = ?, about_me = ?, utime = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(&user.nickname)
            .bind(user.birthday)
            .bind(&user.about_me)
            .bind(Utc::now().timestamp_millis())
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("update", e))?;

        Ok(())
    }
}

fn column_error(e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Failed to decode users row: {}", e),
    }
}

fn query_error(operation: &str, e: sqlx::Error) -> DomainError {
    error!(operation, error = %e, "users query failed");
    DomainError::Database {
        message: format!("Database query failed: {}", e),
    }
}
