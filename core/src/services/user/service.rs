//! User service implementation

use std::sync::Arc;

use tracing::{debug, info, warn};
use wb_shared::utils::phone::mask_phone_number;

use crate::domain::entities::user::{User, WechatInfo};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::user::UserRepository;

use super::traits::PasswordHasher;

/// User account service
pub struct UserService<R: ?Sized, H: ?Sized> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserService<R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register an email/password account
    ///
    /// # Errors
    /// * `DomainError::Validation` - email or password is empty
    /// * `DomainError::DuplicateKey` - the email is taken
    pub async fn signup(&self, mut user: User) -> DomainResult<()> {
        if user.email.is_empty() || user.password.is_empty() {
            return Err(DomainError::Validation {
                message: "email and password are required".to_string(),
            });
        }

        user.password = self.hasher.hash(&user.password).await?;
        self.repository.create(user).await?;

        info!(event = "user_signup", "User registered with email");
        Ok(())
    }

    /// Authenticate by email and password
    ///
    /// An unknown email and a wrong password are both reported as
    /// `DomainError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<User> {
        let user = match self.repository.find_by_email(email).await {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                debug!("Login attempted for unknown email");
                return Err(DomainError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !self.hasher.verify(password, &user.password).await? {
            warn!(user_id = user.id, event = "login_failed", "Password mismatch");
            return Err(DomainError::InvalidCredentials);
        }

        info!(user_id = user.id, event = "login_succeeded", "User logged in");
        Ok(user)
    }

    /// Update nickname, birthday and about-me of `user.id`
    pub async fn update_non_sensitive_info(&self, user: User) -> DomainResult<()> {
        let user_id = user.id;
        self.repository.update_non_zero_fields(user).await?;
        debug!(user_id, "Profile updated");
        Ok(())
    }

    pub async fn find_by_id(&self, uid: i64) -> DomainResult<User> {
        self.repository.find_by_id(uid).await
    }

    /// Look up the account bound to `phone`, creating it on first login
    pub async fn find_or_create(&self, phone: &str) -> DomainResult<User> {
        match self.repository.find_by_phone(phone).await {
            Ok(user) => return Ok(user),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        match self.repository.create(User::with_phone(phone)).await {
            Ok(()) => info!(
                phone = %mask_phone_number(phone),
                event = "user_created",
                "Created user on first phone login"
            ),
            // Lost a race with a concurrent first login; the row exists now
            Err(e) if e.is_duplicate_key() => debug!(
                phone = %mask_phone_number(phone),
                "User created concurrently"
            ),
            Err(e) => return Err(e),
        }

        self.repository.find_by_phone(phone).await
    }

    /// Look up the account bound to a WeChat identity, creating it on first login
    pub async fn find_or_create_by_wechat(&self, info: WechatInfo) -> DomainResult<User> {
        let open_id = info.open_id.clone();
        match self.repository.find_by_wechat(&open_id).await {
            Ok(user) => return Ok(user),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        match self.repository.create(User::with_wechat(info)).await {
            Ok(()) => info!(event = "user_created", "Created user on first WeChat login"),
            Err(e) if e.is_duplicate_key() => debug!("User created concurrently"),
            Err(e) => return Err(e),
        }

        self.repository.find_by_wechat(&open_id).await
    }
}
