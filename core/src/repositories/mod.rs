//! Storage interfaces and the cached user repository.

pub mod code_cache;
pub mod user;

pub use code_cache::{attempts_key, code_key, CodeCache};
pub use user::{
    user_key, CacheRepopulator, CachedUserRepository, UserCache, UserDao, UserEntity,
    UserRepository,
};
