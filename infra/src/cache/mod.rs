//! Cache module
//!
//! This module provides the key-value stores used by the Webook backend:
//! the Redis client with retry logic, the atomic verification code store,
//! the user cache, and in-memory equivalents of both stores.

pub mod code_cache;
pub mod memory;
pub mod redis_client;
pub mod user_cache;

#[cfg(test)]
mod tests;

pub use code_cache::RedisCodeCache;
pub use memory::{MemoryCodeCache, MemoryUserCache};
pub use redis_client::RedisClient;
pub use user_cache::RedisUserCache;
