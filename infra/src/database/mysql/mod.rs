//! MySQL-backed data access objects

pub mod user_dao;

pub use user_dao::MySqlUserDao;
