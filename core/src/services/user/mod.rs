//! Account flows on top of the user repository

mod service;
mod traits;


pub use service::UserService;
pub use traits::PasswordHasher;
