pub mod auth;
pub mod user;

pub use auth::{ErrorBody, LoginRequest, LoginResponse};
pub use user::{Employment, NewUser, UserPatch, UserRecord};
