pub mod auth;

pub use auth::{decode_token, hash_password, issue_token, verify_password, AuthManager, JwtAuth};
