mod auth_service;

pub use auth_service::{validate_password, AuthService};
