use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::core::{AppError, Result};
use crate::middleware::{hash_password, issue_token, verify_password};
use crate::modules::auth::models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, Manager, ManagerResponse, RegisterRequest,
    UpdateProfileRequest,
};
use crate::modules::auth::repositories::ManagerRepository;

/// Password policy carried over from the original product: at least 8
/// characters with a lower-case letter, an upper-case letter, a digit and a
/// special character.
pub fn validate_password(password: &str) -> std::result::Result<(), &'static str> {
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain a lower-case letter");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain an upper-case letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain a digit");
    }
    if !password.chars().any(|c| "!@#$%^&*(),.?\":{}|<>".contains(c)) {
        return Err("Password must contain a special character");
    }
    Ok(())
}

/// Account registration, login and profile management
pub struct AuthService {
    repo: ManagerRepository,
    security: SecurityConfig,
}

impl AuthService {
    pub fn new(repo: ManagerRepository, security: SecurityConfig) -> Self {
        Self { repo, security }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<ManagerResponse> {
        if self.repo.email_taken(&request.email, None).await? {
            return Err(AppError::conflict("Email already registered"));
        }

        validate_password(&request.password).map_err(AppError::validation)?;

        let manager = Manager {
            id: Uuid::new_v4().to_string(),
            email: request.email,
            password_hash: hash_password(&request.password)?,
            first_name: request.first_name,
            last_name: request.last_name,
            role: "manager".to_string(),
            created_at: Utc::now().naive_utc(),
        };

        self.repo.insert(&manager).await?;

        info!(manager_id = %manager.id, "Manager registered");

        Ok(ManagerResponse::from(&manager))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        let manager = self
            .repo
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&request.password, &manager.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let access_token = issue_token(
            &manager.id,
            &self.security.jwt_secret,
            self.security.jwt_expiry_hours,
        )?;

        Ok(LoginResponse {
            access_token,
            user: ManagerResponse::from(&manager),
        })
    }

    pub async fn current_manager(&self, manager_id: &str) -> Result<ManagerResponse> {
        let manager = self
            .repo
            .find_by_id(manager_id)
            .await?
            .ok_or_else(|| AppError::not_found("Manager"))?;

        Ok(ManagerResponse::from(&manager))
    }

    pub async fn update_profile(
        &self,
        manager_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<ManagerResponse> {
        let mut manager = self
            .repo
            .find_by_id(manager_id)
            .await?
            .ok_or_else(|| AppError::not_found("Manager"))?;

        if let Some(email) = request.email {
            if email != manager.email && self.repo.email_taken(&email, Some(manager_id)).await? {
                return Err(AppError::conflict("Email already registered"));
            }
            manager.email = email;
        }
        if let Some(first_name) = request.first_name {
            manager.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            manager.last_name = last_name;
        }

        self.repo.update_profile(&manager).await?;

        Ok(ManagerResponse::from(&manager))
    }

    pub async fn change_password(
        &self,
        manager_id: &str,
        request: ChangePasswordRequest,
    ) -> Result<()> {
        let manager = self
            .repo
            .find_by_id(manager_id)
            .await?
            .ok_or_else(|| AppError::not_found("Manager"))?;

        if !verify_password(&request.current_password, &manager.password_hash)? {
            return Err(AppError::validation("Current password is incorrect"));
        }

        validate_password(&request.new_password).map_err(AppError::validation)?;

        let password_hash = hash_password(&request.new_password)?;
        self.repo.update_password(manager_id, &password_hash).await?;

        info!(manager_id = %manager_id, "Password changed");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy_accepts_strong_password() {
        assert!(validate_password("Str0ng!pass").is_ok());
    }

    #[test]
    fn test_password_policy_rejects_weak_passwords() {
        assert!(validate_password("short1!A").is_ok());
        assert!(validate_password("Sh0rt!").is_err()); // too short
        assert!(validate_password("alllower1!").is_err()); // no upper
        assert!(validate_password("ALLUPPER1!").is_err()); // no lower
        assert!(validate_password("NoDigits!!").is_err()); // no digit
        assert!(validate_password("NoSpecial11").is_err()); // no special
    }
}
