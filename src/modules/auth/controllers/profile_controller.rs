use actix_web::{web, HttpResponse};
use sqlx::MySqlPool;

use crate::config::SecurityConfig;
use crate::core::error::AppError;
use crate::middleware::AuthManager;
use crate::modules::auth::models::{ChangePasswordRequest, UpdateProfileRequest};
use crate::modules::auth::repositories::ManagerRepository;
use crate::modules::auth::services::AuthService;

fn service(pool: &web::Data<MySqlPool>, security: &web::Data<SecurityConfig>) -> AuthService {
    AuthService::new(
        ManagerRepository::new(pool.get_ref().clone()),
        security.get_ref().clone(),
    )
}

/// GET /users/profile
pub async fn get_profile(
    pool: web::Data<MySqlPool>,
    security: web::Data<SecurityConfig>,
    manager: AuthManager,
) -> Result<HttpResponse, AppError> {
    let response = service(&pool, &security).current_manager(&manager.id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// PUT /users/profile
pub async fn update_profile(
    pool: web::Data<MySqlPool>,
    security: web::Data<SecurityConfig>,
    manager: AuthManager,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service(&pool, &security)
        .update_profile(&manager.id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// PUT /users/profile/password
pub async fn change_password(
    pool: web::Data<MySqlPool>,
    security: web::Data<SecurityConfig>,
    manager: AuthManager,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    service(&pool, &security)
        .change_password(&manager.id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Password changed" })))
}

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/profile", web::get().to(get_profile))
            .route("/profile", web::put().to(update_profile))
            .route("/profile/password", web::put().to(change_password)),
    );
}
