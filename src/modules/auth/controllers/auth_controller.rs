use actix_web::{web, HttpResponse};
use sqlx::MySqlPool;

use crate::config::SecurityConfig;
use crate::core::error::AppError;
use crate::middleware::AuthManager;
use crate::modules::auth::models::{LoginRequest, RegisterRequest};
use crate::modules::auth::repositories::ManagerRepository;
use crate::modules::auth::services::AuthService;

fn service(pool: &web::Data<MySqlPool>, security: &web::Data<SecurityConfig>) -> AuthService {
    AuthService::new(
        ManagerRepository::new(pool.get_ref().clone()),
        security.get_ref().clone(),
    )
}

/// POST /auth/register
pub async fn register(
    pool: web::Data<MySqlPool>,
    security: web::Data<SecurityConfig>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let manager = service(&pool, &security)
        .register(request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(manager))
}

/// POST /auth/login
pub async fn login(
    pool: web::Data<MySqlPool>,
    security: web::Data<SecurityConfig>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service(&pool, &security)
        .login(request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /auth/me
pub async fn me(
    pool: web::Data<MySqlPool>,
    security: web::Data<SecurityConfig>,
    manager: AuthManager,
) -> Result<HttpResponse, AppError> {
    let response = service(&pool, &security).current_manager(&manager.id).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(me)),
    );
}
