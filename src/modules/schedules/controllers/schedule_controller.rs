use actix_web::{web, HttpResponse};
use sqlx::MySqlPool;

use crate::core::error::AppError;
use crate::middleware::AuthManager;
use crate::modules::schedules::models::{
    CreateScheduleRequest, ScheduleResponse, UpdateScheduleRequest,
};
use crate::modules::schedules::repositories::ScheduleRepository;
use crate::modules::schedules::services::ScheduleService;

/// GET /schedules
pub async fn list_schedules(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
) -> Result<HttpResponse, AppError> {
    let schedules = ScheduleRepository::new(pool.get_ref().clone())
        .list_for_manager(&manager.id)
        .await?;

    let response: Vec<ScheduleResponse> =
        schedules.into_iter().map(ScheduleResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /schedules
pub async fn create_schedule(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    request: web::Json<CreateScheduleRequest>,
) -> Result<HttpResponse, AppError> {
    let response = ScheduleService::new(pool.get_ref().clone())
        .create(&manager.id, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// PUT /schedules/{id}
pub async fn update_schedule(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
    request: web::Json<UpdateScheduleRequest>,
) -> Result<HttpResponse, AppError> {
    let response = ScheduleService::new(pool.get_ref().clone())
        .update(&manager.id, &path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /schedules/{id}
pub async fn delete_schedule(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ScheduleService::new(pool.get_ref().clone())
        .delete(&manager.id, &path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure schedule routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/schedules")
            .route("", web::get().to(list_schedules))
            .route("", web::post().to(create_schedule))
            .route("/{id}", web::put().to(update_schedule))
            .route("/{id}", web::delete().to(delete_schedule)),
    );
}
