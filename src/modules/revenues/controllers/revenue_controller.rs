use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::middleware::AuthManager;
use crate::modules::employees::repositories::EmployeeRepository;
use crate::modules::revenues::models::{
    CreateRevenueRequest, Revenue, RevenueResponse, UpdateRevenueRequest,
};
use crate::modules::revenues::repositories::RevenueRepository;
use crate::modules::workplaces::repositories::WorkplaceRepository;

/// Check both optional owners against the manager's graph and build the row.
/// Shared with the nested employee/workplace revenue routes.
pub async fn build_owned_revenue(
    pool: &MySqlPool,
    manager_id: &str,
    request: CreateRevenueRequest,
) -> Result<Revenue, AppError> {
    if request.workplace_id.is_none() && request.employee_id.is_none() {
        return Err(AppError::validation(
            "A revenue needs a workplace_id, an employee_id, or both",
        ));
    }

    if let Some(workplace_id) = &request.workplace_id {
        WorkplaceRepository::new(pool.clone())
            .find_owned(workplace_id, manager_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workplace"))?;
    }

    if let Some(employee_id) = &request.employee_id {
        EmployeeRepository::new(pool.clone())
            .find_owned(employee_id, manager_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee"))?;
    }

    let now = Utc::now().naive_utc();
    Ok(Revenue {
        id: Uuid::new_v4().to_string(),
        workplace_id: request.workplace_id,
        employee_id: request.employee_id,
        description: request.description,
        amount: request.amount,
        date: request.date,
        created_at: now,
        updated_at: now,
    })
}

/// GET /revenues
pub async fn list_revenues(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
) -> Result<HttpResponse, AppError> {
    let repo = RevenueRepository::new(pool.get_ref().clone());
    let revenues = repo.list_for_manager(&manager.id).await?;

    let response: Vec<RevenueResponse> =
        revenues.into_iter().map(RevenueResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /revenues
pub async fn create_revenue(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    request: web::Json<CreateRevenueRequest>,
) -> Result<HttpResponse, AppError> {
    let repo = RevenueRepository::new(pool.get_ref().clone());
    let revenue = build_owned_revenue(pool.get_ref(), &manager.id, request.into_inner()).await?;

    repo.insert(&revenue).await?;

    // Re-read through the listing join so the response carries names
    let created = repo
        .find_owned(&revenue.id, &manager.id)
        .await?
        .ok_or_else(|| AppError::internal("Created revenue vanished"))?;

    Ok(HttpResponse::Created().json(RevenueResponse::from(created)))
}

/// PUT /revenues/{id}
pub async fn update_revenue(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
    request: web::Json<UpdateRevenueRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let request = request.into_inner();

    let repo = RevenueRepository::new(pool.get_ref().clone());
    let mut revenue = repo
        .find_owned(&id, &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Revenue"))?;

    if let Some(description) = request.description {
        revenue.description = description;
    }
    if let Some(amount) = request.amount {
        revenue.amount = amount;
    }
    if let Some(date) = request.date {
        revenue.date = date;
    }
    revenue.updated_at = Utc::now().naive_utc();

    repo.update(&revenue).await?;

    Ok(HttpResponse::Ok().json(RevenueResponse::from(revenue)))
}

/// DELETE /revenues/{id}
pub async fn delete_revenue(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let repo = RevenueRepository::new(pool.get_ref().clone());
    if !repo.delete(&path.into_inner(), &manager.id).await? {
        return Err(AppError::not_found("Revenue"));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Configure revenue routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/revenues")
            .route("", web::get().to(list_revenues))
            .route("", web::post().to(create_revenue))
            .route("/{id}", web::put().to(update_revenue))
            .route("/{id}", web::delete().to(delete_revenue)),
    );
}
