use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::MySqlPool;
use std::str::FromStr;

use crate::core::error::AppError;
use crate::middleware::AuthManager;
use crate::modules::costs::models::{
    CostKind, CostResponse, CreateCostRequest, UpdateCostRequest,
};
use crate::modules::costs::repositories::{new_entry, CostRepository};
use crate::modules::employees::repositories::EmployeeRepository;
use crate::modules::workplaces::repositories::WorkplaceRepository;

/// GET /costs
///
/// Combined workplace and employee costs for the manager, newest first.
pub async fn list_costs(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
) -> Result<HttpResponse, AppError> {
    let repo = CostRepository::new(pool.get_ref().clone());
    let costs = repo.list_for_manager(&manager.id).await?;

    let response: Vec<CostResponse> = costs
        .into_iter()
        .map(|(kind, row)| CostResponse::from_listed(kind, row))
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /costs
pub async fn create_cost(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    request: web::Json<CreateCostRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let repo = CostRepository::new(pool.get_ref().clone());

    // Resolve the owning entity first; a foreign or unknown id is a 404
    let (entity_id, workplace, employee) = match request.kind {
        CostKind::Workplace => {
            let workplace_id = request
                .workplace_id
                .ok_or_else(|| AppError::validation("workplace_id is required"))?;
            let workplace = WorkplaceRepository::new(pool.get_ref().clone())
                .find_owned(&workplace_id, &manager.id)
                .await?
                .ok_or_else(|| AppError::not_found("Workplace"))?;
            (workplace_id, Some(workplace), None)
        }
        CostKind::Employee => {
            let employee_id = request
                .employee_id
                .ok_or_else(|| AppError::validation("employee_id is required"))?;
            let employee = EmployeeRepository::new(pool.get_ref().clone())
                .find_owned(&employee_id, &manager.id)
                .await?
                .ok_or_else(|| AppError::not_found("Employee"))?;
            (employee_id, None, Some(employee))
        }
    };

    let entry = new_entry(request.description, request.amount, request.date);
    repo.insert(request.kind, &entity_id, &entry).await?;

    let response = CostResponse {
        id: entry.id,
        kind: request.kind,
        workplace_id: workplace.as_ref().map(|w| w.id.clone()),
        workplace_name: workplace.as_ref().map(|w| w.name.clone()),
        employee_id: employee.as_ref().map(|e| e.id.clone()),
        employee_name: employee.as_ref().map(|e| e.full_name()),
        description: entry.description,
        amount: entry.amount,
        date: entry.date,
        created_at: entry.created_at,
        updated_at: entry.updated_at,
    };

    Ok(HttpResponse::Created().json(response))
}

/// PUT /costs/{type}/{id}
pub async fn update_cost(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<(String, String)>,
    request: web::Json<UpdateCostRequest>,
) -> Result<HttpResponse, AppError> {
    let (kind_raw, id) = path.into_inner();
    let kind = CostKind::from_str(&kind_raw).map_err(AppError::validation)?;
    let request = request.into_inner();

    let repo = CostRepository::new(pool.get_ref().clone());
    let mut entry = repo
        .find_owned(kind, &id, &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Cost"))?;

    if let Some(description) = request.description {
        entry.description = description;
    }
    if let Some(amount) = request.amount {
        entry.amount = amount;
    }
    if let Some(date) = request.date {
        entry.date = date;
    }
    entry.updated_at = Utc::now().naive_utc();

    repo.update(kind, &entry).await?;

    let response = CostResponse {
        id: entry.id,
        kind,
        workplace_id: None,
        workplace_name: None,
        employee_id: None,
        employee_name: None,
        description: entry.description,
        amount: entry.amount,
        date: entry.date,
        created_at: entry.created_at,
        updated_at: entry.updated_at,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /costs/{type}/{id}
pub async fn delete_cost(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (kind_raw, id) = path.into_inner();
    let kind = CostKind::from_str(&kind_raw).map_err(AppError::validation)?;

    let repo = CostRepository::new(pool.get_ref().clone());
    if !repo.delete(kind, &id, &manager.id).await? {
        return Err(AppError::not_found("Cost"));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Configure cost routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/costs")
            .route("", web::get().to(list_costs))
            .route("", web::post().to(create_cost))
            .route("/{type}/{id}", web::put().to(update_cost))
            .route("/{type}/{id}", web::delete().to(delete_cost)),
    );
}
