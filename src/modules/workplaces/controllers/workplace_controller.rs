use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::middleware::AuthManager;
use crate::modules::costs::models::{CostKind, CreateEntryRequest, EntryResponse};
use crate::modules::costs::repositories::{new_entry, CostRepository};
use crate::modules::employees::repositories::EmployeeRepository;
use crate::modules::revenues::controllers::revenue_controller::build_owned_revenue;
use crate::modules::revenues::models::{CreateRevenueRequest, RevenueResponse};
use crate::modules::revenues::repositories::RevenueRepository;
use crate::modules::workplaces::models::{
    AssignedEmployeeResponse, AssignmentResponse, CreateAssignmentRequest, CreateWorkplaceRequest,
    UpdateWorkplaceRequest, Workplace, WorkplaceAssignment, WorkplaceResponse,
};
use crate::modules::workplaces::repositories::WorkplaceRepository;

/// GET /workplaces
pub async fn list_workplaces(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
) -> Result<HttpResponse, AppError> {
    let workplaces = WorkplaceRepository::new(pool.get_ref().clone())
        .list(&manager.id)
        .await?;

    let response: Vec<WorkplaceResponse> =
        workplaces.iter().map(WorkplaceResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /workplaces
pub async fn create_workplace(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    request: web::Json<CreateWorkplaceRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let now = Utc::now().naive_utc();

    let workplace = Workplace {
        id: Uuid::new_v4().to_string(),
        manager_id: manager.id,
        name: request.name,
        address: request.address,
        description: request.description,
        created_at: now,
        updated_at: now,
    };

    WorkplaceRepository::new(pool.get_ref().clone())
        .insert(&workplace)
        .await?;

    Ok(HttpResponse::Created().json(WorkplaceResponse::from(&workplace)))
}

/// GET /workplaces/{id}
pub async fn get_workplace(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let workplace = WorkplaceRepository::new(pool.get_ref().clone())
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Workplace"))?;

    Ok(HttpResponse::Ok().json(WorkplaceResponse::from(&workplace)))
}

/// PUT /workplaces/{id}
pub async fn update_workplace(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
    request: web::Json<UpdateWorkplaceRequest>,
) -> Result<HttpResponse, AppError> {
    let repo = WorkplaceRepository::new(pool.get_ref().clone());
    let mut workplace = repo
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Workplace"))?;

    let request = request.into_inner();
    if let Some(name) = request.name {
        workplace.name = name;
    }
    if let Some(address) = request.address {
        workplace.address = address;
    }
    if let Some(description) = request.description {
        workplace.description = Some(description);
    }
    workplace.updated_at = Utc::now().naive_utc();

    repo.update(&workplace).await?;

    Ok(HttpResponse::Ok().json(WorkplaceResponse::from(&workplace)))
}

/// DELETE /workplaces/{id}
pub async fn delete_workplace(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let deleted = WorkplaceRepository::new(pool.get_ref().clone())
        .delete(&path.into_inner(), &manager.id)
        .await?;

    if !deleted {
        return Err(AppError::not_found("Workplace"));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// GET /workplaces/{id}/employees
pub async fn list_assigned_employees(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let repo = WorkplaceRepository::new(pool.get_ref().clone());
    let workplace = repo
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Workplace"))?;

    let assignments = repo.assigned_employees(&workplace.id).await?;
    let response: Vec<AssignedEmployeeResponse> = assignments
        .into_iter()
        .map(AssignedEmployeeResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /workplaces/{id}/employees
pub async fn assign_employee(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
    request: web::Json<CreateAssignmentRequest>,
) -> Result<HttpResponse, AppError> {
    let repo = WorkplaceRepository::new(pool.get_ref().clone());
    let workplace = repo
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Workplace"))?;

    let request = request.into_inner();
    let employee = EmployeeRepository::new(pool.get_ref().clone())
        .find_owned(&request.employee_id, &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee"))?;

    if let Some(end_date) = request.end_date {
        if end_date < request.start_date {
            return Err(AppError::validation("end_date must not precede start_date"));
        }
    }

    let assignment = WorkplaceAssignment {
        id: Uuid::new_v4().to_string(),
        workplace_id: workplace.id.clone(),
        employee_id: employee.id.clone(),
        start_date: request.start_date,
        end_date: request.end_date,
        created_at: Utc::now().naive_utc(),
    };

    repo.insert_assignment(&assignment).await?;

    Ok(HttpResponse::Created().json(AssignmentResponse {
        employee_id: assignment.employee_id,
        workplace_id: assignment.workplace_id,
        start_date: assignment.start_date,
        end_date: assignment.end_date,
    }))
}

/// GET /workplaces/{id}/costs
pub async fn list_workplace_costs(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let workplace = WorkplaceRepository::new(pool.get_ref().clone())
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Workplace"))?;

    let costs = CostRepository::new(pool.get_ref().clone())
        .list_for_workplace(&workplace.id)
        .await?;

    let response: Vec<EntryResponse> = costs.iter().map(EntryResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /workplaces/{id}/costs
pub async fn add_workplace_cost(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
    request: web::Json<CreateEntryRequest>,
) -> Result<HttpResponse, AppError> {
    let workplace = WorkplaceRepository::new(pool.get_ref().clone())
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Workplace"))?;

    let request = request.into_inner();
    let entry = new_entry(request.description, request.amount, request.date);

    CostRepository::new(pool.get_ref().clone())
        .insert(CostKind::Workplace, &workplace.id, &entry)
        .await?;

    Ok(HttpResponse::Created().json(EntryResponse::from(&entry)))
}

/// GET /workplaces/{id}/revenues
pub async fn list_workplace_revenues(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let workplace = WorkplaceRepository::new(pool.get_ref().clone())
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Workplace"))?;

    let revenues = RevenueRepository::new(pool.get_ref().clone())
        .list_for_workplace(&workplace.id)
        .await?;

    let response: Vec<RevenueResponse> =
        revenues.into_iter().map(RevenueResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /workplaces/{id}/revenues
pub async fn add_workplace_revenue(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
    request: web::Json<CreateRevenueRequest>,
) -> Result<HttpResponse, AppError> {
    let workplace_id = path.into_inner();
    let mut request = request.into_inner();
    request.workplace_id = Some(workplace_id);

    let repo = RevenueRepository::new(pool.get_ref().clone());
    let revenue = build_owned_revenue(pool.get_ref(), &manager.id, request).await?;
    repo.insert(&revenue).await?;

    let created = repo
        .find_owned(&revenue.id, &manager.id)
        .await?
        .ok_or_else(|| AppError::internal("Created revenue vanished"))?;

    Ok(HttpResponse::Created().json(RevenueResponse::from(created)))
}

/// Configure workplace routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/workplaces")
            .route("", web::get().to(list_workplaces))
            .route("", web::post().to(create_workplace))
            .route("/{id}", web::get().to(get_workplace))
            .route("/{id}", web::put().to(update_workplace))
            .route("/{id}", web::delete().to(delete_workplace))
            .route("/{id}/employees", web::get().to(list_assigned_employees))
            .route("/{id}/employees", web::post().to(assign_employee))
            .route("/{id}/costs", web::get().to(list_workplace_costs))
            .route("/{id}/costs", web::post().to(add_workplace_cost))
            .route("/{id}/revenues", web::get().to(list_workplace_revenues))
            .route("/{id}/revenues", web::post().to(add_workplace_revenue)),
    );
}
