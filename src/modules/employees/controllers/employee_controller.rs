use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::middleware::AuthManager;
use crate::modules::costs::models::{CostKind, CreateEntryRequest, EntryResponse};
use crate::modules::costs::repositories::{new_entry, CostRepository};
use crate::modules::employees::models::{
    CreateEmployeeRequest, Employee, EmployeeResponse, UpdateEmployeeRequest,
};
use crate::modules::employees::repositories::EmployeeRepository;
use crate::modules::revenues::controllers::revenue_controller::build_owned_revenue;
use crate::modules::revenues::models::{CreateRevenueRequest, RevenueResponse};
use crate::modules::revenues::repositories::RevenueRepository;

/// GET /employees
pub async fn list_employees(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
) -> Result<HttpResponse, AppError> {
    let employees = EmployeeRepository::new(pool.get_ref().clone())
        .list(&manager.id)
        .await?;

    let response: Vec<EmployeeResponse> = employees.iter().map(EmployeeResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /employees
pub async fn create_employee(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    request: web::Json<CreateEmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let repo = EmployeeRepository::new(pool.get_ref().clone());

    if repo.email_taken(&request.email, None).await? {
        return Err(AppError::conflict("Email already registered"));
    }

    let now = Utc::now().naive_utc();
    let employee = Employee {
        id: Uuid::new_v4().to_string(),
        manager_id: manager.id,
        email: request.email,
        first_name: request.first_name,
        last_name: request.last_name,
        phone: request.phone,
        position: request.position,
        hourly_rate: request.hourly_rate,
        created_at: now,
        updated_at: now,
    };

    repo.insert(&employee).await?;

    Ok(HttpResponse::Created().json(EmployeeResponse::from(&employee)))
}

/// GET /employees/{id}
pub async fn get_employee(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = EmployeeRepository::new(pool.get_ref().clone())
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee"))?;

    Ok(HttpResponse::Ok().json(EmployeeResponse::from(&employee)))
}

/// PUT /employees/{id}
pub async fn update_employee(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
    request: web::Json<UpdateEmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let repo = EmployeeRepository::new(pool.get_ref().clone());
    let mut employee = repo
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee"))?;

    let request = request.into_inner();
    if let Some(email) = request.email {
        if email != employee.email && repo.email_taken(&email, Some(&employee.id)).await? {
            return Err(AppError::conflict("Email already registered"));
        }
        employee.email = email;
    }
    if let Some(first_name) = request.first_name {
        employee.first_name = first_name;
    }
    if let Some(last_name) = request.last_name {
        employee.last_name = last_name;
    }
    if let Some(phone) = request.phone {
        employee.phone = Some(phone);
    }
    if let Some(position) = request.position {
        employee.position = Some(position);
    }
    if let Some(hourly_rate) = request.hourly_rate {
        employee.hourly_rate = hourly_rate;
    }
    employee.updated_at = Utc::now().naive_utc();

    repo.update(&employee).await?;

    Ok(HttpResponse::Ok().json(EmployeeResponse::from(&employee)))
}

/// DELETE /employees/{id}
pub async fn delete_employee(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let deleted = EmployeeRepository::new(pool.get_ref().clone())
        .delete(&path.into_inner(), &manager.id)
        .await?;

    if !deleted {
        return Err(AppError::not_found("Employee"));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// GET /employees/{id}/costs
pub async fn list_employee_costs(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = EmployeeRepository::new(pool.get_ref().clone())
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee"))?;

    let costs = CostRepository::new(pool.get_ref().clone())
        .list_for_employee(&employee.id)
        .await?;

    let response: Vec<EntryResponse> = costs.iter().map(EntryResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /employees/{id}/costs
pub async fn add_employee_cost(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
    request: web::Json<CreateEntryRequest>,
) -> Result<HttpResponse, AppError> {
    let employee = EmployeeRepository::new(pool.get_ref().clone())
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee"))?;

    let request = request.into_inner();
    let entry = new_entry(request.description, request.amount, request.date);

    CostRepository::new(pool.get_ref().clone())
        .insert(CostKind::Employee, &employee.id, &entry)
        .await?;

    Ok(HttpResponse::Created().json(EntryResponse::from(&entry)))
}

/// GET /employees/{id}/revenues
pub async fn list_employee_revenues(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = EmployeeRepository::new(pool.get_ref().clone())
        .find_owned(&path.into_inner(), &manager.id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee"))?;

    let revenues = RevenueRepository::new(pool.get_ref().clone())
        .list_for_employee(&employee.id)
        .await?;

    let response: Vec<RevenueResponse> =
        revenues.into_iter().map(RevenueResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /employees/{id}/revenues
pub async fn add_employee_revenue(
    pool: web::Data<MySqlPool>,
    manager: AuthManager,
    path: web::Path<String>,
    request: web::Json<CreateRevenueRequest>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();
    let mut request = request.into_inner();
    request.employee_id = Some(employee_id);

    let repo = RevenueRepository::new(pool.get_ref().clone());
    let revenue = build_owned_revenue(pool.get_ref(), &manager.id, request).await?;
    repo.insert(&revenue).await?;

    let created = repo
        .find_owned(&revenue.id, &manager.id)
        .await?
        .ok_or_else(|| AppError::internal("Created revenue vanished"))?;

    Ok(HttpResponse::Created().json(RevenueResponse::from(created)))
}

/// Configure employee routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            .route("", web::get().to(list_employees))
            .route("", web::post().to(create_employee))
            .route("/{id}", web::get().to(get_employee))
            .route("/{id}", web::put().to(update_employee))
            .route("/{id}", web::delete().to(delete_employee))
            .route("/{id}/costs", web::get().to(list_employee_costs))
            .route("/{id}/costs", web::post().to(add_employee_cost))
            .route("/{id}/revenues", web::get().to(list_employee_revenues))
            .route("/{id}/revenues", web::post().to(add_employee_revenue)),
    );
}
