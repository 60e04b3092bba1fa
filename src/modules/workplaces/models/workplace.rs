use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A workplace owned by exactly one manager
#[derive(Debug, Clone, FromRow)]
pub struct Workplace {
    pub id: String,
    pub manager_id: String,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct WorkplaceResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
}

impl From<&Workplace> for WorkplaceResponse {
    fn from(workplace: &Workplace) -> Self {
        Self {
            id: workplace.id.clone(),
            name: workplace.name.clone(),
            address: workplace.address.clone(),
            description: workplace.description.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkplaceRequest {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
}

/// Allow-listed update fields
#[derive(Debug, Deserialize)]
pub struct UpdateWorkplaceRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// Links an employee to a workplace for a date span; an open end means the
/// assignment is still active.
#[derive(Debug, Clone, FromRow)]
pub struct WorkplaceAssignment {
    pub id: String,
    pub workplace_id: String,
    pub employee_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// Assignment joined with the employee's display fields
#[derive(Debug, Clone, FromRow)]
pub struct AssignedEmployee {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AssignedEmployeeResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl From<AssignedEmployee> for AssignedEmployeeResponse {
    fn from(row: AssignedEmployee) -> Self {
        Self {
            id: row.employee_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub employee_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub employee_id: String,
    pub workplace_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}
