use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One scheduled block of hours for an employee at a workplace on a day.
/// Several rows may exist for the same employee and day as long as their
/// hours stay within the daily cap.
#[derive(Debug, Clone, FromRow)]
pub struct Schedule {
    pub id: String,
    pub workplace_id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Schedule row joined with display names
#[derive(Debug, Clone, FromRow)]
pub struct ListedSchedule {
    pub id: String,
    pub workplace_id: String,
    pub workplace_name: String,
    pub employee_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub id: String,
    pub workplace_id: String,
    pub workplace_name: String,
    pub employee_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub created_at: NaiveDateTime,
}

impl From<ListedSchedule> for ScheduleResponse {
    fn from(row: ListedSchedule) -> Self {
        Self {
            id: row.id,
            workplace_id: row.workplace_id,
            workplace_name: row.workplace_name,
            employee_id: row.employee_id,
            employee_name: row.employee_name,
            date: row.date,
            hours: row.hours,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    pub workplace_id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub hours: f64,
}

/// Updates replace the full row; all fields are required, as in creation
#[derive(Debug, Deserialize)]
pub struct UpdateScheduleRequest {
    pub workplace_id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub hours: f64,
}
