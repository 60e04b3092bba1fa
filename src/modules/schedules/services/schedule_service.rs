use chrono::Utc;
use sqlx::MySqlPool;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::employees::repositories::EmployeeRepository;
use crate::modules::schedules::models::{
    CreateScheduleRequest, Schedule, ScheduleResponse, UpdateScheduleRequest,
};
use crate::modules::schedules::repositories::ScheduleRepository;
use crate::modules::workplaces::repositories::WorkplaceRepository;

/// Daily cap on scheduled hours per employee
pub const MAX_DAILY_HOURS: f64 = 24.0;

/// Validate a requested block of hours against what is already scheduled
/// for the same employee and day.
///
/// The caller supplies `existing_total` excluding the row being edited, so
/// the same check serves create and update. This is checked against the
/// current database state, not serialized against concurrent writers; two
/// simultaneous submissions can still both pass.
pub fn check_hours(existing_total: f64, hours: f64) -> Result<()> {
    if hours <= 0.0 || hours > MAX_DAILY_HOURS {
        return Err(AppError::validation("Invalid number of hours"));
    }

    if existing_total + hours > MAX_DAILY_HOURS {
        return Err(AppError::validation(format!(
            "Total hours for the day cannot exceed {} (already scheduled: {}h)",
            MAX_DAILY_HOURS, existing_total
        )));
    }

    Ok(())
}

/// Schedule creation and modification with the daily-cap invariant
pub struct ScheduleService {
    pool: MySqlPool,
}

impl ScheduleService {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn schedules(&self) -> ScheduleRepository {
        ScheduleRepository::new(self.pool.clone())
    }

    pub async fn create(
        &self,
        manager_id: &str,
        request: CreateScheduleRequest,
    ) -> Result<ScheduleResponse> {
        let workplace = WorkplaceRepository::new(self.pool.clone())
            .find_owned(&request.workplace_id, manager_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workplace"))?;

        let employee = EmployeeRepository::new(self.pool.clone())
            .find_owned(&request.employee_id, manager_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee"))?;

        let existing_total = self
            .schedules()
            .hours_total(&employee.id, request.date, None)
            .await?;
        check_hours(existing_total, request.hours)?;

        let now = Utc::now().naive_utc();
        let schedule = Schedule {
            id: Uuid::new_v4().to_string(),
            workplace_id: workplace.id.clone(),
            employee_id: employee.id.clone(),
            date: request.date,
            hours: request.hours,
            created_at: now,
            updated_at: now,
        };

        self.schedules().insert(&schedule).await?;

        info!(
            schedule_id = %schedule.id,
            employee_id = %schedule.employee_id,
            date = %schedule.date,
            hours = schedule.hours,
            "Schedule entry created"
        );

        Ok(ScheduleResponse {
            id: schedule.id,
            workplace_id: schedule.workplace_id,
            workplace_name: workplace.name,
            employee_id: schedule.employee_id,
            employee_name: employee.full_name(),
            date: schedule.date,
            hours: schedule.hours,
            created_at: schedule.created_at,
        })
    }

    pub async fn update(
        &self,
        manager_id: &str,
        id: &str,
        request: UpdateScheduleRequest,
    ) -> Result<ScheduleResponse> {
        let mut schedule = self
            .schedules()
            .find_owned(id, manager_id)
            .await?
            .ok_or_else(|| AppError::not_found("Schedule"))?;

        let workplace = WorkplaceRepository::new(self.pool.clone())
            .find_owned(&request.workplace_id, manager_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workplace"))?;

        let employee = EmployeeRepository::new(self.pool.clone())
            .find_owned(&request.employee_id, manager_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee"))?;

        // The row under edit never counts toward its own day total
        let existing_total = self
            .schedules()
            .hours_total(&employee.id, request.date, Some(id))
            .await?;
        check_hours(existing_total, request.hours)?;

        schedule.workplace_id = workplace.id.clone();
        schedule.employee_id = employee.id.clone();
        schedule.date = request.date;
        schedule.hours = request.hours;
        schedule.updated_at = Utc::now().naive_utc();

        self.schedules().update(&schedule).await?;

        Ok(ScheduleResponse {
            id: schedule.id,
            workplace_id: schedule.workplace_id,
            workplace_name: workplace.name,
            employee_id: schedule.employee_id,
            employee_name: employee.full_name(),
            date: schedule.date,
            hours: schedule.hours,
            created_at: schedule.created_at,
        })
    }

    pub async fn delete(&self, manager_id: &str, id: &str) -> Result<()> {
        if !self.schedules().delete(id, manager_id).await? {
            return Err(AppError::not_found("Schedule"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_hours() {
        assert!(check_hours(0.0, 0.0).is_err());
        assert!(check_hours(0.0, -1.0).is_err());
    }

    #[test]
    fn test_rejects_over_24_in_one_block() {
        assert!(check_hours(0.0, 24.5).is_err());
    }

    #[test]
    fn test_rejects_day_total_over_24() {
        // 10h + 14h already scheduled; one more hour must not fit
        assert!(check_hours(24.0, 1.0).is_err());
        assert!(check_hours(20.0, 4.5).is_err());
    }

    #[test]
    fn test_accepts_within_cap() {
        assert!(check_hours(0.0, 20.0).is_ok());
        assert!(check_hours(10.0, 14.0).is_ok()); // exactly 24
        assert!(check_hours(0.0, 24.0).is_ok());
    }
}
