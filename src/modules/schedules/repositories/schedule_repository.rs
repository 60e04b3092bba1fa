use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::schedules::models::{ListedSchedule, Schedule};

/// Repository for schedule rows. Ownership follows the schedule's workplace.
pub struct ScheduleRepository {
    pool: MySqlPool,
}

impl ScheduleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_manager(&self, manager_id: &str) -> Result<Vec<ListedSchedule>> {
        let schedules = sqlx::query_as::<_, ListedSchedule>(
            r#"
            SELECT s.id, s.workplace_id, w.name AS workplace_name,
                   s.employee_id, CONCAT(e.first_name, ' ', e.last_name) AS employee_name,
                   s.date, s.hours, s.created_at
            FROM schedules s
            JOIN workplaces w ON w.id = s.workplace_id
            JOIN employees e ON e.id = s.employee_id
            WHERE w.manager_id = ?
            ORDER BY s.date, s.employee_id
            "#,
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(schedules)
    }

    pub async fn find_owned(&self, id: &str, manager_id: &str) -> Result<Option<Schedule>> {
        let schedule = sqlx::query_as::<_, Schedule>(
            r#"
            SELECT s.id, s.workplace_id, s.employee_id, s.date, s.hours,
                   s.created_at, s.updated_at
            FROM schedules s
            JOIN workplaces w ON w.id = s.workplace_id
            WHERE s.id = ? AND w.manager_id = ?
            "#,
        )
        .bind(id)
        .bind(manager_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule)
    }

    /// Total hours already scheduled for an employee on a day, optionally
    /// excluding one row (the one being updated).
    pub async fn hours_total(
        &self,
        employee_id: &str,
        date: NaiveDate,
        exclude_id: Option<&str>,
    ) -> Result<f64> {
        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(hours), 0)
            FROM schedules
            WHERE employee_id = ? AND date = ? AND id <> COALESCE(?, '')
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    pub async fn insert(&self, schedule: &Schedule) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO schedules (id, workplace_id, employee_id, date, hours,
                                   created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&schedule.id)
        .bind(&schedule.workplace_id)
        .bind(&schedule.employee_id)
        .bind(schedule.date)
        .bind(schedule.hours)
        .bind(schedule.created_at)
        .bind(schedule.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update(&self, schedule: &Schedule) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE schedules
            SET workplace_id = ?, employee_id = ?, date = ?, hours = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&schedule.workplace_id)
        .bind(&schedule.employee_id)
        .bind(schedule.date)
        .bind(schedule.hours)
        .bind(schedule.updated_at)
        .bind(&schedule.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns true when a row was deleted; ownership re-checked in SQL
    pub async fn delete(&self, id: &str, manager_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE s FROM schedules s
            JOIN workplaces w ON w.id = s.workplace_id
            WHERE s.id = ? AND w.manager_id = ?
            "#,
        )
        .bind(id)
        .bind(manager_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
