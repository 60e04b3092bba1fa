use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::workplaces::models::{AssignedEmployee, Workplace, WorkplaceAssignment};

/// Repository for workplace rows and their employee assignments
pub struct WorkplaceRepository {
    pool: MySqlPool,
}

impl WorkplaceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, manager_id: &str) -> Result<Vec<Workplace>> {
        let workplaces = sqlx::query_as::<_, Workplace>(
            r#"
            SELECT id, manager_id, name, address, description, created_at, updated_at
            FROM workplaces
            WHERE manager_id = ?
            ORDER BY name
            "#,
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(workplaces)
    }

    pub async fn find_owned(&self, id: &str, manager_id: &str) -> Result<Option<Workplace>> {
        let workplace = sqlx::query_as::<_, Workplace>(
            r#"
            SELECT id, manager_id, name, address, description, created_at, updated_at
            FROM workplaces
            WHERE id = ? AND manager_id = ?
            "#,
        )
        .bind(id)
        .bind(manager_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(workplace)
    }

    pub async fn insert(&self, workplace: &Workplace) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO workplaces (id, manager_id, name, address, description,
                                    created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&workplace.id)
        .bind(&workplace.manager_id)
        .bind(&workplace.name)
        .bind(&workplace.address)
        .bind(&workplace.description)
        .bind(workplace.created_at)
        .bind(workplace.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update(&self, workplace: &Workplace) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE workplaces
            SET name = ?, address = ?, description = ?, updated_at = ?
            WHERE id = ? AND manager_id = ?
            "#,
        )
        .bind(&workplace.name)
        .bind(&workplace.address)
        .bind(&workplace.description)
        .bind(workplace.updated_at)
        .bind(&workplace.id)
        .bind(&workplace.manager_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns true when a row was deleted
    pub async fn delete(&self, id: &str, manager_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM workplaces WHERE id = ? AND manager_id = ?")
            .bind(id)
            .bind(manager_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Employees assigned to a workplace, with their assignment span
    pub async fn assigned_employees(&self, workplace_id: &str) -> Result<Vec<AssignedEmployee>> {
        let assignments = sqlx::query_as::<_, AssignedEmployee>(
            r#"
            SELECT a.employee_id, e.first_name, e.last_name, e.email,
                   a.start_date, a.end_date
            FROM workplace_assignments a
            JOIN employees e ON e.id = a.employee_id
            WHERE a.workplace_id = ?
            ORDER BY a.start_date
            "#,
        )
        .bind(workplace_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    pub async fn insert_assignment(&self, assignment: &WorkplaceAssignment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO workplace_assignments (id, workplace_id, employee_id, start_date,
                                               end_date, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&assignment.id)
        .bind(&assignment.workplace_id)
        .bind(&assignment.employee_id)
        .bind(assignment.start_date)
        .bind(assignment.end_date)
        .bind(assignment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
