use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::employees::models::Employee;

/// Repository for employee rows. Every accessor takes the requesting
/// manager's id; a row outside that manager's graph is reported as absent.
pub struct EmployeeRepository {
    pool: MySqlPool,
}

impl EmployeeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, manager_id: &str) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, manager_id, email, first_name, last_name, phone, position,
                   hourly_rate, created_at, updated_at
            FROM employees
            WHERE manager_id = ?
            ORDER BY last_name, first_name
            "#,
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn find_owned(&self, id: &str, manager_id: &str) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, manager_id, email, first_name, last_name, phone, position,
                   hourly_rate, created_at, updated_at
            FROM employees
            WHERE id = ? AND manager_id = ?
            "#,
        )
        .bind(id)
        .bind(manager_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// True when another employee already uses this email
    pub async fn email_taken(&self, email: &str, exclude_id: Option<&str>) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM employees
            WHERE email = ? AND id <> COALESCE(?, '')
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    pub async fn insert(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO employees (id, manager_id, email, first_name, last_name, phone,
                                   position, hourly_rate, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.id)
        .bind(&employee.manager_id)
        .bind(&employee.email)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.phone)
        .bind(&employee.position)
        .bind(employee.hourly_rate)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE employees
            SET email = ?, first_name = ?, last_name = ?, phone = ?, position = ?,
                hourly_rate = ?, updated_at = ?
            WHERE id = ? AND manager_id = ?
            "#,
        )
        .bind(&employee.email)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.phone)
        .bind(&employee.position)
        .bind(employee.hourly_rate)
        .bind(employee.updated_at)
        .bind(&employee.id)
        .bind(&employee.manager_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns true when a row was deleted
    pub async fn delete(&self, id: &str, manager_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ? AND manager_id = ?")
            .bind(id)
            .bind(manager_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
