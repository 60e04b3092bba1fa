use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::revenues::models::{ListedRevenue, Revenue};

/// Ownership of a revenue follows its workplace when one is set, otherwise
/// its employee; both parents are joined so a single predicate covers every
/// shape of row.
const OWNERSHIP_PREDICATE: &str = r#"
    ((r.workplace_id IS NOT NULL AND w.manager_id = ?)
     OR (r.workplace_id IS NULL AND e.manager_id = ?))
"#;

pub struct RevenueRepository {
    pool: MySqlPool,
}

impl RevenueRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// All revenues visible to a manager, newest date first
    pub async fn list_for_manager(&self, manager_id: &str) -> Result<Vec<ListedRevenue>> {
        let sql = format!(
            r#"
            SELECT r.id, r.workplace_id, w.name AS workplace_name,
                   r.employee_id, CONCAT(e.first_name, ' ', e.last_name) AS employee_name,
                   r.description, r.amount, r.date, r.created_at, r.updated_at
            FROM revenues r
            LEFT JOIN workplaces w ON w.id = r.workplace_id
            LEFT JOIN employees e ON e.id = r.employee_id
            WHERE {OWNERSHIP_PREDICATE}
            ORDER BY r.date DESC
            "#
        );

        let revenues = sqlx::query_as::<_, ListedRevenue>(&sql)
            .bind(manager_id)
            .bind(manager_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(revenues)
    }

    pub async fn list_for_workplace(&self, workplace_id: &str) -> Result<Vec<ListedRevenue>> {
        let revenues = sqlx::query_as::<_, ListedRevenue>(
            r#"
            SELECT r.id, r.workplace_id, w.name AS workplace_name,
                   r.employee_id, CONCAT(e.first_name, ' ', e.last_name) AS employee_name,
                   r.description, r.amount, r.date, r.created_at, r.updated_at
            FROM revenues r
            LEFT JOIN workplaces w ON w.id = r.workplace_id
            LEFT JOIN employees e ON e.id = r.employee_id
            WHERE r.workplace_id = ?
            ORDER BY r.date DESC
            "#,
        )
        .bind(workplace_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(revenues)
    }

    pub async fn list_for_employee(&self, employee_id: &str) -> Result<Vec<ListedRevenue>> {
        let revenues = sqlx::query_as::<_, ListedRevenue>(
            r#"
            SELECT r.id, r.workplace_id, w.name AS workplace_name,
                   r.employee_id, CONCAT(e.first_name, ' ', e.last_name) AS employee_name,
                   r.description, r.amount, r.date, r.created_at, r.updated_at
            FROM revenues r
            LEFT JOIN workplaces w ON w.id = r.workplace_id
            LEFT JOIN employees e ON e.id = r.employee_id
            WHERE r.employee_id = ?
            ORDER BY r.date DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(revenues)
    }

    pub async fn find_owned(&self, id: &str, manager_id: &str) -> Result<Option<ListedRevenue>> {
        let sql = format!(
            r#"
            SELECT r.id, r.workplace_id, w.name AS workplace_name,
                   r.employee_id, CONCAT(e.first_name, ' ', e.last_name) AS employee_name,
                   r.description, r.amount, r.date, r.created_at, r.updated_at
            FROM revenues r
            LEFT JOIN workplaces w ON w.id = r.workplace_id
            LEFT JOIN employees e ON e.id = r.employee_id
            WHERE r.id = ? AND {OWNERSHIP_PREDICATE}
            "#
        );

        let revenue = sqlx::query_as::<_, ListedRevenue>(&sql)
            .bind(id)
            .bind(manager_id)
            .bind(manager_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(revenue)
    }

    /// Insert a revenue whose owners have already been ownership-checked
    pub async fn insert(&self, revenue: &Revenue) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO revenues (id, workplace_id, employee_id, description, amount, date,
                                  created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&revenue.id)
        .bind(&revenue.workplace_id)
        .bind(&revenue.employee_id)
        .bind(&revenue.description)
        .bind(revenue.amount)
        .bind(revenue.date)
        .bind(revenue.created_at)
        .bind(revenue.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update(&self, revenue: &ListedRevenue) -> Result<()> {
        sqlx::query(
            "UPDATE revenues SET description = ?, amount = ?, date = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&revenue.description)
        .bind(revenue.amount)
        .bind(revenue.date)
        .bind(revenue.updated_at)
        .bind(&revenue.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns true when a row was deleted; ownership re-checked in SQL
    pub async fn delete(&self, id: &str, manager_id: &str) -> Result<bool> {
        let sql = format!(
            r#"
            DELETE r FROM revenues r
            LEFT JOIN workplaces w ON w.id = r.workplace_id
            LEFT JOIN employees e ON e.id = r.employee_id
            WHERE r.id = ? AND {OWNERSHIP_PREDICATE}
            "#
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(manager_id)
            .bind(manager_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
