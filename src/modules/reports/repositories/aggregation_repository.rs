use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::reports::models::{DateWindow, EntityRef};

/// Window-bounded aggregation queries over a manager's data graph.
///
/// Every sum runs database-side; callers only ever see scalars. The trait
/// exists so the report service can be exercised against an in-memory
/// source in tests.
#[async_trait]
pub trait AggregationSource: Send + Sync {
    /// Workplaces owned by the manager, with display names
    async fn workplaces(&self, manager_id: &str) -> Result<Vec<EntityRef>>;

    /// Employees owned by the manager, with display names
    async fn employees(&self, manager_id: &str) -> Result<Vec<EntityRef>>;

    /// SUM of workplace costs inside the window
    async fn workplace_cost_sum(&self, workplace_id: &str, window: &DateWindow)
        -> Result<Decimal>;

    /// SUM of revenues booked directly against the workplace
    async fn workplace_revenue_sum(
        &self,
        workplace_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal>;

    /// SUM of direct employee revenues credited to the workplace through an
    /// assignment covering the revenue date
    async fn workplace_attributed_revenue_sum(
        &self,
        workplace_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal>;

    /// Distinct employees with revenue activity at the workplace
    async fn workplace_active_employee_count(
        &self,
        workplace_id: &str,
        window: &DateWindow,
    ) -> Result<i64>;

    /// SUM of employee costs inside the window
    async fn employee_cost_sum(&self, employee_id: &str, window: &DateWindow) -> Result<Decimal>;

    /// SUM of the employee's revenues tied to some workplace
    async fn employee_workplace_revenue_sum(
        &self,
        employee_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal>;

    /// SUM of the employee's revenues tied to no workplace
    async fn employee_direct_revenue_sum(
        &self,
        employee_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal>;

    /// SUM of scheduled hours inside the window
    async fn employee_hours_sum(&self, employee_id: &str, window: &DateWindow) -> Result<f64>;

    /// Distinct names of workplaces where the employee had revenue activity
    async fn employee_workplace_names(
        &self,
        employee_id: &str,
        window: &DateWindow,
    ) -> Result<Vec<String>>;
}

pub struct MySqlAggregationSource {
    pool: MySqlPool,
}

impl MySqlAggregationSource {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn decimal_sum(
        &self,
        sql: &str,
        entity_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal> {
        let total: Decimal = sqlx::query_scalar(sql)
            .bind(entity_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}

#[async_trait]
impl AggregationSource for MySqlAggregationSource {
    async fn workplaces(&self, manager_id: &str) -> Result<Vec<EntityRef>> {
        let rows = sqlx::query_as::<_, EntityRef>(
            "SELECT id, name FROM workplaces WHERE manager_id = ? ORDER BY name",
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn employees(&self, manager_id: &str) -> Result<Vec<EntityRef>> {
        let rows = sqlx::query_as::<_, EntityRef>(
            r#"
            SELECT id, CONCAT(first_name, ' ', last_name) AS name
            FROM employees
            WHERE manager_id = ?
            ORDER BY name
            "#,
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn workplace_cost_sum(
        &self,
        workplace_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal> {
        self.decimal_sum(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM workplace_costs
            WHERE workplace_id = ? AND date BETWEEN ? AND ?
            "#,
            workplace_id,
            window,
        )
        .await
    }

    async fn workplace_revenue_sum(
        &self,
        workplace_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal> {
        self.decimal_sum(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM revenues
            WHERE workplace_id = ? AND date BETWEEN ? AND ?
            "#,
            workplace_id,
            window,
        )
        .await
    }

    async fn workplace_attributed_revenue_sum(
        &self,
        workplace_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal> {
        // EXISTS keeps a revenue counted once even when several assignments
        // of the same employee cover its date
        self.decimal_sum(
            r#"
            SELECT COALESCE(SUM(r.amount), 0)
            FROM revenues r
            WHERE r.workplace_id IS NULL
              AND r.employee_id IS NOT NULL
              AND EXISTS (
                  SELECT 1 FROM workplace_assignments a
                  WHERE a.employee_id = r.employee_id
                    AND a.workplace_id = ?
                    AND a.start_date <= r.date
                    AND (a.end_date IS NULL OR a.end_date >= r.date)
              )
              AND r.date BETWEEN ? AND ?
            "#,
            workplace_id,
            window,
        )
        .await
    }

    async fn workplace_active_employee_count(
        &self,
        workplace_id: &str,
        window: &DateWindow,
    ) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT r.employee_id)
            FROM revenues r
            WHERE r.employee_id IS NOT NULL
              AND r.date BETWEEN ? AND ?
              AND (r.workplace_id = ?
                   OR (r.workplace_id IS NULL AND EXISTS (
                       SELECT 1 FROM workplace_assignments a
                       WHERE a.employee_id = r.employee_id
                         AND a.workplace_id = ?
                         AND a.start_date <= r.date
                         AND (a.end_date IS NULL OR a.end_date >= r.date)
                   )))
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .bind(workplace_id)
        .bind(workplace_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn employee_cost_sum(&self, employee_id: &str, window: &DateWindow) -> Result<Decimal> {
        self.decimal_sum(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM employee_costs
            WHERE employee_id = ? AND date BETWEEN ? AND ?
            "#,
            employee_id,
            window,
        )
        .await
    }

    async fn employee_workplace_revenue_sum(
        &self,
        employee_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal> {
        self.decimal_sum(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM revenues
            WHERE employee_id = ? AND workplace_id IS NOT NULL AND date BETWEEN ? AND ?
            "#,
            employee_id,
            window,
        )
        .await
    }

    async fn employee_direct_revenue_sum(
        &self,
        employee_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal> {
        self.decimal_sum(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM revenues
            WHERE employee_id = ? AND workplace_id IS NULL AND date BETWEEN ? AND ?
            "#,
            employee_id,
            window,
        )
        .await
    }

    async fn employee_hours_sum(&self, employee_id: &str, window: &DateWindow) -> Result<f64> {
        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(hours), 0)
            FROM schedules
            WHERE employee_id = ? AND date BETWEEN ? AND ?
            "#,
        )
        .bind(employee_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn employee_workplace_names(
        &self,
        employee_id: &str,
        window: &DateWindow,
    ) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT w.name
            FROM revenues r
            JOIN workplaces w ON w.id = r.workplace_id
            WHERE r.employee_id = ? AND r.date BETWEEN ? AND ?
            ORDER BY w.name
            "#,
        )
        .bind(employee_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}
