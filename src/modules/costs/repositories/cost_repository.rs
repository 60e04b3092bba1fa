use chrono::Utc;
use uuid::Uuid;

use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::costs::models::{CostEntry, CostKind, ListedCost};

/// Repository for workplace and employee cost rows. Ownership is resolved
/// by joining through the parent entity; callers never see foreign rows.
pub struct CostRepository {
    pool: MySqlPool,
}

impl CostRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// All costs visible to a manager, newest date first, workplace and
    /// employee costs interleaved.
    pub async fn list_for_manager(
        &self,
        manager_id: &str,
    ) -> Result<Vec<(CostKind, ListedCost)>> {
        let workplace_costs = sqlx::query_as::<_, ListedCost>(
            r#"
            SELECT c.id, c.workplace_id AS entity_id, w.name AS entity_name,
                   c.description, c.amount, c.date, c.created_at, c.updated_at
            FROM workplace_costs c
            JOIN workplaces w ON w.id = c.workplace_id
            WHERE w.manager_id = ?
            "#,
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        let employee_costs = sqlx::query_as::<_, ListedCost>(
            r#"
            SELECT c.id, c.employee_id AS entity_id,
                   CONCAT(e.first_name, ' ', e.last_name) AS entity_name,
                   c.description, c.amount, c.date, c.created_at, c.updated_at
            FROM employee_costs c
            JOIN employees e ON e.id = c.employee_id
            WHERE e.manager_id = ?
            "#,
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        let mut costs: Vec<(CostKind, ListedCost)> = workplace_costs
            .into_iter()
            .map(|c| (CostKind::Workplace, c))
            .chain(employee_costs.into_iter().map(|c| (CostKind::Employee, c)))
            .collect();
        costs.sort_by(|a, b| b.1.date.cmp(&a.1.date));

        Ok(costs)
    }

    pub async fn list_for_workplace(&self, workplace_id: &str) -> Result<Vec<CostEntry>> {
        let costs = sqlx::query_as::<_, CostEntry>(
            r#"
            SELECT id, description, amount, date, created_at, updated_at
            FROM workplace_costs
            WHERE workplace_id = ?
            ORDER BY date DESC
            "#,
        )
        .bind(workplace_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(costs)
    }

    pub async fn list_for_employee(&self, employee_id: &str) -> Result<Vec<CostEntry>> {
        let costs = sqlx::query_as::<_, CostEntry>(
            r#"
            SELECT id, description, amount, date, created_at, updated_at
            FROM employee_costs
            WHERE employee_id = ?
            ORDER BY date DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(costs)
    }

    pub async fn find_owned(
        &self,
        kind: CostKind,
        id: &str,
        manager_id: &str,
    ) -> Result<Option<CostEntry>> {
        let sql = match kind {
            CostKind::Workplace => {
                r#"
                SELECT c.id, c.description, c.amount, c.date, c.created_at, c.updated_at
                FROM workplace_costs c
                WHERE c.id = ?
                  AND EXISTS (SELECT 1 FROM workplaces w
                              WHERE w.id = c.workplace_id AND w.manager_id = ?)
                "#
            }
            CostKind::Employee => {
                r#"
                SELECT c.id, c.description, c.amount, c.date, c.created_at, c.updated_at
                FROM employee_costs c
                WHERE c.id = ?
                  AND EXISTS (SELECT 1 FROM employees e
                              WHERE e.id = c.employee_id AND e.manager_id = ?)
                "#
            }
        };

        let cost = sqlx::query_as::<_, CostEntry>(sql)
            .bind(id)
            .bind(manager_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cost)
    }

    /// Insert a cost for an already ownership-checked entity
    pub async fn insert(&self, kind: CostKind, entity_id: &str, entry: &CostEntry) -> Result<()> {
        let sql = match kind {
            CostKind::Workplace => {
                r#"
                INSERT INTO workplace_costs (id, workplace_id, description, amount, date,
                                             created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#
            }
            CostKind::Employee => {
                r#"
                INSERT INTO employee_costs (id, employee_id, description, amount, date,
                                            created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#
            }
        };

        sqlx::query(sql)
            .bind(&entry.id)
            .bind(entity_id)
            .bind(&entry.description)
            .bind(entry.amount)
            .bind(entry.date)
            .bind(entry.created_at)
            .bind(entry.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update(&self, kind: CostKind, entry: &CostEntry) -> Result<()> {
        let sql = match kind {
            CostKind::Workplace => {
                "UPDATE workplace_costs SET description = ?, amount = ?, date = ?, updated_at = ? WHERE id = ?"
            }
            CostKind::Employee => {
                "UPDATE employee_costs SET description = ?, amount = ?, date = ?, updated_at = ? WHERE id = ?"
            }
        };

        sqlx::query(sql)
            .bind(&entry.description)
            .bind(entry.amount)
            .bind(entry.date)
            .bind(entry.updated_at)
            .bind(&entry.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns true when a row was deleted; ownership re-checked in SQL
    pub async fn delete(&self, kind: CostKind, id: &str, manager_id: &str) -> Result<bool> {
        let sql = match kind {
            CostKind::Workplace => {
                r#"
                DELETE c FROM workplace_costs c
                WHERE c.id = ?
                  AND EXISTS (SELECT 1 FROM workplaces w
                              WHERE w.id = c.workplace_id AND w.manager_id = ?)
                "#
            }
            CostKind::Employee => {
                r#"
                DELETE c FROM employee_costs c
                WHERE c.id = ?
                  AND EXISTS (SELECT 1 FROM employees e
                              WHERE e.id = c.employee_id AND e.manager_id = ?)
                "#
            }
        };

        let result = sqlx::query(sql)
            .bind(id)
            .bind(manager_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Build a new cost entry with fresh id and timestamps
pub fn new_entry(
    description: String,
    amount: rust_decimal::Decimal,
    date: chrono::NaiveDate,
) -> CostEntry {
    let now = Utc::now().naive_utc();
    CostEntry {
        id: Uuid::new_v4().to_string(),
        description,
        amount,
        date,
        created_at: now,
        updated_at: now,
    }
}
