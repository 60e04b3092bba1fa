use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::auth::models::Manager;

/// Repository for manager account rows
pub struct ManagerRepository {
    pool: MySqlPool,
}

impl ManagerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Manager>> {
        let manager = sqlx::query_as::<_, Manager>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role, created_at
            FROM managers
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(manager)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Manager>> {
        let manager = sqlx::query_as::<_, Manager>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role, created_at
            FROM managers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(manager)
    }

    /// True when another account already uses this email
    pub async fn email_taken(&self, email: &str, exclude_id: Option<&str>) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM managers
            WHERE email = ? AND id <> COALESCE(?, '')
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    pub async fn insert(&self, manager: &Manager) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO managers (id, email, password_hash, first_name, last_name, role, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&manager.id)
        .bind(&manager.email)
        .bind(&manager.password_hash)
        .bind(&manager.first_name)
        .bind(&manager.last_name)
        .bind(&manager.role)
        .bind(manager.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update_profile(&self, manager: &Manager) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE managers
            SET email = ?, first_name = ?, last_name = ?
            WHERE id = ?
            "#,
        )
        .bind(&manager.email)
        .bind(&manager.first_name)
        .bind(&manager.last_name)
        .bind(&manager.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update_password(&self, id: &str, password_hash: &str) -> Result<()> {
        sqlx::query("UPDATE managers SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
