use anyhow::Context;
use async_trait::async_trait;

use super::repo_types::{Setting, SettingUpsert};
use crate::db::PgStore;

#[async_trait]
pub trait SettingStore: Send + Sync {
    /// Ordered by key.
    async fn list(&self) -> anyhow::Result<Vec<Setting>>;
    async fn get(&self, key: &str) -> anyhow::Result<Option<Setting>>;
    async fn upsert(&self, upsert: SettingUpsert) -> anyhow::Result<Setting>;
    async fn delete(&self, key: &str) -> anyhow::Result<bool>;
}

#[async_trait]
impl SettingStore for PgStore {
    async fn list(&self) -> anyhow::Result<Vec<Setting>> {
        let rows = sqlx::query_as::<_, Setting>(
            r#"
            SELECT key, value, description, updated_by, updated_at
            FROM settings
            ORDER BY key
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("list settings")?;
        Ok(rows)
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<Setting>> {
        let row = sqlx::query_as::<_, Setting>(
            r#"
            SELECT key, value, description, updated_by, updated_at
            FROM settings
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .context("get setting")?;
        Ok(row)
    }

    async fn upsert(&self, upsert: SettingUpsert) -> anyhow::Result<Setting> {
        let row = sqlx::query_as::<_, Setting>(
            r#"
            INSERT INTO settings (key, value, description, updated_by, updated_at)
            VALUES ($1, $2, $3, $4, now())
            ON CONFLICT (key) DO UPDATE SET
                value       = EXCLUDED.value,
                description = COALESCE(EXCLUDED.description, settings.description),
                updated_by  = EXCLUDED.updated_by,
                updated_at  = now()
            RETURNING key, value, description, updated_by, updated_at
            "#,
        )
        .bind(&upsert.key)
        .bind(&upsert.value)
        .bind(&upsert.description)
        .bind(upsert.updated_by)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("upsert setting {}", upsert.key))?;
        Ok(row)
    }

    async fn delete(&self, key: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .context("delete setting")?;
        Ok(res.rows_affected() > 0)
    }
}
