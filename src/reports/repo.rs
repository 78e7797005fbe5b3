use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::{NewReport, Report, ReportKind, ReportRow};
use crate::db::PgStore;

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Newest first.
    async fn list(&self, kind: Option<ReportKind>, limit: i64) -> anyhow::Result<Vec<Report>>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Report>>;
    async fn create(&self, new: NewReport) -> anyhow::Result<Report>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn count(&self) -> anyhow::Result<i64>;
}

const REPORT_COLUMNS: &str = "id, title, description, type, data, created_by, created_at";

#[async_trait]
impl ReportStore for PgStore {
    async fn list(&self, kind: Option<ReportKind>, limit: i64) -> anyhow::Result<Vec<Report>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM reports
            WHERE ($1::text IS NULL OR type = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(kind.map(ReportKind::as_str))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("list reports")?;
        rows.into_iter().map(Report::try_from).collect()
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Report>> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("get report")?;
        row.map(Report::try_from).transpose()
    }

    async fn create(&self, new: NewReport) -> anyhow::Result<Report> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            INSERT INTO reports (title, description, type, data, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.kind.as_str())
        .bind(&new.data)
        .bind(new.created_by)
        .fetch_one(&self.pool)
        .await
        .context("insert report")?;
        Report::try_from(row)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete report")?;
        Ok(res.rows_affected() > 0)
    }

    async fn count(&self) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(&self.pool)
            .await
            .context("count reports")?;
        Ok(n)
    }
}
