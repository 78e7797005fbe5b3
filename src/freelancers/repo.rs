use std::collections::BTreeMap;

use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::{
    Freelancer, FreelancerFilter, FreelancerPatch, FreelancerRow, FreelancerStatus, NewFreelancer,
};
use crate::db::PgStore;

#[async_trait]
pub trait FreelancerStore: Send + Sync {
    /// Page of matches, newest first, plus the total match count.
    async fn list(&self, filter: &FreelancerFilter) -> anyhow::Result<(Vec<Freelancer>, i64)>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Freelancer>>;
    async fn create(&self, new: NewFreelancer) -> anyhow::Result<Freelancer>;
    async fn update(&self, id: Uuid, patch: FreelancerPatch) -> anyhow::Result<Option<Freelancer>>;
    /// `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn count_by_status(&self) -> anyhow::Result<BTreeMap<FreelancerStatus, i64>>;
}

const FREELANCER_COLUMNS: &str = "id, name, email, phone, skills, hourly_rate, experience_years, \
     bio, portfolio_url, availability, status, user_id, created_at, updated_at";

// $1 status, $2 search pattern for ILIKE, $3 raw search term for the skills match
const FILTER_CLAUSE: &str = "($1::text IS NULL OR status = $1) \
     AND ($2::text IS NULL OR name ILIKE $2 OR email ILIKE $2 OR $3 = ANY(skills))";

fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl FreelancerStore for PgStore {
    async fn list(&self, filter: &FreelancerFilter) -> anyhow::Result<(Vec<Freelancer>, i64)> {
        let status = filter.status.map(FreelancerStatus::as_str);
        let pattern = filter.search.as_deref().map(like_pattern);

        let rows = sqlx::query_as::<_, FreelancerRow>(&format!(
            r#"
            SELECT {FREELANCER_COLUMNS}
            FROM freelancers
            WHERE {FILTER_CLAUSE}
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(status)
        .bind(pattern.as_deref())
        .bind(filter.search.as_deref())
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await
        .context("list freelancers")?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM freelancers WHERE {FILTER_CLAUSE}"
        ))
        .bind(status)
        .bind(pattern.as_deref())
        .bind(filter.search.as_deref())
        .fetch_one(&self.pool)
        .await
        .context("count freelancers")?;

        let items = rows
            .into_iter()
            .map(Freelancer::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok((items, total))
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Freelancer>> {
        let row = sqlx::query_as::<_, FreelancerRow>(&format!(
            "SELECT {FREELANCER_COLUMNS} FROM freelancers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("get freelancer")?;
        row.map(Freelancer::try_from).transpose()
    }

    async fn create(&self, new: NewFreelancer) -> anyhow::Result<Freelancer> {
        let row = sqlx::query_as::<_, FreelancerRow>(&format!(
            r#"
            INSERT INTO freelancers
                (name, email, phone, skills, hourly_rate, experience_years,
                 bio, portfolio_url, availability, status, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {FREELANCER_COLUMNS}
            "#
        ))
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.skills)
        .bind(new.hourly_rate)
        .bind(new.experience_years)
        .bind(&new.bio)
        .bind(&new.portfolio_url)
        .bind(&new.availability)
        .bind(new.status.as_str())
        .bind(new.user_id)
        .fetch_one(&self.pool)
        .await
        .context("insert freelancer")?;
        Freelancer::try_from(row)
    }

    async fn update(&self, id: Uuid, patch: FreelancerPatch) -> anyhow::Result<Option<Freelancer>> {
        let row = sqlx::query_as::<_, FreelancerRow>(&format!(
            r#"
            UPDATE freelancers SET
                name             = COALESCE($2, name),
                email            = COALESCE($3, email),
                phone            = COALESCE($4, phone),
                skills           = COALESCE($5, skills),
                hourly_rate      = COALESCE($6, hourly_rate),
                experience_years = COALESCE($7, experience_years),
                bio              = COALESCE($8, bio),
                portfolio_url    = COALESCE($9, portfolio_url),
                availability     = COALESCE($10, availability),
                status           = COALESCE($11, status),
                updated_at       = now()
            WHERE id = $1
            RETURNING {FREELANCER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.phone)
        .bind(&patch.skills)
        .bind(patch.hourly_rate)
        .bind(patch.experience_years)
        .bind(&patch.bio)
        .bind(&patch.portfolio_url)
        .bind(&patch.availability)
        .bind(patch.status.map(FreelancerStatus::as_str))
        .fetch_optional(&self.pool)
        .await
        .context("update freelancer")?;
        row.map(Freelancer::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM freelancers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete freelancer")?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_by_status(&self) -> anyhow::Result<BTreeMap<FreelancerStatus, i64>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM freelancers GROUP BY status")
                .fetch_all(&self.pool)
                .await
                .context("count freelancers by status")?;
        rows.into_iter()
            .map(|(status, n)| -> anyhow::Result<_> { Ok((status.parse::<FreelancerStatus>()?, n)) })
            .collect()
    }
}
