use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Report category. Both the dashboard set and the marketplace set are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    General,
    Analytics,
    Performance,
    Users,
    Freelancers,
    Earnings,
    Activity,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::General => "general",
            ReportKind::Analytics => "analytics",
            ReportKind::Performance => "performance",
            ReportKind::Users => "users",
            ReportKind::Freelancers => "freelancers",
            ReportKind::Earnings => "earnings",
            ReportKind::Activity => "activity",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "general" => Self::General,
            "analytics" => Self::Analytics,
            "performance" => Self::Performance,
            "users" => Self::Users,
            "freelancers" => Self::Freelancers,
            "earnings" => Self::Earnings,
            "activity" => Self::Activity,
            other => anyhow::bail!("unknown report type {other:?}"),
        })
    }
}

#[derive(Debug, FromRow)]
pub struct ReportRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub data: serde_json::Value,
    pub created_by: Option<Uuid>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub data: serde_json::Value,
    pub created_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TryFrom<ReportRow> for Report {
    type Error = anyhow::Error;

    fn try_from(r: ReportRow) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: r.kind.parse()?,
            id: r.id,
            title: r.title,
            description: r.description,
            data: r.data,
            created_by: r.created_by,
            created_at: r.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub title: String,
    pub description: Option<String>,
    pub kind: ReportKind,
    pub data: serde_json::Value,
    pub created_by: Option<Uuid>,
}
