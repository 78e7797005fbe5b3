use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreelancerStatus {
    Active,
    Inactive,
    Pending,
}

impl FreelancerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FreelancerStatus::Active => "active",
            FreelancerStatus::Inactive => "inactive",
            FreelancerStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for FreelancerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FreelancerStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "pending" => Ok(Self::Pending),
            other => anyhow::bail!("unknown freelancer status {other:?}"),
        }
    }
}

#[derive(Debug, FromRow)]
pub struct FreelancerRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub experience_years: Option<i32>,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
    pub availability: Option<String>,
    pub status: String,
    pub user_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Freelancer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub experience_years: Option<i32>,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
    pub availability: Option<String>,
    pub status: FreelancerStatus,
    pub user_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl TryFrom<FreelancerRow> for Freelancer {
    type Error = anyhow::Error;

    fn try_from(r: FreelancerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: r.status.parse()?,
            id: r.id,
            name: r.name,
            email: r.email,
            phone: r.phone,
            skills: r.skills,
            hourly_rate: r.hourly_rate,
            experience_years: r.experience_years,
            bio: r.bio,
            portfolio_url: r.portfolio_url,
            availability: r.availability,
            user_id: r.user_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewFreelancer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub experience_years: Option<i32>,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
    pub availability: Option<String>,
    pub status: FreelancerStatus,
    pub user_id: Option<Uuid>,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct FreelancerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<Vec<String>>,
    pub hourly_rate: Option<f64>,
    pub experience_years: Option<i32>,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
    pub availability: Option<String>,
    pub status: Option<FreelancerStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct FreelancerFilter {
    pub status: Option<FreelancerStatus>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
