use serde::{Deserialize, Serialize};

use super::repo_types::{Freelancer, FreelancerPatch, FreelancerStatus, NewFreelancer};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct FreelancerPage {
    pub data: Vec<Freelancer>,
    pub count: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateFreelancerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(alias = "hourlyRate")]
    pub hourly_rate: Option<f64>,
    #[serde(alias = "experienceYears")]
    pub experience_years: Option<i32>,
    pub bio: Option<String>,
    #[serde(alias = "portfolioUrl")]
    pub portfolio_url: Option<String>,
    pub availability: Option<String>,
    pub status: Option<FreelancerStatus>,
}

impl CreateFreelancerRequest {
    pub fn into_new(self, owner: uuid::Uuid) -> NewFreelancer {
        NewFreelancer {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone,
            skills: clean_skills(self.skills),
            hourly_rate: self.hourly_rate,
            experience_years: self.experience_years,
            bio: self.bio,
            portfolio_url: self.portfolio_url,
            availability: self.availability,
            status: self.status.unwrap_or(FreelancerStatus::Active),
            user_id: Some(owner),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFreelancerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<Vec<String>>,
    #[serde(alias = "hourlyRate")]
    pub hourly_rate: Option<f64>,
    #[serde(alias = "experienceYears")]
    pub experience_years: Option<i32>,
    pub bio: Option<String>,
    #[serde(alias = "portfolioUrl")]
    pub portfolio_url: Option<String>,
    pub availability: Option<String>,
    pub status: Option<FreelancerStatus>,
}

impl From<UpdateFreelancerRequest> for FreelancerPatch {
    fn from(r: UpdateFreelancerRequest) -> Self {
        Self {
            name: r.name.map(|s| s.trim().to_string()),
            email: r.email.map(|s| s.trim().to_string()),
            phone: r.phone,
            skills: r.skills.map(clean_skills),
            hourly_rate: r.hourly_rate,
            experience_years: r.experience_years,
            bio: r.bio,
            portfolio_url: r.portfolio_url,
            availability: r.availability,
            status: r.status,
        }
    }
}

/// Trims entries and drops the blank ones the form leaves behind.
fn clean_skills(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
