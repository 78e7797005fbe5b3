//! In-process store used by the test suite.

use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::{
        repo::UserStore,
        repo_types::{NewUser, Role, User},
    },
    freelancers::{
        repo::FreelancerStore,
        repo_types::{Freelancer, FreelancerFilter, FreelancerPatch, FreelancerStatus, NewFreelancer},
    },
    reports::{
        repo::ReportStore,
        repo_types::{NewReport, Report, ReportKind},
    },
    settings::{
        repo::SettingStore,
        repo_types::{Setting, SettingUpsert},
    },
};

/// Rows are kept in insertion order; "newest first" means reverse iteration.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    freelancers: Mutex<Vec<Freelancer>>,
    reports: Mutex<Vec<Report>>,
    settings: Mutex<BTreeMap<String, Setting>>,
}

fn matches(filter: &FreelancerFilter, f: &Freelancer) -> bool {
    if filter.status.is_some_and(|s| s != f.status) {
        return false;
    }
    match &filter.search {
        None => true,
        Some(term) => {
            let needle = term.to_lowercase();
            f.name.to_lowercase().contains(&needle)
                || f.email.to_lowercase().contains(&needle)
                || f.skills.iter().any(|s| s == term)
        }
    }
}

fn apply(patch: FreelancerPatch, f: &mut Freelancer) {
    if let Some(v) = patch.name {
        f.name = v;
    }
    if let Some(v) = patch.email {
        f.email = v;
    }
    if let Some(v) = patch.skills {
        f.skills = v;
    }
    if let Some(v) = patch.status {
        f.status = v;
    }
    f.phone = patch.phone.or(f.phone.take());
    f.hourly_rate = patch.hourly_rate.or(f.hourly_rate);
    f.experience_years = patch.experience_years.or(f.experience_years);
    f.bio = patch.bio.or(f.bio.take());
    f.portfolio_url = patch.portfolio_url.or(f.portfolio_url.take());
    f.availability = patch.availability.or(f.availability.take());
    f.updated_at = OffsetDateTime::now_utc();
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new: NewUser<'_>) -> anyhow::Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new.email) {
            return Ok(None);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new.email.to_string(),
            password_hash: new.password_hash.to_string(),
            full_name: new.full_name.to_string(),
            role: new.role,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(Some(user))
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().rev().cloned().collect())
    }

    async fn set_role(&self, id: Uuid, role: Role) -> anyhow::Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.role = role;
            u.clone()
        }))
    }

    async fn count(&self) -> anyhow::Result<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl FreelancerStore for MemoryStore {
    async fn list(&self, filter: &FreelancerFilter) -> anyhow::Result<(Vec<Freelancer>, i64)> {
        let all = self.freelancers.lock().unwrap();
        let hits: Vec<&Freelancer> = all.iter().rev().filter(|f| matches(filter, f)).collect();
        let total = hits.len() as i64;
        let page = hits
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Freelancer>> {
        let all = self.freelancers.lock().unwrap();
        Ok(all.iter().find(|f| f.id == id).cloned())
    }

    async fn create(&self, new: NewFreelancer) -> anyhow::Result<Freelancer> {
        let now = OffsetDateTime::now_utc();
        let f = Freelancer {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            skills: new.skills,
            hourly_rate: new.hourly_rate,
            experience_years: new.experience_years,
            bio: new.bio,
            portfolio_url: new.portfolio_url,
            availability: new.availability,
            status: new.status,
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
        };
        self.freelancers.lock().unwrap().push(f.clone());
        Ok(f)
    }

    async fn update(&self, id: Uuid, patch: FreelancerPatch) -> anyhow::Result<Option<Freelancer>> {
        let mut all = self.freelancers.lock().unwrap();
        Ok(all.iter_mut().find(|f| f.id == id).map(|f| {
            apply(patch, f);
            f.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut all = self.freelancers.lock().unwrap();
        let before = all.len();
        all.retain(|f| f.id != id);
        Ok(all.len() != before)
    }

    async fn count_by_status(&self) -> anyhow::Result<BTreeMap<FreelancerStatus, i64>> {
        let all = self.freelancers.lock().unwrap();
        let mut out = BTreeMap::new();
        for f in all.iter() {
            *out.entry(f.status).or_insert(0) += 1;
        }
        Ok(out)
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn list(&self, kind: Option<ReportKind>, limit: i64) -> anyhow::Result<Vec<Report>> {
        let all = self.reports.lock().unwrap();
        Ok(all
            .iter()
            .rev()
            .filter(|r| kind.map_or(true, |k| r.kind == k))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Report>> {
        let all = self.reports.lock().unwrap();
        Ok(all.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, new: NewReport) -> anyhow::Result<Report> {
        let report = Report {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            kind: new.kind,
            data: new.data,
            created_by: new.created_by,
            created_at: OffsetDateTime::now_utc(),
        };
        self.reports.lock().unwrap().push(report.clone());
        Ok(report)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut all = self.reports.lock().unwrap();
        let before = all.len();
        all.retain(|r| r.id != id);
        Ok(all.len() != before)
    }

    async fn count(&self) -> anyhow::Result<i64> {
        Ok(self.reports.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl SettingStore for MemoryStore {
    async fn list(&self) -> anyhow::Result<Vec<Setting>> {
        Ok(self.settings.lock().unwrap().values().cloned().collect())
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<Setting>> {
        Ok(self.settings.lock().unwrap().get(key).cloned())
    }

    async fn upsert(&self, upsert: SettingUpsert) -> anyhow::Result<Setting> {
        let mut all = self.settings.lock().unwrap();
        let description = upsert
            .description
            .or_else(|| all.get(&upsert.key).and_then(|s| s.description.clone()));
        let setting = Setting {
            key: upsert.key.clone(),
            value: upsert.value,
            description,
            updated_by: Some(upsert.updated_by),
            updated_at: OffsetDateTime::now_utc(),
        };
        all.insert(upsert.key, setting.clone());
        Ok(setting)
    }

    async fn delete(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.settings.lock().unwrap().remove(key).is_some())
    }
}
