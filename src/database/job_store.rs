use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::diff::JobPatch;
use crate::error::Result;
use crate::models::job::{Channel, JobPosting, NewJob};

/// Durable storage of job postings, partitioned by channel. An id is only
/// meaningful together with its channel; a cross-channel lookup misses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn get(&self, channel: Channel, id: Uuid) -> Result<Option<JobPosting>>;
    /// Newest first, stable across immediately repeated reads.
    async fn list(&self, channel: Channel) -> Result<Vec<JobPosting>>;
    async fn insert(&self, job: NewJob) -> Result<JobPosting>;
    /// Write exactly the populated fields of `patch` in a single statement.
    async fn apply(&self, channel: Channel, id: Uuid, patch: &JobPatch)
        -> Result<Option<JobPosting>>;
    async fn delete(&self, channel: Channel, id: Uuid) -> Result<bool>;
}

const JOB_COLUMNS: &str = "id, job_id, job_type, job_title, experience, salary, job_location, \
     job_description, key_skills, employment_type, work_mode, company_name, company_location, \
     openings, job_status, posted_date, created_by, created_at, updated_at";

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn get(&self, channel: Channel, id: Uuid) -> Result<Option<JobPosting>> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE job_type = $1 AND id = $2");
        let job = sqlx::query_as::<_, JobPosting>(&sql)
            .bind(channel)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn list(&self, channel: Channel) -> Result<Vec<JobPosting>> {
        let sql = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE job_type = $1 ORDER BY created_at DESC, id DESC"
        );
        let jobs = sqlx::query_as::<_, JobPosting>(&sql)
            .bind(channel)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn insert(&self, job: NewJob) -> Result<JobPosting> {
        let sql = format!(
            "INSERT INTO jobs (
                job_id, job_type, job_title, experience, salary, job_location,
                job_description, key_skills, employment_type, work_mode,
                company_name, company_location, openings, job_status, posted_date, created_by
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 'draft', NULL, $14
            )
            RETURNING {JOB_COLUMNS}"
        );
        let created = sqlx::query_as::<_, JobPosting>(&sql)
            .bind(job.job_id)
            .bind(job.job_type)
            .bind(job.job_title)
            .bind(job.experience)
            .bind(job.salary)
            .bind(job.job_location)
            .bind(job.job_description)
            .bind(job.key_skills)
            .bind(job.employment_type)
            .bind(job.work_mode)
            .bind(job.company_name)
            .bind(job.company_location)
            .bind(job.openings)
            .bind(job.created_by)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn apply(
        &self,
        channel: Channel,
        id: Uuid,
        patch: &JobPatch,
    ) -> Result<Option<JobPosting>> {
        // SET clause assembled field by field; bind order below mirrors the
        // field order here exactly. $1/$2 are the routing parameters.
        let mut sets: Vec<String> = Vec::new();
        if patch.job_title.is_some() {
            sets.push(format!("job_title = ${}", sets.len() + 3));
        }
        if patch.experience.is_some() {
            sets.push(format!("experience = ${}", sets.len() + 3));
        }
        if patch.salary.is_some() {
            sets.push(format!("salary = ${}", sets.len() + 3));
        }
        if patch.job_location.is_some() {
            sets.push(format!("job_location = ${}", sets.len() + 3));
        }
        if patch.job_description.is_some() {
            sets.push(format!("job_description = ${}", sets.len() + 3));
        }
        if patch.key_skills.is_some() {
            sets.push(format!("key_skills = ${}", sets.len() + 3));
        }
        if patch.employment_type.is_some() {
            sets.push(format!("employment_type = ${}", sets.len() + 3));
        }
        if patch.work_mode.is_some() {
            sets.push(format!("work_mode = ${}", sets.len() + 3));
        }
        if patch.company_name.is_some() {
            sets.push(format!("company_name = ${}", sets.len() + 3));
        }
        if patch.company_location.is_some() {
            sets.push(format!("company_location = ${}", sets.len() + 3));
        }
        if patch.openings.is_some() {
            sets.push(format!("openings = ${}", sets.len() + 3));
        }
        if patch.posted_date.is_some() {
            sets.push(format!("posted_date = ${}", sets.len() + 3));
        }
        if patch.job_status.is_some() {
            sets.push(format!("job_status = ${}", sets.len() + 3));
        }

        if sets.is_empty() {
            return self.get(channel, id).await;
        }
        sets.push("updated_at = NOW()".to_string());

        let sql = format!(
            "UPDATE jobs SET {} WHERE job_type = $1 AND id = $2 RETURNING {JOB_COLUMNS}",
            sets.join(", ")
        );

        let mut query = sqlx::query_as::<_, JobPosting>(&sql).bind(channel).bind(id);
        if let Some(v) = &patch.job_title {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &patch.experience {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &patch.salary {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &patch.job_location {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &patch.job_description {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &patch.key_skills {
            query = query.bind(v.clone());
        }
        if let Some(v) = &patch.employment_type {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &patch.work_mode {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &patch.company_name {
            query = query.bind(v.as_str());
        }
        if let Some(v) = &patch.company_location {
            query = query.bind(v.as_str());
        }
        if let Some(v) = patch.openings {
            query = query.bind(v);
        }
        if let Some(v) = patch.posted_date {
            query = query.bind(v);
        }
        if let Some(v) = patch.job_status {
            query = query.bind(v);
        }

        let updated = query.fetch_optional(&self.pool).await?;
        Ok(updated)
    }

    async fn delete(&self, channel: Channel, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE job_type = $1 AND id = $2")
            .bind(channel)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
