use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::application::{Application, NewApplication};
use crate::models::job::Channel;

/// Application records are append-only from the store's point of view:
/// intake inserts them, staff review reads them back. Deliberately no
/// cascade from job deletion; orphaned applications are kept for audit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert(&self, application: NewApplication) -> Result<Application>;
    /// Submission order, stable across repeated reads.
    async fn list_for_job(&self, channel: Channel, job_id: Uuid) -> Result<Vec<Application>>;
}

const APPLICATION_COLUMNS: &str = "id, job_type, job_id, email, mobile, applicant_data, \
     resume_reference, application_status, submitted_at";

#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn insert(&self, application: NewApplication) -> Result<Application> {
        let sql = format!(
            "INSERT INTO applications (
                job_type, job_id, email, mobile, applicant_data,
                resume_reference, application_status, submitted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {APPLICATION_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Application>(&sql)
            .bind(application.job_type)
            .bind(application.job_id)
            .bind(application.email)
            .bind(application.mobile)
            .bind(sqlx::types::Json(application.applicant_data))
            .bind(application.resume_reference)
            .bind(application.application_status)
            .bind(application.submitted_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn list_for_job(&self, channel: Channel, job_id: Uuid) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications
             WHERE job_type = $1 AND job_id = $2
             ORDER BY submitted_at ASC, id ASC"
        );
        let applications = sqlx::query_as::<_, Application>(&sql)
            .bind(channel)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(applications)
    }
}
