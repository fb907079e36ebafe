use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use crate::database::application_store::ApplicationStore;
use crate::database::job_store::JobStore;
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicantData, NewApplication, STATUS_APPLIED};
use crate::models::job::Channel;
use crate::services::document_service::DocumentStore;
use crate::utils::{time, validation};

pub struct ResumeUpload {
    pub filename: String,
    pub data: Bytes,
}

/// Everything a public submission carries. Fields stay optional here so the
/// service controls validation order: job resolution comes first, then
/// field checks, then the document requirement.
pub struct SubmitApplication {
    pub email: String,
    pub mobile: String,
    pub applicant_data: Option<ApplicantData>,
    pub resume: Option<ResumeUpload>,
}

#[derive(Clone)]
pub struct ApplicationService {
    jobs: Arc<dyn JobStore>,
    applications: Arc<dyn ApplicationStore>,
    documents: Arc<dyn DocumentStore>,
}

impl ApplicationService {
    pub fn new(
        jobs: Arc<dyn JobStore>,
        applications: Arc<dyn ApplicationStore>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            jobs,
            applications,
            documents,
        }
    }

    /// Public, unauthenticated intake. The job must exist (checked before
    /// anything else) and be published; the resume is stored before the
    /// record is written so a storage failure fails the whole submission.
    pub async fn submit(
        &self,
        channel: Channel,
        job_id: Uuid,
        submission: SubmitApplication,
    ) -> Result<Application> {
        let job = self
            .jobs
            .get(channel, job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job posting not found".to_string()))?;
        if !job.is_published() {
            return Err(Error::JobNotOpen);
        }

        validation::validate_email(&submission.email)?;
        validation::validate_mobile(&submission.mobile)?;

        let mut applicant_data = submission
            .applicant_data
            .ok_or_else(|| Error::BadRequest("application_data is required".to_string()))?;
        validation::require_field(&applicant_data.candidate_name, "candidate_name")?;
        validation::require_field(&applicant_data.total_experience, "total_experience")?;
        validation::require_field(&applicant_data.primary_skill, "primary_skill")?;

        // Frozen at this instant; later renames of the posting do not
        // rewrite what the candidate applied for.
        applicant_data.position_applied_for = job.job_title.clone();

        let resume = submission
            .resume
            .ok_or_else(|| Error::BadRequest("resume_file is required".to_string()))?;
        let resume_reference = self.documents.store(&resume.filename, &resume.data).await?;

        let application = self
            .applications
            .insert(NewApplication {
                job_type: channel,
                job_id,
                email: submission.email,
                mobile: submission.mobile,
                applicant_data,
                resume_reference,
                application_status: STATUS_APPLIED.to_string(),
                submitted_at: time::now(),
            })
            .await?;

        tracing::info!(
            application = %application.id,
            job = %job_id,
            channel = %channel,
            "application received"
        );
        Ok(application)
    }

    /// Staff-side review listing; the caller has already been authorized.
    pub async fn list_for_job(&self, channel: Channel, job_id: Uuid) -> Result<Vec<Application>> {
        self.jobs
            .get(channel, job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job posting not found".to_string()))?;
        self.applications.list_for_job(channel, job_id).await
    }
}
