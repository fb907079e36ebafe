use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::job_store::JobStore;
use crate::diff::{self, JobPatch};
use crate::dto::job_dto::CreateJobPayload;
use crate::error::{Error, Result};
use crate::models::job::{Channel, JobPosting, JobStatus, NewJob};
use crate::utils::time;

/// Result of a diff-based update. An empty diff is a benign outcome, not a
/// failure; callers surface it distinctly instead of writing.
pub enum UpdateOutcome {
    Changed(JobPosting),
    NoChanges(JobPosting),
}

#[derive(Clone)]
pub struct JobService {
    jobs: Arc<dyn JobStore>,
}

impl JobService {
    pub fn new(jobs: Arc<dyn JobStore>) -> Self {
        Self { jobs }
    }

    /// Every posting starts life as an unpublished draft, stamped with the
    /// creating actor. Client-supplied lifecycle fields are not accepted.
    pub async fn create(&self, payload: CreateJobPayload, actor: Uuid) -> Result<JobPosting> {
        let job = self
            .jobs
            .insert(NewJob {
                job_id: payload.job_id,
                job_type: payload.job_type,
                job_title: payload.job_title,
                experience: payload.experience,
                salary: payload.salary,
                job_location: payload.job_location,
                job_description: payload.job_description,
                key_skills: payload.key_skills,
                employment_type: payload.employment_type,
                work_mode: payload.work_mode,
                company_name: payload.company_name,
                company_location: payload.company_location,
                openings: payload.openings,
                created_by: actor,
            })
            .await?;

        tracing::info!(job = %job.id, channel = %job.job_type, "job posting created");
        Ok(job)
    }

    pub async fn get(&self, channel: Channel, id: Uuid) -> Result<JobPosting> {
        self.jobs
            .get(channel, id)
            .await?
            .ok_or_else(|| Error::NotFound("Job posting not found".to_string()))
    }

    pub async fn list(&self, channel: Channel) -> Result<Vec<JobPosting>> {
        self.jobs.list(channel).await
    }

    pub async fn update(
        &self,
        channel: Channel,
        id: Uuid,
        candidate: JobPatch,
    ) -> Result<UpdateOutcome> {
        let current = self.get(channel, id).await?;

        let diff = diff::diff(&current, &candidate);
        if diff.is_empty() {
            return Ok(UpdateOutcome::NoChanges(current));
        }
        if let Some(next) = diff.patch.job_status {
            if !current.job_status.can_transition_to(next) {
                return Err(Error::BadRequest(format!(
                    "Cannot move job from {} to {}",
                    current.job_status, next
                )));
            }
        }

        let updated = self
            .jobs
            .apply(channel, id, &diff.patch)
            .await?
            .ok_or_else(|| Error::NotFound("Job posting not found".to_string()))?;

        tracing::info!(
            job = %updated.id,
            channel = %channel,
            fields = ?diff.changed_names(),
            "job posting updated"
        );
        Ok(UpdateOutcome::Changed(updated))
    }

    /// Publication is an update of exactly {posted_date, status=open}.
    /// Republishing with the same date is a no-op; a different date simply
    /// advances the posted date.
    pub async fn publish(
        &self,
        channel: Channel,
        id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<JobPosting> {
        let current = self.get(channel, id).await?;
        if current.job_status == JobStatus::Closed {
            return Err(Error::BadRequest(
                "A closed job cannot be published".to_string(),
            ));
        }

        let patch = JobPatch {
            posted_date: Some(date.unwrap_or_else(time::today)),
            job_status: Some(JobStatus::Open),
            ..Default::default()
        };
        let diff = diff::diff(&current, &patch);
        if diff.is_empty() {
            return Ok(current);
        }

        let published = self
            .jobs
            .apply(channel, id, &diff.patch)
            .await?
            .ok_or_else(|| Error::NotFound("Job posting not found".to_string()))?;

        tracing::info!(
            job = %published.id,
            channel = %channel,
            posted_date = ?published.posted_date,
            "job posting published"
        );
        Ok(published)
    }

    pub async fn close(&self, channel: Channel, id: Uuid) -> Result<JobPosting> {
        let patch = JobPatch {
            job_status: Some(JobStatus::Closed),
            ..Default::default()
        };
        match self.update(channel, id, patch).await? {
            UpdateOutcome::Changed(job) | UpdateOutcome::NoChanges(job) => Ok(job),
        }
    }

    /// Hard removal, terminal. Applications submitted against the job are
    /// kept (audit trail).
    pub async fn delete(&self, channel: Channel, id: Uuid) -> Result<()> {
        if !self.jobs.delete(channel, id).await? {
            return Err(Error::NotFound("Job posting not found".to_string()));
        }
        tracing::info!(job = %id, channel = %channel, "job posting deleted");
        Ok(())
    }
}
