use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::diff::JobPatch;
use crate::models::job::{Channel, JobPosting, JobStatus};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    pub job_id: Option<String>,
    pub job_type: Channel,
    #[validate(length(min = 1, message = "job_title is required"))]
    pub job_title: String,
    #[validate(length(min = 1, message = "experience is required"))]
    pub experience: String,
    #[validate(length(min = 1, message = "salary is required"))]
    pub salary: String,
    #[validate(length(min = 1, message = "job_location is required"))]
    pub job_location: String,
    #[validate(length(min = 1, message = "job_description is required"))]
    pub job_description: String,
    #[validate(length(min = 1, message = "key_skills must not be empty"))]
    pub key_skills: Vec<String>,
    #[validate(length(min = 1, message = "employment_type is required"))]
    pub employment_type: String,
    #[validate(length(min = 1, message = "work_mode is required"))]
    pub work_mode: String,
    #[validate(length(min = 1, message = "company_name is required"))]
    pub company_name: String,
    #[validate(length(min = 1, message = "company_location is required"))]
    pub company_location: String,
    #[validate(range(min = 1, message = "openings must be a positive number"))]
    pub openings: i32,
}

/// Mirrors the patchable field set exactly; channel and id travel in the
/// URL, never in the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, message = "job_title must not be empty"))]
    pub job_title: Option<String>,
    #[validate(length(min = 1, message = "experience must not be empty"))]
    pub experience: Option<String>,
    #[validate(length(min = 1, message = "salary must not be empty"))]
    pub salary: Option<String>,
    #[validate(length(min = 1, message = "job_location must not be empty"))]
    pub job_location: Option<String>,
    #[validate(length(min = 1, message = "job_description must not be empty"))]
    pub job_description: Option<String>,
    #[validate(length(min = 1, message = "key_skills must not be empty"))]
    pub key_skills: Option<Vec<String>>,
    #[validate(length(min = 1, message = "employment_type must not be empty"))]
    pub employment_type: Option<String>,
    #[validate(length(min = 1, message = "work_mode must not be empty"))]
    pub work_mode: Option<String>,
    #[validate(length(min = 1, message = "company_name must not be empty"))]
    pub company_name: Option<String>,
    #[validate(length(min = 1, message = "company_location must not be empty"))]
    pub company_location: Option<String>,
    #[validate(range(min = 1, message = "openings must be a positive number"))]
    pub openings: Option<i32>,
    pub posted_date: Option<NaiveDate>,
    pub job_status: Option<JobStatus>,
}

impl From<UpdateJobPayload> for JobPatch {
    fn from(value: UpdateJobPayload) -> Self {
        JobPatch {
            job_title: value.job_title,
            experience: value.experience,
            salary: value.salary,
            job_location: value.job_location,
            job_description: value.job_description,
            key_skills: value.key_skills,
            employment_type: value.employment_type,
            work_mode: value.work_mode,
            company_name: value.company_name,
            company_location: value.company_location,
            openings: value.openings,
            posted_date: value.posted_date,
            job_status: value.job_status,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishJobPayload {
    pub posted_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub job_id: Option<String>,
    pub job_type: Channel,
    pub job_title: String,
    pub experience: String,
    pub salary: String,
    pub job_location: String,
    pub job_description: String,
    pub key_skills: Vec<String>,
    pub employment_type: String,
    pub work_mode: String,
    pub company_name: String,
    pub company_location: String,
    pub openings: i32,
    pub job_status: JobStatus,
    pub posted_date: Option<NaiveDate>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobPosting> for JobResponse {
    fn from(value: JobPosting) -> Self {
        Self {
            id: value.id,
            job_id: value.job_id,
            job_type: value.job_type,
            job_title: value.job_title,
            experience: value.experience,
            salary: value.salary,
            job_location: value.job_location,
            job_description: value.job_description,
            key_skills: value.key_skills,
            employment_type: value.employment_type,
            work_mode: value.work_mode,
            company_name: value.company_name,
            company_location: value.company_location,
            openings: value.openings,
            job_status: value.job_status,
            posted_date: value.posted_date,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Projection served to unauthenticated viewers: enough to render the
/// posting and apply, none of the staff-side audit fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicJobResponse {
    pub id: Uuid,
    pub job_id: Option<String>,
    pub job_type: Channel,
    pub job_title: String,
    pub experience: String,
    pub salary: String,
    pub job_location: String,
    pub job_description: String,
    pub key_skills: Vec<String>,
    pub employment_type: String,
    pub work_mode: String,
    pub company_name: String,
    pub company_location: String,
    pub openings: i32,
    pub posted_date: Option<NaiveDate>,
}

impl From<JobPosting> for PublicJobResponse {
    fn from(value: JobPosting) -> Self {
        Self {
            id: value.id,
            job_id: value.job_id,
            job_type: value.job_type,
            job_title: value.job_title,
            experience: value.experience,
            salary: value.salary,
            job_location: value.job_location,
            job_description: value.job_description,
            key_skills: value.key_skills,
            employment_type: value.employment_type,
            work_mode: value.work_mode,
            company_name: value.company_name,
            company_location: value.company_location,
            openings: value.openings,
            posted_date: value.posted_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateJobResponse {
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<JobResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishJobResponse {
    pub job: JobResponse,
    pub public_url: String,
}
