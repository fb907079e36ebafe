use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::job::Channel;

pub const STATUS_APPLIED: &str = "applied";

/// Structured candidate payload, persisted as JSONB. All fields default so
/// that a sparse form still deserializes; the intake service decides which
/// of them are actually required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantData {
    pub candidate_name: String,
    /// Copy of the job title taken at submission time; intentionally frozen
    /// even if the posting is renamed later.
    pub position_applied_for: String,
    pub primary_skill: String,
    pub secondary_skills: Vec<String>,
    pub total_experience: String,
    pub current_company: Option<String>,
    pub current_location: Option<String>,
    pub preferred_location: Option<String>,
    pub current_ctc: Option<String>,
    pub expected_ctc: Option<String>,
    pub notice_period: Option<String>,
    pub source: Option<String>,
    pub expected_doj: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_type: Channel,
    pub job_id: Uuid,
    pub email: String,
    pub mobile: String,
    pub applicant_data: sqlx::types::Json<ApplicantData>,
    pub resume_reference: String,
    pub application_status: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_type: Channel,
    pub job_id: Uuid,
    pub email: String,
    pub mobile: String,
    pub applicant_data: ApplicantData,
    pub resume_reference: String,
    pub application_status: String,
    pub submitted_at: DateTime<Utc>,
}
