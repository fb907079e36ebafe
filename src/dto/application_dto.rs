use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::application::{ApplicantData, Application};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitApplicationResponse {
    pub id: Uuid,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub email: String,
    pub mobile: String,
    pub applicant_data: ApplicantData,
    pub application_status: String,
    pub resume_link: String,
    pub submitted_at: DateTime<Utc>,
}

impl ApplicationResponse {
    pub fn from_record(record: Application, resume_link: String) -> Self {
        Self {
            id: record.id,
            email: record.email,
            mobile: record.mobile,
            applicant_data: record.applicant_data.0,
            application_status: record.application_status,
            resume_link,
            submitted_at: record.submitted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub items: Vec<ApplicationResponse>,
}
