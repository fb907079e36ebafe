use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::Error;

/// Hiring channel a posting belongs to. Decides the storage partition and
/// the public URL namespace; fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Internal,
    External,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Internal => "internal",
            Channel::External => "external",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Channel {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "internal" => Ok(Channel::Internal),
            "external" => Ok(Channel::External),
            other => Err(Error::BadRequest(format!(
                "Unknown hiring channel: {}",
                other
            ))),
        }
    }
}

// Accepts any casing on the wire, normalized to lowercase.
impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Draft,
    Open,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Open => "open",
            JobStatus::Closed => "closed",
        }
    }

    /// Transition rules: a posting never leaves `closed` through the exposed
    /// operations. Same-state writes are permitted (idempotent republish and
    /// close).
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        match (self, next) {
            (a, b) if a == b => true,
            (JobStatus::Draft, JobStatus::Open) => true,
            (JobStatus::Draft, JobStatus::Closed) => true,
            (JobStatus::Open, JobStatus::Closed) => true,
            (JobStatus::Open, JobStatus::Draft) => false,
            (JobStatus::Closed, _) => false,
            _ => false,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "draft" => Ok(JobStatus::Draft),
            "open" => Ok(JobStatus::Open),
            "closed" => Ok(JobStatus::Closed),
            other => Err(Error::BadRequest(format!("Unknown job status: {}", other))),
        }
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// Both enums live in TEXT columns; delegate the sqlx plumbing to &str.
macro_rules! text_column {
    ($ty:ty) => {
        impl sqlx::Type<sqlx::Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <&str as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> sqlx::encode::IsNull {
                <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let raw = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
                Ok(raw.parse()?)
            }
        }
    };
}

text_column!(Channel);
text_column!(JobStatus);

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
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

impl JobPosting {
    /// A posting without a posted date is a draft no matter what the status
    /// column says; only published postings are publicly resolvable.
    pub fn is_published(&self) -> bool {
        self.posted_date.is_some()
    }
}

/// Insert payload for the job store. Lifecycle fields are not part of it:
/// every posting is born as an unpublished draft.
#[derive(Debug, Clone)]
pub struct NewJob {
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
    pub created_by: Uuid,
}
