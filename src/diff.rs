//! Change-set computation for job-posting updates.
//!
//! Edits arrive as a sparse candidate value set and are reduced to the
//! subset of allow-listed fields that structurally differ from the stored
//! record. An empty change set means the update is a no-op and the caller
//! short-circuits without touching the store.

use chrono::NaiveDate;

use crate::models::job::{JobPosting, JobStatus};

/// The fixed set of patchable fields. `JobPatch` mirrors this list one
/// field per variant, so a new patchable field cannot appear in one place
/// without the other. Channel and id are routing parameters, not fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchField {
    JobTitle,
    Experience,
    Salary,
    JobLocation,
    JobDescription,
    KeySkills,
    EmploymentType,
    WorkMode,
    CompanyName,
    CompanyLocation,
    Openings,
    PostedDate,
    JobStatus,
}

pub const PATCHABLE_FIELDS: [PatchField; 13] = [
    PatchField::JobTitle,
    PatchField::Experience,
    PatchField::Salary,
    PatchField::JobLocation,
    PatchField::JobDescription,
    PatchField::KeySkills,
    PatchField::EmploymentType,
    PatchField::WorkMode,
    PatchField::CompanyName,
    PatchField::CompanyLocation,
    PatchField::Openings,
    PatchField::PostedDate,
    PatchField::JobStatus,
];

impl PatchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchField::JobTitle => "job_title",
            PatchField::Experience => "experience",
            PatchField::Salary => "salary",
            PatchField::JobLocation => "job_location",
            PatchField::JobDescription => "job_description",
            PatchField::KeySkills => "key_skills",
            PatchField::EmploymentType => "employment_type",
            PatchField::WorkMode => "work_mode",
            PatchField::CompanyName => "company_name",
            PatchField::CompanyLocation => "company_location",
            PatchField::Openings => "openings",
            PatchField::PostedDate => "posted_date",
            PatchField::JobStatus => "job_status",
        }
    }
}

/// Sparse field set: `None` means "not submitted", never "clear the value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPatch {
    pub job_title: Option<String>,
    pub experience: Option<String>,
    pub salary: Option<String>,
    pub job_location: Option<String>,
    pub job_description: Option<String>,
    pub key_skills: Option<Vec<String>>,
    pub employment_type: Option<String>,
    pub work_mode: Option<String>,
    pub company_name: Option<String>,
    pub company_location: Option<String>,
    pub openings: Option<i32>,
    pub posted_date: Option<NaiveDate>,
    pub job_status: Option<JobStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct JobDiff {
    pub patch: JobPatch,
    pub changed: Vec<PatchField>,
}

impl JobDiff {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    pub fn changed_names(&self) -> Vec<&'static str> {
        self.changed.iter().map(PatchField::as_str).collect()
    }
}

/// Reduce `candidate` to the fields whose values differ from `current`.
/// Collections are compared structurally (element by element), dates and
/// numbers by value.
pub fn diff(current: &JobPosting, candidate: &JobPatch) -> JobDiff {
    let mut patch = JobPatch::default();
    let mut changed = Vec::new();

    if let Some(v) = &candidate.job_title {
        if *v != current.job_title {
            patch.job_title = Some(v.clone());
            changed.push(PatchField::JobTitle);
        }
    }
    if let Some(v) = &candidate.experience {
        if *v != current.experience {
            patch.experience = Some(v.clone());
            changed.push(PatchField::Experience);
        }
    }
    if let Some(v) = &candidate.salary {
        if *v != current.salary {
            patch.salary = Some(v.clone());
            changed.push(PatchField::Salary);
        }
    }
    if let Some(v) = &candidate.job_location {
        if *v != current.job_location {
            patch.job_location = Some(v.clone());
            changed.push(PatchField::JobLocation);
        }
    }
    if let Some(v) = &candidate.job_description {
        if *v != current.job_description {
            patch.job_description = Some(v.clone());
            changed.push(PatchField::JobDescription);
        }
    }
    if let Some(v) = &candidate.key_skills {
        if *v != current.key_skills {
            patch.key_skills = Some(v.clone());
            changed.push(PatchField::KeySkills);
        }
    }
    if let Some(v) = &candidate.employment_type {
        if *v != current.employment_type {
            patch.employment_type = Some(v.clone());
            changed.push(PatchField::EmploymentType);
        }
    }
    if let Some(v) = &candidate.work_mode {
        if *v != current.work_mode {
            patch.work_mode = Some(v.clone());
            changed.push(PatchField::WorkMode);
        }
    }
    if let Some(v) = &candidate.company_name {
        if *v != current.company_name {
            patch.company_name = Some(v.clone());
            changed.push(PatchField::CompanyName);
        }
    }
    if let Some(v) = &candidate.company_location {
        if *v != current.company_location {
            patch.company_location = Some(v.clone());
            changed.push(PatchField::CompanyLocation);
        }
    }
    if let Some(v) = candidate.openings {
        if v != current.openings {
            patch.openings = Some(v);
            changed.push(PatchField::Openings);
        }
    }
    if let Some(v) = candidate.posted_date {
        if current.posted_date != Some(v) {
            patch.posted_date = Some(v);
            changed.push(PatchField::PostedDate);
        }
    }
    if let Some(v) = candidate.job_status {
        if v != current.job_status {
            patch.job_status = Some(v);
            changed.push(PatchField::JobStatus);
        }
    }

    JobDiff { patch, changed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::Channel;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_job() -> JobPosting {
        JobPosting {
            id: Uuid::new_v4(),
            job_id: Some("ENG-042".to_string()),
            job_type: Channel::Internal,
            job_title: "Backend Engineer".to_string(),
            experience: "2-4 Years".to_string(),
            salary: "$100k - $120k".to_string(),
            job_location: "Hyderabad".to_string(),
            job_description: "Build services".to_string(),
            key_skills: vec!["Rust".to_string(), "Postgres".to_string()],
            employment_type: "Full-time".to_string(),
            work_mode: "Remote".to_string(),
            company_name: "TechCorp".to_string(),
            company_location: "USA".to_string(),
            openings: 2,
            job_status: JobStatus::Draft,
            posted_date: None,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn full_patch_of(job: &JobPosting) -> JobPatch {
        JobPatch {
            job_title: Some(job.job_title.clone()),
            experience: Some(job.experience.clone()),
            salary: Some(job.salary.clone()),
            job_location: Some(job.job_location.clone()),
            job_description: Some(job.job_description.clone()),
            key_skills: Some(job.key_skills.clone()),
            employment_type: Some(job.employment_type.clone()),
            work_mode: Some(job.work_mode.clone()),
            company_name: Some(job.company_name.clone()),
            company_location: Some(job.company_location.clone()),
            openings: Some(job.openings),
            posted_date: job.posted_date,
            job_status: Some(job.job_status),
        }
    }

    #[test]
    fn identical_candidate_yields_empty_diff() {
        let job = sample_job();
        let result = diff(&job, &full_patch_of(&job));
        assert!(result.is_empty());
    }

    #[test]
    fn empty_candidate_yields_empty_diff() {
        let job = sample_job();
        let result = diff(&job, &JobPatch::default());
        assert!(result.is_empty());
    }

    #[test]
    fn single_field_change_is_isolated() {
        let job = sample_job();
        let mut candidate = full_patch_of(&job);
        candidate.job_title = Some("Senior Backend Engineer".to_string());

        let result = diff(&job, &candidate);
        assert_eq!(result.changed, vec![PatchField::JobTitle]);
        assert_eq!(
            result.patch.job_title.as_deref(),
            Some("Senior Backend Engineer")
        );
        assert!(result.patch.experience.is_none());
    }

    #[test]
    fn key_skills_compare_structurally_not_by_identity() {
        let job = sample_job();

        // Equal content in a freshly-built vector: not a change.
        let same = JobPatch {
            key_skills: Some(vec!["Rust".to_string(), "Postgres".to_string()]),
            ..Default::default()
        };
        assert!(diff(&job, &same).is_empty());

        // Order matters: key_skills is an ordered set.
        let reordered = JobPatch {
            key_skills: Some(vec!["Postgres".to_string(), "Rust".to_string()]),
            ..Default::default()
        };
        let result = diff(&job, &reordered);
        assert_eq!(result.changed, vec![PatchField::KeySkills]);
    }

    #[test]
    fn posted_date_change_is_detected_against_null() {
        let job = sample_job();
        let candidate = JobPatch {
            posted_date: Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
            ..Default::default()
        };
        let result = diff(&job, &candidate);
        assert_eq!(result.changed, vec![PatchField::PostedDate]);

        let mut published = job;
        published.posted_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert!(diff(&published, &candidate).is_empty());
    }

    #[test]
    fn openings_and_status_compare_by_value() {
        let job = sample_job();
        let candidate = JobPatch {
            openings: Some(2),
            job_status: Some(JobStatus::Draft),
            ..Default::default()
        };
        assert!(diff(&job, &candidate).is_empty());

        let candidate = JobPatch {
            openings: Some(3),
            job_status: Some(JobStatus::Open),
            ..Default::default()
        };
        let result = diff(&job, &candidate);
        assert_eq!(
            result.changed,
            vec![PatchField::Openings, PatchField::JobStatus]
        );
    }

    #[test]
    fn allow_list_and_patch_stay_in_sync() {
        // Every allow-listed field must be expressible in a patch; the
        // count pins the two representations together.
        assert_eq!(PATCHABLE_FIELDS.len(), 13);
        let names = PATCHABLE_FIELDS.map(|f| f.as_str());
        assert!(names.contains(&"job_title"));
        assert!(names.contains(&"posted_date"));
        assert!(!names.contains(&"job_type"));
        assert!(!names.contains(&"created_by"));
    }
}
