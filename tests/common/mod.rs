// Shared between the API test binaries; not every helper is used by both.
#![allow(dead_code)]

use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response, StatusCode},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use uuid::Uuid;

use careers_backend::database::application_store::ApplicationStore;
use careers_backend::database::job_store::JobStore;
use careers_backend::diff::JobPatch;
use careers_backend::error::{Error, Result};
use careers_backend::middleware::auth::Claims;
use careers_backend::models::application::{Application, NewApplication};
use careers_backend::models::job::{Channel, JobPosting, JobStatus, NewJob};
use careers_backend::services::document_service::{self, DocumentStore};
use careers_backend::{middleware, routes, AppState};

pub const JWT_SECRET: &str = "test_secret_key";
pub const BASE_URL: &str = "http://testserver";

pub fn init_test_config() {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://unused/test");
    env::set_var("JWT_SECRET", JWT_SECRET);
    env::set_var("RESUME_LINK_SECRET", "link_secret");
    env::set_var("PUBLIC_BASE_URL", BASE_URL);
    env::set_var("STAFF_RPS", "1000");
    env::set_var("PUBLIC_RPS", "1000");
    // Other test binaries in the process may have initialized it already.
    let _ = careers_backend::config::init_config();
}

#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: Mutex<Vec<JobPosting>>,
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn get(&self, channel: Channel, id: Uuid) -> Result<Option<JobPosting>> {
        let guard = self.jobs.lock().unwrap();
        Ok(guard
            .iter()
            .find(|j| j.job_type == channel && j.id == id)
            .cloned())
    }

    async fn list(&self, channel: Channel) -> Result<Vec<JobPosting>> {
        let guard = self.jobs.lock().unwrap();
        let mut items: Vec<_> = guard
            .iter()
            .filter(|j| j.job_type == channel)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn insert(&self, job: NewJob) -> Result<JobPosting> {
        let now = Utc::now();
        let posting = JobPosting {
            id: Uuid::new_v4(),
            job_id: job.job_id,
            job_type: job.job_type,
            job_title: job.job_title,
            experience: job.experience,
            salary: job.salary,
            job_location: job.job_location,
            job_description: job.job_description,
            key_skills: job.key_skills,
            employment_type: job.employment_type,
            work_mode: job.work_mode,
            company_name: job.company_name,
            company_location: job.company_location,
            openings: job.openings,
            job_status: JobStatus::Draft,
            posted_date: None,
            created_by: job.created_by,
            created_at: now,
            updated_at: now,
        };
        self.jobs.lock().unwrap().push(posting.clone());
        Ok(posting)
    }

    async fn apply(
        &self,
        channel: Channel,
        id: Uuid,
        patch: &JobPatch,
    ) -> Result<Option<JobPosting>> {
        let mut guard = self.jobs.lock().unwrap();
        let Some(job) = guard
            .iter_mut()
            .find(|j| j.job_type == channel && j.id == id)
        else {
            return Ok(None);
        };
        if let Some(v) = &patch.job_title {
            job.job_title = v.clone();
        }
        if let Some(v) = &patch.experience {
            job.experience = v.clone();
        }
        if let Some(v) = &patch.salary {
            job.salary = v.clone();
        }
        if let Some(v) = &patch.job_location {
            job.job_location = v.clone();
        }
        if let Some(v) = &patch.job_description {
            job.job_description = v.clone();
        }
        if let Some(v) = &patch.key_skills {
            job.key_skills = v.clone();
        }
        if let Some(v) = &patch.employment_type {
            job.employment_type = v.clone();
        }
        if let Some(v) = &patch.work_mode {
            job.work_mode = v.clone();
        }
        if let Some(v) = &patch.company_name {
            job.company_name = v.clone();
        }
        if let Some(v) = &patch.company_location {
            job.company_location = v.clone();
        }
        if let Some(v) = patch.openings {
            job.openings = v;
        }
        if let Some(v) = patch.posted_date {
            job.posted_date = Some(v);
        }
        if let Some(v) = patch.job_status {
            job.job_status = v;
        }
        job.updated_at = Utc::now();
        Ok(Some(job.clone()))
    }

    async fn delete(&self, channel: Channel, id: Uuid) -> Result<bool> {
        let mut guard = self.jobs.lock().unwrap();
        let before = guard.len();
        guard.retain(|j| !(j.job_type == channel && j.id == id));
        Ok(guard.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryApplicationStore {
    applications: Mutex<Vec<Application>>,
}

impl InMemoryApplicationStore {
    pub fn count(&self) -> usize {
        self.applications.lock().unwrap().len()
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn insert(&self, application: NewApplication) -> Result<Application> {
        let record = Application {
            id: Uuid::new_v4(),
            job_type: application.job_type,
            job_id: application.job_id,
            email: application.email,
            mobile: application.mobile,
            applicant_data: sqlx::types::Json(application.applicant_data),
            resume_reference: application.resume_reference,
            application_status: application.application_status,
            submitted_at: application.submitted_at,
        };
        self.applications.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_for_job(&self, channel: Channel, job_id: Uuid) -> Result<Vec<Application>> {
        let guard = self.applications.lock().unwrap();
        let mut items: Vec<_> = guard
            .iter()
            .filter(|a| a.job_type == channel && a.job_id == job_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at).then(a.id.cmp(&b.id)));
        Ok(items)
    }
}

#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<HashMap<String, Bytes>>,
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn store(&self, filename: &str, data: &Bytes) -> Result<String> {
        let ext = document_service::validate_resume_file(filename, data)?;
        let reference = format!("{}.{}", Uuid::new_v4(), ext);
        self.documents
            .lock()
            .unwrap()
            .insert(reference.clone(), data.clone());
        Ok(reference)
    }

    async fn retrieve(&self, reference: &str) -> Result<Bytes> {
        self.documents
            .lock()
            .unwrap()
            .get(reference)
            .cloned()
            .ok_or_else(|| Error::NotFound("Document not found".to_string()))
    }
}

pub struct TestHarness {
    pub app: Router,
    pub applications: Arc<InMemoryApplicationStore>,
}

/// Same route table and layers as the production router, backed by the
/// in-memory stores above.
pub fn test_harness() -> TestHarness {
    init_test_config();

    let jobs = Arc::new(InMemoryJobStore::default());
    let applications = Arc::new(InMemoryApplicationStore::default());
    let documents = Arc::new(InMemoryDocumentStore::default());
    let state = AppState::with_stores(jobs, applications.clone(), documents);

    let staff_api = Router::new()
        .route("/api/careers/jobs", post(routes::jobs::create_job))
        .route("/api/careers/jobs/:channel", get(routes::jobs::list_jobs))
        .route(
            "/api/careers/jobs/:channel/:id",
            get(routes::jobs::get_job)
                .patch(routes::jobs::update_job)
                .delete(routes::jobs::delete_job),
        )
        .route(
            "/api/careers/jobs/:channel/:id/publish",
            post(routes::jobs::publish_job),
        )
        .route(
            "/api/careers/jobs/:channel/:id/close",
            post(routes::jobs::close_job),
        )
        .route(
            "/api/careers/jobs/:channel/:id/applications",
            get(routes::applications::list_applications),
        )
        .route(
            "/api/careers/jobs/:channel/:id/applications/export",
            get(routes::applications::export_applications),
        )
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(1000),
            middleware::rate_limit::rps_middleware,
        ));

    let public_api = Router::new()
        .route(
            "/api/public/jobs/:channel/:id",
            get(routes::public::get_public_job),
        )
        .route(
            "/api/public/jobs/:channel/:id/apply",
            post(routes::public::submit_application),
        )
        .route(
            "/api/public/resumes/:reference",
            get(routes::public::download_resume),
        )
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(1000),
            middleware::rate_limit::rps_middleware,
        ));

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(staff_api)
        .merge(public_api)
        .with_state(state);

    TestHarness { app, applications }
}

pub fn token_for_role(role: &str) -> String {
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: 4102444800, // 2100-01-01
        role: Some(role.to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("token encodes")
}

pub fn staff_token() -> String {
    token_for_role("hr")
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> JsonValue {
    let bytes = to_bytes(response.into_body(), 10 * 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub const MULTIPART_BOUNDARY: &str = "X-TEST-BOUNDARY";

/// Hand-rolled multipart body: text fields plus an optional file part.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(
    app: &Router,
    uri: &str,
    body: Vec<u8>,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub fn sample_job_payload(channel: &str, title: &str) -> JsonValue {
    serde_json::json!({
        "job_id": "ENG-042",
        "job_type": channel,
        "job_title": title,
        "experience": "2-4 Years",
        "salary": "$100k - $120k",
        "job_location": "Hyderabad",
        "job_description": "Design and build backend services.",
        "key_skills": ["Rust", "Postgres"],
        "employment_type": "Full-time",
        "work_mode": "Remote",
        "company_name": "TechCorp",
        "company_location": "USA",
        "openings": 2
    })
}

pub async fn create_draft_job(app: &Router, token: &str, channel: &str, title: &str) -> JsonValue {
    let response = send_json(
        app,
        "POST",
        "/api/careers/jobs",
        Some(token),
        Some(sample_job_payload(channel, title)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}
