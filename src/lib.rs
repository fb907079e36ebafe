pub mod config;
pub mod database;
pub mod diff;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use sqlx::PgPool;

use crate::database::application_store::{ApplicationStore, PgApplicationStore};
use crate::database::job_store::{JobStore, PgJobStore};
use crate::services::application_service::ApplicationService;
use crate::services::document_service::{DocumentStore, LocalDocumentStore};
use crate::services::job_service::JobService;

#[derive(Clone)]
pub struct AppState {
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub documents: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let jobs: Arc<dyn JobStore> = Arc::new(PgJobStore::new(pool.clone()));
        let applications: Arc<dyn ApplicationStore> = Arc::new(PgApplicationStore::new(pool));
        let documents: Arc<dyn DocumentStore> =
            Arc::new(LocalDocumentStore::new(config.uploads_dir.clone().into()));
        Self::with_stores(jobs, applications, documents)
    }

    /// Wire the services over explicit store implementations; `new` uses
    /// Postgres plus the local filesystem, tests substitute their own.
    pub fn with_stores(
        jobs: Arc<dyn JobStore>,
        applications: Arc<dyn ApplicationStore>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            job_service: JobService::new(jobs.clone()),
            application_service: ApplicationService::new(jobs, applications, documents.clone()),
            documents,
        }
    }
}
