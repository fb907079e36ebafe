pub mod application_service;
pub mod document_service;
pub mod export_service;
pub mod job_service;
