use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::application_dto::{ApplicationListResponse, ApplicationResponse},
    error::Result,
    middleware::auth::{staff_actor, Claims},
    models::job::Channel,
    services::{document_service, export_service::ExportService},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/careers/jobs/{channel}/{id}/applications",
    params(
        ("channel" = String, Path, description = "Hiring channel"),
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    responses(
        (status = 200, description = "Applications for the posting", body = Json<ApplicationListResponse>),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((channel, id)): Path<(Channel, Uuid)>,
) -> Result<impl IntoResponse> {
    staff_actor(&claims)?;
    let applications = state.application_service.list_for_job(channel, id).await?;

    let mut items = Vec::with_capacity(applications.len());
    for application in applications {
        let resume_link =
            document_service::resume_access_url(&application.resume_reference)?.to_string();
        items.push(ApplicationResponse::from_record(application, resume_link));
    }
    Ok(Json(ApplicationListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/careers/jobs/{channel}/{id}/applications/export",
    params(
        ("channel" = String, Path, description = "Hiring channel"),
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    responses(
        (status = 200, description = "XLSX workbook with all applications"),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn export_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((channel, id)): Path<(Channel, Uuid)>,
) -> Result<impl IntoResponse> {
    staff_actor(&claims)?;
    let job = state.job_service.get(channel, id).await?;
    let applications = state.application_service.list_for_job(channel, id).await?;

    let buffer = ExportService::applications_workbook(&job, &applications)?;
    let filename = format!(
        "applications_{}_{}.xlsx",
        job.job_title.replace(' ', "_"),
        chrono::Utc::now().format("%Y%m%d")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
