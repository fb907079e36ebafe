use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    dto::application_dto::SubmitApplicationResponse,
    dto::job_dto::PublicJobResponse,
    error::{Error, Result},
    models::application::ApplicantData,
    models::job::Channel,
    services::application_service::{ResumeUpload, SubmitApplication},
    services::document_service,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/public/jobs/{channel}/{id}",
    params(
        ("channel" = String, Path, description = "Hiring channel: internal or external"),
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    responses(
        (status = 200, description = "Public view of the posting", body = Json<PublicJobResponse>),
        (status = 404, description = "Job posting not found"),
        (status = 409, description = "Posting is not published")
    )
)]
#[axum::debug_handler]
pub async fn get_public_job(
    State(state): State<AppState>,
    Path((channel, id)): Path<(Channel, Uuid)>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get(channel, id).await?;
    if !job.is_published() {
        return Err(Error::JobNotOpen);
    }
    Ok(Json(PublicJobResponse::from(job)))
}

#[utoipa::path(
    post,
    path = "/api/public/jobs/{channel}/{id}/apply",
    params(
        ("channel" = String, Path, description = "Hiring channel"),
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    responses(
        (status = 201, description = "Application recorded", body = Json<SubmitApplicationResponse>),
        (status = 400, description = "Missing or invalid field"),
        (status = 404, description = "Job posting not found"),
        (status = 409, description = "Posting is not open for applications")
    )
)]
pub async fn submit_application(
    State(state): State<AppState>,
    Path((channel, id)): Path<(Channel, Uuid)>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut email = String::new();
    let mut mobile = String::new();
    let mut applicant_data: Option<ApplicantData> = None;
    let mut resume: Option<ResumeUpload> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "email" => email = field.text().await.unwrap_or_default(),
            "mobile" => mobile = field.text().await.unwrap_or_default(),
            "application_data" => {
                let raw = field.text().await.unwrap_or_default();
                let parsed = serde_json::from_str::<ApplicantData>(&raw).map_err(|e| {
                    Error::BadRequest(format!("application_data is not valid JSON: {}", e))
                })?;
                applicant_data = Some(parsed);
            }
            "resume_file" => {
                let filename = field.file_name().unwrap_or("resume.bin").to_string();
                let data = field.bytes().await?;
                if !data.is_empty() {
                    resume = Some(ResumeUpload { filename, data });
                }
            }
            // The form also posts application_status; the server decides it.
            _ => {}
        }
    }

    let application = state
        .application_service
        .submit(
            channel,
            id,
            SubmitApplication {
                email,
                mobile,
                applicant_data,
                resume,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitApplicationResponse {
            id: application.id,
            status: "submitted".to_string(),
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ResumeAccessQuery {
    pub expires: i64,
    pub signature: String,
}

#[utoipa::path(
    get,
    path = "/api/public/resumes/{reference}",
    params(
        ("reference" = String, Path, description = "Stored document reference"),
        ("expires" = i64, Query, description = "Link expiry, unix seconds"),
        ("signature" = String, Query, description = "Link signature")
    ),
    responses(
        (status = 200, description = "Document bytes"),
        (status = 401, description = "Link expired or signature invalid"),
        (status = 404, description = "Document not found")
    )
)]
#[axum::debug_handler]
pub async fn download_resume(
    State(state): State<AppState>,
    Path(reference): Path<String>,
    Query(query): Query<ResumeAccessQuery>,
) -> Result<impl IntoResponse> {
    document_service::verify_resume_access(&reference, query.expires, &query.signature)?;
    let data = state.documents.retrieve(&reference).await?;

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                document_service::content_type_for(&reference).to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", reference),
            ),
        ],
        data,
    ))
}
