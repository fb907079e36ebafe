use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{
        CreateJobPayload, JobListResponse, JobResponse, PublishJobPayload, PublishJobResponse,
        UpdateJobPayload, UpdateJobResponse,
    },
    error::Result,
    middleware::auth::{staff_actor, Claims},
    models::job::Channel,
    services::job_service::UpdateOutcome,
    utils::links,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/careers/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job posting created as a draft", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is not staff")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    let actor = staff_actor(&claims)?;
    payload.validate()?;
    let job = state.job_service.create(payload, actor).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    get,
    path = "/api/careers/jobs/{channel}",
    params(
        ("channel" = String, Path, description = "Hiring channel: internal or external")
    ),
    responses(
        (status = 200, description = "Job postings in the channel", body = Json<JobListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(channel): Path<Channel>,
) -> Result<impl IntoResponse> {
    staff_actor(&claims)?;
    let jobs = state.job_service.list(channel).await?;
    Ok(Json(JobListResponse {
        items: jobs.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/careers/jobs/{channel}/{id}",
    params(
        ("channel" = String, Path, description = "Hiring channel"),
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    responses(
        (status = 200, description = "Job posting", body = Json<JobResponse>),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((channel, id)): Path<(Channel, Uuid)>,
) -> Result<impl IntoResponse> {
    staff_actor(&claims)?;
    let job = state.job_service.get(channel, id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    patch,
    path = "/api/careers/jobs/{channel}/{id}",
    params(
        ("channel" = String, Path, description = "Hiring channel"),
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Updated posting, or a no-changes report", body = Json<UpdateJobResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((channel, id)): Path<(Channel, Uuid)>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    staff_actor(&claims)?;
    payload.validate()?;
    let response = match state.job_service.update(channel, id, payload.into()).await? {
        UpdateOutcome::Changed(job) => UpdateJobResponse {
            changed: true,
            job: Some(JobResponse::from(job)),
            message: None,
        },
        UpdateOutcome::NoChanges(_) => UpdateJobResponse {
            changed: false,
            job: None,
            message: Some("No changes detected".to_string()),
        },
    };
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/careers/jobs/{channel}/{id}/publish",
    params(
        ("channel" = String, Path, description = "Hiring channel"),
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    request_body = PublishJobPayload,
    responses(
        (status = 200, description = "Posting is open and publicly reachable", body = Json<PublishJobResponse>),
        (status = 400, description = "Posting is closed"),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn publish_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((channel, id)): Path<(Channel, Uuid)>,
    payload: Option<Json<PublishJobPayload>>,
) -> Result<impl IntoResponse> {
    staff_actor(&claims)?;
    let date = payload.and_then(|Json(p)| p.posted_date);
    let job = state.job_service.publish(channel, id, date).await?;

    let config = crate::config::get_config();
    let public_url = links::build_public_link(&config.public_base_url, channel, job.id)?;
    Ok(Json(PublishJobResponse {
        job: JobResponse::from(job),
        public_url: public_url.to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/careers/jobs/{channel}/{id}/close",
    params(
        ("channel" = String, Path, description = "Hiring channel"),
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    responses(
        (status = 200, description = "Posting closed", body = Json<JobResponse>),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn close_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((channel, id)): Path<(Channel, Uuid)>,
) -> Result<impl IntoResponse> {
    staff_actor(&claims)?;
    let job = state.job_service.close(channel, id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    delete,
    path = "/api/careers/jobs/{channel}/{id}",
    params(
        ("channel" = String, Path, description = "Hiring channel"),
        ("id" = Uuid, Path, description = "Job posting ID")
    ),
    responses(
        (status = 204, description = "Job posting deleted"),
        (status = 404, description = "Job posting not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((channel, id)): Path<(Channel, Uuid)>,
) -> Result<impl IntoResponse> {
    staff_actor(&claims)?;
    state.job_service.delete(channel, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
