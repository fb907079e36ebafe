use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use careers_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

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
            middleware::rate_limit::new_rps_state(config.staff_rps),
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
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(staff_api)
        .merge(public_api)
        .with_state(app_state)
        .layer(middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
