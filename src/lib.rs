pub mod api;
pub mod config;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::ServerConfig;
use crate::services::file_service::FileService;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware::from_fn,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::files::upload::upload_file,
        api::handlers::files::list::list_files,
        api::handlers::files::list::get_stats,
        api::handlers::files::list::list_categories,
        api::handlers::files::manage::delete_file,
        api::handlers::files::download::download_file,
        api::handlers::legacy::list_videos,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::files::ErrorResponse,
            api::handlers::files::UploadResponse,
            api::handlers::files::FileEntry,
            api::handlers::files::FileListResponse,
            api::handlers::files::StatsResponse,
            api::handlers::files::DeleteResponse,
            api::handlers::files::CategoryResponse,
            api::handlers::files::LegacyFileEntry,
            api::handlers::files::LegacyListResponse,
            api::handlers::health::HealthResponse,
            models::Category,
        )
    ),
    tags(
        (name = "files", description = "Upload, listing and download endpoints"),
        (name = "legacy", description = "Routes kept from the video-only server"),
        (name = "system", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub file_service: Arc<FileService>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(file_service: Arc<FileService>) -> Self {
        let config = file_service.config().clone();
        Self {
            file_service,
            config,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("⚠️  Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.body_limit();
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::handlers::index::index))
        .route("/health", get(api::handlers::health::health_check))
        .route("/upload", post(api::handlers::files::upload_file))
        .route("/api/files", get(api::handlers::files::list_files))
        .route(
            "/api/files/:filename",
            delete(api::handlers::files::delete_file),
        )
        .route("/api/stats", get(api::handlers::files::get_stats))
        .route("/api/categories", get(api::handlers::files::list_categories))
        .route("/files/:filename", get(api::handlers::files::download_file))
        .route("/videos", get(api::handlers::legacy::list_videos))
        .route("/videos/:filename", get(api::handlers::files::download_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn(api::middleware::security::security_headers))
        .layer(cors)
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .with_state(state)
}
