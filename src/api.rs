use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::analyzer::{AnalysisResult, Categories, PageAnalyzer};
use crate::cache::ResultCache;
use crate::error::AnalyzeError;
use crate::fetch::PageFetcher;
use crate::recommend::SocialLink;
use crate::scoring::{CategoryMetric, CategoryScore, Issue, Priority};
use crate::sentiment::{Improvement, SentimentLabel, SentimentResult};

pub struct AppState {
    pub analyzer: PageAnalyzer,
    pub fetcher: Arc<dyn PageFetcher>,
    pub cache: ResultCache,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalysisQuery {
    /// URL of a previously analyzed page
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub topics: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    Analyze(AnalyzeError),
    NotCached,
}

impl From<AnalyzeError> for ApiError {
    fn from(e: AnalyzeError) -> Self {
        ApiError::Analyze(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Analyze(e @ AnalyzeError::EmptyUrl) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Analyze(e @ AnalyzeError::Fetch(_)) => (StatusCode::BAD_GATEWAY, e.to_string()),
            ApiError::NotCached => (
                StatusCode::NOT_FOUND,
                "No analysis cached for this URL.".to_string(),
            ),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, analyze, get_analysis),
    components(
        schemas(
            AnalyzeRequest,
            HealthResponse,
            ErrorResponse,
            AnalysisResult,
            Categories,
            CategoryScore,
            CategoryMetric,
            Issue,
            Priority,
            SocialLink,
            SentimentResult,
            SentimentLabel,
            Improvement
        )
    ),
    tags(
        (name = "analysis", description = "Page Analysis API")
    )
)]
pub struct ApiDoc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/analysis", get(get_analysis))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "analysis"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        topics: state.analyzer.topics().len(),
    })
}

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis report", body = AnalysisResult),
        (status = 400, description = "Missing URL", body = ErrorResponse),
        (status = 502, description = "Page could not be fetched", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let url = req.url.trim();
    tracing::info!("🔍 Analysis requested for '{}'", url);

    let result = state
        .analyzer
        .analyze_url(state.fetcher.as_ref(), url)
        .await
        .map_err(|e| {
            tracing::warn!("Analysis of '{}' failed: {}", url, e);
            e
        })?;

    let cached = state.cache.put(url, result);
    Ok(Json(cached.as_ref().clone()))
}

#[utoipa::path(
    get,
    path = "/analysis",
    params(AnalysisQuery),
    responses(
        (status = 200, description = "Cached analysis report", body = AnalysisResult),
        (status = 404, description = "Nothing cached for this URL", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<AnalysisResult>, ApiError> {
    state
        .cache
        .get(query.url.trim())
        .map(|result| Json(result.as_ref().clone()))
        .ok_or(ApiError::NotCached)
}
