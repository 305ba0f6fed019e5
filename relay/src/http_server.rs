use crate::config::AppConfig;
use autodiag_core::{Relay, RelayError, RelayReply, RelayResult};
use autodiag_diagnosis::{matched_keyword, DiagnosisRecord};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Request headers browsers may send on cross-origin calls
pub const ALLOWED_HEADERS: [&str; 8] = [
    "authorization",
    "x-client-info",
    "apikey",
    "content-type",
    "x-supabase-client-platform",
    "x-supabase-client-platform-version",
    "x-supabase-client-runtime",
    "x-supabase-client-runtime-version",
];

/// Application state shared with all routes
#[derive(Clone)]
pub struct AppState {
    relay: Arc<RelayResult<Relay>>,
}

impl AppState {
    /// Wraps a relay, or the configuration error that prevented building one.
    /// A misconfigured daemon still serves; `/diagnose` reports the error.
    pub fn new(relay: RelayResult<Relay>) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

/// Request model for `/diagnose`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnoseRequest {
    #[serde(default)]
    message: String,
    thread_id: Option<String>,
}

/// Request model for `/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    symptom: String,
}

/// Response model for `/analyze`
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    diagnosis: Option<&'static DiagnosisRecord>,
    keyword: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error type for HTTP server
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalError(String),
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        if err.is_validation() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::InternalError(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => {
                warn!(error = %message, "Rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            Self::InternalError(message) => {
                error!(error = %message, "Diagnosis error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Build the router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/diagnose", post(diagnose))
        .route("/analyze", post(analyze))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Answers preflight requests itself (empty body) and marks every response
/// with a wildcard origin
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
}

/// Start the HTTP server
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::new(Relay::from_config(&config.relay));
    match &*state.relay {
        Ok(relay) => info!(poll = ?relay.poll_policy(), "Assistant relay ready"),
        Err(e) => warn!(error = %e, "Assistant relay is not configured; /diagnose will fail"),
    }

    info!("Starting HTTP server on {}", config.http_addr);
    let listener = tokio::net::TcpListener::bind(config.http_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", config.http_addr, e))?;

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start HTTP server: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

/// Health check handler
async fn health() -> impl IntoResponse {
    "autodiag relay is running"
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, RelayError> {
    serde_json::from_slice(body).map_err(|e| RelayError::InvalidRequest(e.to_string()))
}

/// Handler for conversation turns
async fn diagnose(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RelayReply>, ApiError> {
    let relay = match &*state.relay {
        Ok(relay) => relay,
        Err(e) => return Err(ApiError::InternalError(e.to_string())),
    };

    let request: DiagnoseRequest = parse_body(&body)?;
    let thread_id = request.thread_id.filter(|id| !id.trim().is_empty());
    info!(
        message_len = request.message.len(),
        thread_id = thread_id.as_deref().unwrap_or("<new>"),
        "Processing diagnosis request"
    );

    let reply = relay.send(&request.message, thread_id).await?;
    info!(thread_id = %reply.thread_id, "Diagnosis complete");
    Ok(Json(reply))
}

/// Handler for local symptom matching
async fn analyze(body: Bytes) -> Result<Json<AnalyzeResponse>, ApiError> {
    let request: AnalyzeRequest = parse_body(&body)?;
    let found = matched_keyword(&request.symptom);

    Ok(Json(AnalyzeResponse {
        diagnosis: found.map(|m| m.record),
        keyword: found.map(|m| m.keyword),
    }))
}
