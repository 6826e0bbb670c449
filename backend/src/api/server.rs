//! HTTP Server for the csvtidy API.
//!
//! # API Endpoints
//!
//! | Method | Path                          | Description                      |
//! |--------|-------------------------------|----------------------------------|
//! | GET    | `/health`                     | Health check                     |
//! | POST   | `/api/upload`                 | Upload a CSV, opens a session    |
//! | POST   | `/api/sessions/{id}/clean`    | Clean from the raw upload        |
//! | GET    | `/api/sessions/{id}/download` | Cleaned data as `text/csv`       |
//! | DELETE | `/api/sessions/{id}`          | Drop a session                   |
//! | GET    | `/api/logs`                   | SSE stream for real-time logs    |

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{delete, get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use super::logs::{log_error, log_info, LOG_BROADCASTER};
use super::types::{error_response, CleanResponse, UploadResponse};
use crate::cache::SessionStore;
use crate::config::ServerConfig;
use crate::error::{CsvError, ServerError, ServerResult, SessionError};
use crate::models::CleanOptions;
use crate::parser::parse_bytes;
use crate::session::LoadSummary;
use crate::validation::{validate_file_name, validate_size};

/// Room for multipart framing on top of the raw file size.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

impl ServerError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Session(err) => match err {
                SessionError::InvalidFileType(_) | SessionError::EmptyFile => {
                    StatusCode::BAD_REQUEST
                }
                SessionError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                SessionError::NotLoaded | SessionError::NotCleaned => StatusCode::CONFLICT,
                SessionError::Csv(CsvError::IoError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log_error(self.to_string());
        }
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

/// Build the application router around a session store.
pub fn router(store: SessionStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let body_limit = store.max_upload_bytes().saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/upload", post(upload_csv))
        .route("/api/sessions/{id}", delete(delete_session))
        .route("/api/sessions/{id}/clean", post(clean_session))
        .route("/api/sessions/{id}/download", get(download_session))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(store)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = SessionStore::new(config.max_sessions, config.max_upload_bytes);
    let app = router(store);

    let addr = SocketAddr::new(config.host, config.port);
    println!("🚀 csvtidy server running on http://{}", addr);
    println!("   POST   /api/upload                 - Upload CSV file");
    println!("   POST   /api/sessions/{{id}}/clean    - Clean data");
    println!("   GET    /api/sessions/{{id}}/download - Download cleaned_data.csv");
    println!("   DELETE /api/sessions/{{id}}          - Close session");
    println!("   GET    /api/logs                   - SSE log stream");
    println!("   GET    /health                     - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(store): State<SessionStore>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "csvtidy",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": store.len(),
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Upload CSV endpoint: opens a session and loads the file into it.
async fn upload_csv(
    State(store): State<SessionStore>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ServerError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
            file_data = Some(bytes.to_vec());
        }
    }

    let bytes = file_data.ok_or_else(|| ServerError::BadRequest("No file provided".into()))?;
    let file_name = file_name.unwrap_or_default();

    println!("\n{}", "=".repeat(70));
    println!("📄 NEW UPLOAD: {} ({} bytes)", file_name, bytes.len());
    println!("{}\n", "=".repeat(70));

    let (id, summary) = load_upload(&store, file_name, bytes).await?;
    Ok(Json(UploadResponse::new(id, summary)))
}

/// Validate and parse an upload off the async workers, then install it in
/// a new session. The store lock is only taken for the install.
async fn load_upload(
    store: &SessionStore,
    file_name: String,
    bytes: Vec<u8>,
) -> ServerResult<(Uuid, LoadSummary)> {
    validate_file_name(&file_name)?;
    validate_size(bytes.len(), store.max_upload_bytes())?;

    log_info(format!("📖 Reading {} ({} bytes)...", file_name, bytes.len()));
    let parsed = tokio::task::spawn_blocking(move || parse_bytes(&bytes))
        .await
        .map_err(|e| ServerError::Internal(format!("Parser task failed: {}", e)))?;

    let id = store.create();
    match store.with_session(id, |session| session.install(&file_name, parsed))? {
        Ok(summary) => Ok((id, summary)),
        Err(err) => {
            store.remove(id);
            Err(err.into())
        }
    }
}

/// Clean endpoint: always restarts from the uploaded data.
async fn clean_session(
    State(store): State<SessionStore>,
    Path(id): Path<Uuid>,
    Json(options): Json<CleanOptions>,
) -> Result<Json<CleanResponse>, ServerError> {
    let summary = store.with_session(id, |session| session.on_clean_requested(options))??;
    Ok(Json(CleanResponse::new(id, summary)))
}

/// Download endpoint: the cleaned dataset as a CSV attachment.
async fn download_session(
    State(store): State<SessionStore>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServerError> {
    let download = store.with_session(id, |session| session.on_download_requested())??;

    let headers = [
        (header::CONTENT_TYPE, download.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download.file_name),
        ),
    ];
    Ok((headers, download.body).into_response())
}

async fn delete_session(
    State(store): State<SessionStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    if store.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::NotFound(id))
    }
}
