use crate::source::ContentSource;
use axum::{
    extract::{DefaultBodyLimit, Json, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use edupress::builders::sanitize_file_name;
use edupress::content::{normalize, ContentKind};
use edupress::generation::{build_prompt, decode_response, GenerationRequest};
use edupress::layout::DocumentArtifact;
use edupress::library::{Library, LibraryDocument, INVALID_UPLOAD_MESSAGE, MAX_DOCUMENT_BYTES, STORAGE_FULL_MESSAGE};
use edupress::{build_document, DocumentSettings, PressError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<RwLock<Library>>,
    pub source: Arc<dyn ContentSource>,
    pub settings: DocumentSettings,
}

impl AppState {
    pub fn new(library: Library, source: Arc<dyn ContentSource>) -> Self {
        Self {
            library: Arc::new(RwLock::new(library)),
            source,
            settings: DocumentSettings::default(),
        }
    }
}

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message describing what went wrong
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryListing {
    pub documents: Vec<LibraryDocument>,
    pub used_bytes: u64,
    pub capacity: u64,
}

/// Query for the generation endpoint. `format=json` returns the normalized
/// content instead of the rendered PDF.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateParams {
    pub format: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Press(#[from] PressError),
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Press(err) => match err {
                PressError::GenerationFailed => (StatusCode::BAD_GATEWAY, err.to_string()),
                PressError::CapacityExceeded { .. } => {
                    (StatusCode::INSUFFICIENT_STORAGE, STORAGE_FULL_MESSAGE.to_string())
                }
                PressError::UnsupportedDocument(_) => {
                    (StatusCode::UNSUPPORTED_MEDIA_TYPE, INVALID_UPLOAD_MESSAGE.to_string())
                }
                PressError::ReadOnly(_) => (StatusCode::CONFLICT, err.to_string()),
                PressError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
            },
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

fn parse_kind(kind: &str) -> Result<ContentKind, AppError> {
    kind.parse()
        .map_err(|_| AppError::BadRequest(format!("unknown document kind '{kind}'")))
}

fn attachment(bytes: Vec<u8>, mime_type: &str, file_name: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", sanitize_file_name(file_name)),
            ),
        ],
        bytes,
    )
        .into_response()
}

fn pdf_response(artifact: DocumentArtifact) -> Response {
    let file_name = artifact.file_name.clone();
    attachment(artifact.bytes, artifact.mime_type, &file_name)
}

/// Build the application router with all routes configured
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/documents/{kind}", post(render_document))
        .route("/api/generate/{kind}", post(generate_document))
        .route(
            "/api/library",
            get(list_library)
                .post(upload_document)
                .layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES as usize * 2)),
        )
        .route("/api/library/{id}", get(download_document).delete(delete_document))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "edupress API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Normalize posted content and render it.
pub async fn render_document(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(raw): Json<Value>,
) -> Result<Response, AppError> {
    let kind = parse_kind(&kind)?;
    let artifact = build_document(&normalize(kind, &raw), &state.settings)?;
    info!(%kind, pages = artifact.page_count, "rendered document");
    Ok(pdf_response(artifact))
}

/// Ask the content source for a document and render the reply.
///
/// The body holds the request fields for `kind`, plus an optional
/// `syllabus` string passed through to the prompt.
pub async fn generate_document(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<GenerateParams>,
    Json(mut body): Json<Value>,
) -> Result<Response, AppError> {
    let kind = parse_kind(&kind)?;
    let object = body
        .as_object_mut()
        .ok_or_else(|| AppError::BadRequest("request body must be a JSON object".to_string()))?;

    let syllabus = object
        .remove("syllabus")
        .and_then(|v| v.as_str().map(str::to_string));
    object.insert("kind".to_string(), Value::from(kind.as_str()));

    let request: GenerationRequest = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("invalid {kind} request: {e}")))?;

    let prompt = build_prompt(&request, syllabus.as_deref());
    let reply = state.source.generate(&prompt).await?;
    let content = decode_response(&request, Some(&reply))?;

    if params.format.as_deref() == Some("json") {
        return Ok(Json(content).into_response());
    }

    let artifact = build_document(&content, &state.settings)?;
    info!(%kind, pages = artifact.page_count, "generated document");
    Ok(pdf_response(artifact))
}

pub async fn list_library(State(state): State<AppState>) -> Json<LibraryListing> {
    let library = state.library.read().await;
    Json(LibraryListing {
        documents: library.list(),
        used_bytes: library.used_bytes(),
        capacity: library.capacity(),
    })
}

/// Store the multipart field `file`.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart field: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("upload has no file name".to_string()))?;
        let mime_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {e}")))?;

        let document = state
            .library
            .write()
            .await
            .add(&name, mime_type.as_deref(), bytes.to_vec())?;
        return Ok((StatusCode::CREATED, Json(document)).into_response());
    }

    Err(AppError::BadRequest("No file provided in upload".to_string()))
}

pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let file = state.library.read().await.get(&id)?;
    Ok(attachment(file.bytes, &file.document.mime_type, &file.file_name))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.library.write().await.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
