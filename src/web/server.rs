use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::MarkerCatalog;
use crate::cli::{load_catalog, load_config, ServeArgs};
use crate::core::sequence::Sequence;
use crate::core::types::MatchMethod;
use crate::matching::analysis::{analyze, AnalysisConfig, AnalysisRequest};
use crate::parsing::sequence::{decompress_if_gzipped, parse_sequence_text};
use crate::utils::validation::{validate_upload, ValidationError};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_MULTIPART_FIELDS: usize = 10;
pub const MAX_FILE_FIELD_SIZE: usize = 16 * 1024 * 1024; // 16MB
pub const MAX_TEXT_FIELD_SIZE: usize = 1024 * 1024; // 1MB

/// Request body limit (largest file plus multipart overhead)
pub const MAX_BODY_SIZE: usize = 20 * 1024 * 1024;

/// Shared application state
pub struct AppState {
    pub catalog: MarkerCatalog,
    pub config: AnalysisConfig,
}

/// One uploaded sequence field
#[derive(Debug)]
struct Upload {
    filename: Option<String>,
    bytes: Vec<u8>,
}

/// Fields extracted from the analysis form
#[derive(Debug, Default)]
struct AnalysisForm {
    dna1: Option<Upload>,
    dna2: Option<Upload>,
    method: Option<String>,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

fn error_response(
    status: StatusCode,
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> Response {
    (
        status,
        Json(create_safe_error_response(
            error_type,
            user_message,
            internal_error,
        )),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the catalog or config cannot be loaded, the tokio
/// runtime cannot be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let state = Arc::new(AppState { catalog, config });

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, state).await })
}

/// Create the application router with routes and security layers.
///
/// Per-IP rate limiting needs the peer address, so it is added by the
/// server in [`run`] rather than here.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/methods", get(methods_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-xss-protection"),
                    HeaderValue::from_static("1; mode=block"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                .layer(ConcurrencyLimitLayer::new(100))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs, state: Arc<AppState>) -> anyhow::Result<()> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = create_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting marker-screen web server at http://{addr}");

    if args.open {
        if let Err(e) = open::that(format!("http://{addr}")) {
            tracing::warn!("Could not open browser: {}", e);
        }
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

/// API endpoint: screen two uploaded samples and compare them
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let start_time = std::time::Instant::now();

    let form = match extract_analysis_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let (Some(dna1), Some(dna2)) = (form.dna1, form.dna2) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "missing_input",
            "Both DNA samples (dna1 and dna2) are required.",
            None,
        );
    };

    let sample1 = match parse_upload(&dna1) {
        Ok(sequence) => sequence,
        Err(response) => return response,
    };
    let sample2 = match parse_upload(&dna2) {
        Ok(sequence) => sequence,
        Err(response) => return response,
    };

    let request = AnalysisRequest {
        sample1,
        sample2,
        method: form
            .method
            .as_deref()
            .map_or(MatchMethod::Exact, MatchMethod::from_selector),
    };

    // Reject oversized work before it reaches the blocking pool; a timed-out
    // blocking task keeps running to completion.
    if let Err(e) = state.config.check_limits(
        request.sample1.len(),
        request.sample2.len(),
        request.method,
    ) {
        return validation_error_response(&e);
    }

    let worker_state = Arc::clone(&state);
    let outcome = tokio::task::spawn_blocking(move || {
        analyze(&request, &worker_state.catalog, &worker_state.config)
    })
    .await;

    let report = match outcome {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => return validation_error_response(&e),
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Analysis failed unexpectedly.",
                Some(&e.to_string()),
            );
        }
    };

    #[allow(clippy::cast_possible_truncation)] // Processing time won't exceed u64
    let processing_time = start_time.elapsed().as_millis() as u64;

    Json(serde_json::json!({
        "method": report.method,
        "sample1": report.sample1,
        "sample2": report.sample2,
        "similarity": report.similarity,
        "similarity_percent": report.similarity_percent(),
        "processing_time_ms": processing_time,
    }))
    .into_response()
}

/// Map an analysis limit or validation failure to a client error
fn validation_error_response(error: &ValidationError) -> Response {
    match error {
        ValidationError::SequenceTooLong { max, .. } => error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "sequence_too_long",
            &format!("Sequences are limited to {max} bases."),
            None,
        ),
        ValidationError::ComparisonTooLarge { .. } => error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "comparison_too_large",
            "Sequences are too long to compare with this method; try 'simple' or 'jaccard'.",
            Some(&error.to_string()),
        ),
        _ => error_response(
            StatusCode::BAD_REQUEST,
            "validation_failed",
            "Sequence validation failed.",
            Some(&error.to_string()),
        ),
    }
}

/// Read the multipart form, enforcing field count and size limits
async fn extract_analysis_form(multipart: &mut Multipart) -> Result<AnalysisForm, Response> {
    let mut form = AnalysisForm::default();
    let mut fields_received = 0usize;

    loop {
        if fields_received >= MAX_MULTIPART_FIELDS {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "field_limit_exceeded",
                "Too many form fields",
                None,
            ));
        }

        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_multipart",
                    "Failed to parse upload.",
                    Some(&e.to_string()),
                ));
            }
        };
        fields_received += 1;

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "dna1" | "dna2" => {
                let filename = field
                    .file_name()
                    .filter(|f| !f.is_empty())
                    .map(std::string::ToString::to_string);

                let bytes = field.bytes().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        "invalid_multipart",
                        "Failed to read uploaded sequence.",
                        Some(&e.to_string()),
                    )
                })?;

                if bytes.len() > MAX_FILE_FIELD_SIZE {
                    return Err(error_response(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "file_too_large",
                        "File size exceeds limit",
                        None,
                    ));
                }

                // An empty file input counts as no input
                if bytes.is_empty() {
                    continue;
                }

                let upload = Upload {
                    filename,
                    bytes: bytes.to_vec(),
                };
                if name == "dna1" {
                    form.dna1 = Some(upload);
                } else {
                    form.dna2 = Some(upload);
                }
            }
            "method" => {
                let text = field.text().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        "invalid_multipart",
                        "Failed to read method field.",
                        Some(&e.to_string()),
                    )
                })?;

                if text.len() > MAX_TEXT_FIELD_SIZE {
                    return Err(error_response(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "text_too_large",
                        "Text field size exceeds limit",
                        None,
                    ));
                }

                form.method = Some(text);
            }
            _ => {} // Ignore unknown fields
        }
    }

    Ok(form)
}

/// Validate one upload and parse it into a sequence
fn parse_upload(upload: &Upload) -> Result<Sequence, Response> {
    let content = decompress_if_gzipped(&upload.bytes).map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            "invalid_content",
            "Compressed upload could not be decompressed.",
            Some(&e.to_string()),
        )
    })?;

    match validate_upload(upload.filename.as_deref(), &content) {
        Ok(_) => {}
        Err(ValidationError::FilenameTooLong) => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "filename_too_long",
                "Filename exceeds maximum length limit",
                None,
            ));
        }
        Err(ValidationError::InvalidFilename | ValidationError::EmptyFilename) => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "invalid_filename",
                "Filename contains invalid or dangerous characters",
                None,
            ));
        }
        Err(_) => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "invalid_content",
                "File content appears malformed or corrupted",
                None,
            ));
        }
    }

    // validate_upload guarantees UTF-8
    let text = String::from_utf8_lossy(&content);
    parse_sequence_text(&text).map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            "parse_failed",
            "Unable to read sequence. Upload raw sequence text or FASTA.",
            Some(&e.to_string()),
        )
    })
}

/// API endpoint listing the catalog markers
async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let markers: Vec<serde_json::Value> = state
        .catalog
        .iter()
        .map(|m| {
            serde_json::json!({
                "name": m.name(),
                "length": m.pattern().len(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": markers.len(),
        "markers": markers,
    }))
}

/// API endpoint listing the supported method selectors
async fn methods_handler() -> Json<serde_json::Value> {
    let methods: Vec<serde_json::Value> = MatchMethod::ALL
        .iter()
        .map(|m| {
            serde_json::json!({
                "selector": m.selector(),
                "description": m.description(),
                "default": *m == MatchMethod::default(),
            })
        })
        .collect();

    Json(serde_json::json!({ "methods": methods }))
}
