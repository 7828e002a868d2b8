use axum::http::header;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::{CatalogError, StandardCatalog};
use crate::cli::ServeArgs;
use crate::core::interface::ContractInterface;
use crate::core::types::ConfidenceLevel;
use crate::matching::discovery::{Codec, Discovery};
use crate::matching::engine::{ConformanceEngine, MatchingConfig};
use crate::matching::scoring::OutputMatching;
use crate::parsing::abi::{interface_from_entries, parse_abi_bytes, parse_abi_text, ParseError};
use crate::utils::validation::{validate_standard_id, ValidationError, MAX_ABI_SIZE};

/// Request body limit: the largest accepted ABI plus room for the envelope
pub const MAX_REQUEST_BODY_SIZE: usize = MAX_ABI_SIZE + 64 * 1024;

/// Maximum number of standards named in one check request
pub const MAX_REQUESTED_STANDARDS: usize = 64;

const BINARY_CONTENT_TYPE: &str = "application/octet-stream";

/// Shared application state
pub struct AppState {
    pub catalog: StandardCatalog,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Body of `POST /api/check`
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// Contract name echoed in the results
    #[serde(default)]
    pub name: Option<String>,
    /// ABI as a JSON array, a compiler artifact object, or a string holding either
    pub abi: serde_json::Value,
    /// Standards to check; every standard when absent
    #[serde(default)]
    pub standards: Option<Vec<String>>,
    #[serde(default)]
    pub output_matching: Option<OutputMatching>,
    #[serde(default)]
    pub min_confidence: Option<ConfidenceLevel>,
}

/// Body of `POST /api/check/function`
#[derive(Debug, Deserialize)]
pub struct FunctionCheckRequest {
    pub standard: String,
    pub function: String,
    pub abi: serde_json::Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub output_matching: Option<OutputMatching>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

/// Client error carrying a message safe to show
fn client_error(status: StatusCode, error_type: &str, message: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message,
            error_type: error_type.to_string(),
            details: None,
        }),
    )
        .into_response()
}

fn catalog_error(error: &CatalogError) -> Response {
    match error {
        CatalogError::NotFound(id) => client_error(
            StatusCode::NOT_FOUND,
            "standard_not_found",
            format!("Standard '{id}' not found"),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(create_safe_error_response(
                "catalog_error",
                "Catalog lookup failed",
                Some(&other.to_string()),
            )),
        )
            .into_response(),
    }
}

fn parse_error(error: &ParseError) -> Response {
    match error {
        ParseError::TooLarge(_) | ParseError::Rejected(ValidationError::AbiTooLarge(_)) => {
            client_error(
                StatusCode::PAYLOAD_TOO_LARGE,
                "input_rejected",
                error.to_string(),
            )
        }
        _ => client_error(StatusCode::BAD_REQUEST, "invalid_abi", error.to_string()),
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// API routes without the network-facing middleware
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/standards", get(list_standards_handler))
        .route("/api/standards/{id}", get(get_standard_handler))
        .route("/api/check", post(check_handler))
        .route("/api/check/function", post(check_function_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE))
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(catalog: StandardCatalog) -> anyhow::Result<Router> {
    let state = Arc::new(AppState { catalog });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limiter configuration"))?;

    // Build router with comprehensive security layers
    let app = api_routes(state).layer(
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
                HeaderName::from_static("strict-transport-security"),
                HeaderValue::from_static("max-age=31536000; includeSubDomains"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            // IP-based rate limiting to prevent abuse
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            // Request timeout to prevent slow client attacks
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(30),
            ))
            // Limit concurrent requests to prevent DOS
            .layer(ConcurrencyLimitLayer::new(100)),
    );

    Ok(app)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = crate::cli::load_catalog(args.catalog.as_deref())?;
    tracing::info!("Serving {} standards", catalog.len());
    let app = create_router(catalog)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting eip-solver API server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/standards"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn wants_binary(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains(BINARY_CONTENT_TYPE))
}

/// Encode as JSON, or as bincode when the client asked for it
fn encode<T: Codec>(value: &T, binary: bool) -> Response {
    if !binary {
        return Json(value).into_response();
    }
    match value.to_bytes() {
        Ok(bytes) => ([(header::CONTENT_TYPE, BINARY_CONTENT_TYPE)], bytes).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(create_safe_error_response(
                "encoding_error",
                "Failed to encode response",
                Some(&e.to_string()),
            )),
        )
            .into_response(),
    }
}

fn interface_from_request(
    name: &str,
    abi: serde_json::Value,
) -> Result<ContractInterface, ParseError> {
    match abi {
        serde_json::Value::String(text) => parse_abi_bytes(name, text.as_bytes()),
        serde_json::Value::Array(entries) => interface_from_entries(name, entries),
        other => parse_abi_text(name, &other.to_string()),
    }
}

/// Return list of standards in catalog
async fn list_standards_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let standards: Vec<serde_json::Value> = state
        .catalog
        .list()
        .into_iter()
        .map(|s| {
            serde_json::json!({
                "id": s.id,
                "name": s.name,
                "url": s.url,
                "stagnant": s.stagnant,
                "functions": s.functions.len(),
                "events": s.events.len(),
                "maximum_tokens": s.token_count(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": standards.len(),
        "standards": standards,
    }))
}

async fn get_standard_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let id = match validate_standard_id(&id) {
        Ok(id) => id,
        Err(e) => return client_error(StatusCode::BAD_REQUEST, "invalid_standard_id", e.to_string()),
    };
    match state.catalog.lookup(&id) {
        Ok(standard) => Json(standard).into_response(),
        Err(e) => catalog_error(&e),
    }
}

async fn check_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return client_error(rejection.status(), "invalid_request", rejection.body_text())
        }
    };

    let name = request.name.as_deref().unwrap_or("contract");
    let interface = match interface_from_request(name, request.abi) {
        Ok(interface) => interface,
        Err(e) => return parse_error(&e),
    };

    let config = MatchingConfig {
        min_confidence: request.min_confidence.unwrap_or_default(),
        output_matching: request.output_matching.unwrap_or_default(),
    };
    let engine = ConformanceEngine::with_config(&state.catalog, config);

    let discoveries: Vec<Discovery> = match request.standards {
        None => engine.check_all(&interface),
        Some(ids) if ids.len() > MAX_REQUESTED_STANDARDS => {
            return client_error(
                StatusCode::BAD_REQUEST,
                "too_many_standards",
                format!("At most {MAX_REQUESTED_STANDARDS} standards per request"),
            )
        }
        Some(ids) => {
            let mut discoveries = Vec::with_capacity(ids.len());
            for id in &ids {
                let id = match validate_standard_id(id) {
                    Ok(id) => id,
                    Err(e) => {
                        return client_error(
                            StatusCode::BAD_REQUEST,
                            "invalid_standard_id",
                            e.to_string(),
                        )
                    }
                };
                match engine.check(&id, &interface) {
                    Ok((discovery, _)) => discoveries.push(discovery),
                    Err(e) => return catalog_error(&e),
                }
            }
            discoveries
        }
    };

    tracing::debug!(
        "Checked '{}' against {} standards",
        interface.name,
        discoveries.len()
    );
    encode(&discoveries, wants_binary(&headers))
}

async fn check_function_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<FunctionCheckRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return client_error(rejection.status(), "invalid_request", rejection.body_text())
        }
    };

    let id = match validate_standard_id(&request.standard) {
        Ok(id) => id,
        Err(e) => return client_error(StatusCode::BAD_REQUEST, "invalid_standard_id", e.to_string()),
    };
    let name = request.name.as_deref().unwrap_or("contract");
    let interface = match interface_from_request(name, request.abi) {
        Ok(interface) => interface,
        Err(e) => return parse_error(&e),
    };
    let Some(function) = interface.function(&request.function) else {
        return client_error(
            StatusCode::BAD_REQUEST,
            "function_not_found",
            format!("Function '{}' not found in ABI", request.function),
        );
    };

    let config = MatchingConfig {
        output_matching: request.output_matching.unwrap_or_default(),
        ..MatchingConfig::default()
    };
    let engine = ConformanceEngine::with_config(&state.catalog, config);
    match engine.check_function(&id, function) {
        Ok((discovery, _)) => encode(&discovery, wants_binary(&headers)),
        Err(e) => catalog_error(&e),
    }
}
