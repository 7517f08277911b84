use axum::{
    body::Body,
    http::{request::Parts, HeaderName, HeaderValue, Request},
    routing::{get, post},
    Router,
};
use regex::Regex;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

use crate::config::{ConfigError, CorsConfig};
use crate::handlers::{health_check, judge_text, root, translate_text};
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/api/translate", post(translate_text))
        .route("/api/judge", post(judge_text))
}

/// Full application: routes, CORS, tracing and request ids
pub fn create_app(state: AppState) -> Result<Router, ConfigError> {
    let cors = cors_layer(&state.config.server.cors)?;
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id_header.clone(), MakeRequestUuid))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(cors);

    Ok(create_routes().layer(middleware).with_state(state))
}

/// Allow listed origins plus anything matching the origin pattern
pub fn cors_layer(cors: &CorsConfig) -> Result<CorsLayer, ConfigError> {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    let pattern = cors
        .allowed_origin_regex
        .as_deref()
        .map(Regex::new)
        .transpose()?;

    let allow_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
        if origins.iter().any(|allowed| allowed == origin) {
            return true;
        }
        match (&pattern, origin.to_str()) {
            (Some(re), Ok(origin)) => re.is_match(origin),
            _ => false,
        }
    });

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

#[derive(Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}
