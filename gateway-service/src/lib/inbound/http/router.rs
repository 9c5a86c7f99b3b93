use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_document::create_document;
use super::handlers::delete_document::delete_document;
use super::handlers::get_db::get_db;
use super::handlers::get_document::get_document;
use super::handlers::issue_token::issue_token;
use super::handlers::list_documents::list_documents;
use super::handlers::update_document::merge_document;
use super::handlers::update_document::replace_document;
use super::middleware::require_token;
use crate::domain::document::ports::DocumentStore;
use crate::domain::identity::models::IdentityName;
use crate::domain::identity::ports::IdentityServicePort;

#[derive(Clone)]
pub struct AppState {
    pub identities: Arc<dyn IdentityServicePort>,
    pub documents: Arc<dyn DocumentStore>,
    /// Identity minted by `GET /auth` when the request names none.
    pub default_identity: IdentityName,
}

pub fn create_router(
    identities: Arc<dyn IdentityServicePort>,
    documents: Arc<dyn DocumentStore>,
    default_identity: IdentityName,
) -> Router {
    let state = AppState {
        identities,
        documents,
        default_identity,
    };

    // Token issuance is the one route outside the gate: it is how a
    // client obtains a token in the first place.
    let public_routes = Router::new().route("/auth", get(issue_token));

    let protected_routes = Router::new()
        .route("/db", get(get_db))
        .route("/:collection", get(list_documents))
        .route("/:collection", post(create_document))
        .route("/:collection/:id", get(get_document))
        .route("/:collection/:id", put(replace_document))
        .route("/:collection/:id", patch(merge_document))
        .route("/:collection/:id", delete(delete_document))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_token,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
