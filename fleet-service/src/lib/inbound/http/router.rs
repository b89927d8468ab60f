use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_trip::create_trip;
use super::handlers::current_account::current_account;
use super::handlers::get_trip::get_trip;
use super::handlers::list_my_trips::list_my_trips;
use super::handlers::list_trips::list_trips;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_trip::update_trip;
use super::handlers::update_trip_status::update_trip_status;
use super::handlers::ApiSuccess;
use super::middleware::authenticate;
use super::middleware::authorize;
use super::middleware::AccessPolicy;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::trip::ports::TripServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub trip_service: Arc<dyn TripServicePort>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    trip_service: Arc<dyn TripServicePort>,
) -> Router {
    let state = AppState {
        account_service,
        trip_service,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register));

    let admin_routes = Router::new()
        .route("/api/trips", post(create_trip).get(list_trips))
        .route("/api/trips/:trip_id", put(update_trip))
        .route_layer(middleware::from_fn_with_state(
            AccessPolicy::admin_only(),
            authorize,
        ));

    // Ownership of the status route is checked by the trip service
    let member_routes = Router::new()
        .route("/api/auth/me", get(current_account))
        .route("/api/trips/my-trips", get(list_my_trips))
        .route("/api/trips/:trip_id", get(get_trip))
        .route("/api/trips/:trip_id/status", patch(update_trip_status));

    let protected_routes = Router::new()
        .merge(admin_routes)
        .merge(member_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

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
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct HealthData {
    status: &'static str,
}

async fn health() -> ApiSuccess<HealthData> {
    ApiSuccess::new(StatusCode::OK, HealthData { status: "ok" })
}
