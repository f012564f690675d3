use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_photo::add_photo;
use super::handlers::delete_photo::delete_photo;
use super::handlers::get_member::get_member;
use super::handlers::list_members::list_members;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::set_main_photo::set_main_photo;
use super::middleware::authenticate as auth_middleware;
use crate::domain::member::service::MemberService;
use crate::member::ports::MemberRepository;
use crate::member::ports::PhotoStore;

/// Shared handler state, generic over the outbound collaborators so the same
/// router serves production adapters and in-memory test doubles.
pub struct AppState<MR, PS>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    pub member_service: Arc<MemberService<MR, PS>>,
    pub authenticator: Arc<Authenticator>,
}

impl<MR, PS> Clone for AppState<MR, PS>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    fn clone(&self) -> Self {
        Self {
            member_service: Arc::clone(&self.member_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<MR, PS>(
    member_service: Arc<MemberService<MR, PS>>,
    authenticator: Arc<Authenticator>,
) -> Router
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    let state = AppState {
        member_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/account/register", post(register::<MR, PS>))
        .route("/api/account/login", post(login::<MR, PS>));

    let protected_routes = Router::new()
        .route("/api/members", get(list_members::<MR, PS>))
        .route("/api/members/:username", get(get_member::<MR, PS>))
        .route("/api/members/photos", post(add_photo::<MR, PS>))
        .route(
            "/api/members/photos/:photo_id/main",
            put(set_main_photo::<MR, PS>),
        )
        .route(
            "/api/members/photos/:photo_id",
            delete(delete_photo::<MR, PS>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<MR, PS>,
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
