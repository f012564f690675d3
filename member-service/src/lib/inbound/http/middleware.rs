use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::member::models::IdentityContext;
use crate::domain::member::models::MemberId;
use crate::domain::member::models::Username;
use crate::inbound::http::router::AppState;
use crate::member::ports::MemberRepository;
use crate::member::ports::PhotoStore;

/// Middleware that validates session tokens and adds the caller's identity to
/// request extensions.
///
/// Handlers receive the identity as an explicit [`IdentityContext`] value and
/// pass it into every operation; nothing downstream reads ambient request
/// state.
pub async fn authenticate<MR, PS>(
    State(state): State<AppState<MR, PS>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    // Validate token and extract claims (from auth library)
    let claims: auth::Claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!("Session token validation failed: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid or expired token"
            })),
        )
            .into_response()
    })?;

    let member_id = MemberId::from_string(&claims.sub).map_err(|e| {
        tracing::error!("Failed to parse member ID from token: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid token format"
            })),
        )
            .into_response()
    })?;

    let username = Username::new(claims.unique_name).map_err(|e| {
        tracing::error!("Failed to parse username from token: {}", e);
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid token format"
            })),
        )
            .into_response()
    })?;

    // Add authenticated identity to request extensions
    req.extensions_mut()
        .insert(IdentityContext {
            member_id,
            username,
        });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Missing Authorization header"
                })),
            )
                .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header"
            })),
        )
            .into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header format. Expected: Bearer <token>"
            })),
        )
            .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
