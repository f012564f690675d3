use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::member::models::AuthenticatedMember;
use crate::domain::member::models::LoginCommand;
use crate::domain::member::models::Username;
use crate::inbound::http::router::AppState;
use crate::member::ports::MemberRepository;
use crate::member::ports::MemberServicePort;
use crate::member::ports::PhotoStore;

pub async fn login<MR, PS>(
    State(state): State<AppState<MR, PS>>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    // A username that cannot even parse matches no account; report it the
    // same way as any other failed credential check
    let username = Username::new(body.username)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    state
        .member_service
        .login(LoginCommand::new(username, body.password))
        .await
        .map_err(ApiError::from)
        .map(|ref member| ApiSuccess::new(StatusCode::OK, member.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub username: String,
    pub token: String,
    pub main_photo_url: Option<String>,
}

impl From<&AuthenticatedMember> for LoginResponseData {
    fn from(member: &AuthenticatedMember) -> Self {
        Self {
            username: member.username.clone(),
            token: member.token.clone(),
            main_photo_url: member.main_photo_url.clone(),
        }
    }
}
