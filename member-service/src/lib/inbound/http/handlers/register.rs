use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::member::models::AuthenticatedMember;
use crate::domain::member::models::RegisterCommand;
use crate::domain::member::models::Username;
use crate::inbound::http::router::AppState;
use crate::member::errors::UsernameError;
use crate::member::ports::MemberRepository;
use crate::member::ports::MemberServicePort;
use crate::member::ports::PhotoStore;

pub async fn register<MR, PS>(
    State(state): State<AppState<MR, PS>>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    state
        .member_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref member| ApiSuccess::new(StatusCode::CREATED, member.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let username = Username::new(self.username)?;
        let password = self.password;
        Ok(RegisterCommand::new(username, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub username: String,
    pub token: String,
}

impl From<&AuthenticatedMember> for RegisterResponseData {
    fn from(member: &AuthenticatedMember) -> Self {
        Self {
            username: member.username.clone(),
            token: member.token.clone(),
        }
    }
}
