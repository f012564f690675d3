use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::member::models::Member;
use crate::inbound::http::router::AppState;
use crate::member::ports::MemberRepository;
use crate::member::ports::MemberServicePort;
use crate::member::ports::PhotoStore;

pub async fn list_members<MR, PS>(
    State(state): State<AppState<MR, PS>>,
) -> Result<ApiSuccess<Vec<MemberData>>, ApiError>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    state
        .member_service
        .list_members()
        .await
        .map_err(ApiError::from)
        .map(|members| {
            ApiSuccess::new(
                StatusCode::OK,
                members.iter().map(MemberData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberData {
    pub id: String,
    pub username: String,
    pub main_photo_url: Option<String>,
    pub photo_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&Member> for MemberData {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            username: member.username.as_str().to_string(),
            main_photo_url: member.photos.main_url().map(String::from),
            photo_count: member.photos.len(),
            created_at: member.created_at,
        }
    }
}
