use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::member::models::Member;
use crate::domain::member::models::Username;
use crate::domain::member::photos::Photo;
use crate::inbound::http::router::AppState;
use crate::member::errors::MemberError;
use crate::member::ports::MemberRepository;
use crate::member::ports::MemberServicePort;
use crate::member::ports::PhotoStore;

pub async fn get_member<MR, PS>(
    State(state): State<AppState<MR, PS>>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<GetMemberResponseData>, ApiError>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    let username = Username::new(username).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .member_service
        .get_member(&username)
        .await
        .map_err(|e| match e {
            // A missing profile is a 404 here, not a credential failure
            MemberError::UnknownUsername(name) => {
                ApiError::NotFound(format!("No member with username: {}", name))
            }
            _ => ApiError::from(e),
        })
        .map(|ref member| ApiSuccess::new(StatusCode::OK, member.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetMemberResponseData {
    pub id: String,
    pub username: String,
    pub main_photo_url: Option<String>,
    pub photos: Vec<PhotoData>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoData {
    pub id: String,
    pub url: String,
    pub is_main: bool,
}

impl From<&Photo> for PhotoData {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id.to_string(),
            url: photo.url.clone(),
            is_main: photo.is_main,
        }
    }
}

impl From<&Member> for GetMemberResponseData {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            username: member.username.as_str().to_string(),
            main_photo_url: member.photos.main_url().map(String::from),
            photos: member.photos.photos().iter().map(PhotoData::from).collect(),
            created_at: member.created_at,
        }
    }
}
