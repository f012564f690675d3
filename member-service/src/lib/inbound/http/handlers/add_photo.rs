use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::member::models::IdentityContext;
use crate::domain::member::models::PhotoUpload;
use crate::domain::member::photos::Photo;
use crate::inbound::http::router::AppState;
use crate::member::ports::MemberRepository;
use crate::member::ports::MemberServicePort;
use crate::member::ports::PhotoStore;

pub async fn add_photo<MR, PS>(
    State(state): State<AppState<MR, PS>>,
    Extension(identity): Extension<IdentityContext>,
    multipart: Multipart,
) -> Result<ApiSuccess<AddPhotoResponseData>, ApiError>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    let upload = extract_file(multipart).await?;

    state
        .member_service
        .add_photo(&identity, upload)
        .await
        .map_err(ApiError::from)
        .map(|ref photo| ApiSuccess::new(StatusCode::CREATED, photo.into()))
}

async fn extract_file(mut multipart: Multipart) -> Result<PhotoUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(ToString::to_string)
            .unwrap_or_else(|| "photo".to_string());
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        if bytes.is_empty() {
            return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
        }

        return Ok(PhotoUpload {
            bytes: bytes.to_vec(),
            filename,
            content_type,
        });
    }

    Err(ApiError::BadRequest(
        "Missing multipart field: file".to_string(),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddPhotoResponseData {
    pub id: String,
    pub url: String,
    pub is_main: bool,
}

impl From<&Photo> for AddPhotoResponseData {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id.to_string(),
            url: photo.url.clone(),
            is_main: photo.is_main,
        }
    }
}
