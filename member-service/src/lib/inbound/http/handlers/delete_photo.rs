use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::member::models::IdentityContext;
use crate::domain::member::photos::PhotoId;
use crate::inbound::http::router::AppState;
use crate::member::errors::MemberError;
use crate::member::ports::MemberRepository;
use crate::member::ports::MemberServicePort;
use crate::member::ports::PhotoStore;

pub async fn delete_photo<MR, PS>(
    State(state): State<AppState<MR, PS>>,
    Extension(identity): Extension<IdentityContext>,
    Path(photo_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError>
where
    MR: MemberRepository,
    PS: PhotoStore,
{
    let photo_id = PhotoId::from_string(&photo_id).map_err(MemberError::from)?;

    state
        .member_service
        .delete_photo(&identity, &photo_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
