use crate::{
    extractor::AuthorizedUser,
    model::user::{UpdateUserProfileRequest, UpdateUserProfileRequestWithUserId, UserResponse},
};
use axum::{extract::State, response::IntoResponse, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn get_profile(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}

pub async fn update_profile(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserProfileRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let updated = registry
        .user_repository()
        .update_profile(UpdateUserProfileRequestWithUserId::new(user.id(), req).into())
        .await?;
    Ok(Json(UserResponse::from(updated)))
}
