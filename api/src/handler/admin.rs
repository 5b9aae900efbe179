use crate::{
    extractor::AuthorizedUser,
    model::{
        admin::DashboardStatsResponse,
        event::EventResponse,
        user::{
            UpdateUserRoleRequest, UpdateUserRoleRequestWithUserId, UserListQuery, UserResponse,
            UsersResponse,
        },
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::{EventId, UserId},
    user::event::DeleteUser,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_dashboard_stats(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<DashboardStatsResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    let stats = registry.admin_repository().dashboard_stats().await?;
    Ok(Json(DashboardStatsResponse::from(stats)))
}

pub async fn show_user_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<UsersResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    query.validate(&())?;

    let users = registry.user_repository().find_all(query.into()).await?;
    Ok(Json(UsersResponse::from(users)))
}

pub async fn update_user_role(
    user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    let updated = registry
        .user_repository()
        .update_role(UpdateUserRoleRequestWithUserId::new(user_id, req).into())
        .await?;
    Ok(Json(UserResponse::from(updated)))
}

pub async fn delete_user(
    user: AuthorizedUser,
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    // 自分自身は消せない
    if user.id() == user_id {
        return Err(AppError::UnprocessableEntity(
            "Cannot delete your own account".into(),
        ));
    }

    registry
        .user_repository()
        .delete(DeleteUser { user_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_event_featured(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    let event = registry
        .admin_repository()
        .toggle_event_featured(event_id)
        .await?;
    Ok(Json(EventResponse::from(event)))
}
