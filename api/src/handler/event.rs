use crate::{
    extractor::AuthorizedUser,
    model::event::{
        CreateEventRequest, CreateEventRequestWithOrganizer, EventListQuery, EventResponse,
        EventsResponse, UpdateEventRequest, UpdateEventRequestWithId,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{event::event::DeleteEvent, id::EventId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEventRequest>,
) -> AppResult<impl IntoResponse> {
    if !user.can_manage_events() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    let organizer_name = user.user.name.clone();
    let event = registry
        .event_repository()
        .create(CreateEventRequestWithOrganizer::new(req, user.id(), organizer_name).into())
        .await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

pub async fn show_event_list(
    State(registry): State<AppRegistry>,
    Query(query): Query<EventListQuery>,
) -> AppResult<Json<EventsResponse>> {
    query.validate(&())?;

    let events = registry.event_repository().find_all(query.into()).await?;
    Ok(Json(EventsResponse::from(events)))
}

pub async fn show_event(
    State(registry): State<AppRegistry>,
    Path(event_id): Path<EventId>,
) -> AppResult<Json<EventResponse>> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .map(EventResponse::from)
        .map(Json)
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("イベント（{event_id}）が見つかりませんでした。"))
        })
}

// 主催者本人または管理者のみ変更を許可する
async fn ensure_event_owner(
    registry: &AppRegistry,
    user: &AuthorizedUser,
    event_id: EventId,
) -> AppResult<()> {
    let event = registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("イベント（{event_id}）が見つかりませんでした。"))
        })?;
    if event.organizer.organizer_id != user.id() && !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    Ok(())
}

pub async fn update_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEventRequest>,
) -> AppResult<Json<EventResponse>> {
    req.validate(&())?;
    ensure_event_owner(&registry, &user, event_id).await?;

    let event = registry
        .event_repository()
        .update(UpdateEventRequestWithId::new(event_id, req).into())
        .await?;
    Ok(Json(EventResponse::from(event)))
}

pub async fn delete_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    ensure_event_owner(&registry, &user, event_id).await?;

    registry
        .event_repository()
        .delete(DeleteEvent { event_id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn register_for_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .event_repository()
        .register_participant(event_id, user.id())
        .await?;
    Ok(StatusCode::CREATED)
}

pub async fn unregister_from_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .event_repository()
        .unregister_participant(event_id, user.id())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
