use crate::model::calendar::{CalendarEventResponse, CalendarEventsResponse, CalendarQuery};
use axum::{
    extract::{Query, State},
    Json,
};
use garde::Validate;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_calendar_events(
    State(registry): State<AppRegistry>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<CalendarEventsResponse>> {
    query.validate(&())?;
    let range = query.date_range()?;

    let events = registry.event_repository().find_by_date_range(range).await?;
    Ok(Json(CalendarEventsResponse {
        items: events.into_iter().map(CalendarEventResponse::from).collect(),
    }))
}
