use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::calendar::show_calendar_events;

pub fn build_calendar_routers() -> Router<AppRegistry> {
    let calendar_routers = Router::new().route("/events", get(show_calendar_events));

    Router::new().nest("/calendar", calendar_routers)
}
