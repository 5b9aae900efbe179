pub mod admin;
pub mod auth;
pub mod calendar;
pub mod event;
pub mod health;
pub mod user;

use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(auth::build_auth_routers())
        .merge(user::build_user_routers())
        .merge(event::build_event_routers())
        .merge(calendar::build_calendar_routers())
        .merge(admin::build_admin_routers());
    Router::new()
        .merge(health::build_health_check_routers())
        .nest("/api", router)
}
