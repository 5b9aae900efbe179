use axum::{
    routing::{delete, get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::admin::{
    delete_user, show_dashboard_stats, show_user_list, toggle_event_featured, update_user_role,
};

pub fn build_admin_routers() -> Router<AppRegistry> {
    let admin_routers = Router::new()
        .route("/stats", get(show_dashboard_stats))
        .route("/users", get(show_user_list))
        .route("/users/:user_id", put(update_user_role))
        .route("/users/:user_id", delete(delete_user))
        .route("/events/:event_id/feature", put(toggle_event_featured));

    Router::new().nest("/admin", admin_routers)
}
