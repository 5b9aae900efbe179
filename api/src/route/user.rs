use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{get_profile, update_profile};

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new()
        .route("/profile", get(get_profile))
        .route("/profile", put(update_profile));

    Router::new().nest("/users", user_routers)
}
