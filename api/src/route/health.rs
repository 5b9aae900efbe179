use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::health::{health_check, health_check_db, health_check_kv};

pub fn build_health_check_routers() -> Router<AppRegistry> {
    let health_routers = Router::new()
        .route("/", get(health_check))
        .route("/db", get(health_check_db))
        .route("/kv", get(health_check_kv));

    Router::new().nest("/health", health_routers)
}
