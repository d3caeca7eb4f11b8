pub mod api;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.static_dir);
    Router::new()
        .merge(api::router())
        .fallback_service(assets)
        .with_state(state)
}
