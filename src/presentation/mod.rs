// Presentation layer - HTTP preview of a visual console
pub mod app_state;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use self::app_state::AppState;
use self::handlers::{
    click_item, health_check, list_items, render_console, resize_console, update_props,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/console", get(render_console))
        .route("/console/items", get(list_items))
        .route("/console/props", put(update_props))
        .route("/console/size", put(resize_console))
        .route("/console/items/:id/click", post(click_item))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
