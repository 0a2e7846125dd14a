// HTTP request handlers
use std::sync::{Arc, MutexGuard};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::console_props::ConsoleProps;
use crate::domain::decode::Size;
use crate::domain::variants::VariantProps;
use crate::infrastructure::dom::escape;
use crate::presentation::app_state::{AppState, ConsoleSession};

#[derive(Debug, Deserialize)]
pub struct SizeRequest {
    pub width: u32,
    pub height: u32,
}

/// How many surface mutations an update produced.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PatchReport {
    pub mutations: usize,
}

fn lock(state: &AppState) -> Result<MutexGuard<'_, ConsoleSession>, StatusCode> {
    state.session.lock().map_err(|_| {
        tracing::error!("Console session lock poisoned");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render the console surface with its items
pub async fn render_console(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    let session = lock(&state)?;
    let body = session.dom.to_html(session.console.surface());
    Ok(Html(format!(
        "<!DOCTYPE html><html><head><title>{}</title></head><body>{}</body></html>",
        escape(&session.console.props().name),
        body
    )))
}

/// List item props in stacking order
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<VariantProps>>, StatusCode> {
    let session = lock(&state)?;
    let items = session
        .console
        .items()
        .map(|item| item.props().clone())
        .collect();
    Ok(Json(items))
}

/// Replace the console props from a raw field bag
pub async fn update_props(
    State(state): State<Arc<AppState>>,
    Json(data): Json<Value>,
) -> Result<Json<PatchReport>, (StatusCode, String)> {
    let props = ConsoleProps::decode(&data)
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    let mut session = lock(&state).map_err(|status| (status, String::new()))?;
    let ConsoleSession { dom, console } = &mut *session;

    dom.take_mutations();
    console.set_props(dom, props);
    Ok(Json(PatchReport {
        mutations: dom.take_mutations().len(),
    }))
}

/// Resize the console surface
pub async fn resize_console(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SizeRequest>,
) -> Result<Json<PatchReport>, StatusCode> {
    let mut session = lock(&state)?;
    let ConsoleSession { dom, console } = &mut *session;

    dom.take_mutations();
    console.resize(dom, Size::new(request.width, request.height));
    Ok(Json(PatchReport {
        mutations: dom.take_mutations().len(),
    }))
}

/// Deliver a click to one item
pub async fn click_item(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    let session = match lock(&state) {
        Ok(session) => session,
        Err(status) => return status,
    };
    if session.console.click(id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
