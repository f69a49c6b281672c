//! Widget routes — lifecycle CRUD and reordering.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grid::{self, GridSpec, Placement};
use crate::routes::auth::AuthUser;
use crate::services::widget as widget_svc;
use crate::services::widget::WidgetError;
use crate::state::AppState;
use crate::widget::{Widget, WidgetContent, WidgetKind};

pub(crate) fn widget_error_to_status(err: &WidgetError) -> StatusCode {
    match err {
        WidgetError::NotFound(_) => StatusCode::NOT_FOUND,
        WidgetError::ReorderFailed | WidgetError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Ordered widget list plus the grid placements the renderer derives from
/// it and the geometry needed to draw them, so clients never re-implement
/// the flow layout.
#[derive(Serialize)]
pub struct WidgetListResponse {
    pub widgets: Vec<Widget>,
    pub layout: Vec<Placement>,
    pub grid: GridSpec,
}

fn list_response(widgets: Vec<Widget>) -> WidgetListResponse {
    let layout = grid::flow_layout(&widgets);
    WidgetListResponse { widgets, layout, grid: grid::GRID }
}

/// `GET /api/widgets` — list the caller's widgets in display order.
pub async fn list_widgets(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<WidgetListResponse>, StatusCode> {
    let widgets = widget_svc::list_widgets(&state.pool, auth.user.id)
        .await
        .map_err(|e| widget_error_to_status(&e))?;
    Ok(Json(list_response(widgets)))
}

#[derive(Deserialize)]
pub struct CreateWidgetBody {
    pub kind: WidgetKind,
}

/// `POST /api/widgets` — create a widget with per-kind defaults.
pub async fn create_widget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateWidgetBody>,
) -> Result<(StatusCode, Json<Widget>), StatusCode> {
    let widget = widget_svc::create_widget(&state.pool, auth.user.id, body.kind)
        .await
        .map_err(|e| widget_error_to_status(&e))?;
    Ok((StatusCode::CREATED, Json(widget)))
}

/// `GET /api/widgets/:id` — fetch one widget.
pub async fn get_widget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Widget>, StatusCode> {
    let widget = widget_svc::get_widget(&state.pool, auth.user.id, id)
        .await
        .map_err(|e| widget_error_to_status(&e))?;
    Ok(Json(widget))
}

#[derive(Deserialize)]
pub struct UpdateWidgetBody {
    pub content: WidgetContent,
    pub w: Option<i32>,
    pub h: Option<i32>,
}

impl UpdateWidgetBody {
    /// A footprint is only applied when both dimensions are given.
    pub(crate) fn span(&self) -> Option<(i32, i32)> {
        match (self.w, self.h) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        }
    }
}

/// `PATCH /api/widgets/:id` — overwrite content and optionally the footprint.
pub async fn update_widget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateWidgetBody>,
) -> Result<Json<Widget>, StatusCode> {
    let span = body.span();
    let widget = widget_svc::update_widget(&state.pool, auth.user.id, id, body.content, span)
        .await
        .map_err(|e| widget_error_to_status(&e))?;
    Ok(Json(widget))
}

/// `DELETE /api/widgets/:id` — delete a widget (and its blob, best-effort).
pub async fn delete_widget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    widget_svc::delete_widget(&state.pool, &state.storage, auth.user.id, id)
        .await
        .map_err(|e| widget_error_to_status(&e))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Deserialize)]
pub struct ReorderBody {
    pub from: usize,
    pub to: usize,
}

/// `POST /api/widgets/reorder` — move one widget within the display order.
///
/// A no-op gesture (same position or an invalid target) returns the list
/// unchanged. On persistence failure the previous order is restored and
/// the whole gesture fails.
pub async fn reorder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ReorderBody>,
) -> Result<Json<WidgetListResponse>, StatusCode> {
    let widgets = widget_svc::reorder_widgets(&state.pool, auth.user.id, body.from, body.to)
        .await
        .map_err(|e| widget_error_to_status(&e))?;
    Ok(Json(list_response(widgets)))
}

#[cfg(test)]
#[path = "widgets_test.rs"]
mod tests;
