//! Widget service: lifecycle CRUD and the reorder engine.
//!
//! DESIGN
//! ======
//! All mutations filter by both widget id and owner id, so a foreign id is
//! indistinguishable from a missing one. Reordering applies a single
//! remove-then-insert move to the owner's ordered list, derives fresh
//! order keys spaced a fixed unit apart from the current wall clock, and
//! writes every (id, key) pair concurrently.
//!
//! ERROR HANDLING
//! ==============
//! A reorder batch succeeds only if every constituent update succeeds; on
//! any failure the previous keys are written back best-effort and the
//! gesture reports failure. Blob cleanup during delete is fire-and-forget:
//! a failed blob removal is logged and never blocks the row delete.

use std::future::Future;

use futures::future::join_all;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::services::{favicon, storage::Storage};
use crate::widget::{ORDER_KEY_STEP_MS, Widget, WidgetContent, WidgetKind};

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("widget not found: {0}")]
    NotFound(Uuid),
    #[error("reorder persistence failed")]
    ReorderFailed,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// REORDER ENGINE (pure core)
// =============================================================================

/// Move one element from `from` to `to` by remove-then-insert.
///
/// Returns `false` without touching the list when the move is a no-op:
/// `from == to`, or either index is out of bounds (a drop outside any
/// valid target).
pub fn apply_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Derive `len` strictly increasing order keys spaced [`ORDER_KEY_STEP_MS`]
/// apart, starting at `base_ms`.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn derive_order_keys(len: usize, base_ms: i64) -> Vec<i64> {
    (0..len as i64).map(|i| base_ms + i * ORDER_KEY_STEP_MS).collect()
}

fn now_ms() -> i64 {
    let Ok(duration) = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(duration.as_millis()).unwrap_or(0)
}

// =============================================================================
// QUERIES
// =============================================================================

fn row_to_widget(r: &sqlx::postgres::PgRow) -> Result<Widget, serde_json::Error> {
    let content: WidgetContent = serde_json::from_value(r.get::<serde_json::Value, _>("content"))?;
    Ok(Widget {
        id: r.get("id"),
        user_id: r.get("user_id"),
        kind: content.kind(),
        x: r.get("x"),
        y: r.get("y"),
        w: r.get("w"),
        h: r.get("h"),
        content,
        order_key: r.get("order_key"),
    })
}

/// List the owner's widgets in display order.
///
/// # Errors
///
/// Returns a database error if the query fails; a row whose stored content
/// no longer deserializes is a decoding error.
pub async fn list_widgets(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Widget>, WidgetError> {
    let rows = sqlx::query(
        r"SELECT id, user_id, x, y, w, h, content, order_key
          FROM widgets
          WHERE user_id = $1
          ORDER BY order_key ASC, created_at ASC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|r| row_to_widget(r).map_err(|e| WidgetError::Database(sqlx::Error::Decode(Box::new(e)))))
        .collect()
}

/// Fetch one widget filtered by id and owner.
///
/// # Errors
///
/// `NotFound` when no row matches both the id and the owner.
pub async fn get_widget(pool: &PgPool, owner_id: Uuid, id: Uuid) -> Result<Widget, WidgetError> {
    let row = sqlx::query(
        r"SELECT id, user_id, x, y, w, h, content, order_key
          FROM widgets WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .ok_or(WidgetError::NotFound(id))?;

    row_to_widget(&row).map_err(|e| WidgetError::Database(sqlx::Error::Decode(Box::new(e))))
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Create a widget of `kind` with its default footprint and placeholder
/// content at position (0, 0), ordered after everything created so far.
///
/// # Errors
///
/// Returns a database error if the insert is rejected.
pub async fn create_widget(pool: &PgPool, owner_id: Uuid, kind: WidgetKind) -> Result<Widget, WidgetError> {
    let (w, h) = kind.default_span();
    let content = WidgetContent::default_for(kind);
    let widget = Widget {
        id: Uuid::new_v4(),
        user_id: owner_id,
        kind,
        x: 0,
        y: 0,
        w,
        h,
        content,
        order_key: now_ms(),
    };

    sqlx::query(
        r"INSERT INTO widgets (id, user_id, kind, x, y, w, h, content, order_key)
          VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(widget.id)
    .bind(widget.user_id)
    .bind(widget.kind.as_str())
    .bind(widget.x)
    .bind(widget.y)
    .bind(widget.w)
    .bind(widget.h)
    .bind(serde_json::to_value(&widget.content).unwrap_or_default())
    .bind(widget.order_key)
    .execute(pool)
    .await?;

    Ok(widget)
}

/// Stamp a derived favicon URL onto link content. Unparseable destination
/// URLs leave the icon unset without raising an error.
#[must_use]
pub fn stamp_link_icon(content: WidgetContent) -> WidgetContent {
    match content {
        WidgetContent::Link { title, url, .. } => {
            let icon_url = favicon::derive_icon_url(&url);
            WidgetContent::Link { title, url, icon_url }
        }
        other => other,
    }
}

/// Overwrite a widget's content (and footprint, when given), filtered by id
/// and owner. Spans are clamped to the kind's limits; link content gets its
/// icon URL re-derived from the destination.
///
/// # Errors
///
/// `NotFound` when no row matches both the id and the owner.
pub async fn update_widget(
    pool: &PgPool,
    owner_id: Uuid,
    id: Uuid,
    content: WidgetContent,
    span: Option<(i32, i32)>,
) -> Result<Widget, WidgetError> {
    let content = stamp_link_icon(content);
    let kind = content.kind();
    let span = span.map(|(w, h)| crate::grid::clamp_span(kind, w, h));

    let row = sqlx::query(
        r"UPDATE widgets SET
              kind = $3,
              content = $4,
              w = COALESCE($5, w),
              h = COALESCE($6, h)
          WHERE id = $1 AND user_id = $2
          RETURNING id, user_id, x, y, w, h, content, order_key",
    )
    .bind(id)
    .bind(owner_id)
    .bind(kind.as_str())
    .bind(serde_json::to_value(&content).unwrap_or_default())
    .bind(span.map(|(w, _)| w))
    .bind(span.map(|(_, h)| h))
    .fetch_optional(pool)
    .await?
    .ok_or(WidgetError::NotFound(id))?;

    row_to_widget(&row).map_err(|e| WidgetError::Database(sqlx::Error::Decode(Box::new(e))))
}

/// Delete a widget filtered by id and owner. If its content references a
/// managed blob, the blob is removed first, best-effort.
///
/// # Errors
///
/// `NotFound` when no row matches both the id and the owner.
pub async fn delete_widget(pool: &PgPool, storage: &Storage, owner_id: Uuid, id: Uuid) -> Result<(), WidgetError> {
    let widget = get_widget(pool, owner_id, id).await?;

    if let Some(image_url) = widget.content.image_url() {
        // Non-critical housekeeping: a failed blob delete never blocks the
        // row delete. Deletion is owner-scoped, so content pointed at a
        // foreign blob URL cannot take that blob down with the widget.
        if let Err(e) = storage.delete_by_url(owner_id, image_url).await {
            tracing::warn!(widget_id = %id, url = image_url, error = %e, "blob cleanup failed");
        }
    }

    let result = sqlx::query("DELETE FROM widgets WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(WidgetError::NotFound(id));
    }

    Ok(())
}

// =============================================================================
// REORDER (persisted)
// =============================================================================

async fn write_order_key(pool: &PgPool, owner_id: Uuid, id: Uuid, order_key: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE widgets SET order_key = $3 WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner_id)
        .bind(order_key)
        .execute(pool)
        .await?;
    Ok(())
}

/// Persist a full `(id, key)` assignment as one concurrent batch through
/// `write`. On any failure the `previous` assignment is written back
/// best-effort and the batch reports failure.
async fn persist_assignment<W, Fut>(
    assignment: &[(Uuid, i64)],
    previous: &[(Uuid, i64)],
    write: W,
) -> Result<(), WidgetError>
where
    W: Fn(Uuid, i64) -> Fut,
    Fut: Future<Output = Result<(), sqlx::Error>>,
{
    let results = join_all(assignment.iter().map(|(id, key)| write(*id, *key))).await;
    if !results.iter().any(Result::is_err) {
        return Ok(());
    }

    // Roll back to the last known-good assignment. Best-effort: the store
    // is not guaranteed to undo updates that already succeeded.
    let restores = previous.iter().map(|(id, key)| write(*id, *key));
    for ((id, _), result) in previous.iter().zip(join_all(restores).await) {
        if let Err(e) = result {
            tracing::warn!(widget_id = %id, error = %e, "reorder rollback write failed");
        }
    }
    Err(WidgetError::ReorderFailed)
}

/// Move the widget at `from` to `to` in the owner's ordered list and
/// persist the resulting key assignment as one concurrent batch.
///
/// A no-op gesture (same position, or an index outside the list) returns
/// the list unchanged without writing anything. On any write failure the
/// previous keys are restored best-effort and the whole gesture fails.
///
/// # Errors
///
/// `ReorderFailed` when any key update is rejected; database errors from
/// the initial list load.
pub async fn reorder_widgets(
    pool: &PgPool,
    owner_id: Uuid,
    from: usize,
    to: usize,
) -> Result<Vec<Widget>, WidgetError> {
    let mut widgets = list_widgets(pool, owner_id).await?;
    let previous: Vec<(Uuid, i64)> = widgets.iter().map(|w| (w.id, w.order_key)).collect();

    if !apply_move(&mut widgets, from, to) {
        return Ok(widgets);
    }

    let keys = derive_order_keys(widgets.len(), now_ms());
    for (widget, key) in widgets.iter_mut().zip(&keys) {
        widget.order_key = *key;
    }

    let assignment: Vec<(Uuid, i64)> = widgets.iter().map(|w| (w.id, w.order_key)).collect();
    persist_assignment(&assignment, &previous, |id, key| {
        write_order_key(pool, owner_id, id, key)
    })
    .await?;

    Ok(widgets)
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
