//! Grid renderer: fixed-column flow layout and spotlight state.
//!
//! DESIGN
//! ======
//! Widgets flow into a four-column grid in list order. Each widget occupies
//! a `w`x`h` cell footprint; placement is first-fit, scanning row-major for
//! the first free slot wide enough for the span. The spotlight state machine
//! tracks which single widget is selected for focused editing. Both are pure
//! presentation logic with no persistence.

use serde::Serialize;
use uuid::Uuid;

use crate::widget::{Widget, WidgetKind};

// Layout constants (grid cells / logical pixels).
pub const GRID_COLUMNS: i32 = 4;
pub const ROW_HEIGHT: i32 = 160;
pub const GRID_GAP: i32 = 16;
const MIN_SPAN: i32 = 1;
const MAX_H: i32 = 2;

/// Fixed grid geometry clients need to turn placements into pixels:
/// column count, row height, and the gap between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub columns: i32,
    pub row_height: i32,
    pub gap: i32,
}

pub const GRID: GridSpec = GridSpec {
    columns: GRID_COLUMNS,
    row_height: ROW_HEIGHT,
    gap: GRID_GAP,
};

// =============================================================================
// SPAN LIMITS
// =============================================================================

/// Per-kind bounds on a widget's grid footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanLimits {
    pub max_w: i32,
    pub max_h: i32,
}

/// Footprint bounds for `kind`. Kinds without tighter limits may span the
/// full grid width.
#[must_use]
pub fn span_limits(kind: WidgetKind) -> SpanLimits {
    match kind {
        WidgetKind::Social => SpanLimits { max_w: 1, max_h: 1 },
        WidgetKind::Link => SpanLimits { max_w: 2, max_h: 1 },
        WidgetKind::Image => SpanLimits { max_w: 2, max_h: 2 },
        WidgetKind::Profile | WidgetKind::Text | WidgetKind::Map => {
            SpanLimits { max_w: GRID_COLUMNS, max_h: MAX_H }
        }
    }
}

/// Clamp a requested `(w, h)` footprint into the bounds for `kind`.
#[must_use]
pub fn clamp_span(kind: WidgetKind, w: i32, h: i32) -> (i32, i32) {
    let limits = span_limits(kind);
    (w.clamp(MIN_SPAN, limits.max_w), h.clamp(MIN_SPAN, limits.max_h))
}

// =============================================================================
// FLOW LAYOUT
// =============================================================================

/// Resolved grid position for one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub id: Uuid,
    pub col: i32,
    pub row: i32,
    pub w: i32,
    pub h: i32,
}

/// Lay out widgets in list order into the fixed-column grid.
///
/// Spans are clamped to the widget kind's limits before placement, so a
/// stored footprint that exceeds the grid never produces an unplaceable
/// widget.
#[must_use]
pub fn flow_layout(widgets: &[Widget]) -> Vec<Placement> {
    let mut occupied: Vec<(i32, i32)> = Vec::new();
    let mut placements = Vec::with_capacity(widgets.len());

    for widget in widgets {
        let (w, h) = clamp_span(widget.kind, widget.w, widget.h);
        let (col, row) = first_fit(&occupied, w, h);
        for dy in 0..h {
            for dx in 0..w {
                occupied.push((col + dx, row + dy));
            }
        }
        placements.push(Placement { id: widget.id, col, row, w, h });
    }

    placements
}

fn first_fit(occupied: &[(i32, i32)], w: i32, h: i32) -> (i32, i32) {
    let mut row = 0;
    loop {
        for col in 0..=(GRID_COLUMNS - w) {
            if footprint_free(occupied, col, row, w, h) {
                return (col, row);
            }
        }
        row += 1;
    }
}

fn footprint_free(occupied: &[(i32, i32)], col: i32, row: i32, w: i32, h: i32) -> bool {
    for dy in 0..h {
        for dx in 0..w {
            if occupied.contains(&(col + dx, row + dy)) {
                return false;
            }
        }
    }
    true
}

// =============================================================================
// SPOTLIGHT STATE
// =============================================================================

/// Editor view mode: building (widgets selectable) or previewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Build,
    Preview,
}

/// Spotlight state machine over one widget's identity.
///
/// none-selected -> (select) -> selected-in-edit-mode -> (close) ->
/// none-selected. Entering preview mode forces none-selected regardless of
/// the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorState {
    mode: EditorMode,
    selected: Option<Uuid>,
}

impl EditorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(self) -> EditorMode {
        self.mode
    }

    /// The spotlit widget, if one is selected in build mode.
    #[must_use]
    pub fn spotlight(self) -> Option<Uuid> {
        match self.mode {
            EditorMode::Build => self.selected,
            EditorMode::Preview => None,
        }
    }

    /// Select a widget for editing. Ignored in preview mode.
    pub fn select(&mut self, id: Uuid) {
        if self.mode == EditorMode::Build {
            self.selected = Some(id);
        }
    }

    /// Close the editing panel, returning to none-selected.
    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Switch view mode. Leaving build mode clears any selection.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        if mode == EditorMode::Preview {
            self.selected = None;
        }
    }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod tests;
