//! Widget domain model.
//!
//! DESIGN
//! ======
//! A widget is one positioned, typed content tile owned by a user. Content
//! is a tagged union with one variant per widget kind so rendering and
//! validation stay exhaustive over the six kinds. The `kind` column in the
//! database always mirrors the content tag; both are written from the
//! content on every mutation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spacing between freshly derived order keys, in milliseconds.
pub const ORDER_KEY_STEP_MS: i64 = 1_000;

// =============================================================================
// WIDGET KIND
// =============================================================================

/// The six widget kinds a page can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Profile,
    Social,
    Link,
    Image,
    Text,
    Map,
}

impl WidgetKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Social => "social",
            Self::Link => "link",
            Self::Image => "image",
            Self::Text => "text",
            Self::Map => "map",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "profile" => Some(Self::Profile),
            "social" => Some(Self::Social),
            "link" => Some(Self::Link),
            "image" => Some(Self::Image),
            "text" => Some(Self::Text),
            "map" => Some(Self::Map),
            _ => None,
        }
    }

    /// Default grid footprint `(w, h)` for a freshly created widget.
    #[must_use]
    pub fn default_span(self) -> (i32, i32) {
        match self {
            Self::Profile | Self::Image | Self::Map => (2, 2),
            Self::Text => (2, 1),
            Self::Social | Self::Link => (1, 1),
        }
    }

    fn title_word(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Social => "Social",
            Self::Link => "Link",
            Self::Image => "Image",
            Self::Text => "Text",
            Self::Map => "Map",
        }
    }
}

// =============================================================================
// WIDGET CONTENT
// =============================================================================

/// Per-kind content bag. Field names are camelCase on the wire to match the
/// stored JSON shape (`imageUrl`, `iconUrl`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum WidgetContent {
    Profile {
        title: String,
        #[serde(default)]
        description: String,
    },
    Social {
        title: String,
        #[serde(default)]
        url: String,
        #[serde(default)]
        platform: Option<String>,
        #[serde(default)]
        icon_url: Option<String>,
    },
    Link {
        title: String,
        #[serde(default)]
        url: String,
        #[serde(default)]
        icon_url: Option<String>,
    },
    Image {
        title: String,
        #[serde(default)]
        image_url: Option<String>,
        #[serde(default)]
        focal_x: Option<f64>,
        #[serde(default)]
        focal_y: Option<f64>,
    },
    Text {
        title: String,
        #[serde(default)]
        description: String,
    },
    Map {
        title: String,
        #[serde(default)]
        location: Option<String>,
    },
}

impl WidgetContent {
    /// The kind this content belongs to (the tag of the variant).
    #[must_use]
    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::Profile { .. } => WidgetKind::Profile,
            Self::Social { .. } => WidgetKind::Social,
            Self::Link { .. } => WidgetKind::Link,
            Self::Image { .. } => WidgetKind::Image,
            Self::Text { .. } => WidgetKind::Text,
            Self::Map { .. } => WidgetKind::Map,
        }
    }

    /// Placeholder content for a freshly created widget of `kind`.
    #[must_use]
    pub fn default_for(kind: WidgetKind) -> Self {
        let title = format!("New {}", kind.title_word());
        match kind {
            WidgetKind::Profile => Self::Profile {
                title,
                description: "Tell the world who you are.".to_owned(),
            },
            WidgetKind::Social => Self::Social { title, url: String::new(), platform: None, icon_url: None },
            WidgetKind::Link => Self::Link { title, url: String::new(), icon_url: None },
            WidgetKind::Image => Self::Image { title, image_url: None, focal_x: None, focal_y: None },
            WidgetKind::Text => Self::Text { title, description: String::new() },
            WidgetKind::Map => Self::Map { title, location: None },
        }
    }

    /// The uploaded image URL this content references, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Self::Image { image_url, .. } => image_url.as_deref(),
            _ => None,
        }
    }
}

// =============================================================================
// WIDGET
// =============================================================================

/// One widget row. Mirrors the `widgets` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Widget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: WidgetKind,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub content: WidgetContent,
    /// Epoch-millis ordering key; display order is `order_key` ascending,
    /// ties broken by insertion time.
    pub order_key: i64,
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
