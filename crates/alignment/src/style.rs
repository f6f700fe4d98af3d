//! Computed position styles and the applied-style diff.

use crate::attachment::{HorizontalEdge, VerticalEdge};
use geometry::format_css_px;

/// Every inline property a position style may touch. Applying a new style
/// removes all of these first so no stale offset survives a recomputation.
pub const POSITION_PROPERTIES: [&str; 5] = ["position", "left", "right", "top", "bottom"];

/// One inline-style declaration produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
}

/// The computed placement of an aligned element: `position: absolute` plus
/// one horizontal and one vertical offset, each already rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionStyle {
    pub x_edge: HorizontalEdge,
    pub x_px: f64,
    pub y_edge: VerticalEdge,
    pub y_px: f64,
}

impl PositionStyle {
    /// The declarations this style sets, in application order.
    #[must_use]
    pub fn declarations(&self) -> [Declaration; 3] {
        [
            Declaration {
                property: "position",
                value: "absolute".to_owned(),
            },
            Declaration {
                property: self.x_edge.property(),
                value: format_css_px(self.x_px),
            },
            Declaration {
                property: self.y_edge.property(),
                value: format_css_px(self.y_px),
            },
        ]
    }

    /// Whether the element's currently applied inline values already equal
    /// this style, considering only the properties this style sets. When true
    /// the write can be skipped entirely.
    pub fn matches_applied(&self, applied: impl Fn(&str) -> Option<String>) -> bool {
        self.declarations()
            .iter()
            .all(|decl| applied(decl.property).as_deref() == Some(decl.value.as_str()))
    }
}
