//! The alignment computation itself.

use crate::attachment::{AlignmentPair, HorizontalEdge, VerticalEdge};
use crate::style::PositionStyle;
use geometry::{Rect, Viewport, round_css_px};

/// Compute the absolute position that puts the aligned element's attachment
/// point on the anchor's attachment point.
///
/// The offsets start at the anchor rect's coordinates on the anchor
/// attachment's edges (plus the document scroll), are adjusted by half-extents
/// for centered attachments, and are converted to right/bottom-relative values
/// when the aligned attachment names those edges. Pure: identical inputs
/// always produce an identical style.
#[must_use]
pub fn compute_alignment(
    anchor: Rect,
    aligned: Rect,
    pair: &AlignmentPair,
    viewport: Viewport,
) -> PositionStyle {
    let anchor_x = match pair.anchor.x_edge {
        HorizontalEdge::Left => anchor.left,
        HorizontalEdge::Right => anchor.right,
    };
    let anchor_y = match pair.anchor.y_edge {
        VerticalEdge::Top => anchor.top,
        VerticalEdge::Bottom => anchor.bottom,
    };
    let mut x_offset = anchor_x + viewport.scroll_x;
    let mut y_offset = anchor_y + viewport.scroll_y;

    // Centered aligned attachment: pull back by half the aligned extent.
    if pair.aligned.center_x {
        x_offset -= aligned.width() / 2.0;
    }
    if pair.aligned.center_y {
        y_offset -= aligned.height() / 2.0;
    }
    // Centered anchor attachment: push forward by half the anchor extent.
    if pair.anchor.center_x {
        x_offset += anchor.width() / 2.0;
    }
    if pair.anchor.center_y {
        y_offset += anchor.height() / 2.0;
    }

    // Express the offset against the boundary the aligned edge is relative to.
    if pair.aligned.x_edge == HorizontalEdge::Right {
        x_offset = viewport.width - x_offset;
    }
    if pair.aligned.y_edge == VerticalEdge::Bottom {
        y_offset = viewport.height - y_offset;
    }

    PositionStyle {
        x_edge: pair.aligned.x_edge,
        x_px: round_css_px(x_offset),
        y_edge: pair.aligned.y_edge,
        y_px: round_css_px(y_offset),
    }
}
