//! Pixel geometry primitives shared by the alignment engine and its hosts.
//!
//! Coordinates are `f64` CSS pixels relative to the viewport origin. Rects are
//! measurement snapshots: a host produces a fresh one per measurement and the
//! engine never mutates one after capture.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Number of decimal places kept when emitting a CSS pixel offset.
pub const CSS_PX_DECIMALS: i32 = 2;

/// A bounding box in viewport-relative pixel coordinates.
///
/// Mirrors the shape of a DOM `getBoundingClientRect()` result: `right` and
/// `bottom` are absolute coordinates, not extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Construct from the four edge coordinates.
    #[inline]
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Construct from an origin and an extent.
    #[inline]
    #[must_use]
    pub const fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Horizontal extent in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Return a copy shifted by the given deltas.
    #[inline]
    #[must_use]
    pub const fn translated(&self, delta_x: f64, delta_y: f64) -> Self {
        Self {
            left: self.left + delta_x,
            top: self.top + delta_y,
            right: self.right + delta_x,
            bottom: self.bottom + delta_y,
        }
    }

    /// Compact string encoding of the rect's origin, used by change watchers
    /// to detect movement without comparing every edge.
    #[must_use]
    pub fn position_signature(&self) -> String {
        format!("x{}y{}", self.left, self.top)
    }
}

/// Viewport metrics: visible size plus the current document scroll offsets.
///
/// The size comes from the window when the host knows it and falls back to the
/// document body's dimensions otherwise; that resolution happens host-side, so
/// the engine only ever sees final numbers. Scroll offsets default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
}

impl Viewport {
    /// Viewport with the given size and no scroll.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    /// Attach scroll offsets to an existing viewport.
    #[inline]
    #[must_use]
    pub const fn with_scroll(self, scroll_x: f64, scroll_y: f64) -> Self {
        Self {
            scroll_x,
            scroll_y,
            ..self
        }
    }
}

/// Round an offset to [`CSS_PX_DECIMALS`] decimal places.
#[inline]
#[must_use]
pub fn round_css_px(value: f64) -> f64 {
    let scale = 10_f64.powi(CSS_PX_DECIMALS);
    let rounded = (value * scale).round() / scale;
    // Normalize negative zero so formatting never emits "-0px".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Format a rounded offset as a CSS pixel value, e.g. `"10.13px"` or `"80px"`.
///
/// Relies on `f64`'s shortest-representation display, so whole numbers carry
/// no trailing `.0`.
#[must_use]
pub fn format_css_px(value: f64) -> String {
    format!("{}px", round_css_px(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_extents() {
        let rect = Rect::new(100.0, 100.0, 140.0, 160.0);
        assert_eq!(rect.width(), 40.0);
        assert_eq!(rect.height(), 60.0);
    }

    #[test]
    fn rect_from_origin_size_round_trips() {
        let rect = Rect::from_origin_size(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect, Rect::new(10.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn translated_moves_both_edges() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0).translated(5.0, -2.0);
        assert_eq!(rect, Rect::new(5.0, -2.0, 15.0, 8.0));
    }

    #[test]
    fn position_signature_encodes_origin() {
        let rect = Rect::new(12.5, 34.0, 50.0, 60.0);
        assert_eq!(rect.position_signature(), "x12.5y34");
    }

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round_css_px(10.126), 10.13);
        assert_eq!(round_css_px(10.124), 10.12);
        assert_eq!(round_css_px(80.0), 80.0);
    }

    #[test]
    fn px_formatting_drops_trailing_zeroes() {
        assert_eq!(format_css_px(80.0), "80px");
        assert_eq!(format_css_px(10.126), "10.13px");
        assert_eq!(format_css_px(-0.004), "0px");
    }
}
