//! Attachment flag parsing.
//!
//! An attachment flag is a short string naming a point on an element's
//! bounding box: `"tl"` is the top-left corner, `"bc"` the bottom edge
//! midpoint, `"cc"` the center. Flags are read by substring containment, not
//! equality, so `"lt"` and `"tl"` are equivalent and any unknown characters
//! are ignored.

use anyhow::{Error, anyhow};

/// Alignment spec applied when no spec is configured: the aligned element's
/// top-left corner tracks the anchor's bottom-left corner.
pub const DEFAULT_ALIGNMENT_SPEC: &str = "tl bl";

/// Horizontal edge a computed offset is expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalEdge {
    Left,
    Right,
}

impl HorizontalEdge {
    /// CSS property name carrying the offset for this edge.
    #[must_use]
    pub const fn property(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Vertical edge a computed offset is expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalEdge {
    Top,
    Bottom,
}

impl VerticalEdge {
    /// CSS property name carrying the offset for this edge.
    #[must_use]
    pub const fn property(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// A parsed attachment point on an element's bounding box.
///
/// When an axis is centered its edge keeps the default (`Left`/`Top`); the
/// centering adjustment is applied on top of that edge's coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attachment {
    pub x_edge: HorizontalEdge,
    pub y_edge: VerticalEdge,
    pub center_x: bool,
    pub center_y: bool,
}

impl Default for Attachment {
    /// The top-left corner.
    fn default() -> Self {
        Self {
            x_edge: HorizontalEdge::Left,
            y_edge: VerticalEdge::Top,
            center_x: false,
            center_y: false,
        }
    }
}

/// Parse a single attachment flag.
///
/// Total function: every string yields an attachment. Per axis, the explicit
/// edge character wins (`b` over `t`, `r` over `l`); an axis with neither of
/// its characters is centered.
#[must_use]
pub fn parse_attachment(flag: &str) -> Attachment {
    let mut attachment = Attachment::default();
    if flag.contains('b') {
        attachment.y_edge = VerticalEdge::Bottom;
    } else if !flag.contains('t') {
        attachment.center_y = true;
    }
    if flag.contains('r') {
        attachment.x_edge = HorizontalEdge::Right;
    } else if !flag.contains('l') {
        attachment.center_x = true;
    }
    attachment
}

/// The two attachment points of one alignment: the aligned element's point
/// first, the anchor's point second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlignmentPair {
    pub aligned: Attachment,
    pub anchor: Attachment,
}

impl AlignmentPair {
    /// Parse a two-token spec string such as `"tl bl"` or `"cc tc"`.
    ///
    /// Tokens beyond the second are ignored; fewer than two is an error.
    pub fn parse(spec: &str) -> Result<Self, Error> {
        let mut tokens = spec.split_whitespace();
        let aligned_flag = tokens
            .next()
            .ok_or_else(|| anyhow!("alignment spec is empty: {spec:?}"))?;
        let anchor_flag = tokens
            .next()
            .ok_or_else(|| anyhow!("alignment spec needs two attachment flags: {spec:?}"))?;
        Ok(Self {
            aligned: parse_attachment(aligned_flag),
            anchor: parse_attachment(anchor_flag),
        })
    }
}

impl Default for AlignmentPair {
    /// The parsed [`DEFAULT_ALIGNMENT_SPEC`].
    fn default() -> Self {
        Self {
            aligned: parse_attachment("tl"),
            anchor: parse_attachment("bl"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_pair_matches_default_spec() {
        let parsed = AlignmentPair::parse(DEFAULT_ALIGNMENT_SPEC).unwrap();
        assert_eq!(parsed, AlignmentPair::default());
    }

    #[test]
    fn flags_are_order_insensitive() {
        assert_eq!(parse_attachment("tl"), parse_attachment("lt"));
        assert_eq!(parse_attachment("br"), parse_attachment("rb"));
    }

    #[test]
    fn extra_tokens_are_ignored() {
        let parsed = AlignmentPair::parse("tl bl cc").unwrap();
        assert_eq!(parsed, AlignmentPair::default());
    }

    #[test]
    fn single_token_is_rejected() {
        assert!(AlignmentPair::parse("tl").is_err());
        assert!(AlignmentPair::parse("   ").is_err());
    }
}
