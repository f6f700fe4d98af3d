//! Anchor/aligned-element attachment computation.
//!
//! Given an anchor rect, an aligned-element rect, a pair of attachment flags
//! and the viewport metrics, this crate computes the absolute CSS position
//! that places the aligned element's attachment point on top of the anchor's
//! attachment point. Everything here is pure; hosts and refresh loops live in
//! the `host` and `attach` crates.

#![forbid(unsafe_code)]

mod attachment;
mod engine;
mod style;

pub use attachment::{
    AlignmentPair, Attachment, DEFAULT_ALIGNMENT_SPEC, HorizontalEdge, VerticalEdge,
    parse_attachment,
};
pub use engine::compute_alignment;
pub use style::{Declaration, POSITION_PROPERTIES, PositionStyle};
