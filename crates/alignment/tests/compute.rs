#![allow(clippy::unwrap_used)]

use alignment::{
    AlignmentPair, Attachment, DEFAULT_ALIGNMENT_SPEC, HorizontalEdge, VerticalEdge,
    compute_alignment, parse_attachment,
};
use geometry::{Rect, Viewport};

fn viewport() -> Viewport {
    Viewport::new(1000.0, 600.0)
}

#[test]
fn parse_attachment_corner_flags() {
    assert_eq!(
        parse_attachment("tl"),
        Attachment {
            x_edge: HorizontalEdge::Left,
            y_edge: VerticalEdge::Top,
            center_x: false,
            center_y: false,
        }
    );
    assert_eq!(
        parse_attachment("br"),
        Attachment {
            x_edge: HorizontalEdge::Right,
            y_edge: VerticalEdge::Bottom,
            center_x: false,
            center_y: false,
        }
    );
}

#[test]
fn parse_attachment_center_flags() {
    let center = parse_attachment("cc");
    assert!(center.center_x);
    assert!(center.center_y);
    assert_eq!(center.x_edge, HorizontalEdge::Left);
    assert_eq!(center.y_edge, VerticalEdge::Top);

    let top_center = parse_attachment("tc");
    assert!(top_center.center_x);
    assert!(!top_center.center_y);
    assert_eq!(top_center.y_edge, VerticalEdge::Top);
}

#[test]
fn parse_attachment_is_pure() {
    for flag in ["tl", "br", "cc", "tc", "bc", "cr", "xyz", ""] {
        assert_eq!(parse_attachment(flag), parse_attachment(flag));
    }
}

#[test]
fn default_spec_places_aligned_below_anchor() {
    let anchor = Rect::new(100.0, 100.0, 200.0, 150.0);
    let aligned = Rect::new(0.0, 0.0, 80.0, 30.0);
    let pair = AlignmentPair::parse(DEFAULT_ALIGNMENT_SPEC).unwrap();

    let style = compute_alignment(anchor, aligned, &pair, viewport());
    assert_eq!(style.x_edge, HorizontalEdge::Left);
    assert_eq!(style.x_px, 100.0);
    assert_eq!(style.y_edge, VerticalEdge::Top);
    assert_eq!(style.y_px, 150.0);
}

#[test]
fn identical_inputs_yield_identical_styles() {
    let anchor = Rect::new(10.0, 20.0, 110.0, 70.0);
    let aligned = Rect::new(0.0, 0.0, 44.0, 18.0);
    let pair = AlignmentPair::parse("cc tc").unwrap();

    let first = compute_alignment(anchor, aligned, &pair, viewport());
    let second = compute_alignment(anchor, aligned, &pair, viewport());
    assert_eq!(first, second);
}

#[test]
fn right_edge_offsets_invert_against_viewport_width() {
    let anchor = Rect::new(400.0, 100.0, 500.0, 150.0);
    let aligned = Rect::new(0.0, 0.0, 60.0, 40.0);
    let pair = AlignmentPair::parse("br tr").unwrap();

    let style = compute_alignment(anchor, aligned, &pair, viewport());
    assert_eq!(style.x_edge, HorizontalEdge::Right);
    assert_eq!(style.x_px, 1000.0 - 500.0);
    assert_eq!(style.y_edge, VerticalEdge::Bottom);
    assert_eq!(style.y_px, 600.0 - 100.0);
}

#[test]
fn centered_aligned_attachment_subtracts_half_extents() {
    let anchor = Rect::new(100.0, 100.0, 200.0, 150.0);
    let aligned = Rect::new(0.0, 0.0, 40.0, 40.0);
    let pair = AlignmentPair::parse("cc tl").unwrap();

    let style = compute_alignment(anchor, aligned, &pair, viewport());
    assert_eq!(style.x_px, 100.0 - 20.0);
    assert_eq!(style.y_px, 100.0 - 20.0);
}

#[test]
fn centered_anchor_attachment_adds_half_extents() {
    let anchor = Rect::new(100.0, 100.0, 200.0, 150.0);
    let aligned = Rect::new(0.0, 0.0, 40.0, 40.0);
    let pair = AlignmentPair::parse("tl cc").unwrap();

    let style = compute_alignment(anchor, aligned, &pair, viewport());
    assert_eq!(style.x_px, 100.0 + 50.0);
    assert_eq!(style.y_px, 100.0 + 25.0);
}

#[test]
fn offsets_round_to_two_decimals() {
    let anchor = Rect::new(10.126, 10.124, 20.0, 20.0);
    let aligned = Rect::new(0.0, 0.0, 10.0, 10.0);
    let pair = AlignmentPair::parse("tl tl").unwrap();

    let style = compute_alignment(anchor, aligned, &pair, viewport());
    assert_eq!(style.x_px, 10.13);
    assert_eq!(style.y_px, 10.12);
}

#[test]
fn scroll_offsets_shift_the_computed_position() {
    let anchor = Rect::new(100.0, 100.0, 200.0, 150.0);
    let aligned = Rect::new(0.0, 0.0, 40.0, 40.0);
    let pair = AlignmentPair::parse("tl tl").unwrap();
    let scrolled = viewport().with_scroll(15.0, 7.5);

    let style = compute_alignment(anchor, aligned, &pair, scrolled);
    assert_eq!(style.x_px, 115.0);
    assert_eq!(style.y_px, 107.5);
}

#[test]
fn declarations_format_px_values() {
    let anchor = Rect::new(100.0, 100.0, 200.0, 150.0);
    let aligned = Rect::new(0.0, 0.0, 40.0, 40.0);
    let pair = AlignmentPair::parse("cc tl").unwrap();

    let decls = compute_alignment(anchor, aligned, &pair, viewport()).declarations();
    assert_eq!(decls[1].value, "80px");
    assert_eq!(decls[2].value, "80px");
}
