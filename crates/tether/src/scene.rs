//! JSON scene descriptions for the demo.
//!
//! A scene is a small element tree with pre-measured rects, a viewport, a set
//! of bindings to create and an optional per-frame drift applied to one
//! element so the refresh loop has something to chase.

use std::rc::Rc;

use geometry::{Rect, Viewport};
use host::{ElementHandle as _, MemoryElement, MemoryHost};
use serde::Deserialize;

/// A full demo scene.
#[derive(Debug, Deserialize)]
pub struct Scene {
    pub viewport: Viewport,
    #[serde(default)]
    pub elements: Vec<SceneElement>,
    #[serde(default)]
    pub bindings: Vec<SceneBinding>,
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default)]
    pub drift: Option<Drift>,
}

/// One element of the scene tree. Elements without a rect behave as
/// unmeasurable, which is occasionally what a scene wants to show.
#[derive(Debug, Deserialize)]
pub struct SceneElement {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub children: Vec<SceneElement>,
}

/// One binding to create: which element, which anchor, which spec.
#[derive(Debug, Deserialize)]
pub struct SceneBinding {
    pub element: String,
    pub anchor: String,
    #[serde(default)]
    pub align: Option<String>,
    #[serde(default)]
    pub align_parent: Option<String>,
}

/// Movement applied to one element before every frame.
#[derive(Debug, Deserialize)]
pub struct Drift {
    pub selector: String,
    #[serde(default)]
    pub delta_x: f64,
    #[serde(default)]
    pub delta_y: f64,
}

const fn default_frames() -> u32 {
    3
}

/// Build the in-memory host a scene describes.
#[must_use]
pub fn build_host(scene: &Scene) -> MemoryHost {
    let built = MemoryHost::new(scene.viewport.width, scene.viewport.height);
    built.set_scroll(scene.viewport.scroll_x, scene.viewport.scroll_y);
    for element in &scene.elements {
        append(&built.body(), element);
    }
    built
}

fn append(parent: &Rc<MemoryElement>, description: &SceneElement) {
    let element = MemoryElement::new(&description.tag);
    if let Some(id) = &description.id {
        element.set_id(id);
    }
    for class in &description.classes {
        element.add_class(class);
    }
    if let Some(rect) = description.rect {
        element.set_rect(rect);
    }
    parent.append_child(&element);
    for child in &description.children {
        append(&element, child);
    }
}

/// Apply a drift step, leaving unmeasurable elements alone.
pub fn apply_drift(scene_host: &MemoryHost, drift: &Drift) {
    if let Some(element) = scene_host.find(&drift.selector) {
        if let Some(rect) = element.bounding_rect() {
            element.set_rect(rect.translated(drift.delta_x, drift.delta_y));
        }
    }
}
