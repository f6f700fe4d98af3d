//! Host seams for the alignment binding.
//!
//! The binding layer never talks to a concrete UI tree. It goes through the
//! traits in this crate: [`Host`] for lookup and viewport metrics,
//! [`ElementHandle`] for measurement and inline-style access,
//! [`FrameScheduler`] for per-frame callbacks and [`ChangeNotifier`] for the
//! watch/resize fallback when frame callbacks are unavailable. [`MemoryHost`]
//! is the in-memory implementation used by tests and the demo binary.
//!
//! Everything is single-threaded and cooperative: handles are `Rc`-shared and
//! callbacks run synchronously inside the host's pump methods.

#![forbid(unsafe_code)]

mod memory;

use std::rc::Rc;

use geometry::{Rect, Viewport};

pub use memory::{MemoryElement, MemoryHost};

/// Shared handle to a host element.
pub type ElementRef = Rc<dyn ElementHandle>;

/// Callback invoked by a [`FrameScheduler`] or a [`ChangeNotifier`].
pub type HostCallback = Rc<dyn Fn()>;

/// Closure producing the current value of a watched quantity. Shared so a
/// notifier can evaluate it without holding its own registry borrowed.
pub type WatchProbe = Rc<dyn Fn() -> String>;

/// One element in the host's tree.
///
/// Style access is property-level (`left`, `top`, ...) so no CSS text parsing
/// leaks into the engine; hosts keep whatever inline representation they like.
/// Mutation goes through `&self` because host elements are shared handles.
pub trait ElementHandle {
    /// Measure the element's current bounding box, viewport-relative.
    ///
    /// `None` means the element cannot be measured right now (detached from
    /// the tree); callers must treat that as a no-op, not an error.
    fn bounding_rect(&self) -> Option<Rect>;

    /// Whether this element matches a selector (`#id`, `.class` or tag).
    fn matches_selector(&self, selector: &str) -> bool;

    /// The element's parent, if any.
    fn parent(&self) -> Option<ElementRef>;

    /// Read one currently applied inline-style property.
    fn style_property(&self, property: &str) -> Option<String>;

    /// Set one inline-style property.
    fn set_style_property(&self, property: &str, value: &str);

    /// Remove one inline-style property if present.
    fn remove_style_property(&self, property: &str);
}

/// Walk up from `element` to the nearest strict ancestor matching `selector`.
#[must_use]
pub fn closest_ancestor(element: &ElementRef, selector: &str) -> Option<ElementRef> {
    let mut current = element.parent();
    while let Some(candidate) = current {
        if candidate.matches_selector(selector) {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

/// Handle for a single pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Handle for one watch or resize subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Per-frame scheduling primitive.
///
/// One-shot: a callback fires for exactly one frame and must re-request to
/// keep a loop alive. Requests are cancellable so a binding can stop its loop
/// on teardown instead of leaking a callback chain.
pub trait FrameScheduler {
    /// Schedule `callback` for the next frame.
    fn request_frame(&self, callback: HostCallback) -> FrameRequest;

    /// Drop a pending request. Cancelling an already-fired request is a no-op.
    fn cancel(&self, request: FrameRequest);
}

/// Change-notification fallback for hosts without frame callbacks.
///
/// A watch pairs a probe with a callback: each time the host runs its change
/// detection it re-evaluates the probe and fires the callback when the value
/// differs from the previous check. Resize subscriptions fire on every
/// viewport resize. All subscriptions are explicitly removable.
pub trait ChangeNotifier {
    fn watch(&self, probe: WatchProbe, on_change: HostCallback) -> SubscriptionId;

    fn on_resize(&self, on_resize: HostCallback) -> SubscriptionId;

    fn unsubscribe(&self, subscription: SubscriptionId);
}

/// The environment a binding lives in.
pub trait Host {
    /// Find the first element matching `selector`, document order.
    fn query_selector(&self, selector: &str) -> Option<ElementRef>;

    /// Current viewport metrics. Hosts that do not know their window size
    /// fall back to the document body's dimensions.
    fn viewport(&self) -> Viewport;

    /// The per-frame scheduling primitive, when this host has one.
    fn frame_scheduler(&self) -> Option<Rc<dyn FrameScheduler>>;

    /// The change-notification mechanism used when frames are unavailable.
    fn change_notifier(&self) -> Rc<dyn ChangeNotifier>;
}
