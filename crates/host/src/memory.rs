//! In-memory host implementation.
//!
//! Backs the test suites and the demo binary: a small element tree with
//! settable rects, an inline-style map per element, a manually pumped frame
//! queue and a manually pumped watch/resize registry. No real UI anywhere.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use geometry::{Rect, Viewport};
use log::{debug, trace};

use crate::{
    ChangeNotifier, ElementHandle, ElementRef, FrameRequest, FrameScheduler, Host, HostCallback,
    SubscriptionId, WatchProbe,
};

/// One element of the in-memory tree.
///
/// Rects are assigned by tests/scenes rather than computed by layout; an
/// element without a rect behaves as detached and measures as `None`.
pub struct MemoryElement {
    tag: String,
    id: RefCell<Option<String>>,
    classes: RefCell<Vec<String>>,
    rect: RefCell<Option<Rect>>,
    style: RefCell<BTreeMap<String, String>>,
    parent: RefCell<Weak<MemoryElement>>,
    children: RefCell<Vec<Rc<MemoryElement>>>,
}

impl MemoryElement {
    /// Create a detached element with the given tag name.
    #[must_use]
    pub fn new(tag: &str) -> Rc<Self> {
        Rc::new(Self {
            tag: tag.to_owned(),
            id: RefCell::new(None),
            classes: RefCell::new(Vec::new()),
            rect: RefCell::new(None),
            style: RefCell::new(BTreeMap::new()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        })
    }

    pub fn set_id(&self, id: &str) {
        *self.id.borrow_mut() = Some(id.to_owned());
    }

    pub fn add_class(&self, class: &str) {
        self.classes.borrow_mut().push(class.to_owned());
    }

    /// Assign the element's measured bounding box.
    pub fn set_rect(&self, rect: Rect) {
        *self.rect.borrow_mut() = Some(rect);
    }

    /// Drop the element's rect; it measures as detached afterwards.
    pub fn clear_rect(&self) {
        *self.rect.borrow_mut() = None;
    }

    /// Append `child` under `parent`.
    pub fn append_child(self: &Rc<Self>, child: &Rc<Self>) {
        *child.parent.borrow_mut() = Rc::downgrade(self);
        self.children.borrow_mut().push(Rc::clone(child));
    }

    /// Snapshot of the element's inline style, keyed by property.
    #[must_use]
    pub fn inline_style(&self) -> BTreeMap<String, String> {
        self.style.borrow().clone()
    }

    fn find_first(self: &Rc<Self>, selector: &str) -> Option<Rc<Self>> {
        if self.matches_selector(selector) {
            return Some(Rc::clone(self));
        }
        for child in self.children.borrow().iter() {
            if let Some(found) = child.find_first(selector) {
                return Some(found);
            }
        }
        None
    }
}

impl ElementHandle for MemoryElement {
    fn bounding_rect(&self) -> Option<Rect> {
        *self.rect.borrow()
    }

    fn matches_selector(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            self.id.borrow().as_deref() == Some(id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.classes.borrow().iter().any(|name| name == class)
        } else {
            self.tag.eq_ignore_ascii_case(selector)
        }
    }

    fn parent(&self) -> Option<ElementRef> {
        self.parent
            .borrow()
            .upgrade()
            .map(|parent| parent as ElementRef)
    }

    fn style_property(&self, property: &str) -> Option<String> {
        self.style.borrow().get(property).cloned()
    }

    fn set_style_property(&self, property: &str, value: &str) {
        self.style
            .borrow_mut()
            .insert(property.to_owned(), value.to_owned());
    }

    fn remove_style_property(&self, property: &str) {
        self.style.borrow_mut().remove(property);
    }
}

struct WatchEntry {
    subscription: SubscriptionId,
    probe: WatchProbe,
    last: String,
    on_change: HostCallback,
}

struct HostInner {
    body: Rc<MemoryElement>,
    window: RefCell<Option<(f64, f64)>>,
    scroll: Cell<(f64, f64)>,
    frames_enabled: Cell<bool>,
    next_frame_id: Cell<u64>,
    pending_frames: RefCell<Vec<(FrameRequest, HostCallback)>>,
    next_subscription_id: Cell<u64>,
    watches: RefCell<Vec<WatchEntry>>,
    resize_subscribers: RefCell<Vec<(SubscriptionId, HostCallback)>>,
}

impl HostInner {
    fn next_subscription(&self) -> SubscriptionId {
        let id = self.next_subscription_id.get();
        self.next_subscription_id.set(id + 1);
        SubscriptionId::new(id)
    }
}

impl FrameScheduler for HostInner {
    fn request_frame(&self, callback: HostCallback) -> FrameRequest {
        let id = self.next_frame_id.get();
        self.next_frame_id.set(id + 1);
        let request = FrameRequest::new(id);
        self.pending_frames.borrow_mut().push((request, callback));
        request
    }

    fn cancel(&self, request: FrameRequest) {
        self.pending_frames
            .borrow_mut()
            .retain(|(pending, _)| *pending != request);
    }
}

impl ChangeNotifier for HostInner {
    fn watch(&self, probe: WatchProbe, on_change: HostCallback) -> SubscriptionId {
        let subscription = self.next_subscription();
        let last = probe();
        self.watches.borrow_mut().push(WatchEntry {
            subscription,
            probe,
            last,
            on_change,
        });
        subscription
    }

    fn on_resize(&self, on_resize: HostCallback) -> SubscriptionId {
        let subscription = self.next_subscription();
        self.resize_subscribers
            .borrow_mut()
            .push((subscription, on_resize));
        subscription
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        self.watches
            .borrow_mut()
            .retain(|entry| entry.subscription != subscription);
        self.resize_subscribers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription);
    }
}

/// Manually pumped host: tests and the demo decide when a frame runs, when
/// change detection runs and when the viewport resizes.
#[derive(Clone)]
pub struct MemoryHost {
    inner: Rc<HostInner>,
}

impl MemoryHost {
    /// Host with known window dimensions.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let host = Self::without_window_metrics();
        *host.inner.window.borrow_mut() = Some((width, height));
        host
    }

    /// Host that does not know its window size; the viewport falls back to
    /// the body element's dimensions.
    #[must_use]
    pub fn without_window_metrics() -> Self {
        let body = MemoryElement::new("body");
        Self {
            inner: Rc::new(HostInner {
                body,
                window: RefCell::new(None),
                scroll: Cell::new((0.0, 0.0)),
                frames_enabled: Cell::new(true),
                next_frame_id: Cell::new(0),
                pending_frames: RefCell::new(Vec::new()),
                next_subscription_id: Cell::new(0),
                watches: RefCell::new(Vec::new()),
                resize_subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Pretend frame callbacks are unavailable, forcing bindings created
    /// afterwards into event-driven mode. Call before binding.
    pub fn disable_frame_callbacks(&self) {
        self.inner.frames_enabled.set(false);
    }

    /// The root element every other element hangs off.
    #[must_use]
    pub fn body(&self) -> Rc<MemoryElement> {
        Rc::clone(&self.inner.body)
    }

    /// Typed selector lookup for callers that need the concrete element,
    /// e.g. to reassign its rect.
    #[must_use]
    pub fn find(&self, selector: &str) -> Option<Rc<MemoryElement>> {
        self.inner.body.find_first(selector)
    }

    /// Update the document scroll offsets.
    pub fn set_scroll(&self, scroll_x: f64, scroll_y: f64) {
        self.inner.scroll.set((scroll_x, scroll_y));
    }

    /// Number of frame callbacks waiting for the next [`Self::run_frame`].
    #[must_use]
    pub fn pending_frame_count(&self) -> usize {
        self.inner.pending_frames.borrow().len()
    }

    /// Deliver one frame: every pending callback fires exactly once, in
    /// request order. Callbacks re-requesting a frame land in the next batch.
    pub fn run_frame(&self) {
        let batch = self.inner.pending_frames.take();
        trace!("delivering frame to {} callback(s)", batch.len());
        for (_, callback) in batch {
            callback();
        }
    }

    /// Run one change-detection pass: re-evaluate every watch probe and fire
    /// the callbacks whose values changed. Probes and callbacks may register
    /// or remove subscriptions mid-pass; a watch removed during the pass stops
    /// firing and one added during it is first probed on the next pass.
    pub fn check_watches(&self) {
        let snapshot: Vec<(SubscriptionId, WatchProbe, HostCallback)> = self
            .inner
            .watches
            .borrow()
            .iter()
            .map(|entry| {
                (
                    entry.subscription,
                    Rc::clone(&entry.probe),
                    Rc::clone(&entry.on_change),
                )
            })
            .collect();
        let mut fired: Vec<HostCallback> = Vec::new();
        for (subscription, probe, on_change) in snapshot {
            let value = probe();
            let mut watches = self.inner.watches.borrow_mut();
            let Some(entry) = watches
                .iter_mut()
                .find(|entry| entry.subscription == subscription)
            else {
                continue;
            };
            if value != entry.last {
                entry.last = value;
                fired.push(on_change);
            }
        }
        for callback in fired {
            callback();
        }
    }

    /// Resize the window and notify resize subscribers.
    pub fn resize(&self, width: f64, height: f64) {
        debug!("viewport resized to {width}x{height}");
        *self.inner.window.borrow_mut() = Some((width, height));
        let subscribers: Vec<HostCallback> = self
            .inner
            .resize_subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in subscribers {
            callback();
        }
    }
}

impl Host for MemoryHost {
    fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        let found = self.inner.body.find_first(selector);
        if found.is_none() {
            trace!("selector {selector:?} matched nothing");
        }
        found.map(|element| element as ElementRef)
    }

    fn viewport(&self) -> Viewport {
        let (width, height) = self.inner.window.borrow().unwrap_or_else(|| {
            self.inner
                .body
                .bounding_rect()
                .map_or((0.0, 0.0), |rect| (rect.width(), rect.height()))
        });
        let (scroll_x, scroll_y) = self.inner.scroll.get();
        Viewport::new(width, height).with_scroll(scroll_x, scroll_y)
    }

    fn frame_scheduler(&self) -> Option<Rc<dyn FrameScheduler>> {
        if self.inner.frames_enabled.get() {
            Some(Rc::clone(&self.inner) as Rc<dyn FrameScheduler>)
        } else {
            None
        }
    }

    fn change_notifier(&self) -> Rc<dyn ChangeNotifier> {
        Rc::clone(&self.inner) as Rc<dyn ChangeNotifier>
    }
}
