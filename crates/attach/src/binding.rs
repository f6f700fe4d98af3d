//! Binding lifecycle and refresh loop.

use std::cell::RefCell;
use std::rc::Rc;

use alignment::{AlignmentPair, DEFAULT_ALIGNMENT_SPEC, POSITION_PROPERTIES, compute_alignment};
use anyhow::{Error, anyhow};
use host::{
    ChangeNotifier, ElementRef, FrameRequest, FrameScheduler, Host,
    HostCallback, SubscriptionId, WatchProbe, closest_ancestor,
};
use log::{debug, warn};

use crate::config::BindingConfig;
use crate::options::{AlignExpression, AttachOptions};

/// Counters describing what a binding has done so far.
///
/// `skipped_writes` in particular makes the diff-before-write behavior
/// observable without inspecting the host tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct BindingStats {
    refreshes: u64,
    writes: u64,
    skipped_writes: u64,
    spec_errors: u64,
    unmeasurable_ticks: u64,
}

impl BindingStats {
    /// Total refresh ticks, whatever their outcome.
    #[must_use]
    pub const fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Ticks that wrote inline style.
    #[must_use]
    pub const fn writes(&self) -> u64 {
        self.writes
    }

    /// Ticks skipped because the computed style was already applied.
    #[must_use]
    pub const fn skipped_writes(&self) -> u64 {
        self.skipped_writes
    }

    /// Ticks skipped because the alignment expression failed or produced a
    /// malformed spec.
    #[must_use]
    pub const fn spec_errors(&self) -> u64 {
        self.spec_errors
    }

    /// Ticks skipped because the anchor or target could not be measured.
    #[must_use]
    pub const fn unmeasurable_ticks(&self) -> u64 {
        self.unmeasurable_ticks
    }
}

/// The refresh trigger, chosen once at bind time and fixed afterwards.
enum RefreshMode {
    FrameDriven {
        scheduler: Rc<dyn FrameScheduler>,
        pending: Option<FrameRequest>,
    },
    EventDriven {
        notifier: Rc<dyn ChangeNotifier>,
        subscriptions: Vec<SubscriptionId>,
    },
}

struct BindingState {
    host: Rc<dyn Host>,
    target: ElementRef,
    anchor: ElementRef,
    align: Option<AlignExpression>,
    config: BindingConfig,
    stats: BindingStats,
    mode: Option<RefreshMode>,
    unbound: bool,
}

impl BindingState {
    /// One engine pass: evaluate the spec, measure, compute, diff, write.
    ///
    /// Every early return leaves the loop alive; the only recovery mechanism
    /// is the next tick.
    fn refresh_once(&mut self) {
        self.stats.refreshes += 1;

        let spec = match &self.align {
            None => DEFAULT_ALIGNMENT_SPEC.to_owned(),
            Some(expression) => match expression() {
                Ok(value) => value,
                Err(error) => {
                    self.stats.spec_errors += 1;
                    warn!("alignment expression failed; skipping refresh: {error:#}");
                    return;
                }
            },
        };

        // An empty spec clears positioning instead of computing one.
        if spec.trim().is_empty() {
            self.clear_positioning();
            return;
        }

        let pair = match AlignmentPair::parse(&spec) {
            Ok(pair) => pair,
            Err(error) => {
                self.stats.spec_errors += 1;
                warn!("invalid alignment spec; skipping refresh: {error:#}");
                return;
            }
        };

        let Some(anchor_rect) = self.anchor.bounding_rect() else {
            self.stats.unmeasurable_ticks += 1;
            debug!("anchor is not measurable; skipping refresh");
            return;
        };
        let Some(target_rect) = self.target.bounding_rect() else {
            self.stats.unmeasurable_ticks += 1;
            debug!("target is not measurable; skipping refresh");
            return;
        };

        let style = compute_alignment(anchor_rect, target_rect, &pair, self.host.viewport());
        if style.matches_applied(|property| self.target.style_property(property)) {
            self.stats.skipped_writes += 1;
            return;
        }

        self.clear_positioning();
        for declaration in style.declarations() {
            self.target
                .set_style_property(declaration.property, &declaration.value);
        }
        self.stats.writes += 1;
        if self.config.trace_writes {
            debug!("applied {style:?}");
        }
    }

    /// Remove every positioning property we may ever have written.
    fn clear_positioning(&self) {
        for property in POSITION_PROPERTIES {
            self.target.remove_style_property(property);
        }
    }

    /// Spec value as seen by the event-driven watch. Evaluation errors map to
    /// a marker so the change surfaces as a refresh (where it is counted).
    fn spec_watch_value(&self) -> String {
        match &self.align {
            None => DEFAULT_ALIGNMENT_SPEC.to_owned(),
            Some(expression) => expression().unwrap_or_else(|_| "<error>".to_owned()),
        }
    }
}

/// A live binding keeping one element aligned to its anchor.
///
/// Dropping the binding (or calling [`Self::unbind`]) cancels the pending
/// frame request or unsubscribes the watches, so nothing keeps ticking after
/// teardown.
pub struct AttachBinding {
    state: Rc<RefCell<BindingState>>,
}

impl AttachBinding {
    /// Bind with configuration taken from the environment.
    pub fn bind(
        host: Rc<dyn Host>,
        element: ElementRef,
        options: AttachOptions,
    ) -> Result<Self, Error> {
        Self::bind_with_config(host, element, options, BindingConfig::from_env())
    }

    /// Bind `element` to the anchor named by `options`.
    ///
    /// Fatal setup errors (unresolvable anchor selector, `align_parent`
    /// matching no ancestor) are returned immediately and nothing is
    /// scheduled. On success the first refresh has already run.
    pub fn bind_with_config(
        host: Rc<dyn Host>,
        element: ElementRef,
        options: AttachOptions,
        config: BindingConfig,
    ) -> Result<Self, Error> {
        let target = match &options.align_parent {
            Some(selector) => closest_ancestor(&element, selector).ok_or_else(|| {
                anyhow!("align-parent selector did not match any ancestor: {selector:?}")
            })?,
            None => Rc::clone(&element),
        };
        let anchor = host.query_selector(&options.anchor).ok_or_else(|| {
            anyhow!(
                "anchor selector did not match any element: {:?}",
                options.anchor
            )
        })?;

        let state = Rc::new(RefCell::new(BindingState {
            host: Rc::clone(&host),
            target,
            anchor,
            align: options.align,
            config,
            stats: BindingStats::default(),
            mode: None,
            unbound: false,
        }));

        // The first alignment happens synchronously at bind time in both
        // modes; the trigger only decides how subsequent ticks arrive.
        state.borrow_mut().refresh_once();

        let scheduler = if config.force_event_driven {
            None
        } else {
            host.frame_scheduler()
        };
        match scheduler {
            Some(scheduler) => {
                state.borrow_mut().mode = Some(RefreshMode::FrameDriven {
                    scheduler,
                    pending: None,
                });
                Self::schedule_next_frame(&state);
            }
            None => {
                let notifier = host.change_notifier();
                let subscriptions = Self::subscribe(&state, &notifier);
                state.borrow_mut().mode = Some(RefreshMode::EventDriven {
                    notifier,
                    subscriptions,
                });
            }
        }

        Ok(Self { state })
    }

    /// Run one refresh outside the normal trigger, e.g. from tests.
    pub fn refresh(&self) {
        self.state.borrow_mut().refresh_once();
    }

    /// Snapshot of the binding's counters.
    #[must_use]
    pub fn stats(&self) -> BindingStats {
        self.state.borrow().stats
    }

    /// Whether this binding ticks on frames (as opposed to watches).
    #[must_use]
    pub fn is_frame_driven(&self) -> bool {
        matches!(
            self.state.borrow().mode,
            Some(RefreshMode::FrameDriven { .. })
        )
    }

    /// Stop refreshing: cancel the pending frame request or remove every
    /// subscription. Idempotent.
    pub fn unbind(&self) {
        let mut guard = self.state.borrow_mut();
        if guard.unbound {
            return;
        }
        guard.unbound = true;
        match guard.mode.take() {
            Some(RefreshMode::FrameDriven { scheduler, pending }) => {
                if let Some(request) = pending {
                    scheduler.cancel(request);
                }
            }
            Some(RefreshMode::EventDriven {
                notifier,
                subscriptions,
            }) => {
                for subscription in subscriptions {
                    notifier.unsubscribe(subscription);
                }
            }
            None => {}
        }
    }

    fn schedule_next_frame(state: &Rc<RefCell<BindingState>>) {
        let weak = Rc::downgrade(state);
        let callback: HostCallback = Rc::new(move || {
            if let Some(upgraded) = weak.upgrade() {
                Self::frame_tick(&upgraded);
            }
        });
        let mut guard = state.borrow_mut();
        if let Some(RefreshMode::FrameDriven { scheduler, pending }) = guard.mode.as_mut() {
            *pending = Some(scheduler.request_frame(callback));
        }
    }

    fn frame_tick(state: &Rc<RefCell<BindingState>>) {
        {
            let mut guard = state.borrow_mut();
            if guard.unbound {
                return;
            }
            if let Some(RefreshMode::FrameDriven { pending, .. }) = guard.mode.as_mut() {
                *pending = None;
            }
            guard.refresh_once();
        }
        Self::schedule_next_frame(state);
    }

    fn subscribe(
        state: &Rc<RefCell<BindingState>>,
        notifier: &Rc<dyn ChangeNotifier>,
    ) -> Vec<SubscriptionId> {
        // Anchor movement, detected via its position signature.
        let anchor = Rc::clone(&state.borrow().anchor);
        let anchor_probe: WatchProbe = Rc::new(move || {
            anchor
                .bounding_rect()
                .map(|rect| rect.position_signature())
                .unwrap_or_default()
        });
        let position_watch = notifier.watch(anchor_probe, Self::refresh_callback(state));

        // Alignment-spec value changes.
        let weak = Rc::downgrade(state);
        let spec_probe: WatchProbe = Rc::new(move || {
            weak.upgrade()
                .map_or_else(String::new, |upgraded| upgraded.borrow().spec_watch_value())
        });
        let spec_watch = notifier.watch(spec_probe, Self::refresh_callback(state));

        // Viewport resizes.
        let resize = notifier.on_resize(Self::refresh_callback(state));

        vec![position_watch, spec_watch, resize]
    }

    fn refresh_callback(state: &Rc<RefCell<BindingState>>) -> HostCallback {
        let weak = Rc::downgrade(state);
        Rc::new(move || {
            if let Some(upgraded) = weak.upgrade() {
                let mut guard = upgraded.borrow_mut();
                if !guard.unbound {
                    guard.refresh_once();
                }
            }
        })
    }
}

impl Drop for AttachBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}
