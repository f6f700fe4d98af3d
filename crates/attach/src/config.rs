//! Runtime configuration for the binding layer.
//!
//! Read from environment variables so a host application can flip refresh
//! behavior without code changes, or constructed programmatically in tests.

use std::env;

/// Runtime configuration shared by every binding created from it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BindingConfig {
    /// Ignore the host's frame scheduler and always use event-driven watches.
    pub force_event_driven: bool,
    /// Log every applied style write at debug level.
    pub trace_writes: bool,
}

impl BindingConfig {
    /// Construct a config with explicit values.
    #[inline]
    #[must_use]
    pub const fn new(force_event_driven: bool, trace_writes: bool) -> Self {
        Self {
            force_event_driven,
            trace_writes,
        }
    }

    /// Load from the environment.
    ///
    /// * `TETHER_FORCE_EVENT_DRIVEN` — truthy values force event-driven mode.
    /// * `TETHER_TRACE_WRITES` — truthy values log each style write.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            force_event_driven: env_flag("TETHER_FORCE_EVENT_DRIVEN"),
            trace_writes: env_flag("TETHER_TRACE_WRITES"),
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|value| matches!(value.trim(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
