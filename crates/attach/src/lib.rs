//! Binding layer: wires an element to the alignment engine and keeps it
//! aligned for the element's lifetime.
//!
//! A binding resolves its anchor and target once at setup, picks one of two
//! refresh modes (frame-driven when the host has frame callbacks,
//! event-driven watches otherwise) and then recomputes the position on every
//! tick, writing inline style only when the computed values actually changed.

#![forbid(unsafe_code)]

mod binding;
mod config;
mod options;

pub use binding::{AttachBinding, BindingStats};
pub use config::BindingConfig;
pub use options::{AlignExpression, AttachOptions};
