//! Per-binding configuration options.

use anyhow::Error;

/// Expression producing the alignment spec for the current refresh.
///
/// Re-evaluated on every tick so a host can drive the spec from changing
/// state. Returning an empty string clears the target's positioning instead
/// of computing one; returning an error skips the tick.
pub type AlignExpression = Box<dyn Fn() -> Result<String, Error>>;

/// Options recognized on a bound element.
pub struct AttachOptions {
    /// Selector of the anchor element whose rect drives placement. Required;
    /// a selector matching nothing is a fatal bind error.
    pub anchor: String,
    /// Optional selector redirecting the styled element to the nearest
    /// ancestor of the bound element matching it. No matching ancestor is a
    /// fatal bind error.
    pub align_parent: Option<String>,
    /// Optional alignment-spec expression. Absent means the default
    /// `"tl bl"` spec on every tick.
    pub align: Option<AlignExpression>,
}

impl AttachOptions {
    /// Options with just an anchor selector.
    #[must_use]
    pub fn new(anchor: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            align_parent: None,
            align: None,
        }
    }

    /// Redirect styling to the nearest ancestor matching `selector`.
    #[must_use]
    pub fn align_parent(mut self, selector: impl Into<String>) -> Self {
        self.align_parent = Some(selector.into());
        self
    }

    /// Use a constant alignment spec.
    #[must_use]
    pub fn align_fixed(mut self, spec: impl Into<String>) -> Self {
        let spec = spec.into();
        self.align = Some(Box::new(move || Ok(spec.clone())));
        self
    }

    /// Use an expression evaluated on every refresh.
    #[must_use]
    pub fn align_with(mut self, expression: AlignExpression) -> Self {
        self.align = Some(expression);
        self
    }
}
