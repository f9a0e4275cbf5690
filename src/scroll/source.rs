use crate::animation::ease::Ease;
use crate::foundation::core::{FrameTick, ViewportMetrics};
use crate::foundation::error::{GlissadeError, GlissadeResult};
use crate::scroll::state::ScrollState;
use crate::view::ElementRef;

/// Host seam for viewport geometry and scroll IO.
///
/// `raw_position` is the offset accumulated by the host from real input;
/// `apply_position` moves the rendered offset (a native scroll for the
/// passthrough strategy, a content transform for the virtualized one).
pub trait ScrollSurface {
    /// Current viewport metrics.
    fn metrics(&self) -> ViewportMetrics;

    /// Raw scroll offset as accumulated by the host.
    fn raw_position(&self) -> f64;

    /// Move the rendered scroll offset.
    fn apply_position(&self, position: f64);
}

/// Destination of a programmatic scroll.
#[derive(Clone)]
pub enum ScrollTarget {
    /// Absolute offset from the document top, in pixels.
    Offset(f64),
    /// Scroll until the element's top edge reaches the viewport top;
    /// resolved against live geometry at the next frame.
    Element(ElementRef),
}

impl std::fmt::Debug for ScrollTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Offset(offset) => f.debug_tuple("Offset").field(offset).finish(),
            Self::Element(_) => f.write_str("Element(..)"),
        }
    }
}

/// Options for a programmatic [`ScrollSource::scroll_to`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollToOpts {
    /// Glide duration in milliseconds.
    pub duration_ms: f64,
    /// Easing curve for the glide.
    pub ease: Ease,
}

impl Default for ScrollToOpts {
    fn default() -> Self {
        Self {
            duration_ms: 1200.0,
            ease: Ease::OutExpo,
        }
    }
}

impl ScrollToOpts {
    /// Validate static invariants.
    pub fn validate(&self) -> GlissadeResult<()> {
        if !(self.duration_ms > 0.0) {
            return Err(GlissadeError::scroll("scroll_to duration must be > 0"));
        }
        Ok(())
    }
}

/// One raw input event forwarded by the host to a virtualized source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputDelta {
    /// Wheel delta in pixels.
    Wheel(f64),
    /// Touch/drag delta in pixels.
    Touch(f64),
}

/// Strategy interface producing the per-frame [`ScrollState`].
///
/// Two interchangeable implementations exist, [`crate::NativeScrollSource`]
/// and [`crate::SmoothedScrollSource`], selected at composition time.
/// Consumers (trigger registry, animation engine) depend only on this trait.
pub trait ScrollSource {
    /// Advance one frame against the host surface and return the new state.
    ///
    /// Called every frame whether or not input arrived; velocity and
    /// direction decay to rest through here.
    fn tick(&mut self, tick: FrameTick, surface: &dyn ScrollSurface) -> ScrollState;

    /// State as of the last tick.
    fn state(&self) -> ScrollState;

    /// Glide to a target instead of jumping.
    fn scroll_to(&mut self, target: ScrollTarget, opts: ScrollToOpts) -> GlissadeResult<()>;

    /// Feed one raw input event (ignored by the native passthrough, whose
    /// input is already reflected in the surface's raw position).
    fn push_input(&mut self, delta: InputDelta);

    /// Whether the source has no in-flight glide or unsettled smoothing.
    fn is_settled(&self) -> bool;
}

/// Time-based glide over the scroll offset, advanced once per frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Glide {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub ease: Ease,
    pub elapsed_ms: f64,
}

impl Glide {
    pub(crate) fn new(from: f64, to: f64, opts: ScrollToOpts) -> Self {
        Self {
            from,
            to,
            duration_ms: opts.duration_ms,
            ease: opts.ease,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt_ms`; returns the new offset and whether the glide is
    /// finished (in which case the offset equals `to` exactly).
    pub(crate) fn advance(&mut self, dt_ms: f64) -> (f64, bool) {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.duration_ms {
            return (self.to, true);
        }
        let t = self.ease.apply(self.elapsed_ms / self.duration_ms);
        (self.from + (self.to - self.from) * t, false)
    }
}

/// Resolve a target into an absolute offset clamped to the scrollable range.
///
/// Element targets use the element's current viewport-relative top edge plus
/// the current position; a detached element yields `None` and the command is
/// silently dropped by the caller.
pub(crate) fn resolve_target(
    target: &ScrollTarget,
    position: f64,
    metrics: ViewportMetrics,
) -> Option<f64> {
    let offset = match target {
        ScrollTarget::Offset(offset) => *offset,
        ScrollTarget::Element(element) => {
            let bounds = element.bounds()?;
            position + bounds.y0
        }
    };
    Some(offset.clamp(0.0, metrics.scroll_range.max(0.0)))
}
