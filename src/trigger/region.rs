use crate::foundation::error::{GlissadeError, GlissadeResult};

/// What happens when a region crosses its threshold again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReplayPolicy {
    /// Fire once and lock; the region never re-evaluates afterwards.
    #[default]
    Once,
    /// Toggle: emit `Entered`/`Exited` on every threshold transition.
    Always,
}

/// Activation geometry and policy for a watched region.
///
/// `activation_start` is a fraction of viewport height: `0.85` means "when
/// the element's top edge reaches 85% down the viewport". A second
/// threshold turns the region into a continuous scrub range between the two
/// fractions. Values outside `[0, 1]` are accepted; a threshold the
/// geometry never crosses simply never fires.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionConfig {
    /// Threshold as a fraction of viewport height.
    pub activation_start: f64,
    /// Optional second threshold bounding a continuous scrub range.
    #[serde(default)]
    pub activation_end: Option<f64>,
    /// Replay policy.
    #[serde(default)]
    pub replay: ReplayPolicy,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            activation_start: 0.85,
            activation_end: None,
            replay: ReplayPolicy::Once,
        }
    }
}

impl RegionConfig {
    /// Config firing once at `activation_start`.
    pub fn once(activation_start: f64) -> Self {
        Self {
            activation_start,
            activation_end: None,
            replay: ReplayPolicy::Once,
        }
    }

    /// Config toggling at `activation_start`.
    pub fn always(activation_start: f64) -> Self {
        Self {
            activation_start,
            activation_end: None,
            replay: ReplayPolicy::Always,
        }
    }

    /// Continuous scrub range between two viewport fractions.
    pub fn scrub_range(activation_start: f64, activation_end: f64) -> Self {
        Self {
            activation_start,
            activation_end: Some(activation_end),
            replay: ReplayPolicy::Always,
        }
    }

    /// Validate static invariants.
    pub fn validate(&self) -> GlissadeResult<()> {
        if !self.activation_start.is_finite() {
            return Err(GlissadeError::trigger("activation_start must be finite"));
        }
        if let Some(end) = self.activation_end {
            if !end.is_finite() {
                return Err(GlissadeError::trigger("activation_end must be finite"));
            }
            if end == self.activation_start {
                return Err(GlissadeError::trigger(
                    "scrub range endpoints must differ",
                ));
            }
        }
        Ok(())
    }

    /// Whether this region scrubs rather than fires.
    pub fn is_scrub(&self) -> bool {
        self.activation_end.is_some()
    }
}

/// Opaque handle to a registered region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(pub(crate) u64);

/// One trigger transition observed during a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerEvent {
    /// Region that transitioned.
    pub region: RegionId,
    /// What happened.
    pub kind: TriggerEventKind,
}

/// Kind of trigger transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerEventKind {
    /// Threshold became satisfied.
    Entered,
    /// Threshold stopped being satisfied (Always regions only).
    Exited,
    /// Scrub progress changed; value is clamped to `[0, 1]`.
    Scrub(f64),
}
