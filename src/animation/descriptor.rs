use crate::animation::ease::Ease;
use crate::animation::prop::{Prop, PropTrack};
use crate::foundation::error::{GlissadeError, GlissadeResult};

/// How a descriptor is driven.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlayMode {
    /// One-shot, time-based play started by a trigger or a direct call.
    #[default]
    Discrete,
    /// Value is a direct function of scroll progress within a trigger range.
    Scrub,
}

/// Declarative description of one animation over one element.
///
/// A descriptor is pure data: it can be built programmatically (see
/// [`crate::SceneBuilder`] presets), serialized via Serde, and sampled
/// without side effects. Applying it to an element is the
/// [`crate::AnimationEngine`]'s job.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationDescriptor {
    /// Property channels animated together.
    pub tracks: Vec<PropTrack>,
    /// Play duration in milliseconds (ignored in scrub mode).
    pub duration_ms: f64,
    /// Easing applied to normalized time or scrub progress.
    pub ease: Ease,
    /// Delay before the first write, in milliseconds.
    #[serde(default)]
    pub delay_ms: f64,
    /// Ordinal offset within a stagger group; effective delay adds
    /// `stagger_index × stagger_step`.
    #[serde(default)]
    pub stagger_index: u32,
    /// Drive mode.
    #[serde(default)]
    pub mode: PlayMode,
}

impl AnimationDescriptor {
    /// Discrete descriptor with no delay.
    pub fn discrete(tracks: Vec<PropTrack>, duration_ms: f64, ease: Ease) -> Self {
        Self {
            tracks,
            duration_ms,
            ease,
            delay_ms: 0.0,
            stagger_index: 0,
            mode: PlayMode::Discrete,
        }
    }

    /// Scrub descriptor; `duration_ms` is unused and set to zero.
    pub fn scrub(tracks: Vec<PropTrack>, ease: Ease) -> Self {
        Self {
            tracks,
            duration_ms: 0.0,
            ease,
            delay_ms: 0.0,
            stagger_index: 0,
            mode: PlayMode::Scrub,
        }
    }

    /// Same descriptor with `delay_ms` replaced.
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Same descriptor with `stagger_index` replaced.
    pub fn with_stagger_index(mut self, index: u32) -> Self {
        self.stagger_index = index;
        self
    }

    /// Same animation running end-to-start.
    pub fn reversed(&self) -> Self {
        Self {
            tracks: self.tracks.iter().map(PropTrack::reversed).collect(),
            ..self.clone()
        }
    }

    /// Validate static invariants.
    pub fn validate(&self) -> GlissadeResult<()> {
        if self.tracks.is_empty() {
            return Err(GlissadeError::animation(
                "descriptor must animate at least one property",
            ));
        }
        for track in &self.tracks {
            if !track.from.is_finite() || !track.to.is_finite() {
                return Err(GlissadeError::animation(
                    "track endpoints must be finite",
                ));
            }
        }
        if self.mode == PlayMode::Discrete && !(self.duration_ms > 0.0) {
            return Err(GlissadeError::animation(
                "discrete descriptor duration must be > 0",
            ));
        }
        if !(self.delay_ms >= 0.0) {
            return Err(GlissadeError::animation("delay must be >= 0"));
        }
        Ok(())
    }

    /// Per-track values at eased factor `t` (caller supplies `t` in `[0, 1]`).
    pub(crate) fn values_at(&self, t: f64) -> impl Iterator<Item = (Prop, f64)> + '_ {
        self.tracks.iter().map(move |track| (track.prop, track.at(t)))
    }

    /// Declared end state, exactly.
    pub(crate) fn end_values(&self) -> impl Iterator<Item = (Prop, f64)> + '_ {
        self.tracks.iter().map(|track| (track.prop, track.to))
    }

    /// Pure scrub sample: property values for a live progress value.
    ///
    /// Progress is clamped to `[0, 1]` before easing, so values outside the
    /// range are identical to the range endpoints and repeated calls with the
    /// same progress are idempotent.
    pub fn scrub_values(&self, progress: f64) -> Vec<(Prop, f64)> {
        let t = self.ease.apply(progress.clamp(0.0, 1.0));
        self.values_at(t).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/descriptor.rs"]
mod tests;
