use crate::foundation::core::FrameTick;
use crate::foundation::error::{GlissadeError, GlissadeResult};
use crate::scroll::source::{
    resolve_target, Glide, InputDelta, ScrollSource, ScrollSurface, ScrollTarget, ScrollToOpts,
};
use crate::scroll::state::{advance, ScrollState};

/// Distance under which the smoothed position snaps onto its target.
const SETTLE_EPSILON: f64 = 0.05;

/// Tuning for the virtualized scroll strategy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SmoothedConfig {
    /// Interpolation factor per frame toward the logical target, in `(0, 1]`.
    pub lerp: f64,
    /// Multiplier applied to wheel deltas.
    pub wheel_multiplier: f64,
    /// Multiplier applied to touch/drag deltas.
    pub touch_multiplier: f64,
}

impl Default for SmoothedConfig {
    fn default() -> Self {
        Self {
            lerp: 0.1,
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
        }
    }
}

impl SmoothedConfig {
    /// Validate static invariants.
    pub fn validate(&self) -> GlissadeResult<()> {
        if !(self.lerp > 0.0 && self.lerp <= 1.0) {
            return Err(GlissadeError::scroll("lerp factor must be in (0, 1]"));
        }
        if !(self.wheel_multiplier.is_finite() && self.touch_multiplier.is_finite()) {
            return Err(GlissadeError::scroll("input multipliers must be finite"));
        }
        Ok(())
    }
}

/// Virtualized strategy: the rendered offset lags a logical target.
///
/// Raw input is pushed through [`ScrollSource::push_input`] and moves the
/// target; each frame the rendered position interpolates toward it at the
/// configured factor, producing inertia. While active, this source owns the
/// rendered offset: the host must suppress its native scrolling and render
/// at whatever [`ScrollSurface::apply_position`] publishes, every frame,
/// whether or not the position changed. `scroll_to` glides the *target*
/// with an explicit easing curve; the rendered position keeps its lag.
pub struct SmoothedScrollSource {
    config: SmoothedConfig,
    state: ScrollState,
    target: f64,
    position: f64,
    adopted: bool,
    glide: Option<Glide>,
    pending: Option<(ScrollTarget, ScrollToOpts)>,
}

impl Default for SmoothedScrollSource {
    fn default() -> Self {
        Self::new(SmoothedConfig::default())
    }
}

impl SmoothedScrollSource {
    /// New virtualized source with the given tuning.
    pub fn new(config: SmoothedConfig) -> Self {
        Self {
            config,
            state: ScrollState::default(),
            target: 0.0,
            position: 0.0,
            adopted: false,
            glide: None,
            pending: None,
        }
    }

    /// Current logical target offset.
    pub fn target(&self) -> f64 {
        self.target
    }
}

impl ScrollSource for SmoothedScrollSource {
    fn tick(&mut self, tick: FrameTick, surface: &dyn ScrollSurface) -> ScrollState {
        let metrics = surface.metrics();
        let range = metrics.scroll_range.max(0.0);

        // First frame: adopt the host offset so taking over mid-page does
        // not teleport the content.
        if !self.adopted {
            self.position = surface.raw_position().clamp(0.0, range);
            self.target = self.position;
            self.state.position = self.position;
            self.adopted = true;
        }

        if let Some((target, opts)) = self.pending.take() {
            match resolve_target(&target, self.position, metrics) {
                Some(to) => self.glide = Some(Glide::new(self.target, to, opts)),
                None => tracing::debug!("scroll_to target detached, dropped"),
            }
        }

        if let Some(glide) = &mut self.glide {
            let (offset, finished) = glide.advance(tick.dt_ms);
            self.target = offset;
            if finished {
                self.glide = None;
            }
        }

        self.target = self.target.clamp(0.0, range);
        self.position += (self.target - self.position) * self.config.lerp;
        if (self.target - self.position).abs() < SETTLE_EPSILON {
            self.position = self.target;
        }

        surface.apply_position(self.position);
        self.state = advance(&self.state, self.position, range);
        self.state
    }

    fn state(&self) -> ScrollState {
        self.state
    }

    fn scroll_to(&mut self, target: ScrollTarget, opts: ScrollToOpts) -> GlissadeResult<()> {
        opts.validate()?;
        self.pending = Some((target, opts));
        Ok(())
    }

    fn push_input(&mut self, delta: InputDelta) {
        let amount = match delta {
            InputDelta::Wheel(d) => d * self.config.wheel_multiplier,
            InputDelta::Touch(d) => d * self.config.touch_multiplier,
        };
        // Direct input takes over from any programmatic glide.
        self.glide = None;
        self.pending = None;
        self.target += amount;
    }

    fn is_settled(&self) -> bool {
        self.glide.is_none()
            && self.pending.is_none()
            && (self.target - self.position).abs() < SETTLE_EPSILON
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/smoothed.rs"]
mod tests;
