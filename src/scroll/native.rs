use crate::foundation::core::FrameTick;
use crate::foundation::error::GlissadeResult;
use crate::scroll::source::{
    resolve_target, Glide, InputDelta, ScrollSource, ScrollSurface, ScrollTarget, ScrollToOpts,
};
use crate::scroll::state::{advance, ScrollState};

/// Passthrough strategy: the host's raw scroll offset is the truth.
///
/// Each frame simply republishes the raw position as [`ScrollState`].
/// `scroll_to` drives the host offset with an eased glide, the generalized
/// form of delegating to a native smooth scroll.
#[derive(Default)]
pub struct NativeScrollSource {
    state: ScrollState,
    glide: Option<Glide>,
    pending: Option<(ScrollTarget, ScrollToOpts)>,
}

impl NativeScrollSource {
    /// New passthrough source at rest.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScrollSource for NativeScrollSource {
    fn tick(&mut self, tick: FrameTick, surface: &dyn ScrollSurface) -> ScrollState {
        let metrics = surface.metrics();
        let range = metrics.scroll_range.max(0.0);

        if let Some((target, opts)) = self.pending.take() {
            match resolve_target(&target, surface.raw_position(), metrics) {
                Some(to) => self.glide = Some(Glide::new(surface.raw_position(), to, opts)),
                None => tracing::debug!("scroll_to target detached, dropped"),
            }
        }

        if let Some(glide) = &mut self.glide {
            let (offset, finished) = glide.advance(tick.dt_ms);
            surface.apply_position(offset);
            if finished {
                self.glide = None;
            }
        }

        let position = surface.raw_position().clamp(0.0, range);
        self.state = advance(&self.state, position, range);
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

    fn push_input(&mut self, _delta: InputDelta) {
        // Native input already lands in the surface's raw position.
    }

    fn is_settled(&self) -> bool {
        self.glide.is_none() && self.pending.is_none()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/native.rs"]
mod tests;
