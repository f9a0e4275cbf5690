use crate::foundation::core::scroll_progress;

/// Direction of scroll motion over the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScrollDirection {
    /// Toward larger offsets (down the document).
    Forward,
    /// Toward smaller offsets.
    Backward,
    /// No perceptible motion.
    #[default]
    None,
}

/// Continuously updated scroll signal, recomputed every frame.
///
/// Owned and written exclusively by the active [`crate::ScrollSource`];
/// everything downstream reads it. `velocity` is measured in pixels per
/// frame at the observed cadence.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollState {
    /// Offset from the document top, within `[0, scroll_range]`.
    pub position: f64,
    /// Signed position change since the previous frame, in pixels.
    pub velocity: f64,
    /// Position normalized to `[0, 1]` over the scrollable range
    /// (`0` when the range is zero).
    pub progress: f64,
    /// Sign of `velocity` with a small dead zone.
    pub direction: ScrollDirection,
}

const DIRECTION_DEAD_ZONE: f64 = 1e-3;

pub(crate) fn direction_of(velocity: f64) -> ScrollDirection {
    if velocity > DIRECTION_DEAD_ZONE {
        ScrollDirection::Forward
    } else if velocity < -DIRECTION_DEAD_ZONE {
        ScrollDirection::Backward
    } else {
        ScrollDirection::None
    }
}

/// Next frame's state given the new clamped position.
pub(crate) fn advance(prev: &ScrollState, position: f64, range: f64) -> ScrollState {
    let velocity = position - prev.position;
    ScrollState {
        position,
        velocity,
        progress: scroll_progress(position, range),
        direction: direction_of(velocity),
    }
}
