/// Visual property channels the engine can write on a host element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Prop {
    /// Opacity in `[0, 1]` by convention (the engine does not clamp writes).
    Opacity,
    /// Horizontal translation in pixels.
    TranslateX,
    /// Vertical translation in pixels.
    TranslateY,
    /// Uniform scale factor (`1.0` = natural size).
    Scale,
    /// Horizontal skew in degrees.
    SkewX,
    /// Vertical skew in degrees.
    SkewY,
    /// Rotation in degrees.
    Rotation,
}

/// Interpolation contract for animation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

/// One animated property channel with endpoint values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropTrack {
    /// Property channel written by this track.
    pub prop: Prop,
    /// Value at the start of the animation.
    pub from: f64,
    /// Value at the end of the animation.
    pub to: f64,
}

impl PropTrack {
    /// Track from `from` to `to` on `prop`.
    pub fn new(prop: Prop, from: f64, to: f64) -> Self {
        Self { prop, from, to }
    }

    /// Value at eased factor `t` (already in `[0, 1]`).
    pub fn at(&self, t: f64) -> f64 {
        f64::lerp(&self.from, &self.to, t)
    }

    /// The same channel with endpoints swapped.
    pub fn reversed(&self) -> Self {
        Self {
            prop: self.prop,
            from: self.to,
            to: self.from,
        }
    }
}
