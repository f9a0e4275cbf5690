use crate::animation::descriptor::AnimationDescriptor;
use crate::animation::ease::Ease;
use crate::animation::prop::{Prop, PropTrack};
use crate::counter::CounterSpec;
use crate::foundation::error::GlissadeResult;
use crate::scene::model::{SceneSpec, SectionEffect, SectionSpec};
use crate::trigger::region::{RegionConfig, ReplayPolicy};

/// Builder for a [`SceneSpec`].
#[derive(Default)]
pub struct SceneBuilder {
    sections: Vec<SectionSpec>,
}

impl SceneBuilder {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section.
    pub fn section(mut self, section: SectionSpec) -> Self {
        self.sections.push(section);
        self
    }

    /// Validate and produce the scene.
    pub fn build(self) -> GlissadeResult<SceneSpec> {
        let scene = SceneSpec {
            sections: self.sections,
        };
        scene.validate()?;
        Ok(scene)
    }
}

/// Builder for one [`SectionSpec`].
pub struct SectionBuilder {
    name: String,
    region: RegionConfig,
    stagger_step_ms: f64,
    effects: Vec<SectionEffect>,
}

impl SectionBuilder {
    /// Section with the default region (fires once at 85% viewport height).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: RegionConfig::default(),
            stagger_step_ms: 100.0,
            effects: Vec::new(),
        }
    }

    /// Replace the activation threshold, keeping the replay policy.
    pub fn threshold(mut self, activation_start: f64) -> Self {
        self.region.activation_start = activation_start;
        self
    }

    /// Fire once and lock (the default).
    pub fn once(mut self) -> Self {
        self.region.replay = ReplayPolicy::Once;
        self
    }

    /// Toggle on every crossing.
    pub fn always(mut self) -> Self {
        self.region.replay = ReplayPolicy::Always;
        self
    }

    /// Replace the whole region config.
    pub fn region(mut self, region: RegionConfig) -> Self {
        self.region = region;
        self
    }

    /// Delay increment between staggered items.
    pub fn stagger_step_ms(mut self, step: f64) -> Self {
        self.stagger_step_ms = step;
        self
    }

    /// Add an entrance play.
    pub fn entrance(mut self, desc: AnimationDescriptor) -> Self {
        self.effects.push(SectionEffect::Entrance(desc));
        self
    }

    /// Add a parallax drift on the section root.
    pub fn parallax(mut self, speed: f64) -> Self {
        self.effects.push(SectionEffect::Parallax { speed });
        self
    }

    /// Add a counter.
    pub fn counter(mut self, spec: CounterSpec) -> Self {
        self.effects.push(SectionEffect::Counter(spec));
        self
    }

    /// Validate and produce the section.
    pub fn build(self) -> GlissadeResult<SectionSpec> {
        let section = SectionSpec {
            name: self.name,
            region: self.region,
            stagger_step_ms: self.stagger_step_ms,
            effects: self.effects,
        };
        section.validate()?;
        Ok(section)
    }
}

/// Fade from transparent to opaque.
pub fn fade_in(duration_ms: f64) -> AnimationDescriptor {
    AnimationDescriptor::discrete(
        vec![PropTrack::new(Prop::Opacity, 0.0, 1.0)],
        duration_ms,
        Ease::OutCubic,
    )
}

/// Fade in while rising `rise_px` into place.
pub fn fade_up(duration_ms: f64, rise_px: f64) -> AnimationDescriptor {
    AnimationDescriptor::discrete(
        vec![
            PropTrack::new(Prop::Opacity, 0.0, 1.0),
            PropTrack::new(Prop::TranslateY, rise_px, 0.0),
        ],
        duration_ms,
        Ease::OutCubic,
    )
}

/// The stat-card entrance: a 50 px rise over half a second.
pub fn card_rise() -> AnimationDescriptor {
    fade_up(500.0, 50.0)
}

/// Fade in while sliding from `offset_px` left of the resting position.
pub fn slide_in_left(duration_ms: f64, offset_px: f64) -> AnimationDescriptor {
    AnimationDescriptor::discrete(
        vec![
            PropTrack::new(Prop::Opacity, 0.0, 1.0),
            PropTrack::new(Prop::TranslateX, -offset_px, 0.0),
        ],
        duration_ms,
        Ease::OutCubic,
    )
}

/// Fade in while sliding from `offset_px` right of the resting position.
pub fn slide_in_right(duration_ms: f64, offset_px: f64) -> AnimationDescriptor {
    AnimationDescriptor::discrete(
        vec![
            PropTrack::new(Prop::Opacity, 0.0, 1.0),
            PropTrack::new(Prop::TranslateX, offset_px, 0.0),
        ],
        duration_ms,
        Ease::OutCubic,
    )
}

/// Fade in while scaling up from `from_scale`.
pub fn scale_in(duration_ms: f64, from_scale: f64) -> AnimationDescriptor {
    AnimationDescriptor::discrete(
        vec![
            PropTrack::new(Prop::Opacity, 0.0, 1.0),
            PropTrack::new(Prop::Scale, from_scale, 1.0),
        ],
        duration_ms,
        Ease::OutCubic,
    )
}

/// Pixels of parallax travel per unit of speed over a viewport transit.
pub const PARALLAX_UNIT_PX: f64 = 100.0;

/// Scroll-proportional vertical drift in `data-scroll-speed` units.
pub fn parallax(speed: f64) -> AnimationDescriptor {
    AnimationDescriptor::scrub(
        vec![PropTrack::new(
            Prop::TranslateY,
            speed * PARALLAX_UNIT_PX,
            -speed * PARALLAX_UNIT_PX,
        )],
        Ease::Linear,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dsl.rs"]
mod tests;
