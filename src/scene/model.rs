use crate::animation::descriptor::{AnimationDescriptor, PlayMode};
use crate::counter::CounterSpec;
use crate::foundation::error::{GlissadeError, GlissadeResult};
use crate::trigger::region::RegionConfig;

fn default_stagger_step_ms() -> f64 {
    100.0
}

/// A complete scroll scene: an ordered list of animated sections.
///
/// A scene is a pure data model that can be built programmatically (see
/// [`crate::SceneBuilder`]) or serialized/deserialized via Serde (JSON).
/// Mounting it against live elements is done per section with
/// [`crate::mount_section`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSpec {
    /// Sections in document order.
    pub sections: Vec<SectionSpec>,
}

impl SceneSpec {
    /// Validate every section.
    pub fn validate(&self) -> GlissadeResult<()> {
        if self.sections.is_empty() {
            return Err(GlissadeError::validation(
                "scene must contain at least one section",
            ));
        }
        for section in &self.sections {
            section.validate()?;
        }
        Ok(())
    }

    /// Parse a scene from JSON and validate it.
    pub fn from_json(json: &str) -> GlissadeResult<Self> {
        let scene: Self =
            serde_json::from_str(json).map_err(|e| GlissadeError::serde(e.to_string()))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Serialize the scene to pretty JSON.
    pub fn to_json(&self) -> GlissadeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GlissadeError::serde(e.to_string()))
    }

    /// Find a section by name.
    pub fn section(&self, name: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.name == name)
    }
}

/// One animated section, selected via configuration rather than code.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionSpec {
    /// Section name (stable within a scene).
    pub name: String,
    /// Activation geometry and replay policy for the section's region.
    pub region: RegionConfig,
    /// Delay increment between staggered items, in milliseconds.
    #[serde(default = "default_stagger_step_ms")]
    pub stagger_step_ms: f64,
    /// Effects applied when the section's region fires or scrubs.
    pub effects: Vec<SectionEffect>,
}

impl SectionSpec {
    /// Validate static invariants.
    pub fn validate(&self) -> GlissadeResult<()> {
        if self.name.trim().is_empty() {
            return Err(GlissadeError::validation("section name must be non-empty"));
        }
        self.region.validate()?;
        if !(self.stagger_step_ms >= 0.0) {
            return Err(GlissadeError::validation("stagger step must be >= 0"));
        }
        for effect in &self.effects {
            effect.validate(self)?;
        }
        Ok(())
    }
}

/// Effect kinds a section can carry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SectionEffect {
    /// Discrete entrance play, staggered across the section's items
    /// (or applied to the root when the section has no items).
    Entrance(AnimationDescriptor),
    /// Scroll-proportional translation of the section root;
    /// `speed` in the original's `data-scroll-speed` units
    /// (100 px of travel per unit over the viewport transit).
    Parallax {
        /// Signed parallax speed.
        speed: f64,
    },
    /// Numeric counter started when the section enters.
    Counter(CounterSpec),
}

impl SectionEffect {
    fn validate(&self, section: &SectionSpec) -> GlissadeResult<()> {
        match self {
            Self::Entrance(desc) => {
                desc.validate()?;
                if desc.mode != PlayMode::Discrete {
                    return Err(GlissadeError::validation(
                        "entrance effects take discrete descriptors",
                    ));
                }
                if section.region.is_scrub() {
                    return Err(GlissadeError::validation(
                        "entrance effects need a firing region, not a scrub range",
                    ));
                }
                Ok(())
            }
            Self::Parallax { speed } => {
                if !speed.is_finite() {
                    return Err(GlissadeError::validation("parallax speed must be finite"));
                }
                Ok(())
            }
            Self::Counter(spec) => {
                spec.validate()?;
                if section.region.is_scrub() {
                    return Err(GlissadeError::validation(
                        "counter effects need a firing region, not a scrub range",
                    ));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
