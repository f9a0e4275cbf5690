use crate::counter::CounterSink;
use crate::foundation::error::{GlissadeError, GlissadeResult};
use crate::orchestrator::Orchestrator;
use crate::scene::dsl::parallax;
use crate::scene::model::{SectionEffect, SectionSpec};
use crate::trigger::region::{RegionConfig, RegionId};
use crate::view::ElementRef;

/// Live elements a mounted section animates.
///
/// `root` carries the section's watched region and any parallax drift;
/// entrance plays stagger across `items` in order (or land on the root when
/// there are none). All references stay owned by the view layer.
pub struct SectionElements {
    /// Section root element.
    pub root: ElementRef,
    /// Staggered child elements (cards, paragraphs, headings).
    pub items: Vec<ElementRef>,
}

/// Teardown handle for one mounted section.
///
/// Unmounting is mandatory when the owning view section goes away: it
/// unregisters every region the mount created and cancels all plays and
/// counters spawned from them.
#[must_use = "unmount this on section teardown or its callbacks keep firing"]
pub struct SectionMount {
    name: String,
    regions: Vec<RegionId>,
}

impl SectionMount {
    /// Section name this mount belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region handles owned by this mount.
    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// Tear the section down.
    pub fn unmount(self, orchestrator: &mut Orchestrator) {
        for region in self.regions {
            orchestrator.unwatch(region);
        }
    }
}

/// Wire one section spec against live elements.
///
/// Counter effects consume sinks from `counter_sinks` in declaration order;
/// supplying too few is a validation error (too many is fine; spares are
/// ignored).
pub fn mount_section(
    orchestrator: &mut Orchestrator,
    spec: &SectionSpec,
    elements: &SectionElements,
    counter_sinks: &[CounterSink],
) -> GlissadeResult<SectionMount> {
    spec.validate()?;

    let region = orchestrator.watch(&elements.root, spec.region)?;
    let mut regions = vec![region];
    let mut next_sink = 0usize;

    for effect in &spec.effects {
        match effect {
            SectionEffect::Entrance(desc) => {
                if elements.items.is_empty() {
                    orchestrator.bind_entrance(
                        region,
                        desc.clone(),
                        &elements.root,
                        spec.stagger_step_ms,
                    )?;
                } else {
                    for (index, item) in elements.items.iter().enumerate() {
                        orchestrator.bind_entrance(
                            region,
                            desc.clone().with_stagger_index(index as u32),
                            item,
                            spec.stagger_step_ms,
                        )?;
                    }
                }
            }
            SectionEffect::Parallax { speed } => {
                // Parallax scrubs over the root's whole viewport transit,
                // independent of the section's firing threshold.
                let drift_region =
                    orchestrator.watch(&elements.root, RegionConfig::scrub_range(1.0, 0.0))?;
                orchestrator.bind_scrub(drift_region, parallax(*speed), &elements.root)?;
                regions.push(drift_region);
            }
            SectionEffect::Counter(counter_spec) => {
                let Some(sink) = counter_sinks.get(next_sink) else {
                    return Err(GlissadeError::validation(format!(
                        "section '{}' declares more counters than sinks supplied",
                        spec.name
                    )));
                };
                next_sink += 1;
                orchestrator.bind_counter(region, counter_spec.clone(), sink.clone())?;
            }
        }
    }

    tracing::debug!(section = %spec.name, regions = regions.len(), "section mounted");
    Ok(SectionMount {
        name: spec.name.clone(),
        regions,
    })
}
