use std::collections::BTreeMap;

use crate::animation::descriptor::{AnimationDescriptor, PlayMode};
use crate::foundation::error::{GlissadeError, GlissadeResult};
use crate::view::{downgrade, ElementRef, WeakElement};

/// Handle to one running discrete play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayId(u64);

/// Handle to a stagger group of plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(u64);

struct ActivePlay {
    desc: AnimationDescriptor,
    target: WeakElement,
    /// Milliseconds accumulated since `play`, including delay time.
    elapsed_ms: f64,
    /// Effective pre-roll: `delay_ms + stagger_index × stagger_step_ms`.
    total_delay_ms: f64,
    group: Option<GroupId>,
}

/// Time-based property animation engine.
///
/// Holds the set of in-flight discrete plays and advances them once per
/// frame. Writes go through [`crate::ViewElement::set_prop`] on whatever
/// elements are still alive; plays whose target dropped are retired without
/// further writes. Plays are advanced in ascending [`PlayId`] order, so two
/// plays racing on the same property resolve last-write-wins per frame (a
/// caller error the engine does not arbitrate).
#[derive(Default)]
pub struct AnimationEngine {
    plays: BTreeMap<PlayId, ActivePlay>,
    next_play: u64,
    next_group: u64,
}

impl AnimationEngine {
    /// Empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a discrete play of `desc` against `element`.
    pub fn play(
        &mut self,
        desc: &AnimationDescriptor,
        element: &ElementRef,
    ) -> GlissadeResult<PlayId> {
        self.play_in_group(desc, element, None, 0.0)
    }

    /// Start a discrete play whose `stagger_index` is honored against an
    /// explicit step (used for region bindings that share a section step).
    pub fn play_staggered(
        &mut self,
        desc: &AnimationDescriptor,
        element: &ElementRef,
        stagger_step_ms: f64,
    ) -> GlissadeResult<PlayId> {
        if !(stagger_step_ms >= 0.0) {
            return Err(GlissadeError::animation("stagger step must be >= 0"));
        }
        self.play_in_group(desc, element, None, stagger_step_ms)
    }

    /// Start one play per `(descriptor, element)` pair as a stagger group.
    ///
    /// Each member's effective delay is its own `delay_ms` plus
    /// `stagger_index × stagger_step_ms`; the group completes when its
    /// last-indexed member finishes.
    pub fn play_group(
        &mut self,
        items: &[(AnimationDescriptor, ElementRef)],
        stagger_step_ms: f64,
    ) -> GlissadeResult<GroupId> {
        if !(stagger_step_ms >= 0.0) {
            return Err(GlissadeError::animation("stagger step must be >= 0"));
        }
        let group = GroupId(self.next_group);
        self.next_group += 1;
        for (desc, element) in items {
            self.play_in_group(desc, element, Some(group), stagger_step_ms)?;
        }
        Ok(group)
    }

    fn play_in_group(
        &mut self,
        desc: &AnimationDescriptor,
        element: &ElementRef,
        group: Option<GroupId>,
        stagger_step_ms: f64,
    ) -> GlissadeResult<PlayId> {
        desc.validate()?;
        if desc.mode != PlayMode::Discrete {
            return Err(GlissadeError::animation(
                "scrub descriptors are applied via apply_scrub, not play",
            ));
        }
        let id = PlayId(self.next_play);
        self.next_play += 1;
        let total_delay_ms = desc.delay_ms + f64::from(desc.stagger_index) * stagger_step_ms;
        tracing::debug!(play = id.0, delay_ms = total_delay_ms, "play start");
        self.plays.insert(
            id,
            ActivePlay {
                desc: desc.clone(),
                target: downgrade(element),
                elapsed_ms: 0.0,
                total_delay_ms,
                group,
            },
        );
        Ok(id)
    }

    /// Stop a play; the target keeps whatever values were last written.
    pub fn cancel(&mut self, id: PlayId) {
        if self.plays.remove(&id).is_some() {
            tracing::debug!(play = id.0, "play cancelled");
        }
    }

    /// Cancel every member of a group.
    pub fn cancel_group(&mut self, group: GroupId) {
        self.plays.retain(|_, play| play.group != Some(group));
    }

    /// Whether a play is still in flight.
    pub fn is_active(&self, id: PlayId) -> bool {
        self.plays.contains_key(&id)
    }

    /// Whether any member of a group is still in flight.
    pub fn group_active(&self, group: GroupId) -> bool {
        self.plays.values().any(|play| play.group == Some(group))
    }

    /// Number of in-flight plays.
    pub fn active_count(&self) -> usize {
        self.plays.len()
    }

    /// Advance all plays by `dt_ms` and write interpolated values.
    ///
    /// A play that reaches its duration writes its declared end state
    /// exactly (no accumulated floating-point drift) and is retired.
    pub fn tick(&mut self, dt_ms: f64) {
        let mut done: Vec<PlayId> = Vec::new();
        for (&id, play) in &mut self.plays {
            play.elapsed_ms += dt_ms;
            let effective = play.elapsed_ms - play.total_delay_ms;
            if effective < 0.0 {
                continue;
            }

            let Some(target) = play.target.upgrade() else {
                done.push(id);
                continue;
            };
            // A live element that is detached from the tree gets no writes;
            // the play keeps advancing so a reattach resumes mid-flight.
            let attached = target.bounds().is_some();

            if effective >= play.desc.duration_ms {
                if attached {
                    for (prop, value) in play.desc.end_values() {
                        target.set_prop(prop, value);
                    }
                }
                done.push(id);
                continue;
            }
            if !attached {
                continue;
            }

            let t = play.desc.ease.apply(effective / play.desc.duration_ms);
            for (prop, value) in play.desc.values_at(t) {
                target.set_prop(prop, value);
            }
        }
        for id in done {
            self.plays.remove(&id);
        }
    }

    /// Apply a scrub descriptor at `progress` (pure function of progress).
    ///
    /// Safe to call redundantly every frame; detached or dropped targets are
    /// silently skipped.
    pub fn apply_scrub(desc: &AnimationDescriptor, target: &WeakElement, progress: f64) {
        let Some(element) = target.upgrade() else {
            return;
        };
        if element.bounds().is_none() {
            return;
        }
        for (prop, value) in desc.scrub_values(progress) {
            element.set_prop(prop, value);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
