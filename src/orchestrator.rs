use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::animation::descriptor::{AnimationDescriptor, PlayMode};
use crate::animation::engine::{AnimationEngine, GroupId, PlayId};
use crate::counter::{CounterEngine, CounterId, CounterSink, CounterSpec};
use crate::foundation::core::FrameClock;
use crate::foundation::error::{GlissadeError, GlissadeResult};
use crate::scroll::source::{InputDelta, ScrollSource, ScrollSurface, ScrollTarget, ScrollToOpts};
use crate::scroll::state::ScrollState;
use crate::trigger::region::{
    RegionConfig, RegionId, ReplayPolicy, TriggerEvent, TriggerEventKind,
};
use crate::trigger::registry::TriggerRegistry;
use crate::view::{downgrade, ElementRef, WeakElement};

enum Binding {
    /// Discrete play on Entered; reversed play on Exited of an Always region.
    Entrance {
        desc: AnimationDescriptor,
        target: WeakElement,
        stagger_step_ms: f64,
    },
    /// Scrub descriptor applied on every progress change.
    Scrub {
        desc: AnimationDescriptor,
        target: WeakElement,
    },
    /// Counter ramp started on Entered.
    Counter { spec: CounterSpec, sink: CounterSink },
}

/// The viewport-synchronized animation orchestrator.
///
/// Owns the scroll source, trigger registry, animation engine, and counter
/// sub-engine, and drives them in the mandated per-frame order: scroll
/// update happens-before trigger evaluation happens-before property writes.
/// A trigger that fires this frame therefore starts writing this frame.
///
/// The host calls [`Orchestrator::tick`] once per rendered frame with a
/// monotonic timestamp; nothing inside the crate reads wall time.
pub struct Orchestrator {
    clock: FrameClock,
    scroll: Box<dyn ScrollSource>,
    registry: TriggerRegistry,
    engine: AnimationEngine,
    counters: CounterEngine,
    bindings: BTreeMap<RegionId, Vec<Binding>>,
    spawned_plays: BTreeMap<RegionId, Vec<PlayId>>,
    spawned_counters: BTreeMap<RegionId, Vec<CounterId>>,
}

impl Orchestrator {
    /// Orchestrator over the given scroll strategy.
    pub fn new(scroll: Box<dyn ScrollSource>) -> Self {
        Self {
            clock: FrameClock::new(),
            scroll,
            registry: TriggerRegistry::new(),
            engine: AnimationEngine::new(),
            counters: CounterEngine::new(),
            bindings: BTreeMap::new(),
            spawned_plays: BTreeMap::new(),
            spawned_counters: BTreeMap::new(),
        }
    }

    /// Watch an element's geometry; see [`TriggerRegistry::register`].
    pub fn watch(
        &mut self,
        element: &ElementRef,
        config: RegionConfig,
    ) -> GlissadeResult<RegionId> {
        self.registry.register(element, config)
    }

    /// Watch the absolute scroll offset; see
    /// [`TriggerRegistry::register_offset`].
    pub fn watch_offset(
        &mut self,
        threshold_px: f64,
        replay: ReplayPolicy,
    ) -> GlissadeResult<RegionId> {
        self.registry.register_offset(threshold_px, replay)
    }

    /// Tear down a region: unregister it, drop its bindings, and cancel
    /// every play and counter it spawned.
    ///
    /// Mandatory on section unmount; afterwards no frame callback can reach
    /// the section's elements even if the clock keeps ticking.
    pub fn unwatch(&mut self, region: RegionId) {
        self.registry.unregister(region);
        self.bindings.remove(&region);
        self.cancel_spawned(region);
    }

    fn cancel_spawned(&mut self, region: RegionId) {
        for id in self.spawned_plays.remove(&region).unwrap_or_default() {
            self.engine.cancel(id);
        }
        for id in self.spawned_counters.remove(&region).unwrap_or_default() {
            self.counters.cancel(id);
        }
    }

    fn bind(&mut self, region: RegionId, binding: Binding) -> GlissadeResult<()> {
        if !self.registry.contains(region) {
            return Err(GlissadeError::trigger("unknown region handle"));
        }
        self.bindings.entry(region).or_default().push(binding);
        Ok(())
    }

    /// On Entered, play `desc` against `element`; on Exited of an Always
    /// region, play it reversed (the explicit retoggle policy).
    pub fn bind_entrance(
        &mut self,
        region: RegionId,
        desc: AnimationDescriptor,
        element: &ElementRef,
        stagger_step_ms: f64,
    ) -> GlissadeResult<()> {
        desc.validate()?;
        if desc.mode != PlayMode::Discrete {
            return Err(GlissadeError::animation(
                "entrance bindings take discrete descriptors",
            ));
        }
        self.bind(
            region,
            Binding::Entrance {
                desc,
                target: downgrade(element),
                stagger_step_ms,
            },
        )
    }

    /// Apply `desc` as a pure function of the region's scrub progress.
    pub fn bind_scrub(
        &mut self,
        region: RegionId,
        desc: AnimationDescriptor,
        element: &ElementRef,
    ) -> GlissadeResult<()> {
        desc.validate()?;
        if desc.mode != PlayMode::Scrub {
            return Err(GlissadeError::animation(
                "scrub bindings take scrub descriptors",
            ));
        }
        self.bind(
            region,
            Binding::Scrub {
                desc,
                target: downgrade(element),
            },
        )
    }

    /// Start `spec` when the region fires, emitting through `sink`.
    pub fn bind_counter(
        &mut self,
        region: RegionId,
        spec: CounterSpec,
        sink: CounterSink,
    ) -> GlissadeResult<()> {
        spec.validate()?;
        self.bind(region, Binding::Counter { spec, sink })
    }

    /// Direct discrete play, not tied to any region (mount-time sequences).
    pub fn play(
        &mut self,
        desc: &AnimationDescriptor,
        element: &ElementRef,
    ) -> GlissadeResult<PlayId> {
        self.engine.play(desc, element)
    }

    /// Direct stagger-group play, not tied to any region.
    pub fn play_group(
        &mut self,
        items: &[(AnimationDescriptor, ElementRef)],
        stagger_step_ms: f64,
    ) -> GlissadeResult<GroupId> {
        self.engine.play_group(items, stagger_step_ms)
    }

    /// Cancel a direct play.
    pub fn cancel(&mut self, id: PlayId) {
        self.engine.cancel(id);
    }

    /// Cancel a direct group.
    pub fn cancel_group(&mut self, group: GroupId) {
        self.engine.cancel_group(group);
    }

    /// Whether a group still has in-flight members.
    pub fn group_active(&self, group: GroupId) -> bool {
        self.engine.group_active(group)
    }

    /// Glide the scroll position; see [`ScrollSource::scroll_to`].
    pub fn scroll_to(&mut self, target: ScrollTarget, opts: ScrollToOpts) -> GlissadeResult<()> {
        self.scroll.scroll_to(target, opts)
    }

    /// Forward one raw input event to the scroll strategy.
    pub fn push_input(&mut self, delta: InputDelta) {
        self.scroll.push_input(delta);
    }

    /// Scroll state as of the last tick.
    pub fn state(&self) -> ScrollState {
        self.scroll.state()
    }

    /// Smoothed frame interval estimate, in milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        self.clock.frame_interval_ms()
    }

    /// Whether nothing is moving: scroll settled, no plays, no counters.
    ///
    /// Hosts can use this to skip redraw scheduling between interactions.
    pub fn is_settled(&self) -> bool {
        self.scroll.is_settled()
            && self.engine.active_count() == 0
            && self.counters.active_count() == 0
    }

    /// Advance one frame.
    ///
    /// Ordering within the frame: scroll source update, then trigger
    /// evaluation, then event dispatch (which may start plays and
    /// counters), then engine and counter ticks, so work started by a
    /// trigger writes its first values in the same frame.
    #[tracing::instrument(skip(self, surface))]
    pub fn tick(&mut self, now_ms: f64, surface: &dyn ScrollSurface) -> ScrollState {
        let tick = self.clock.tick(now_ms);
        let state = self.scroll.tick(tick, surface);
        let events = self.registry.evaluate(surface.metrics(), &state);
        for event in events {
            self.dispatch(event);
        }
        self.engine.tick(tick.dt_ms);
        self.counters.tick();
        state
    }

    fn dispatch(&mut self, event: TriggerEvent) {
        let TriggerEvent { region, kind } = event;
        tracing::trace!(region = ?region, kind = ?kind, "trigger");
        match kind {
            TriggerEventKind::Entered | TriggerEventKind::Exited => {
                // Retarget: anything still in flight from the previous
                // transition yields to the new one.
                self.cancel_spawned(region);
                let entered = kind == TriggerEventKind::Entered;
                let Some(bindings) = self.bindings.get(&region) else {
                    return;
                };
                let mut plays = Vec::new();
                let mut counters = Vec::new();
                for binding in bindings {
                    match binding {
                        Binding::Entrance {
                            desc,
                            target,
                            stagger_step_ms,
                        } => {
                            let Some(element) = target.upgrade() else {
                                continue;
                            };
                            let played = if entered {
                                self.engine
                                    .play_staggered(desc, &element, *stagger_step_ms)
                            } else {
                                self.engine.play_staggered(
                                    &desc.reversed(),
                                    &element,
                                    *stagger_step_ms,
                                )
                            };
                            // Descriptors were validated at bind time.
                            if let Ok(id) = played {
                                plays.push(id);
                            }
                        }
                        Binding::Counter { spec, sink } => {
                            if entered {
                                if let Ok(id) = self.counters.start(
                                    spec,
                                    self.clock.frame_interval_ms(),
                                    Rc::clone(sink),
                                ) {
                                    counters.push(id);
                                }
                            }
                        }
                        Binding::Scrub { .. } => {}
                    }
                }
                if !plays.is_empty() {
                    self.spawned_plays.insert(region, plays);
                }
                if !counters.is_empty() {
                    self.spawned_counters.insert(region, counters);
                }
            }
            TriggerEventKind::Scrub(progress) => {
                let Some(bindings) = self.bindings.get(&region) else {
                    return;
                };
                for binding in bindings {
                    if let Binding::Scrub { desc, target } = binding {
                        AnimationEngine::apply_scrub(desc, target, progress);
                    }
                }
            }
        }
    }
}

/// Clonable handle to the application-root orchestrator.
///
/// Constructed once at the root and passed by reference to any component
/// that needs `scroll_to` (a "back to top" control, a nav link): explicit
/// dependency injection instead of a process-wide mutable slot. Dropping
/// the last clone drops the orchestrator and with it every scheduled frame
/// callback.
#[derive(Clone)]
pub struct SharedOrchestrator(Rc<RefCell<Orchestrator>>);

impl SharedOrchestrator {
    /// Wrap an orchestrator for shared access.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self(Rc::new(RefCell::new(orchestrator)))
    }

    /// Advance one frame; see [`Orchestrator::tick`].
    pub fn tick(&self, now_ms: f64, surface: &dyn ScrollSurface) -> ScrollState {
        self.0.borrow_mut().tick(now_ms, surface)
    }

    /// Glide the scroll position; see [`Orchestrator::scroll_to`].
    pub fn scroll_to(&self, target: ScrollTarget, opts: ScrollToOpts) -> GlissadeResult<()> {
        self.0.borrow_mut().scroll_to(target, opts)
    }

    /// Forward one raw input event.
    pub fn push_input(&self, delta: InputDelta) {
        self.0.borrow_mut().push_input(delta);
    }

    /// Scroll state as of the last tick.
    pub fn state(&self) -> ScrollState {
        self.0.borrow().state()
    }

    /// Run `f` with mutable access to the orchestrator.
    pub fn with<R>(&self, f: impl FnOnce(&mut Orchestrator) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}

#[cfg(test)]
#[path = "../tests/unit/orchestrator.rs"]
mod tests;
