use std::collections::BTreeMap;
use std::rc::Rc;

use crate::foundation::core::ViewportMetrics;
use crate::foundation::error::{GlissadeError, GlissadeResult};
use crate::scroll::state::ScrollState;
use crate::trigger::region::{
    RegionConfig, RegionId, ReplayPolicy, TriggerEvent, TriggerEventKind,
};
use crate::view::{downgrade, ElementRef, WeakElement};

enum WatchKind {
    /// Element geometry against a viewport-height fraction.
    Element {
        element: WeakElement,
        config: RegionConfig,
    },
    /// Absolute scroll offset against a pixel threshold.
    Offset {
        threshold_px: f64,
        replay: ReplayPolicy,
    },
}

struct RegionEntry {
    kind: WatchKind,
    active: bool,
    /// Once-policy latch; a done region is never evaluated again.
    done: bool,
    last_scrub: Option<f64>,
}

/// Per-frame evaluator of watched regions.
///
/// Regions are registered when their owning view section mounts and must be
/// unregistered on unmount. Evaluation runs once per frame after the scroll
/// source updates, in registration order, and returns the transitions that
/// occurred: at most one event per region per frame, so sub-threshold
/// jitter within a frame cannot double-fire.
#[derive(Default)]
pub struct TriggerRegistry {
    entries: BTreeMap<RegionId, RegionEntry>,
    next: u64,
}

impl TriggerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch an element's geometry.
    ///
    /// Registering the same element with an identical config is idempotent
    /// and returns the existing handle, so a remounting section cannot
    /// double-fire its animations.
    pub fn register(
        &mut self,
        element: &ElementRef,
        config: RegionConfig,
    ) -> GlissadeResult<RegionId> {
        config.validate()?;
        for (&id, entry) in &self.entries {
            if let WatchKind::Element {
                element: existing,
                config: existing_config,
            } = &entry.kind
            {
                let same_element = existing
                    .upgrade()
                    .is_some_and(|live| Rc::ptr_eq(&live, element));
                if same_element && *existing_config == config {
                    return Ok(id);
                }
            }
        }
        let id = self.insert(WatchKind::Element {
            element: downgrade(element),
            config,
        });
        tracing::debug!(region = id.0, "region registered");
        Ok(id)
    }

    /// Watch the absolute scroll offset against `threshold_px`.
    pub fn register_offset(
        &mut self,
        threshold_px: f64,
        replay: ReplayPolicy,
    ) -> GlissadeResult<RegionId> {
        if !threshold_px.is_finite() {
            return Err(GlissadeError::trigger("offset threshold must be finite"));
        }
        for (&id, entry) in &self.entries {
            if let WatchKind::Offset {
                threshold_px: existing,
                replay: existing_replay,
            } = &entry.kind
            {
                if *existing == threshold_px && *existing_replay == replay {
                    return Ok(id);
                }
            }
        }
        let id = self.insert(WatchKind::Offset {
            threshold_px,
            replay,
        });
        tracing::debug!(region = id.0, threshold_px, "offset watcher registered");
        Ok(id)
    }

    fn insert(&mut self, kind: WatchKind) -> RegionId {
        let id = RegionId(self.next);
        self.next += 1;
        self.entries.insert(
            id,
            RegionEntry {
                kind,
                active: false,
                done: false,
                last_scrub: None,
            },
        );
        id
    }

    /// Remove a region; no further events are emitted for it.
    pub fn unregister(&mut self, id: RegionId) {
        self.entries.remove(&id);
    }

    /// Whether a region is currently registered.
    pub fn contains(&self, id: RegionId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of registered regions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no regions are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluate all regions against the current frame.
    ///
    /// Regions whose element is dropped or detached are skipped without an
    /// event or an error; they resume evaluation when geometry reappears.
    pub fn evaluate(
        &mut self,
        metrics: ViewportMetrics,
        state: &ScrollState,
    ) -> Vec<TriggerEvent> {
        let mut events = Vec::new();
        for (&id, entry) in &mut self.entries {
            if entry.done {
                continue;
            }
            match &entry.kind {
                WatchKind::Element { element, config } => {
                    let Some(live) = element.upgrade() else {
                        continue;
                    };
                    let Some(bounds) = live.bounds() else {
                        continue;
                    };
                    if metrics.height <= 0.0 {
                        continue;
                    }
                    let top_frac = bounds.y0 / metrics.height;

                    if let Some(end) = config.activation_end {
                        let span = config.activation_start - end;
                        let progress =
                            ((config.activation_start - top_frac) / span).clamp(0.0, 1.0);
                        if entry.last_scrub != Some(progress) {
                            entry.last_scrub = Some(progress);
                            events.push(TriggerEvent {
                                region: id,
                                kind: TriggerEventKind::Scrub(progress),
                            });
                        }
                        continue;
                    }

                    let satisfied = top_frac <= config.activation_start;
                    let replay = config.replay;
                    push_transition(id, entry, replay, satisfied, &mut events);
                }
                WatchKind::Offset {
                    threshold_px,
                    replay,
                } => {
                    let satisfied = state.position >= *threshold_px;
                    let replay = *replay;
                    push_transition(id, entry, replay, satisfied, &mut events);
                }
            }
        }
        events
    }
}

fn push_transition(
    id: RegionId,
    entry: &mut RegionEntry,
    replay: ReplayPolicy,
    satisfied: bool,
    events: &mut Vec<TriggerEvent>,
) {
    match replay {
        ReplayPolicy::Once => {
            if satisfied && !entry.active {
                entry.active = true;
                entry.done = true;
                events.push(TriggerEvent {
                    region: id,
                    kind: TriggerEventKind::Entered,
                });
            }
        }
        ReplayPolicy::Always => {
            if satisfied != entry.active {
                entry.active = satisfied;
                events.push(TriggerEvent {
                    region: id,
                    kind: if satisfied {
                        TriggerEventKind::Entered
                    } else {
                        TriggerEventKind::Exited
                    },
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/registry.rs"]
mod tests;
