//! Glissade is a viewport-synchronized animation orchestrator.
//!
//! It generalizes the scroll-driven animation layer of single-page
//! experiences (smoothed scrolling, viewport triggers, entrance tweens,
//! scrub-driven drift, animated numeric counters) away from any particular
//! UI toolkit. The host "view layer" owns elements and the frame clock; the
//! orchestrator owns scroll state, trigger evaluation, and property
//! interpolation, writing values back through non-owning references.
//!
//! # Pipeline overview
//!
//! Each frame, driven by one host call to [`Orchestrator::tick`]:
//!
//! 1. **Scroll**: the active [`ScrollSource`] strategy (native passthrough
//!    or virtualized smoothing) produces the frame's [`ScrollState`]
//! 2. **Trigger**: the [`TriggerRegistry`] evaluates watched regions
//!    against viewport geometry and emits entered/exited/scrub events
//! 3. **Animate**: the [`AnimationEngine`] and [`CounterEngine`] apply
//!    property writes and counter samples for this frame
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: no wall-clock reads; time enters only
//!   through host-supplied timestamps, so every behavior is testable.
//! - **Single-threaded**: everything runs on one UI thread between frame
//!   callbacks; suspension happens only between frames.
//! - **Non-owning**: elements belong to the view layer; a dropped element
//!   is silently skipped, never written.
//!
//! # Getting started
//!
//! Build an [`Orchestrator`] over a scroll strategy, watch regions, bind
//! descriptors, and tick it from the host's frame callback. For declarative
//! composition, describe sections with [`SceneBuilder`] and wire them with
//! [`mount_section`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod counter;
mod foundation;
mod orchestrator;
mod scene;
mod scroll;
mod trigger;
mod view;

pub use animation::descriptor::{AnimationDescriptor, PlayMode};
pub use animation::ease::Ease;
pub use animation::engine::{AnimationEngine, GroupId, PlayId};
pub use animation::prop::{Lerp, Prop, PropTrack};
pub use counter::{CounterEngine, CounterFrame, CounterId, CounterSink, CounterSpec};
pub use foundation::core::{
    scroll_progress, FrameClock, FrameTick, Point, Rect, Vec2, ViewportMetrics, NOMINAL_FRAME_MS,
};
pub use foundation::error::{GlissadeError, GlissadeResult};
pub use orchestrator::{Orchestrator, SharedOrchestrator};
pub use scene::dsl::{
    card_rise, fade_in, fade_up, parallax, scale_in, slide_in_left, slide_in_right, SceneBuilder,
    SectionBuilder, PARALLAX_UNIT_PX,
};
pub use scene::model::{SceneSpec, SectionEffect, SectionSpec};
pub use scene::mount::{mount_section, SectionElements, SectionMount};
pub use scroll::native::NativeScrollSource;
pub use scroll::smoothed::{SmoothedConfig, SmoothedScrollSource};
pub use scroll::source::{InputDelta, ScrollSource, ScrollSurface, ScrollTarget, ScrollToOpts};
pub use scroll::state::{ScrollDirection, ScrollState};
pub use trigger::region::{
    RegionConfig, RegionId, ReplayPolicy, TriggerEvent, TriggerEventKind,
};
pub use trigger::registry::TriggerRegistry;
pub use view::{ElementRef, ViewElement};
