use super::*;
use std::cell::RefCell;

use crate::animation::ease::Ease;
use crate::animation::prop::{Prop, PropTrack};
use crate::fixtures::{FakeElement, FakeSurface};
use crate::scroll::native::NativeScrollSource;
use crate::trigger::region::RegionConfig;

fn fade(duration_ms: f64) -> AnimationDescriptor {
    AnimationDescriptor::discrete(
        vec![PropTrack::new(Prop::Opacity, 0.0, 1.0)],
        duration_ms,
        Ease::Linear,
    )
}

fn native_orchestrator() -> Orchestrator {
    Orchestrator::new(Box::new(NativeScrollSource::new()))
}

fn recording_sink() -> (CounterSink, Rc<RefCell<Vec<f64>>>) {
    let values: Rc<RefCell<Vec<f64>>> = Rc::new(RefCell::new(Vec::new()));
    let inner = Rc::clone(&values);
    let sink: CounterSink = Rc::new(RefCell::new(move |frame: &crate::counter::CounterFrame| {
        inner.borrow_mut().push(frame.value);
    }));
    (sink, values)
}

#[test]
fn trigger_fired_this_frame_writes_this_frame() {
    let surface = FakeSurface::new(600.0, 2000.0);
    let mut orch = native_orchestrator();
    let element = FakeElement::attached(400.0);
    let region = orch
        .watch(&element.as_element(), RegionConfig::once(0.85))
        .unwrap();
    orch.bind_entrance(region, fade(500.0), &element.as_element(), 0.0)
        .unwrap();

    orch.tick(0.0, &surface);
    assert!(
        element.write_count() > 0,
        "entrance must start writing within the firing frame"
    );
}

#[test]
fn entrance_lands_exactly_on_its_end_state() {
    let surface = FakeSurface::new(600.0, 2000.0);
    let mut orch = native_orchestrator();
    let element = FakeElement::attached(400.0);
    let region = orch
        .watch(&element.as_element(), RegionConfig::once(0.85))
        .unwrap();
    orch.bind_entrance(region, fade(100.0), &element.as_element(), 0.0)
        .unwrap();

    let mut now = 0.0;
    for _ in 0..10 {
        orch.tick(now, &surface);
        now += 50.0;
    }
    assert_eq!(element.last(Prop::Opacity), Some(1.0));
    assert!(orch.is_settled());
}

#[test]
fn always_region_plays_reversed_on_exit() {
    let surface = FakeSurface::new(600.0, 2000.0);
    let mut orch = native_orchestrator();
    let section = FakeElement::attached(700.0);
    let region = orch
        .watch(&section.as_element(), RegionConfig::always(0.85))
        .unwrap();
    orch.bind_entrance(region, fade(100.0), &section.as_element(), 0.0)
        .unwrap();

    let mut now = 0.0;
    let mut advance = |orch: &mut Orchestrator, frames: usize| {
        for _ in 0..frames {
            orch.tick(now, &surface);
            now += 50.0;
        }
    };

    section.top.set(Some(400.0));
    advance(&mut orch, 5);
    assert_eq!(section.last(Prop::Opacity), Some(1.0));

    section.top.set(Some(700.0));
    advance(&mut orch, 5);
    assert_eq!(section.last(Prop::Opacity), Some(0.0));
}

#[test]
fn counter_binding_runs_to_exact_end() {
    let surface = FakeSurface::new(600.0, 2000.0);
    let mut orch = native_orchestrator();
    let element = FakeElement::attached(400.0);
    let region = orch
        .watch(&element.as_element(), RegionConfig::once(0.3))
        .unwrap();
    let (sink, values) = recording_sink();
    orch.bind_counter(region, CounterSpec::new(341.0, 200.0), sink)
        .unwrap();

    element.top.set(Some(100.0));
    let mut now = 0.0;
    for _ in 0..100 {
        orch.tick(now, &surface);
        now += 16.0;
    }
    let values = values.borrow();
    assert_eq!(*values.first().unwrap(), 0.0);
    assert_eq!(*values.last().unwrap(), 341.0);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn unwatch_cancels_everything_it_spawned() {
    let surface = FakeSurface::new(600.0, 2000.0);
    let mut orch = native_orchestrator();
    let element = FakeElement::attached(400.0);
    let region = orch
        .watch(&element.as_element(), RegionConfig::once(0.85))
        .unwrap();
    orch.bind_entrance(region, fade(5000.0), &element.as_element(), 0.0)
        .unwrap();
    let (sink, values) = recording_sink();
    orch.bind_counter(region, CounterSpec::new(720.0, 5000.0), sink)
        .unwrap();

    let mut now = 0.0;
    for _ in 0..3 {
        orch.tick(now, &surface);
        now += 16.0;
    }
    assert!(element.write_count() > 0);

    orch.unwatch(region);
    let writes = element.write_count();
    let samples = values.borrow().len();
    for _ in 0..60 {
        orch.tick(now, &surface);
        now += 16.0;
    }
    assert_eq!(element.write_count(), writes);
    assert_eq!(values.borrow().len(), samples);
    assert!(orch.is_settled());
}

#[test]
fn binding_to_an_unknown_region_is_rejected() {
    let mut orch = native_orchestrator();
    let element = FakeElement::attached(0.0);
    let region = orch
        .watch(&element.as_element(), RegionConfig::once(0.85))
        .unwrap();
    orch.unwatch(region);
    assert!(
        orch.bind_entrance(region, fade(100.0), &element.as_element(), 0.0)
            .is_err()
    );
}

#[test]
fn scrub_binding_follows_region_progress() {
    let surface = FakeSurface::new(600.0, 2000.0);
    let mut orch = native_orchestrator();
    let element = FakeElement::attached(600.0);
    let region = orch
        .watch(&element.as_element(), RegionConfig::scrub_range(1.0, 0.0))
        .unwrap();
    let drift = AnimationDescriptor::scrub(
        vec![PropTrack::new(Prop::TranslateY, 30.0, -30.0)],
        Ease::Linear,
    );
    orch.bind_scrub(region, drift, &element.as_element()).unwrap();

    orch.tick(0.0, &surface);
    assert_eq!(element.last(Prop::TranslateY), Some(30.0));

    element.top.set(Some(300.0));
    orch.tick(16.0, &surface);
    assert_eq!(element.last(Prop::TranslateY), Some(0.0));

    element.top.set(Some(-600.0));
    orch.tick(32.0, &surface);
    assert_eq!(element.last(Prop::TranslateY), Some(-30.0));
}

#[test]
fn shared_handle_drives_scroll_to() {
    let surface = FakeSurface::new(600.0, 2000.0);
    let shared = SharedOrchestrator::new(native_orchestrator());
    shared
        .scroll_to(
            ScrollTarget::Offset(300.0),
            ScrollToOpts {
                duration_ms: 100.0,
                ease: Ease::Linear,
            },
        )
        .unwrap();

    let mut now = 0.0;
    for _ in 0..5 {
        shared.tick(now, &surface);
        now += 50.0;
    }
    assert_eq!(shared.state().position, 300.0);
}
