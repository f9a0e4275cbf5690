use super::*;
use crate::fixtures::FakeElement;

fn metrics() -> ViewportMetrics {
    ViewportMetrics {
        height: 600.0,
        scroll_range: 2000.0,
    }
}

fn at_position(position: f64) -> ScrollState {
    ScrollState {
        position,
        ..ScrollState::default()
    }
}

fn entered_count(events: &[TriggerEvent]) -> usize {
    events
        .iter()
        .filter(|e| e.kind == TriggerEventKind::Entered)
        .count()
}

#[test]
fn once_policy_fires_exactly_once_across_crossings() {
    let mut registry = TriggerRegistry::new();
    let element = FakeElement::attached(700.0);
    let id = registry
        .register(&element.as_element(), RegionConfig::once(0.85))
        .unwrap();

    let mut total_entered = 0;
    for top in [700.0, 400.0, 700.0, 400.0, 900.0, 100.0] {
        element.top.set(Some(top));
        let events = registry.evaluate(metrics(), &at_position(0.0));
        total_entered += entered_count(&events);
        for event in &events {
            assert_eq!(event.region, id);
            assert_ne!(event.kind, TriggerEventKind::Exited, "once region exited");
        }
    }
    assert_eq!(total_entered, 1);
}

#[test]
fn always_policy_toggles_one_event_per_transition() {
    let mut registry = TriggerRegistry::new();
    let element = FakeElement::attached(700.0);
    let id = registry
        .register(&element.as_element(), RegionConfig::always(0.85))
        .unwrap();

    let mut kinds = Vec::new();
    for top in [700.0, 400.0, 410.0, 700.0, 400.0] {
        element.top.set(Some(top));
        for event in registry.evaluate(metrics(), &at_position(0.0)) {
            assert_eq!(event.region, id);
            kinds.push(event.kind);
        }
    }
    assert_eq!(
        kinds,
        vec![
            TriggerEventKind::Entered,
            TriggerEventKind::Exited,
            TriggerEventKind::Entered,
        ]
    );
}

#[test]
fn double_registration_is_idempotent() {
    let mut registry = TriggerRegistry::new();
    let element = FakeElement::attached(400.0);
    let config = RegionConfig::once(0.85);
    let first = registry.register(&element.as_element(), config).unwrap();
    let second = registry.register(&element.as_element(), config).unwrap();
    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);

    let events = registry.evaluate(metrics(), &at_position(0.0));
    assert_eq!(entered_count(&events), 1);

    // A different config on the same element is a distinct region.
    let third = registry
        .register(&element.as_element(), RegionConfig::once(0.3))
        .unwrap();
    assert_ne!(first, third);
}

#[test]
fn detached_elements_are_ignored_until_attachment() {
    let mut registry = TriggerRegistry::new();
    let element = FakeElement::detached();
    registry
        .register(&element.as_element(), RegionConfig::once(0.85))
        .unwrap();

    assert!(registry.evaluate(metrics(), &at_position(0.0)).is_empty());

    element.top.set(Some(100.0));
    let events = registry.evaluate(metrics(), &at_position(0.0));
    assert_eq!(entered_count(&events), 1);
}

#[test]
fn dropped_elements_produce_no_events_or_errors() {
    let mut registry = TriggerRegistry::new();
    let element = FakeElement::attached(100.0);
    registry
        .register(&element.as_element(), RegionConfig::once(0.85))
        .unwrap();
    drop(element);
    assert!(registry.evaluate(metrics(), &at_position(0.0)).is_empty());
}

#[test]
fn scrub_regions_emit_clamped_progress_on_change() {
    let mut registry = TriggerRegistry::new();
    let element = FakeElement::attached(600.0);
    registry
        .register(&element.as_element(), RegionConfig::scrub_range(1.0, 0.0))
        .unwrap();

    let mut observed = Vec::new();
    for top in [600.0, 300.0, 300.0, -300.0, -600.0] {
        element.top.set(Some(top));
        for event in registry.evaluate(metrics(), &at_position(0.0)) {
            match event.kind {
                TriggerEventKind::Scrub(p) => observed.push(p),
                other => panic!("unexpected event {other:?}"),
            }
        }
    }
    // Redundant geometry and past-the-range geometry do not re-emit.
    assert_eq!(observed, vec![0.0, 0.5, 1.0]);
}

#[test]
fn unreachable_threshold_never_fires() {
    let mut registry = TriggerRegistry::new();
    let element = FakeElement::attached(700.0);
    registry
        .register(&element.as_element(), RegionConfig::once(-5.0))
        .unwrap();
    for top in [700.0, 400.0, 100.0, -200.0] {
        element.top.set(Some(top));
        assert!(registry.evaluate(metrics(), &at_position(0.0)).is_empty());
    }
}

#[test]
fn zero_viewport_height_is_skipped() {
    let mut registry = TriggerRegistry::new();
    let element = FakeElement::attached(100.0);
    registry
        .register(&element.as_element(), RegionConfig::once(0.85))
        .unwrap();
    let flat = ViewportMetrics {
        height: 0.0,
        scroll_range: 2000.0,
    };
    assert!(registry.evaluate(flat, &at_position(0.0)).is_empty());
}

#[test]
fn offset_watchers_track_absolute_position() {
    let mut registry = TriggerRegistry::new();
    let id = registry.register_offset(50.0, ReplayPolicy::Always).unwrap();
    let again = registry.register_offset(50.0, ReplayPolicy::Always).unwrap();
    assert_eq!(id, again);

    let mut kinds = Vec::new();
    for position in [0.0, 60.0, 40.0, 80.0] {
        for event in registry.evaluate(metrics(), &at_position(position)) {
            kinds.push(event.kind);
        }
    }
    assert_eq!(
        kinds,
        vec![
            TriggerEventKind::Entered,
            TriggerEventKind::Exited,
            TriggerEventKind::Entered,
        ]
    );
}

#[test]
fn unregister_silences_a_region() {
    let mut registry = TriggerRegistry::new();
    let element = FakeElement::attached(700.0);
    let id = registry
        .register(&element.as_element(), RegionConfig::always(0.85))
        .unwrap();
    registry.unregister(id);
    assert!(registry.is_empty());

    element.top.set(Some(100.0));
    assert!(registry.evaluate(metrics(), &at_position(0.0)).is_empty());
}
