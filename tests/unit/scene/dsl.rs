use super::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::descriptor::PlayMode;
use crate::counter::CounterFrame;
use crate::fixtures::{FakeElement, FakeSurface};
use crate::orchestrator::Orchestrator;
use crate::scene::mount::{mount_section, SectionElements};
use crate::scroll::native::NativeScrollSource;

#[test]
fn presets_encode_the_expected_motion() {
    let rise = card_rise();
    assert_eq!(rise.duration_ms, 500.0);
    assert_eq!(rise.tracks[1].prop, Prop::TranslateY);
    assert_eq!(rise.tracks[1].from, 50.0);
    assert_eq!(rise.mode, PlayMode::Discrete);

    let left = slide_in_left(600.0, 40.0);
    assert_eq!(left.tracks[1].from, -40.0);
    let right = slide_in_right(600.0, 40.0);
    assert_eq!(right.tracks[1].from, 40.0);

    let drift = parallax(-0.3);
    assert_eq!(drift.mode, PlayMode::Scrub);
    assert_eq!(drift.tracks[0].from, -0.3 * PARALLAX_UNIT_PX);
    assert_eq!(drift.tracks[0].to, 0.3 * PARALLAX_UNIT_PX);
}

#[test]
fn scene_builder_collects_valid_sections() {
    let scene = SceneBuilder::new()
        .section(
            SectionBuilder::new("models")
                .threshold(0.25)
                .entrance(fade_up(600.0, 20.0))
                .build()
                .unwrap(),
        )
        .section(
            SectionBuilder::new("performance")
                .threshold(0.3)
                .stagger_step_ms(100.0)
                .entrance(card_rise())
                .counter(CounterSpec::new(2.9, 2000.0).with_unit("seconds"))
                .parallax(-0.3)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    assert_eq!(scene.sections.len(), 2);
    assert_eq!(scene.section("performance").unwrap().effects.len(), 3);
}

#[test]
fn mounted_section_staggers_items_and_tears_down() {
    let surface = FakeSurface::new(600.0, 2000.0);
    let mut orch = Orchestrator::new(Box::new(NativeScrollSource::new()));

    let root = FakeElement::attached(900.0);
    let first_card = FakeElement::attached(950.0);
    let second_card = FakeElement::attached(1000.0);
    let elements = SectionElements {
        root: root.as_element(),
        items: vec![first_card.as_element(), second_card.as_element()],
    };

    let section = SectionBuilder::new("performance")
        .threshold(0.3)
        .stagger_step_ms(100.0)
        .entrance(AnimationDescriptor::discrete(
            vec![PropTrack::new(Prop::Opacity, 0.0, 1.0)],
            120.0,
            Ease::Linear,
        ))
        .build()
        .unwrap();
    let mount = mount_section(&mut orch, &section, &elements, &[]).unwrap();

    // Section still below the fold: nothing plays.
    let mut now = 0.0;
    orch.tick(now, &surface);
    assert_eq!(first_card.write_count(), 0);

    // Scroll the section into range and let the first frames run.
    root.top.set(Some(100.0));
    now += 16.0;
    orch.tick(now, &surface);
    now += 16.0;
    orch.tick(now, &surface);
    assert!(first_card.write_count() > 0);
    assert_eq!(
        second_card.write_count(),
        0,
        "second item must wait out its stagger offset"
    );

    for _ in 0..30 {
        now += 16.0;
        orch.tick(now, &surface);
    }
    assert_eq!(first_card.last(Prop::Opacity), Some(1.0));
    assert_eq!(second_card.last(Prop::Opacity), Some(1.0));

    mount.unmount(&mut orch);
    let frozen = (first_card.write_count(), second_card.write_count());
    for _ in 0..60 {
        now += 16.0;
        orch.tick(now, &surface);
    }
    assert_eq!(
        (first_card.write_count(), second_card.write_count()),
        frozen
    );
}

#[test]
fn mounted_counter_uses_supplied_sink() {
    let surface = FakeSurface::new(600.0, 2000.0);
    let mut orch = Orchestrator::new(Box::new(NativeScrollSource::new()));

    let root = FakeElement::attached(100.0);
    let elements = SectionElements {
        root: root.as_element(),
        items: vec![],
    };
    let section = SectionBuilder::new("performance")
        .threshold(0.3)
        .counter(CounterSpec::new(341.0, 200.0).with_unit("km/h"))
        .build()
        .unwrap();

    let values: Rc<RefCell<Vec<CounterFrame>>> = Rc::new(RefCell::new(Vec::new()));
    let inner = Rc::clone(&values);
    let sink: crate::counter::CounterSink =
        Rc::new(RefCell::new(move |frame: &CounterFrame| {
            inner.borrow_mut().push(frame.clone());
        }));
    let _mount = mount_section(&mut orch, &section, &elements, &[sink]).unwrap();

    let mut now = 0.0;
    for _ in 0..60 {
        orch.tick(now, &surface);
        now += 16.0;
    }
    let values = values.borrow();
    assert_eq!(values.last().unwrap().value, 341.0);
    assert_eq!(values.last().unwrap().text, "341");
}

#[test]
fn missing_counter_sinks_are_a_validation_error() {
    let mut orch = Orchestrator::new(Box::new(NativeScrollSource::new()));
    let root = FakeElement::attached(100.0);
    let elements = SectionElements {
        root: root.as_element(),
        items: vec![],
    };
    let section = SectionBuilder::new("performance")
        .counter(CounterSpec::new(341.0, 2000.0))
        .build()
        .unwrap();
    assert!(mount_section(&mut orch, &section, &elements, &[]).is_err());
}

#[test]
fn parallax_effect_drifts_the_root_with_scroll() {
    let surface = FakeSurface::new(600.0, 2000.0);
    let mut orch = Orchestrator::new(Box::new(NativeScrollSource::new()));
    let root = FakeElement::attached(600.0);
    let elements = SectionElements {
        root: root.as_element(),
        items: vec![],
    };
    let section = SectionBuilder::new("backdrop")
        .parallax(0.5)
        .build()
        .unwrap();
    let _mount = mount_section(&mut orch, &section, &elements, &[]).unwrap();

    orch.tick(0.0, &surface);
    assert_eq!(root.last(Prop::TranslateY), Some(0.5 * PARALLAX_UNIT_PX));

    root.top.set(Some(0.0));
    orch.tick(16.0, &surface);
    assert_eq!(root.last(Prop::TranslateY), Some(-0.5 * PARALLAX_UNIT_PX));
}
